use std::rc::Rc;

use site_behaviors::{App, Page, SiteConfig};

const SITE_HTML: &str = include_str!("fixtures/index.html");

fn site(url: &str) -> site_behaviors::Result<Page> {
    let mut page = Page::from_html_with_url(url, SITE_HTML)?;
    page.set_layout(".l-header", 0.0, 72.0)?;
    page.set_layout("#hero", 72.0, 600.0)?;
    page.set_layout("#section-1", 672.0, 1_200.0)?;
    page.set_layout("#stat-projects", 900.0, 80.0)?;
    page.set_layout("#section-2", 1_872.0, 900.0)?;
    let app = Rc::new(App::new(SiteConfig::default()));
    app.boot(&mut page)?;
    Ok(page)
}

fn assert_menu_open(page: &Page, open: bool) -> site_behaviors::Result<()> {
    page.assert_class("#nav", "show", open)?;
    page.assert_attr(
        "#menu-toggle",
        "aria-expanded",
        Some(if open { "true" } else { "false" }),
    )?;
    page.assert_class("body", "u-no-scroll", open)?;
    Ok(())
}

#[test]
fn menu_closes_on_escape_outside_click_and_link_click() -> site_behaviors::Result<()> {
    let mut page = site("https://muster-handwerk.test/")?;

    page.click("#menu-toggle")?;
    assert_menu_open(&page, true)?;
    page.press_key("Escape")?;
    assert_menu_open(&page, false)?;

    page.click("#menu-toggle")?;
    page.press_key("Enter")?;
    assert_menu_open(&page, true)?;
    page.click("#content")?;
    assert_menu_open(&page, false)?;

    page.click("#menu-toggle")?;
    page.click("#nav-services")?;
    assert_menu_open(&page, false)?;
    assert_eq!(page.style("#nav", "max-height")?, "0");
    Ok(())
}

#[test]
fn menu_closes_after_debounced_resize_to_desktop() -> site_behaviors::Result<()> {
    let mut page = site("https://muster-handwerk.test/")?;
    page.resize(375.0, 800.0)?;
    page.click("#menu-toggle")?;

    page.resize(800.0, 800.0)?;
    page.advance_time(150)?;
    assert_menu_open(&page, true)?;

    page.resize(1_000.0, 800.0)?;
    page.advance_time(100)?;
    page.resize(1_024.0, 800.0)?;
    page.advance_time(149)?;
    assert_menu_open(&page, true)?;
    page.advance_time(1)?;
    assert_menu_open(&page, false)?;
    Ok(())
}

#[test]
fn anchor_links_scroll_below_the_header_without_reloading() -> site_behaviors::Result<()> {
    let mut page = site("https://muster-handwerk.test/")?;
    page.click("#nav-contact")?;

    assert_eq!(page.location_hash(), "#section-2");
    assert_eq!(page.history_length(), 2);
    assert!(page.take_location_navigations().is_empty());
    assert!(page.is_smooth_scrolling());

    page.flush()?;
    assert_eq!(page.scroll_y(), 1_800.0);
    assert!(!page.is_smooth_scrolling());
    Ok(())
}

#[test]
fn scroll_spy_follows_the_reader() -> site_behaviors::Result<()> {
    let mut page = site("https://muster-handwerk.test/")?;
    page.assert_class("#nav-services", "active", false)?;
    page.assert_class("#nav-contact", "active", false)?;

    page.scroll_window_to(700.0)?;
    page.assert_class("#nav-services", "active", true)?;
    page.assert_attr("#nav-services", "aria-current", Some("page"))?;

    page.advance_time(100)?;
    page.scroll_window_to(1_790.0)?;
    page.assert_class("#nav-services", "active", false)?;
    page.assert_attr("#nav-services", "aria-current", None)?;
    page.assert_class("#nav-contact", "active", true)?;
    Ok(())
}

#[test]
fn page_links_are_marked_by_path() -> site_behaviors::Result<()> {
    let page = site("https://muster-handwerk.test/karriere.html")?;
    page.assert_class("#nav-jobs", "active", true)?;
    page.assert_attr("#nav-jobs", "aria-current", Some("page"))?;
    page.assert_class("#nav-home", "active", false)?;

    let page = site("https://muster-handwerk.test/index.html")?;
    page.assert_class("#nav-home", "active", true)?;
    page.assert_class("#nav-jobs", "active", false)?;
    Ok(())
}

#[test]
fn external_links_still_navigate() -> site_behaviors::Result<()> {
    let mut page = site("https://muster-handwerk.test/")?;
    page.click("#nav-jobs")?;
    let navigations = page.take_location_navigations();
    assert_eq!(navigations.len(), 1);
    assert_eq!(navigations[0].to, "https://muster-handwerk.test/karriere.html");
    Ok(())
}
