use std::rc::Rc;

use site_behaviors::behaviors::{ToastKind, Toasts};
use site_behaviors::{App, EventTarget, Page, SiteConfig, ToastConfig};

const SITE_HTML: &str = include_str!("fixtures/index.html");

fn site() -> site_behaviors::Result<Page> {
    let mut page = Page::from_html_with_url("https://muster-handwerk.test/", SITE_HTML)?;
    page.set_layout(".l-header", 0.0, 72.0)?;
    page.set_layout("#section-1", 672.0, 1_200.0)?;
    page.set_layout("#stat-projects", 900.0, 80.0)?;
    page.set_layout("#stat-clients", 900.0, 80.0)?;
    page.set_layout("#section-2", 1_872.0, 900.0)?;
    App::new(SiteConfig::default()).init(&mut page)?;
    Ok(page)
}

#[test]
fn stats_count_up_once_when_scrolled_into_view() -> site_behaviors::Result<()> {
    let mut page = site()?;
    page.assert_text("#stat-projects", "150%")?;

    page.scroll_window_to(200.0)?;
    page.assert_text("#stat-projects", "0%")?;
    page.assert_text("#stat-clients", "0+")?;
    page.assert_attr("#stat-projects", "data-suffix", Some("%"))?;

    page.advance_time(2_200)?;
    page.assert_text("#stat-projects", "150%")?;
    page.assert_text("#stat-clients", "25+")?;

    page.scroll_window_to(0.0)?;
    page.advance_time(100)?;
    page.scroll_window_to(200.0)?;
    page.assert_text("#stat-projects", "150%")?;
    Ok(())
}

#[test]
fn stats_are_staggered() -> site_behaviors::Result<()> {
    let mut page = site()?;
    page.scroll_window_to(200.0)?;
    page.advance_time(2_050)?;
    page.assert_text("#stat-projects", "150%")?;
    let clients = page.text("#stat-clients")?;
    assert_ne!(clients, "25+", "second stat starts 100 ms later");
    page.flush()?;
    page.assert_text("#stat-clients", "25+")?;
    Ok(())
}

#[test]
fn accordion_panels_toggle_independently() -> site_behaviors::Result<()> {
    let mut page = site()?;
    page.click("#faq-1")?;
    page.click("#faq-2")?;
    page.assert_class("#faq-1-body", "show", true)?;
    page.assert_class("#faq-2-body", "show", true)?;

    page.click("#faq-1")?;
    page.assert_class("#faq-1-body", "show", false)?;
    page.assert_class("#faq-1", "collapsed", true)?;
    page.assert_attr("#faq-1", "aria-expanded", Some("false"))?;
    page.assert_class("#faq-2-body", "show", true)?;
    Ok(())
}

#[test]
fn privacy_modal_lifecycle() -> site_behaviors::Result<()> {
    let mut page = site()?;
    let document = EventTarget::Node(page.document());
    let keydown_before = page.listener_count(document, "keydown");

    page.click("#privacy-inline")?;
    page.assert_exists(".c-modal-overlay")?;
    page.assert_class("body", "u-no-scroll", true)?;
    page.assert_text(".c-modal p a", "Vollständige Datenschutzerklärung anzeigen")?;
    assert_eq!(page.location_hash(), "");

    page.click(".c-modal")?;
    page.assert_exists(".c-modal-overlay")?;
    page.press_key("Escape")?;
    page.assert_not_exists(".c-modal-overlay")?;
    page.assert_class("body", "u-no-scroll", false)?;
    assert_eq!(page.listener_count(document, "keydown"), keydown_before);

    page.click("#privacy-page")?;
    page.assert_not_exists(".c-modal-overlay")?;
    assert_eq!(page.location_pathname(), "/privacy.html");
    Ok(())
}

#[test]
fn scroll_to_top_button_appears_and_returns_home() -> site_behaviors::Result<()> {
    let mut page = site()?;
    assert_eq!(page.count(".c-scroll-to-top")?, 1);
    assert!(
        page.dump_dom(".c-scroll-to-top")?
            .contains("aria-label=\"Nach oben scrollen\"")
    );
    assert_eq!(page.style(".c-scroll-to-top", "visibility")?, "hidden");

    page.scroll_window_to(1_000.0)?;
    assert_eq!(page.style(".c-scroll-to-top", "opacity")?, "1");

    page.click(".c-scroll-to-top")?;
    assert!(page.is_smooth_scrolling());
    page.flush()?;
    assert_eq!(page.scroll_y(), 0.0);

    page.advance_time(100)?;
    page.scroll_window_to(10.0)?;
    assert_eq!(page.style(".c-scroll-to-top", "opacity")?, "0");
    Ok(())
}

#[test]
fn non_critical_media_is_lazy() -> site_behaviors::Result<()> {
    let page = site()?;
    page.assert_attr("#logo", "loading", None)?;
    page.assert_attr("#hero-img", "loading", None)?;
    page.assert_attr("#award-img", "loading", None)?;
    page.assert_attr("#team-img", "loading", Some("lazy"))?;
    page.assert_attr("#promo", "loading", Some("lazy"))?;
    Ok(())
}

#[test]
fn toasts_stack_and_expire() -> site_behaviors::Result<()> {
    let mut page = Page::from_html("<body><main></main></body>")?;
    let toasts = Toasts::new(Rc::new(ToastConfig::default()));
    toasts.show(&mut page, "Gespeichert", ToastKind::Success)?;
    toasts.show(&mut page, "Hinweis", ToastKind::Info)?;
    assert_eq!(page.count("#toast-container > .c-toast")?, 2);
    page.assert_text(".c-toast--info", "Hinweis")?;

    page.advance_time(5_000)?;
    assert_eq!(page.count(".c-toast")?, 2);
    page.advance_time(300)?;
    assert_eq!(page.count(".c-toast")?, 0);
    page.assert_exists("#toast-container")?;
    Ok(())
}
