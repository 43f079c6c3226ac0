use std::rc::Rc;

use site_behaviors::{App, EventTarget, Page, ReadyState, SiteConfig};

const SITE_HTML: &str = include_str!("fixtures/index.html");

#[test]
fn boot_waits_for_dom_content_loaded() -> site_behaviors::Result<()> {
    let mut page = Page::loading_from_html_with_url("https://muster-handwerk.test/", SITE_HTML)?;
    let app = Rc::new(App::new(SiteConfig::default()));
    app.boot(&mut page)?;

    page.assert_not_exists(".c-scroll-to-top")?;
    page.click("#menu-toggle")?;
    page.assert_class("#nav", "show", false)?;

    page.finish_loading()?;
    assert_eq!(page.ready_state(), ReadyState::Complete);
    page.assert_exists(".c-scroll-to-top")?;
    page.click("#menu-toggle")?;
    page.assert_class("#nav", "show", true)?;
    Ok(())
}

#[test]
fn repeated_boot_installs_every_feature_once() -> site_behaviors::Result<()> {
    let mut page = Page::from_html_with_url("https://muster-handwerk.test/", SITE_HTML)?;
    let app = Rc::new(App::new(SiteConfig::default()));
    app.boot(&mut page)?;

    let document = EventTarget::Node(page.document());
    let counts = |page: &Page| {
        (
            page.listener_count(document, "click"),
            page.listener_count(document, "keydown"),
            page.listener_count(EventTarget::Window, "scroll"),
            page.listener_count(EventTarget::Window, "resize"),
        )
    };
    let installed = counts(&page);

    app.boot(&mut page)?;
    app.init(&mut page)?;
    assert_eq!(counts(&page), installed);
    assert_eq!(page.count(".c-scroll-to-top")?, 1);

    page.click("#menu-toggle")?;
    page.assert_class("#nav", "show", true)?;
    Ok(())
}

#[test]
fn pages_without_markup_boot_quietly() -> site_behaviors::Result<()> {
    for html in ["<p>Leer</p>", "<body><main>Nur Text</main></body>"] {
        let mut page = Page::from_html(html)?;
        Rc::new(App::new(SiteConfig::default())).boot(&mut page)?;
        page.press_key("Escape")?;
        page.scroll_window_to(500.0)?;
        page.flush()?;
    }
    Ok(())
}

#[test]
fn configuration_renames_the_markup_contract() -> site_behaviors::Result<()> {
    let config = SiteConfig::from_json(
        r##"{
            "nav_menu": { "toggle": ".menu-button", "panel": "#menu", "open_class": "is-open" },
            "scroll_to_top": { "button_class": "back-to-top", "label": "Back to top" }
        }"##,
    )?;
    let mut page = Page::from_html(
        r#"<body>
            <button class="menu-button" aria-expanded="false">Menu</button>
            <ul id="menu"><li><a class="nav-link" href="/">Home</a></li></ul>
        </body>"#,
    )?;
    App::new(config).init(&mut page)?;

    page.click(".menu-button")?;
    page.assert_class("#menu", "is-open", true)?;
    page.assert_attr(".back-to-top", "aria-label", Some("Back to top"))?;
    page.assert_not_exists(".c-scroll-to-top")?;
    Ok(())
}

#[test]
fn trace_records_dispatch_and_timers() -> site_behaviors::Result<()> {
    let mut page = Page::from_html_with_url("https://muster-handwerk.test/", SITE_HTML)?;
    App::new(SiteConfig::default()).init(&mut page)?;
    page.enable_trace(true);

    page.click("#nav-contact")?;
    page.flush()?;
    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.starts_with("[event] click")));
    assert!(logs.iter().any(|line| line.starts_with("[timer] run frame")));
    assert!(page.take_trace_logs().is_empty());
    Ok(())
}
