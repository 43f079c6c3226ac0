//! Collapsible navigation panel.
//!
//! Closed by default. The toggle flips the state; Escape, a click outside toggle and
//! panel, a navigation link click, or a (debounced) resize to desktop width close it.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::NavMenuConfig;
use crate::dom::NodeId;
use crate::page::{EventTarget, Page};
use crate::rate_limit::Debounced;

pub struct NavMenu {
    guard: InitGuard,
    config: Rc<NavMenuConfig>,
}

struct Menu {
    toggle: NodeId,
    panel: NodeId,
    config: Rc<NavMenuConfig>,
}

impl Menu {
    fn is_open(&self, page: &Page) -> bool {
        page.dom().class_contains(self.panel, &self.config.open_class)
    }

    fn open(&self, page: &mut Page) -> Result<()> {
        let body = page.body();
        let dom = page.dom_mut();
        dom.class_add(self.panel, &self.config.open_class)?;
        dom.set_attr(self.toggle, "aria-expanded", "true")?;
        if let Some(body) = body {
            dom.class_add(body, &self.config.no_scroll_class)?;
        }
        dom.style_set(self.panel, "max-height", &self.config.open_max_height)
    }

    fn close(&self, page: &mut Page) -> Result<()> {
        let body = page.body();
        let dom = page.dom_mut();
        dom.class_remove(self.panel, &self.config.open_class)?;
        dom.set_attr(self.toggle, "aria-expanded", "false")?;
        if let Some(body) = body {
            dom.class_remove(body, &self.config.no_scroll_class)?;
        }
        dom.style_set(self.panel, "max-height", "0")
    }

    fn close_if_open(&self, page: &mut Page) -> Result<()> {
        if self.is_open(page) {
            self.close(page)?;
        }
        Ok(())
    }
}

impl NavMenu {
    pub fn new(config: Rc<NavMenuConfig>) -> Self {
        Self {
            guard: InitGuard::new("nav_menu"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }

        let toggle = page.query_selector(&self.config.toggle)?;
        let panel = page.query_selector(&self.config.panel)?;
        let (Some(toggle), Some(panel)) = (toggle, panel) else {
            tracing::debug!(
                toggle = %self.config.toggle,
                panel = %self.config.panel,
                "navigation toggle or panel missing; menu disabled"
            );
            return Ok(());
        };

        let menu = Rc::new(Menu {
            toggle,
            panel,
            config: Rc::clone(&self.config),
        });

        let m = Rc::clone(&menu);
        page.add_event_listener(EventTarget::Node(toggle), "click", move |page, event| {
            event.prevent_default();
            if m.is_open(page) {
                m.close(page)
            } else {
                m.open(page)
            }
        });

        let document = EventTarget::Node(page.document());
        let m = Rc::clone(&menu);
        page.add_event_listener(document, "keydown", move |page, event| {
            if event.key() == Some("Escape") {
                m.close_if_open(page)?;
            }
            Ok(())
        });

        let m = Rc::clone(&menu);
        page.add_event_listener(document, "click", move |page, event| {
            let Some(target) = event.target_node() else {
                return Ok(());
            };
            let dom = page.dom();
            if dom.contains(m.panel, target) || dom.contains(m.toggle, target) {
                return Ok(());
            }
            m.close_if_open(page)
        });

        for link in page.query_selector_all(&self.config.links)? {
            let m = Rc::clone(&menu);
            page.add_event_listener(EventTarget::Node(link), "click", move |page, _| {
                m.close_if_open(page)
            });
        }

        let m = Rc::clone(&menu);
        let breakpoint = self.config.desktop_breakpoint;
        let on_resize = Debounced::new(self.config.resize_debounce_ms, move |page: &mut Page| {
            if page.inner_width() >= breakpoint {
                m.close_if_open(page)?;
            }
            Ok(())
        });
        page.add_event_listener(EventTarget::Window, "resize", move |page, _| {
            on_resize.trigger(page);
            Ok(())
        });

        tracing::debug!("navigation menu ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r##"<body>
        <button class="navbar-toggler" aria-expanded="false">Menu</button>
        <div class="navbar-collapse"><a class="nav-link" href="#section-1">Eins</a></div>
        <main id="content">Text</main>
    </body>"##;

    fn installed() -> Result<Page> {
        let mut page = Page::from_html(MENU)?;
        NavMenu::new(Rc::new(NavMenuConfig::default())).init(&mut page)?;
        Ok(page)
    }

    #[test]
    fn toggle_opens_and_closes() -> Result<()> {
        let mut page = installed()?;
        page.click(".navbar-toggler")?;
        page.assert_class(".navbar-collapse", "show", true)?;
        page.assert_attr(".navbar-toggler", "aria-expanded", Some("true"))?;
        page.assert_class("body", "u-no-scroll", true)?;
        assert_eq!(
            page.style(".navbar-collapse", "max-height")?,
            "calc(100vh - var(--header-h))"
        );

        page.click(".navbar-toggler")?;
        page.assert_class(".navbar-collapse", "show", false)?;
        page.assert_class("body", "u-no-scroll", false)?;
        assert_eq!(page.style(".navbar-collapse", "max-height")?, "0");
        Ok(())
    }

    #[test]
    fn clicks_inside_the_panel_keep_it_open() -> Result<()> {
        let mut page = installed()?;
        page.click(".navbar-toggler")?;
        page.click(".navbar-collapse")?;
        page.assert_class(".navbar-collapse", "show", true)?;
        page.click("#content")?;
        page.assert_class(".navbar-collapse", "show", false)?;
        Ok(())
    }

    #[test]
    fn missing_panel_is_a_silent_no_op() -> Result<()> {
        let mut page = Page::from_html("<body><button class='navbar-toggler'></button></body>")?;
        NavMenu::new(Rc::new(NavMenuConfig::default())).init(&mut page)?;
        page.click(".navbar-toggler")?;
        page.assert_attr(".navbar-toggler", "aria-expanded", None)?;
        Ok(())
    }
}
