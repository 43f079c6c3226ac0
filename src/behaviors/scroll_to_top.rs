//! Floating "back to top" button, shown once the page is scrolled past a threshold.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::ScrollToTopConfig;
use crate::dom::NodeId;
use crate::page::{EventTarget, Page, ScrollBehavior};
use crate::rate_limit::Throttled;

const BUTTON_STYLE: &str = "position:fixed;bottom:20px;right:20px;width:50px;height:50px;\
    border-radius:50%;background:var(--color-primary);color:white;border:none;cursor:pointer;\
    opacity:0;visibility:hidden;transition:all 0.3s;z-index:999;font-size:24px;\
    box-shadow:var(--shadow-md);";

pub struct ScrollToTop {
    guard: InitGuard,
    config: Rc<ScrollToTopConfig>,
}

impl ScrollToTop {
    pub fn new(config: Rc<ScrollToTopConfig>) -> Self {
        Self {
            guard: InitGuard::new("scroll_to_top"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        let Some(body) = page.body() else {
            tracing::debug!("no <body>; scroll-to-top button not injected");
            return Ok(());
        };

        let dom = page.dom_mut();
        let button = dom.create_detached_element("button");
        dom.set_attr(button, "class", &self.config.button_class)?;
        dom.set_attr(button, "aria-label", &self.config.label)?;
        dom.set_text_content(button, "↑")?;
        dom.set_style_text(button, BUTTON_STYLE)?;
        dom.append_child(body, button)?;

        page.add_event_listener(EventTarget::Node(button), "click", |page, _| {
            page.scroll_to(0.0, ScrollBehavior::Smooth)
        });

        let threshold = self.config.threshold;
        let on_scroll = Throttled::new(self.config.throttle_ms, move |page: &mut Page| {
            toggle(page, button, threshold)
        });
        page.add_event_listener(EventTarget::Window, "scroll", move |page, _| {
            on_scroll.trigger(page)?;
            Ok(())
        });
        toggle(page, button, threshold)
    }
}

fn toggle(page: &mut Page, button: NodeId, threshold: f64) -> Result<()> {
    let (opacity, visibility) = if page.scroll_y() > threshold {
        ("1", "visible")
    } else {
        ("0", "hidden")
    };
    let dom = page.dom_mut();
    dom.style_set(button, "opacity", opacity)?;
    dom.style_set(button, "visibility", visibility)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed() -> Result<Page> {
        let mut page = Page::from_html("<body><main>Inhalt</main></body>")?;
        ScrollToTop::new(Rc::new(ScrollToTopConfig::default())).init(&mut page)?;
        Ok(page)
    }

    #[test]
    fn injects_a_hidden_labelled_button() -> Result<()> {
        let page = installed()?;
        page.assert_text(".c-scroll-to-top", "↑")?;
        page.assert_attr(".c-scroll-to-top", "aria-label", Some("Nach oben scrollen"))?;
        assert_eq!(page.style(".c-scroll-to-top", "opacity")?, "0");
        assert_eq!(page.style(".c-scroll-to-top", "visibility")?, "hidden");
        assert_eq!(page.style(".c-scroll-to-top", "position")?, "fixed");
        Ok(())
    }

    #[test]
    fn shows_past_threshold_and_scrolls_home_on_click() -> Result<()> {
        let mut page = installed()?;
        page.advance_time(100)?;
        page.scroll_window_to(301.0)?;
        assert_eq!(page.style(".c-scroll-to-top", "opacity")?, "1");
        assert_eq!(page.style(".c-scroll-to-top", "visibility")?, "visible");

        page.click(".c-scroll-to-top")?;
        page.flush()?;
        assert_eq!(page.scroll_y(), 0.0);
        Ok(())
    }

    #[test]
    fn exactly_at_threshold_stays_hidden() -> Result<()> {
        let mut page = installed()?;
        page.advance_time(100)?;
        page.scroll_window_to(300.0)?;
        assert_eq!(page.style(".c-scroll-to-top", "visibility")?, "hidden");
        Ok(())
    }
}
