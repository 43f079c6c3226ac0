//! Highlights the navigation link of the section currently under the header.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::ScrollSpyConfig;
use crate::dom::NodeId;
use crate::page::{EventTarget, Page};
use crate::rate_limit::Throttled;

pub struct ScrollSpy {
    guard: InitGuard,
    config: Rc<ScrollSpyConfig>,
}

struct Spy {
    sections: Vec<NodeId>,
    links: Vec<NodeId>,
    config: Rc<ScrollSpyConfig>,
}

impl Spy {
    fn update(&self, page: &mut Page) -> Result<()> {
        let position = page.scroll_y() + self.config.lookahead;
        for &section in &self.sections {
            let top = page.offset_top(section);
            let bottom = top + page.offset_height(section);
            if !(top <= position && position < bottom) {
                continue;
            }
            let Some(id) = page.dom().attr(section, "id") else {
                continue;
            };
            let href = format!("#{id}");
            let dom = page.dom_mut();
            for &link in &self.links {
                dom.class_remove(link, &self.config.active_class)?;
                dom.remove_attr(link, "aria-current")?;
            }
            for &link in &self.links {
                if dom.attr(link, "href").as_deref() == Some(href.as_str()) {
                    dom.class_add(link, &self.config.active_class)?;
                    dom.set_attr(link, "aria-current", "page")?;
                }
            }
        }
        Ok(())
    }
}

impl ScrollSpy {
    pub fn new(config: Rc<ScrollSpyConfig>) -> Self {
        Self {
            guard: InitGuard::new("scroll_spy"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }

        let sections = page.query_selector_all(&self.config.sections)?;
        let links = page.query_selector_all(&self.config.links)?;
        if sections.is_empty() || links.is_empty() {
            tracing::debug!(
                sections = sections.len(),
                links = links.len(),
                "no sections or section links; scroll spy disabled"
            );
            return Ok(());
        }

        let spy = Rc::new(Spy {
            sections,
            links,
            config: Rc::clone(&self.config),
        });
        let s = Rc::clone(&spy);
        let on_scroll =
            Throttled::new(self.config.throttle_ms, move |page: &mut Page| s.update(page));
        page.add_event_listener(EventTarget::Window, "scroll", move |page, _| {
            on_scroll.trigger(page)?;
            Ok(())
        });
        spy.update(page)?;

        tracing::debug!(sections = spy.sections.len(), "scroll spy ready");
        Ok(())
    }
}
