//! Smooth scrolling for in-page anchor links, offset by the fixed header.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::SmoothScrollConfig;
use crate::dom::NodeId;
use crate::page::{Event, EventTarget, Page, ScrollBehavior};

/// Animates in-page anchor links, leaving room for the fixed header.
pub struct SmoothScroll {
    guard: InitGuard,
    config: Rc<SmoothScrollConfig>,
}

impl SmoothScroll {
    pub fn new(config: Rc<SmoothScrollConfig>) -> Self {
        Self {
            guard: InitGuard::new("smooth_scroll"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        let config = Rc::clone(&self.config);
        let document = EventTarget::Node(page.document());
        page.add_event_listener(document, "click", move |page, event| {
            on_click(page, event, &config)
        });
        tracing::debug!("smooth scrolling ready");
        Ok(())
    }
}

fn in_page_target(page: &Page, href: &str) -> Option<NodeId> {
    if matches!(href, "#" | "#!") {
        return None;
    }
    let id = href.strip_prefix('#')?;
    page.dom().by_id(id)
}

fn on_click(page: &mut Page, event: &mut Event, config: &SmoothScrollConfig) -> Result<()> {
    let Some(link) = event
        .target_node()
        .and_then(|node| page.dom().find_ancestor_by_tag(node, "a"))
    else {
        return Ok(());
    };
    let Some(href) = page.dom().attr(link, "href") else {
        return Ok(());
    };
    let Some(target) = in_page_target(page, &href) else {
        return Ok(());
    };

    event.prevent_default();
    let header_offset = match page.query_selector(&config.header)? {
        Some(header) => page.offset_height(header),
        None => config.fallback_header_offset,
    };
    let element_top = page.bounding_client_rect(target).top + page.scroll_y();
    page.scroll_to(element_top - header_offset, ScrollBehavior::Smooth)?;
    page.push_state(&href)
}
