//! Marks the navigation link that points at the current page.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::ActiveMenuConfig;
use crate::page::Page;

/// Marks the navigation link that points at the current page.
pub struct ActiveMenu {
    guard: InitGuard,
    config: Rc<ActiveMenuConfig>,
}

impl ActiveMenu {
    pub fn new(config: Rc<ActiveMenuConfig>) -> Self {
        Self {
            guard: InitGuard::new("active_menu"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        let path = page.location_pathname();
        let links = page.query_selector_all(&self.config.links)?;
        let dom = page.dom_mut();
        for link in links {
            dom.class_remove(link, &self.config.active_class)?;
            dom.remove_attr(link, "aria-current")?;
            let Some(href) = dom.attr(link, "href") else {
                continue;
            };
            if is_current(&path, &href) {
                dom.class_add(link, &self.config.active_class)?;
                dom.set_attr(link, "aria-current", "page")?;
            }
        }
        Ok(())
    }
}

fn is_root(path: &str) -> bool {
    matches!(path, "/" | "/index.html")
}

/// Exact match, `/` and `/index.html` as the same page, or `path` below `href`.
fn is_current(path: &str, href: &str) -> bool {
    if path == href || (is_root(path) && is_root(href)) {
        return true;
    }
    !href.is_empty() && href != "/" && path.starts_with(href)
}
