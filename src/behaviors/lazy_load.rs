//! Defers loading of images and videos that are not needed for the first paint.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::LazyLoadConfig;
use crate::page::Page;

/// Opts non-critical media into native deferred loading.
pub struct LazyLoad {
    guard: InitGuard,
    config: Rc<LazyLoadConfig>,
}

impl LazyLoad {
    pub fn new(config: Rc<LazyLoadConfig>) -> Self {
        Self {
            guard: InitGuard::new("lazy_load"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        let images = page.query_selector_all("img:not([loading])")?;
        let videos = page.query_selector_all("video:not([loading])")?;

        let mut deferred = 0usize;
        let dom = page.dom_mut();
        for image in images {
            let is_logo = dom.class_contains(image, &self.config.logo_class);
            let is_critical = dom.has_attr(image, &self.config.critical_attr)
                || dom.closest(image, &self.config.hero)?.is_some();
            if !is_logo && !is_critical {
                dom.set_attr(image, "loading", "lazy")?;
                deferred += 1;
            }
        }
        for video in videos {
            dom.set_attr(video, "loading", "lazy")?;
            deferred += 1;
        }
        tracing::debug!(deferred, "lazy loading assigned");
        Ok(())
    }
}
