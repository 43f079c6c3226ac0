use url::Url;

use super::{EventTarget, Page};
use crate::animation::{FrameAnimation, ease_in_out};
use crate::dom::{LayoutBox, NodeId};
use crate::{Error, Result};

/// Length of a smooth `scroll_to`.
pub const SMOOTH_SCROLL_DURATION_MS: i64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationNavigationKind {
    /// Script assigned `location.href`.
    HrefSet,
    /// Default action of a followed link.
    Hyperlink,
    /// Default action of an un-prevented form submission.
    FormSubmit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigation {
    pub kind: LocationNavigationKind,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Viewport {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) scroll_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
        }
    }
}

#[derive(Debug)]
pub(crate) struct LocationHistory {
    pub(crate) url: Url,
    entries: Vec<Url>,
    index: usize,
    navigations: Vec<LocationNavigation>,
}

impl LocationHistory {
    pub(crate) fn new(url: Url) -> Self {
        Self {
            entries: vec![url.clone()],
            url,
            index: 0,
            navigations: Vec::new(),
        }
    }

    fn push_entry(&mut self, url: Url) {
        let next = self.index.saturating_add(1).min(self.entries.len());
        self.entries.truncate(next);
        self.entries.push(url.clone());
        self.index = self.entries.len().saturating_sub(1);
        self.url = url;
    }
}

fn is_hash_only_navigation(from: &Url, to: &Url) -> bool {
    let mut from_base = from.clone();
    from_base.set_fragment(None);
    let mut to_base = to.clone();
    to_base.set_fragment(None);
    from_base == to_base && to.fragment().is_some()
}

impl Page {
    pub fn inner_width(&self) -> f64 {
        self.viewport.width
    }

    pub fn inner_height(&self) -> f64 {
        self.viewport.height
    }

    /// Vertical scroll offset of the window (`pageYOffset`).
    pub fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    /// Changes the viewport size and dispatches `resize` on the window.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<()> {
        self.viewport.width = width;
        self.viewport.height = height;
        self.dispatch_event(EventTarget::Window, "resize")?;
        Ok(())
    }

    /// Scrolls the window. A smooth scroll replaces any smooth scroll still running.
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> Result<()> {
        if let Some(previous) = self.smooth_scroll.take() {
            previous.cancel(self);
        }
        let target = top.max(0.0);
        match behavior {
            ScrollBehavior::Instant => self.apply_scroll(target),
            ScrollBehavior::Smooth => {
                let from = self.viewport.scroll_y;
                let handle = FrameAnimation::start(
                    self,
                    SMOOTH_SCROLL_DURATION_MS,
                    move |page, progress| {
                        let eased = ease_in_out(progress);
                        page.apply_scroll(from + (target - from) * eased)
                    },
                );
                self.smooth_scroll = Some(handle);
                Ok(())
            }
        }
    }

    pub fn is_smooth_scrolling(&self) -> bool {
        self.smooth_scroll
            .as_ref()
            .is_some_and(|handle| handle.is_running())
    }

    fn apply_scroll(&mut self, top: f64) -> Result<()> {
        if (self.viewport.scroll_y - top).abs() < f64::EPSILON {
            return Ok(());
        }
        self.viewport.scroll_y = top;
        self.dispatch_event(EventTarget::Window, "scroll")?;
        Ok(())
    }

    /// Assigns the document-relative box of the first element matching `selector`.
    pub fn set_layout(&mut self, selector: &str, top: f64, height: f64) -> Result<()> {
        let node = self.select_one(selector)?;
        self.dom.set_layout(node, LayoutBox { top, height })
    }

    pub fn offset_top(&self, node: NodeId) -> f64 {
        self.dom.layout(node).top
    }

    pub fn offset_height(&self, node: NodeId) -> f64 {
        self.dom.layout(node).height
    }

    /// Viewport-relative box, like `getBoundingClientRect`.
    pub fn bounding_client_rect(&self, node: NodeId) -> LayoutBox {
        let layout = self.dom.layout(node);
        LayoutBox {
            top: layout.top - self.viewport.scroll_y,
            height: layout.height,
        }
    }

    pub fn location_href(&self) -> String {
        self.location.url.as_str().to_string()
    }

    pub fn location_pathname(&self) -> String {
        self.location.url.path().to_string()
    }

    /// The fragment including `#`, or an empty string.
    pub fn location_hash(&self) -> String {
        match self.location.url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }

    pub fn history_length(&self) -> usize {
        self.location.entries.len()
    }

    /// `history.pushState(null, "", url)`: new entry, no navigation, no scroll.
    pub fn push_state(&mut self, url: &str) -> Result<()> {
        let next = self.resolve_url(url)?;
        self.location.push_entry(next);
        Ok(())
    }

    /// `location.href = url`.
    pub fn set_location_href(&mut self, url: &str) -> Result<()> {
        self.navigate(url, LocationNavigationKind::HrefSet)
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.location.navigations)
    }

    pub(crate) fn resolve_url(&self, input: &str) -> Result<Url> {
        self.location
            .url
            .join(input.trim())
            .map_err(|err| Error::Runtime(format!("invalid URL {input}: {err}")))
    }

    /// Records a navigation. Fragment-only changes stay in the document: the hash is
    /// updated, a history entry is pushed and the target element is scrolled into view.
    pub(crate) fn navigate(&mut self, url: &str, kind: LocationNavigationKind) -> Result<()> {
        let from = self.location.url.clone();
        let to = self.resolve_url(url)?;

        if is_hash_only_navigation(&from, &to) {
            self.location.push_entry(to.clone());
            self.dispatch_event(EventTarget::Window, "hashchange")?;
            if let Some(target) = to.fragment().and_then(|id| self.dom.by_id(id)) {
                let top = self.offset_top(target);
                self.scroll_to(top, ScrollBehavior::Instant)?;
            }
            return Ok(());
        }

        tracing::debug!(from = %from, to = %to, ?kind, "navigation");
        self.location.push_entry(to.clone());
        self.location.navigations.push(LocationNavigation {
            kind,
            from: from.into(),
            to: to.into(),
        });
        Ok(())
    }
}
