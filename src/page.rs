//! Deterministic in-process page host.
//!
//! [`Page`] stands in for the browser: it owns the document tree, the listener registry, a
//! virtual clock driving timeouts and animation frames, window geometry, scroll position,
//! location and history. Nothing runs unless a test driver (or a behavior reacting to one)
//! asks for it, so every interaction is reproducible.

mod actions;
mod assertions;
mod events;
mod scheduler;
mod window;

use url::Url;

use crate::animation::AnimationHandle;
use crate::dom::{Dom, NodeId};
use crate::html::parse_document;
use crate::{Error, Result};

pub use events::{Event, EventTarget, ListenerId};
pub use scheduler::{PendingTimer, TimerId};
pub use window::{
    LocationNavigation, LocationNavigationKind, SMOOTH_SCROLL_DURATION_MS, ScrollBehavior,
};

use events::ListenerStore;
use scheduler::ScheduledTask;
use window::{LocationHistory, Viewport};

const DEFAULT_DOCUMENT_URL: &str = "http://localhost/";

/// Mirrors `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

pub struct Page {
    dom: Dom,
    listeners: ListenerStore,
    task_queue: Vec<ScheduledTask>,
    active_element: Option<NodeId>,
    ready_state: ReadyState,
    now_ms: i64,
    timer_step_limit: usize,
    next_timer_id: u64,
    next_task_order: u64,
    next_listener_id: u64,
    viewport: Viewport,
    smooth_scroll: Option<AnimationHandle>,
    location: LocationHistory,
    trace: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_url(DEFAULT_DOCUMENT_URL, html)
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|err| Error::Runtime(format!("invalid document URL {url}: {err}")))?;
        let dom = parse_document(html)?;
        Ok(Self {
            dom,
            listeners: ListenerStore::default(),
            task_queue: Vec::new(),
            active_element: None,
            ready_state: ReadyState::Interactive,
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
            next_listener_id: 1,
            viewport: Viewport::default(),
            smooth_scroll: None,
            location: LocationHistory::new(url),
            trace: false,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
        })
    }

    /// Builds a page whose document is still parsing. Call [`Page::finish_loading`] to
    /// fire `DOMContentLoaded`.
    pub fn loading_from_html_with_url(url: &str, html: &str) -> Result<Self> {
        let mut page = Self::from_html_with_url(url, html)?;
        page.ready_state = ReadyState::Loading;
        Ok(page)
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Moves a loading document to `interactive` (dispatching `DOMContentLoaded` on the
    /// document) and then to `complete` (dispatching `load` on the window).
    pub fn finish_loading(&mut self) -> Result<()> {
        if self.ready_state != ReadyState::Loading {
            return Ok(());
        }
        self.ready_state = ReadyState::Interactive;
        self.dispatch_event(EventTarget::Node(self.dom.root), "DOMContentLoaded")?;
        self.ready_state = ReadyState::Complete;
        self.dispatch_event(EventTarget::Window, "load")?;
        Ok(())
    }

    pub fn document(&self) -> NodeId {
        self.dom.root
    }

    pub fn body(&self) -> Option<NodeId> {
        self.dom.body()
    }

    pub fn head(&self) -> Option<NodeId> {
        self.dom.head()
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    pub(crate) fn dom(&self) -> &Dom {
        &self.dom
    }

    pub(crate) fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        if self.trace_logs.len() > self.trace_log_limit {
            let overflow = self.trace_logs.len() - self.trace_log_limit;
            self.trace_logs.drain(..overflow);
        }
        Ok(())
    }

    fn tracing_active(&self) -> bool {
        self.trace || tracing::enabled!(tracing::Level::TRACE)
    }

    fn trace_line(&mut self, line: String) {
        tracing::trace!(target: "site_behaviors::page", "{line}");
        if self.trace {
            if self.trace_logs.len() >= self.trace_log_limit {
                self.trace_logs.remove(0);
            }
            self.trace_logs.push(line);
        }
    }

    fn trace_node_label(&self, node: NodeId) -> String {
        if node == self.dom.root {
            return "document".into();
        }
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }

    fn trace_target_label(&self, target: EventTarget) -> String {
        match target {
            EventTarget::Window => "window".into(),
            EventTarget::Node(node) => self.trace_node_label(node),
        }
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.location.url.as_str())
            .field("ready_state", &self.ready_state)
            .field("now_ms", &self.now_ms)
            .field("pending_tasks", &self.task_queue.len())
            .field("scroll_y", &self.viewport.scroll_y)
            .finish_non_exhaustive()
    }
}
