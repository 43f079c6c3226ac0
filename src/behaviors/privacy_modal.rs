//! In-page privacy notice shown in place of hash-only privacy links.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::ModalConfig;
use crate::dom::NodeId;
use crate::page::{EventTarget, ListenerId, Page};

const OVERLAY_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:100%;\
    background:rgba(0,0,0,0.7);z-index:1100;display:flex;align-items:center;\
    justify-content:center;padding:20px;";
const DIALOG_STYLE: &str = "background:white;max-width:800px;max-height:90vh;overflow-y:auto;\
    padding:var(--space-2xl);border-radius:var(--radius-md);position:relative;";
const CLOSE_STYLE: &str = "position:absolute;top:10px;right:10px;background:none;border:none;\
    font-size:32px;cursor:pointer;color:var(--color-neutral-600);width:40px;height:40px;\
    display:flex;align-items:center;justify-content:center;";
const POLICY_LINK_STYLE: &str = "color:var(--color-primary);text-decoration:underline;";

pub struct PrivacyModal {
    guard: InitGuard,
    config: Rc<ModalConfig>,
}

/// One open modal. Owns the overlay and every listener registered for it.
struct ModalSession {
    overlay: NodeId,
    no_scroll_class: String,
    closed: Cell<bool>,
    listeners: RefCell<Vec<ListenerId>>,
}

impl ModalSession {
    fn close(&self, page: &mut Page) -> Result<()> {
        if self.closed.replace(true) {
            return Ok(());
        }
        let body = page.body();
        let dom = page.dom_mut();
        dom.remove_node(self.overlay)?;
        if let Some(body) = body {
            dom.class_remove(body, &self.no_scroll_class)?;
        }
        for id in self.listeners.borrow_mut().drain(..) {
            page.remove_event_listener(id);
        }
        tracing::debug!("privacy modal closed");
        Ok(())
    }
}

impl PrivacyModal {
    pub fn new(config: Rc<ModalConfig>) -> Self {
        Self {
            guard: InitGuard::new("modal"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        for link in page.query_selector_all(&self.config.links)? {
            let config = Rc::clone(&self.config);
            page.add_event_listener(EventTarget::Node(link), "click", move |page, event| {
                let href = page.dom().attr(link, "href").unwrap_or_default();
                if !href.starts_with('#') {
                    return Ok(());
                }
                event.prevent_default();
                open(page, &config)
            });
        }
        Ok(())
    }
}

fn build_dialog(page: &mut Page, config: &ModalConfig) -> Result<(NodeId, NodeId)> {
    let dom = page.dom_mut();
    let overlay = dom.create_detached_element("div");
    dom.set_attr(overlay, "class", &config.overlay_class)?;
    dom.set_style_text(overlay, OVERLAY_STYLE)?;

    let dialog = dom.create_detached_element("div");
    dom.set_attr(dialog, "class", &config.dialog_class)?;
    dom.set_style_text(dialog, DIALOG_STYLE)?;

    let title = dom.create_detached_element("h2");
    dom.set_text_content(title, &config.title)?;
    dom.append_child(dialog, title)?;

    let text = dom.create_detached_element("p");
    dom.set_text_content(text, &config.body)?;
    dom.append_child(dialog, text)?;

    let more = dom.create_detached_element("p");
    let policy = dom.create_detached_element("a");
    dom.set_attr(policy, "href", &config.full_policy_href)?;
    dom.set_style_text(policy, POLICY_LINK_STYLE)?;
    dom.set_text_content(policy, &config.full_policy_text)?;
    dom.append_child(more, policy)?;
    dom.append_child(dialog, more)?;

    let close = dom.create_detached_element("button");
    dom.set_text_content(close, "×")?;
    dom.set_style_text(close, CLOSE_STYLE)?;
    dom.set_attr(close, "aria-label", &config.close_label)?;
    dom.insert_before(dialog, close, dom.first_child(dialog))?;

    dom.append_child(overlay, dialog)?;
    Ok((overlay, close))
}

fn open(page: &mut Page, config: &ModalConfig) -> Result<()> {
    let Some(body) = page.body() else {
        tracing::debug!("no <body>; privacy modal not shown");
        return Ok(());
    };
    let (overlay, close) = build_dialog(page, config)?;
    let dom = page.dom_mut();
    dom.append_child(body, overlay)?;
    dom.class_add(body, &config.no_scroll_class)?;

    let session = Rc::new(ModalSession {
        overlay,
        no_scroll_class: config.no_scroll_class.clone(),
        closed: Cell::new(false),
        listeners: RefCell::new(Vec::new()),
    });

    let s = Rc::clone(&session);
    let on_close = page.add_event_listener(EventTarget::Node(close), "click", move |page, _| {
        s.close(page)
    });

    let s = Rc::clone(&session);
    let on_backdrop =
        page.add_event_listener(EventTarget::Node(overlay), "click", move |page, event| {
            if event.target() == EventTarget::Node(s.overlay) {
                s.close(page)?;
            }
            Ok(())
        });

    let s = Rc::clone(&session);
    let document = EventTarget::Node(page.document());
    let on_escape = page.add_event_listener(document, "keydown", move |page, event| {
        if event.key() == Some("Escape") {
            s.close(page)?;
        }
        Ok(())
    });

    session
        .listeners
        .borrow_mut()
        .extend([on_close, on_backdrop, on_escape]);
    tracing::debug!("privacy modal opened");
    Ok(())
}
