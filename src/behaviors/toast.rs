//! Transient notifications stacked in a fixed container.

use std::fmt;
use std::rc::Rc;

use crate::Result;
use crate::config::ToastConfig;
use crate::dom::NodeId;
use crate::page::Page;

const CONTAINER_STYLE: &str = "position:fixed;top:20px;right:20px;z-index:9999;max-width:350px;";
const TOAST_STYLE: &str = "color:white;padding:var(--space-lg);border-radius:var(--radius-md);\
    margin-bottom:var(--space-md);box-shadow:var(--shadow-lg);";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn background(self) -> &'static str {
        match self {
            Self::Success => "var(--color-success)",
            Self::Error | Self::Info => "var(--color-error)",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Toasts {
    config: Rc<ToastConfig>,
}

impl Toasts {
    pub fn new(config: Rc<ToastConfig>) -> Self {
        Self { config }
    }

    /// Shows `message` and schedules its fade-out and removal. Returns `None` when the
    /// document has no `<body>` to host the container.
    pub fn show(&self, page: &mut Page, message: &str, kind: ToastKind) -> Result<Option<NodeId>> {
        let Some(container) = self.container(page)? else {
            tracing::debug!("no <body>; toast dropped");
            return Ok(None);
        };

        let dom = page.dom_mut();
        let toast = dom.create_detached_element("div");
        dom.set_attr(toast, "class", &format!("c-toast c-toast--{kind}"))?;
        dom.set_attr(toast, "role", "alert")?;
        dom.set_style_text(toast, &format!("background:{};{TOAST_STYLE}", kind.background()))?;
        dom.set_text_content(toast, message)?;
        dom.append_child(container, toast)?;
        tracing::debug!(%kind, text = message, "toast shown");

        let fade_ms = self.config.fade_ms;
        page.set_timeout(self.config.display_ms, move |page| {
            let dom = page.dom_mut();
            dom.style_set(toast, "opacity", "0")?;
            dom.style_set(toast, "transition", "opacity 0.3s")?;
            page.set_timeout(fade_ms, move |page| {
                let dom = page.dom_mut();
                if dom.parent(toast) == Some(container) {
                    dom.remove_child(container, toast)?;
                }
                Ok(())
            });
            Ok(())
        });
        Ok(Some(toast))
    }

    fn container(&self, page: &mut Page) -> Result<Option<NodeId>> {
        if let Some(existing) = page.dom().by_id(&self.config.container_id) {
            return Ok(Some(existing));
        }
        let Some(body) = page.body() else {
            return Ok(None);
        };
        let dom = page.dom_mut();
        let container = dom.create_detached_element("div");
        dom.set_attr(container, "id", &self.config.container_id)?;
        dom.set_style_text(container, CONTAINER_STYLE)?;
        dom.append_child(body, container)?;
        Ok(Some(container))
    }
}
