//! Client-side validation of the contact forms.
//!
//! Fields are checked on blur and, while they show an error, again on every input.
//! Submission is always intercepted: an invalid form raises one error toast, a valid one
//! locks its submit button behind a spinner and redirects after a short delay.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::behaviors::toast::{ToastKind, Toasts};
use crate::config::{FormConfig, ToastConfig};
use crate::dom::{Dom, NodeId};
use crate::page::{EventTarget, Page};
use crate::validation::{FieldRules, FieldState};

const SPINNER_MARKUP: &str = "<span style=\"display:inline-block;width:16px;height:16px;\
    border:2px solid white;border-top-color:transparent;border-radius:50%;\
    animation:spin 0.6s linear infinite;margin-right:8px;\"></span>";
const SPINNER_KEYFRAMES_ID: &str = "c-spinner-keyframes";
const SPINNER_KEYFRAMES: &str = "@keyframes spin { to { transform: rotate(360deg); } }";

pub struct FormValidator {
    guard: InitGuard,
    config: Rc<FormConfig>,
    toasts: Toasts,
}

struct Validator {
    rules: FieldRules,
    config: Rc<FormConfig>,
    toasts: Toasts,
}

impl Validator {
    /// The enclosing form group, or the direct parent when there is none.
    fn group(&self, dom: &Dom, field: NodeId) -> Result<Option<NodeId>> {
        Ok(dom
            .closest(field, &self.config.group)?
            .or_else(|| dom.parent_element(field)))
    }

    fn has_error(&self, page: &Page, field: NodeId) -> Result<bool> {
        let dom = page.dom();
        Ok(self
            .group(dom, field)?
            .is_some_and(|group| dom.class_contains(group, &self.config.error_class)))
    }

    fn show_error(&self, page: &mut Page, field: NodeId, message: &str) -> Result<()> {
        let dom = page.dom_mut();
        let Some(group) = self.group(dom, field)? else {
            return Ok(());
        };
        dom.class_add(group, &self.config.error_class)?;
        if let Some(error) = dom.query_selector_from(group, &self.config.error_text)? {
            dom.set_text_content(error, message)?;
            dom.style_set(error, "display", "block")?;
        }
        dom.set_attr(field, "aria-invalid", "true")
    }

    fn clear_error(&self, page: &mut Page, field: NodeId) -> Result<()> {
        let dom = page.dom_mut();
        let Some(group) = self.group(dom, field)? else {
            return Ok(());
        };
        dom.class_remove(group, &self.config.error_class)?;
        if let Some(error) = dom.query_selector_from(group, &self.config.error_text)? {
            dom.set_text_content(error, "")?;
            dom.style_set(error, "display", "none")?;
        }
        dom.remove_attr(field, "aria-invalid")
    }

    fn validate_field(&self, page: &mut Page, field: NodeId) -> Result<bool> {
        self.clear_error(page, field)?;
        let state = FieldState::from_node(page.dom(), field);
        match self.rules.check(&state)? {
            Some(error) => {
                tracing::debug!(field = ?field, %error, "field invalid");
                self.show_error(page, field, error.message(&self.config.messages))?;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Validates every field, so all errors become visible at once.
    fn validate_form(&self, page: &mut Page, form: NodeId) -> Result<bool> {
        let fields = page.dom().query_selector_all_from(form, &self.config.fields)?;
        let mut valid = true;
        for field in fields {
            valid &= self.validate_field(page, field)?;
        }
        Ok(valid)
    }

    fn submit(&self, page: &mut Page, form: NodeId) -> Result<()> {
        if !self.validate_form(page, form)? {
            self.toasts
                .show(page, &self.config.messages.form_invalid, ToastKind::Error)?;
            return Ok(());
        }
        let Some(button) = page.dom().query_selector_from(form, &self.config.submit)? else {
            tracing::debug!("valid form without submit control; nothing to send");
            return Ok(());
        };

        self.show_loading(page, button)?;
        let redirect = self.config.redirect_to.clone();
        page.set_timeout(self.config.submit_delay_ms, move |page| {
            page.set_location_href(&redirect)
        });
        Ok(())
    }

    fn show_loading(&self, page: &mut Page, button: NodeId) -> Result<()> {
        let head = page.head();
        let dom = page.dom_mut();
        dom.set_disabled(button, true)?;
        dom.set_inner_html(button, SPINNER_MARKUP)?;
        dom.create_text(button, self.config.loading_label.clone());

        if dom.by_id(SPINNER_KEYFRAMES_ID).is_some() {
            return Ok(());
        }
        let Some(head) = head else {
            return Ok(());
        };
        let style = dom.create_detached_element("style");
        dom.set_attr(style, "id", SPINNER_KEYFRAMES_ID)?;
        dom.set_text_content(style, SPINNER_KEYFRAMES)?;
        dom.append_child(head, style)
    }
}

impl FormValidator {
    pub fn new(config: Rc<FormConfig>, toast: Rc<ToastConfig>) -> Self {
        Self {
            guard: InitGuard::new("forms"),
            config,
            toasts: Toasts::new(toast),
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        let forms = page.query_selector_all(&self.config.forms)?;
        if forms.is_empty() {
            tracing::debug!(selector = %self.config.forms, "no forms to validate");
            return Ok(());
        }

        let validator = Rc::new(Validator {
            rules: FieldRules::new()?,
            config: Rc::clone(&self.config),
            toasts: self.toasts.clone(),
        });

        for &form in &forms {
            let fields = page.dom().query_selector_all_from(form, &self.config.fields)?;
            for field in fields {
                let v = Rc::clone(&validator);
                page.add_event_listener(EventTarget::Node(field), "blur", move |page, _| {
                    v.validate_field(page, field)?;
                    Ok(())
                });

                let v = Rc::clone(&validator);
                page.add_event_listener(EventTarget::Node(field), "input", move |page, _| {
                    if v.has_error(page, field)? {
                        v.validate_field(page, field)?;
                    }
                    Ok(())
                });
            }

            let v = Rc::clone(&validator);
            page.add_event_listener(EventTarget::Node(form), "submit", move |page, event| {
                event.prevent_default();
                v.submit(page, form)
            });
        }

        tracing::debug!(forms = forms.len(), "form validation ready");
        Ok(())
    }
}
