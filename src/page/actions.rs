use super::{Event, EventTarget, LocationNavigationKind, Page, ScrollBehavior};
use crate::dom::{Dom, NodeId};
use crate::{Error, Result};

impl Page {
    /// Focuses the control, replaces its value and fires `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();

        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        self.focus_node(target)?;
        self.dom.set_value(target, text)?;
        self.dispatch_event(EventTarget::Node(target), "input")?;
        Ok(())
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        if !is_checkbox_input(&self.dom, target) && !is_radio_input(&self.dom, target) {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: self.dom.tag_name(target).unwrap_or_default().to_string(),
            });
        }

        if self.dom.checked(target) != checked {
            if is_radio_input(&self.dom, target) && checked {
                self.uncheck_other_radios_in_group(target)?;
            }
            self.dom.set_checked(target, checked)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
        }
        Ok(())
    }

    /// Clicks the element and runs the default action unless a listener prevented it.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.click_node(target)
    }

    pub fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.dom.disabled(target) {
            return Ok(());
        }

        let outcome = self.dispatch_event(EventTarget::Node(target), "click")?;
        if outcome.default_prevented() {
            return Ok(());
        }

        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target);
            self.dom.set_checked(target, !current)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
        }

        if is_radio_input(&self.dom, target) && !self.dom.checked(target) {
            self.uncheck_other_radios_in_group(target)?;
            self.dom.set_checked(target, true)?;
            self.dispatch_event(EventTarget::Node(target), "input")?;
            self.dispatch_event(EventTarget::Node(target), "change")?;
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
                self.submit_form(form)?;
            }
            return Ok(());
        }

        if let Some(link) = self.dom.find_ancestor_by_tag(target, "a") {
            if let Some(href) = self.dom.attr(link, "href") {
                self.navigate(&href, LocationNavigationKind::Hyperlink)?;
            }
        }
        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    /// Submits the form itself or the form owning the matched control.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if let Some(form) = self.dom.find_ancestor_by_tag(target, "form") {
            self.submit_form(form)?;
        }
        Ok(())
    }

    /// Fires `keydown` then `keyup` at the focused element, or at `<body>` when nothing
    /// has focus.
    pub fn press_key(&mut self, key: &str) -> Result<()> {
        let target = self
            .active_element
            .filter(|node| self.dom.is_connected(*node))
            .or_else(|| self.dom.body())
            .unwrap_or(self.dom.root);
        for event_type in ["keydown", "keyup"] {
            let event = Event::new(event_type, EventTarget::Node(target)).with_key(key);
            self.dispatch_prepared_event(event)?;
        }
        Ok(())
    }

    /// User scroll: jumps immediately, interrupting any smooth scroll.
    pub fn scroll_window_to(&mut self, top: f64) -> Result<()> {
        self.scroll_to(top, ScrollBehavior::Instant)
    }

    pub fn dispatch(&mut self, selector: &str, event_type: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.dispatch_event(EventTarget::Node(target), event_type)?;
        Ok(())
    }

    fn submit_form(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(EventTarget::Node(form), "submit")?;
        if outcome.default_prevented() {
            return Ok(());
        }
        let action = self
            .dom
            .attr(form, "action")
            .filter(|action| !action.trim().is_empty())
            .unwrap_or_else(|| self.location_href());
        self.navigate(&action, LocationNavigationKind::FormSubmit)
    }

    pub(crate) fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.disabled(node) || self.active_element == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.active_element {
            self.blur_node(current)?;
        }
        self.active_element = Some(node);
        self.dispatch_event(EventTarget::Node(node), "focusin")?;
        self.dispatch_event(EventTarget::Node(node), "focus")?;
        Ok(())
    }

    pub(crate) fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.active_element != Some(node) {
            return Ok(());
        }
        self.dispatch_event(EventTarget::Node(node), "focusout")?;
        self.dispatch_event(EventTarget::Node(node), "blur")?;
        self.active_element = None;
        Ok(())
    }

    fn uncheck_other_radios_in_group(&mut self, target: NodeId) -> Result<()> {
        let name = self.dom.attr(target, "name").unwrap_or_default();
        if name.is_empty() {
            return Ok(());
        }
        let form = self.dom.find_ancestor_by_tag(target, "form");
        for node in self.dom.all_element_nodes() {
            if node == target || !is_radio_input(&self.dom, node) {
                continue;
            }
            if self.dom.attr(node, "name").as_deref() != Some(name.as_str()) {
                continue;
            }
            if self.dom.find_ancestor_by_tag(node, "form") != form {
                continue;
            }
            self.dom.set_checked(node, false)?;
        }
        Ok(())
    }
}

fn input_type_is(dom: &Dom, node_id: NodeId, kind: &str) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if !element.tag_name.eq_ignore_ascii_case("input") {
        return false;
    }
    element
        .attrs
        .get("type")
        .is_some_and(|value| value.eq_ignore_ascii_case(kind))
}

fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type_is(dom, node_id, "checkbox")
}

fn is_radio_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type_is(dom, node_id, "radio")
}

fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };
    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .is_none_or(|kind| kind.eq_ignore_ascii_case("submit"));
    }
    input_type_is(dom, node_id, "submit")
}
