//! Accordion triggers that expand and collapse their panels independently.

use std::rc::Rc;

use crate::Result;
use crate::app::InitGuard;
use crate::config::AccordionConfig;
use crate::dom::NodeId;
use crate::page::{EventTarget, Page};

/// Expands and collapses accordion panels. Every trigger/panel pair is independent.
pub struct Accordion {
    guard: InitGuard,
    config: Rc<AccordionConfig>,
}

impl Accordion {
    pub fn new(config: Rc<AccordionConfig>) -> Self {
        Self {
            guard: InitGuard::new("accordion"),
            config,
        }
    }

    pub fn init(&self, page: &mut Page) -> Result<()> {
        if !self.guard.claim() {
            return Ok(());
        }
        for trigger in page.query_selector_all(&self.config.triggers)? {
            let config = Rc::clone(&self.config);
            page.add_event_listener(EventTarget::Node(trigger), "click", move |page, _| {
                toggle(page, trigger, &config)
            });
        }
        Ok(())
    }
}

fn panel_of(page: &Page, trigger: NodeId, config: &AccordionConfig) -> Option<NodeId> {
    let selector = page.dom().attr(trigger, &config.target_attr)?;
    match page.query_selector(&selector) {
        Ok(panel) => panel,
        Err(err) => {
            tracing::debug!(%selector, %err, "accordion target not resolvable");
            None
        }
    }
}

fn toggle(page: &mut Page, trigger: NodeId, config: &AccordionConfig) -> Result<()> {
    let Some(panel) = panel_of(page, trigger, config) else {
        return Ok(());
    };
    let dom = page.dom_mut();
    let expanded = dom.attr(trigger, "aria-expanded").as_deref() == Some("true");
    if expanded {
        dom.class_add(trigger, &config.collapsed_class)?;
        dom.set_attr(trigger, "aria-expanded", "false")?;
        dom.class_remove(panel, &config.open_class)
    } else {
        dom.class_remove(trigger, &config.collapsed_class)?;
        dom.set_attr(trigger, "aria-expanded", "true")?;
        dom.class_add(panel, &config.open_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAQ: &str = r##"<body>
        <button class="accordion-button collapsed" id="q1" data-bs-target="#a1" aria-expanded="false">Eins</button>
        <div id="a1" class="accordion-collapse"></div>
        <button class="accordion-button" id="q2" data-bs-target="#a2" aria-expanded="true">Zwei</button>
        <div id="a2" class="accordion-collapse show"></div>
        <button class="accordion-button" id="broken" data-bs-target="[[">Kaputt</button>
    </body>"##;

    fn installed() -> Result<Page> {
        let mut page = Page::from_html(FAQ)?;
        Accordion::new(Rc::new(AccordionConfig::default())).init(&mut page)?;
        Ok(page)
    }

    #[test]
    fn pairs_toggle_independently() -> Result<()> {
        let mut page = installed()?;
        page.click("#q1")?;
        page.assert_class("#a1", "show", true)?;
        page.assert_class("#q1", "collapsed", false)?;
        page.assert_attr("#q1", "aria-expanded", Some("true"))?;
        page.assert_class("#a2", "show", true)?;

        page.click("#q2")?;
        page.assert_class("#a2", "show", false)?;
        page.assert_class("#q2", "collapsed", true)?;
        page.assert_attr("#q2", "aria-expanded", Some("false"))?;
        page.assert_class("#a1", "show", true)?;
        Ok(())
    }

    #[test]
    fn unresolvable_target_is_ignored() -> Result<()> {
        let mut page = installed()?;
        page.click("#broken")?;
        page.assert_attr("#broken", "aria-expanded", None)?;
        Ok(())
    }
}
