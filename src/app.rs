//! Composition root: owns every page feature and installs them in a fixed order.

use std::cell::Cell;
use std::rc::Rc;

use crate::behaviors::{
    Accordion, ActiveMenu, CountUp, FormValidator, LazyLoad, NavMenu, PrivacyModal,
    ScrollSpy, ScrollToTop, SmoothScroll,
};
use crate::config::SiteConfig;
use crate::page::{EventTarget, ListenerId, Page, ReadyState};
use crate::Result;

/// One-shot initialization flag owned by a single feature.
#[derive(Debug)]
pub struct InitGuard {
    name: &'static str,
    claimed: Cell<bool>,
}

impl InitGuard {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            claimed: Cell::new(false),
        }
    }

    /// True exactly once: for the first caller.
    pub fn claim(&self) -> bool {
        if self.claimed.replace(true) {
            tracing::debug!(feature = self.name, "already initialized");
            return false;
        }
        true
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed.get()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

pub struct App {
    nav_menu: NavMenu,
    smooth_scroll: SmoothScroll,
    scroll_spy: ScrollSpy,
    active_menu: ActiveMenu,
    scroll_to_top: ScrollToTop,
    forms: FormValidator,
    accordion: Accordion,
    count_up: CountUp,
    modal: PrivacyModal,
    lazy_load: LazyLoad,
    deferred: Cell<Option<ListenerId>>,
}

impl App {
    pub fn new(config: SiteConfig) -> Self {
        let SiteConfig {
            nav_menu,
            smooth_scroll,
            scroll_spy,
            active_menu,
            scroll_to_top,
            forms,
            toast,
            accordion,
            count_up,
            modal,
            lazy_load,
        } = config;

        Self {
            nav_menu: NavMenu::new(Rc::new(nav_menu)),
            smooth_scroll: SmoothScroll::new(Rc::new(smooth_scroll)),
            scroll_spy: ScrollSpy::new(Rc::new(scroll_spy)),
            active_menu: ActiveMenu::new(Rc::new(active_menu)),
            scroll_to_top: ScrollToTop::new(Rc::new(scroll_to_top)),
            forms: FormValidator::new(Rc::new(forms), Rc::new(toast)),
            accordion: Accordion::new(Rc::new(accordion)),
            count_up: CountUp::new(Rc::new(count_up)),
            modal: PrivacyModal::new(Rc::new(modal)),
            lazy_load: LazyLoad::new(Rc::new(lazy_load)),
            deferred: Cell::new(None),
        }
    }

    /// Installs every feature. Features already installed are skipped.
    pub fn init(&self, page: &mut Page) -> Result<()> {
        self.nav_menu.init(page)?;
        self.smooth_scroll.init(page)?;
        self.scroll_spy.init(page)?;
        self.active_menu.init(page)?;
        self.scroll_to_top.init(page)?;
        self.forms.init(page)?;
        self.accordion.init(page)?;
        self.count_up.init(page)?;
        self.modal.init(page)?;
        self.lazy_load.init(page)?;
        Ok(())
    }

    /// Runs [`App::init`] now, or on `DOMContentLoaded` while the document is still
    /// loading.
    pub fn boot(self: &Rc<Self>, page: &mut Page) -> Result<()> {
        if page.ready_state() != ReadyState::Loading {
            return self.init(page);
        }
        if self.deferred.get().is_some() {
            return Ok(());
        }
        tracing::debug!("document still loading; deferring init to DOMContentLoaded");
        let app = Rc::clone(self);
        let id = page.add_event_listener(
            EventTarget::Node(page.document()),
            "DOMContentLoaded",
            move |page, _| app.init(page),
        );
        self.deferred.set(Some(id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_claims_once() {
        let guard = InitGuard::new("menu");
        assert!(!guard.is_claimed());
        assert!(guard.claim());
        assert!(!guard.claim());
        assert!(guard.is_claimed());
        assert_eq!(guard.name(), "menu");
    }

    #[test]
    fn init_twice_registers_listeners_once() -> Result<()> {
        let mut page = Page::from_html(
            "<body><button class='navbar-toggler'></button><div class='navbar-collapse'></div></body>",
        )?;
        let app = App::new(SiteConfig::default());
        app.init(&mut page)?;
        let document = EventTarget::Node(page.document());
        let clicks = page.listener_count(document, "click");
        app.init(&mut page)?;
        assert_eq!(page.listener_count(document, "click"), clicks);
        assert_eq!(page.count(".c-scroll-to-top")?, 1);
        Ok(())
    }

    #[test]
    fn boot_defers_until_dom_content_loaded() -> Result<()> {
        let mut page = Page::loading_from_html_with_url(
            "https://example.test/",
            "<body><img id='photo' src='a.jpg'></body>",
        )?;
        let app = Rc::new(App::new(SiteConfig::default()));
        app.boot(&mut page)?;
        app.boot(&mut page)?;
        page.assert_attr("#photo", "loading", None)?;
        let document = EventTarget::Node(page.document());
        assert_eq!(page.listener_count(document, "DOMContentLoaded"), 1);

        page.finish_loading()?;
        page.assert_attr("#photo", "loading", Some("lazy"))?;
        Ok(())
    }
}
