//! Interactive behaviors for a marketing site.
//!
//! The crate has two halves. [`Page`] is a deterministic, in-process page host: it owns a
//! DOM tree, listeners, a virtual clock with timers and animation frames, window geometry,
//! scrolling, location and history. [`App`] is the composition root that installs the site
//! behaviors (navigation menu, smooth scrolling, scroll spy, form validation, count-up
//! statistics and friends) onto a page.
//!
//! ```no_run
//! use std::rc::Rc;
//! use site_behaviors::{App, Page, SiteConfig};
//!
//! # fn main() -> site_behaviors::Result<()> {
//! let mut page = Page::from_html(r#"<body><button class="navbar-toggler"></button></body>"#)?;
//! let app = Rc::new(App::new(SiteConfig::default()));
//! app.boot(&mut page)?;
//! # Ok(())
//! # }
//! ```

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("runtime error: {0}")]
    Runtime(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("type mismatch for {selector}: expected {expected}, actual {actual}")]
    TypeMismatch {
        selector: String,
        expected: String,
        actual: String,
    },
    #[error(
        "assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}"
    )]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    #[error("invalid pattern: {0}")]
    Pattern(String),
    #[error("config error: {0}")]
    Config(String),
}

mod animation;
mod app;
pub mod behaviors;
mod config;
mod dom;
mod html;
mod page;
mod rate_limit;
mod selector;
mod validation;

pub use animation::{AnimationHandle, FrameAnimation, ease_in_out, progress};
pub use app::{App, InitGuard};
pub use config::{
    AccordionConfig, ActiveMenuConfig, CountUpConfig, FormConfig, LazyLoadConfig, ModalConfig,
    NavMenuConfig, ScrollSpyConfig, ScrollToTopConfig, SiteConfig, SmoothScrollConfig,
    ToastConfig, ValidationMessages,
};
pub use dom::{LayoutBox, NodeId};
pub use page::{
    Event, EventTarget, ListenerId, LocationNavigation, LocationNavigationKind, Page,
    PendingTimer, ReadyState, SMOOTH_SCROLL_DURATION_MS, ScrollBehavior, TimerId,
};
pub use rate_limit::{Debounced, Throttled};
pub use validation::{FieldError, FieldRules, FieldState};
