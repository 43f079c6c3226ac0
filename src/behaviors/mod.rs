//! Page features. Each one owns its [`InitGuard`](crate::InitGuard) and the configuration
//! section it reads, and installs itself with `init`. Missing markup disables a feature
//! without failing.

mod accordion;
mod active_menu;
mod count_up;
mod form_validation;
mod lazy_load;
mod nav_menu;
mod privacy_modal;
mod scroll_spy;
mod scroll_to_top;
mod smooth_scroll;
mod toast;

pub use accordion::Accordion;
pub use active_menu::ActiveMenu;
pub use count_up::CountUp;
pub use form_validation::FormValidator;
pub use lazy_load::LazyLoad;
pub use nav_menu::NavMenu;
pub use privacy_modal::PrivacyModal;
pub use scroll_spy::ScrollSpy;
pub use scroll_to_top::ScrollToTop;
pub use smooth_scroll::SmoothScroll;
pub use toast::{ToastKind, Toasts};
