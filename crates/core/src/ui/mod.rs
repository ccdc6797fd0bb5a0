//! Page widget state
//!
//! Each widget is a small state machine driven by DOM events; the web front
//! end maps the resulting state onto element classes.

pub mod anchor;
pub mod faq;
pub mod menu;
pub mod scroll;
pub mod toast;

pub use anchor::anchor_target;
pub use faq::FaqAccordion;
pub use menu::MobileMenu;
pub use scroll::ScrollState;
pub use toast::{TOAST_DISPLAY, TOAST_EXIT, Toast, ToastKind, ToastPhase, ToastQueue};
