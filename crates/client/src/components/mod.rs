//! Reusable components: access guards, toasts, the navbar shell.

pub mod guard;
pub mod navbar;
pub mod toaster;

pub use guard::{decide, Capability, GuardDecision, RequireRole};
pub use navbar::NavbarLayout;
pub use toaster::Toaster;
