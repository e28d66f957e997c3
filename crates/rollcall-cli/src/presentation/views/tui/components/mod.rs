//! TUI Components
//!
//! A component owns its UI state (selection, text being typed), turns key
//! presses into actions for its parent, and clamps its state against the
//! current data before rendering.

pub mod popup;

pub use popup::{EditMode, Entry, PopupAction, PopupComponent};
