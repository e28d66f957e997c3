//! # Presentation Layer
//!
//! MVVM split, one direction only:
//!
//! ```text
//! [ Handler ] --> [ Presenter ] --> [ ViewModel ] --> [ Renderer ] ==(JSON)==> serde_json
//!                                                                 ==(Text)==> [ View ]
//! ```
//!
//! For the popup, `renderers::tui` routes key input to the `PopupComponent`,
//! which owns selection and text-entry state and emits `Command`s upward.
//! The renderer never touches the roster; it only applies the screen
//! updates the handler sends back.
//!
//! ## Rules
//!
//! * ViewModels carry raw data (`total_ms`, not `"1h 2m"`). Views format.
//! * Presenters are pure functions from domain types to ViewModels.
//! * Components clamp their selection against the data before rendering.

pub mod presenters;
pub mod renderers;
pub mod view_models;
pub mod views;

pub use renderers::{ConsoleRenderer, Renderer};
pub use view_models::{CommandResultViewModel, CreateView, Guidance, StatusBadge, StatusLevel};
