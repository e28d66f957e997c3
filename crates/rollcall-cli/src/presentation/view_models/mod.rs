pub mod common;
pub mod config;
pub mod export;
pub mod outcome;
pub mod result;
pub mod roster;

use std::fmt;

pub use common::{Guidance, StatusBadge, StatusLevel};
pub use config::ConfigViewModel;
pub use export::ExportViewModel;
pub use outcome::CommandOutcomeViewModel;
pub use result::CommandResultViewModel;
pub use roster::{
    ClassBlockViewModel, ClassListViewModel, ClassSummaryViewModel, RosterViewModel,
    StudentRowViewModel,
};

/// Text styling options passed from the renderer down to views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub color: bool,
}

/// Bridge from a ViewModel to the `Display` type that lays it out as text
pub trait CreateView {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a>;
}
