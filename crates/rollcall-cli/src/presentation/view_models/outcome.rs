use serde::Serialize;
use std::fmt;

use super::{CreateView, TextStyle};

/// Result of one dispatched command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcomeViewModel {
    pub command: String,
    pub changed: bool,
    /// Why a guarded command did nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub persistence_errors: Vec<String>,
}

impl CreateView for CommandOutcomeViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::outcome::OutcomeView;
        Box::new(OutcomeView::new(self, style))
    }
}
