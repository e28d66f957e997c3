use serde::Serialize;
use std::fmt;

use super::{CreateView, TextStyle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportViewModel {
    pub file_name: String,
    /// Where the report was written; `None` when printed to stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub row_count: usize,
}

impl CreateView for ExportViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::export::ExportView;
        Box::new(ExportView::new(self, style))
    }
}
