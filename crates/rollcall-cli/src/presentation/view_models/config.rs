use serde::Serialize;
use std::fmt;

use super::{CreateView, TextStyle};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigViewModel {
    pub data_dir: String,
    pub config_path: String,
    pub config_exists: bool,
    pub storage_path: String,
    pub export_dir: String,
    pub on_rename_conflict: String,
}

impl CreateView for ConfigViewModel {
    fn create_view<'a>(&'a self, style: TextStyle) -> Box<dyn fmt::Display + 'a> {
        use crate::presentation::views::config::ConfigView;
        Box::new(ConfigView::new(self, style))
    }
}
