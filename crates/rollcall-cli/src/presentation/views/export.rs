use std::fmt;

use super::Paint;
use crate::presentation::view_models::{ExportViewModel, TextStyle};

pub struct ExportView<'a> {
    data: &'a ExportViewModel,
    paint: Paint,
}

impl<'a> ExportView<'a> {
    pub fn new(data: &'a ExportViewModel, style: TextStyle) -> Self {
        Self {
            data,
            paint: style.into(),
        }
    }
}

impl<'a> fmt::Display for ExportView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.data.path {
            Some(path) => writeln!(f, "Wrote {}", self.paint.bold(path)),
            None => writeln!(f, "{}", self.data.file_name),
        }
    }
}
