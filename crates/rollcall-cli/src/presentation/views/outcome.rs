use std::fmt;

use super::Paint;
use crate::presentation::view_models::{CommandOutcomeViewModel, TextStyle};

pub struct OutcomeView<'a> {
    data: &'a CommandOutcomeViewModel,
    paint: Paint,
}

impl<'a> OutcomeView<'a> {
    pub fn new(data: &'a CommandOutcomeViewModel, style: TextStyle) -> Self {
        Self {
            data,
            paint: style.into(),
        }
    }
}

impl<'a> fmt::Display for OutcomeView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(reason) = &self.data.reason {
            writeln!(f, "Unchanged: {}", reason)?;
        }
        for error in &self.data.persistence_errors {
            writeln!(f, "{} {}", self.paint.yellow("Not saved:"), error)?;
        }
        Ok(())
    }
}
