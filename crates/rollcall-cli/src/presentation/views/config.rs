use std::fmt;

use super::Paint;
use crate::presentation::view_models::{ConfigViewModel, TextStyle};

pub struct ConfigView<'a> {
    data: &'a ConfigViewModel,
    paint: Paint,
}

impl<'a> ConfigView<'a> {
    pub fn new(data: &'a ConfigViewModel, style: TextStyle) -> Self {
        Self {
            data,
            paint: style.into(),
        }
    }
}

impl<'a> fmt::Display for ConfigView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let config_note = if self.data.config_exists {
            ""
        } else {
            " (not created, using defaults)"
        };

        writeln!(f, "{:<20} {}", "data dir:", self.data.data_dir)?;
        writeln!(
            f,
            "{:<20} {}{}",
            "config:",
            self.data.config_path,
            self.paint.dimmed(config_note)
        )?;
        writeln!(f, "{:<20} {}", "storage:", self.data.storage_path)?;
        writeln!(f, "{:<20} {}", "export dir:", self.data.export_dir)?;
        writeln!(f, "{:<20} {}", "on rename conflict:", self.data.on_rename_conflict)
    }
}
