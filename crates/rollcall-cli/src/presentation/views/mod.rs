pub mod config;
pub mod export;
pub mod outcome;
pub mod roster;
pub mod tui;

use owo_colors::OwoColorize;

use crate::presentation::view_models::TextStyle;

/// Applies owo-colors styles only when the renderer asked for color
#[derive(Debug, Clone, Copy)]
pub(crate) struct Paint {
    enabled: bool,
}

impl From<TextStyle> for Paint {
    fn from(style: TextStyle) -> Self {
        Self {
            enabled: style.color,
        }
    }
}

impl Paint {
    pub fn bold(&self, text: &str) -> String {
        if self.enabled {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        if self.enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dimmed(&self, text: &str) -> String {
        if self.enabled {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn yellow(&self, text: &str) -> String {
        if self.enabled {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }
}
