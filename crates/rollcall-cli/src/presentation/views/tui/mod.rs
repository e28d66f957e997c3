//! Ratatui widgets for the popup

pub mod components;
mod roster_list;
mod status_bar;

pub use roster_list::RosterListView;
pub use status_bar::StatusBarView;

use ratatui::style::Color;

use crate::presentation::view_models::StatusLevel;

pub(crate) fn status_level_to_color(level: StatusLevel) -> Color {
    match level {
        StatusLevel::Success => Color::Green,
        StatusLevel::Info => Color::Gray,
        StatusLevel::Warning => Color::Yellow,
        StatusLevel::Error => Color::Red,
    }
}
