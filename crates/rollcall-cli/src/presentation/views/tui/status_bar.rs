use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::presentation::view_models::StatusBadge;

use super::status_level_to_color;

/// Bottom bar: a text prompt while typing, otherwise the last status and key help
pub struct StatusBarView<'a> {
    status: &'a StatusBadge,
    prompt: Option<(&'a str, &'a str)>,
}

impl<'a> StatusBarView<'a> {
    pub fn new(status: &'a StatusBadge) -> Self {
        Self {
            status,
            prompt: None,
        }
    }

    pub fn prompt(mut self, label: &'a str, buffer: &'a str) -> Self {
        self.prompt = Some((label, buffer));
        self
    }
}

impl<'a> Widget for StatusBarView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let key = Style::default().fg(Color::Yellow);
        let line = match self.prompt {
            Some((label, buffer)) => Line::from(vec![
                Span::styled(format!("{}: ", label), key),
                Span::raw(format!("{}▏", buffer)),
                Span::raw("  "),
                Span::styled("[Enter]", key),
                Span::raw("save "),
                Span::styled("[Esc]", key),
                Span::raw("cancel"),
            ]),
            None => Line::from(vec![
                Span::styled(
                    self.status.label.clone(),
                    Style::default().fg(status_level_to_color(self.status.level)),
                ),
                Span::raw("  "),
                Span::styled("[a]", key),
                Span::raw("class "),
                Span::styled("[s]", key),
                Span::raw("student "),
                Span::styled("[e]", key),
                Span::raw("rename "),
                Span::styled("[⏎]", key),
                Span::raw("timer "),
                Span::styled("[S/X]", key),
                Span::raw("all "),
                Span::styled("[d]", key),
                Span::raw("delete "),
                Span::styled("[x]", key),
                Span::raw("export "),
                Span::styled("[q]", key),
                Span::raw("uit"),
            ]),
        };

        Paragraph::new(line).render(inner, buf);
    }
}
