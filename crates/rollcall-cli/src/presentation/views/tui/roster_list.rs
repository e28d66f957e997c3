use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use rollcall_engine::format_duration;

use crate::presentation::view_models::{ClassBlockViewModel, RosterViewModel, StudentRowViewModel};

/// Class headers followed by their student rows, one list item each
pub struct RosterListView<'a> {
    model: &'a RosterViewModel,
    /// Class being renamed and the text typed so far
    renaming: Option<(&'a str, &'a str)>,
}

impl<'a> RosterListView<'a> {
    pub fn new(model: &'a RosterViewModel) -> Self {
        Self {
            model,
            renaming: None,
        }
    }

    pub fn renaming(mut self, class: &'a str, buffer: &'a str) -> Self {
        self.renaming = Some((class, buffer));
        self
    }

    /// Build a List widget for stateful rendering
    pub fn build_list(self) -> List<'static> {
        let block = Block::default()
            .title(format!("Classes ({})", self.model.classes.len()))
            .borders(Borders::ALL);

        let mut items: Vec<ListItem<'static>> = Vec::new();
        for class in &self.model.classes {
            items.push(self.class_item(class));
            items.extend(class.students.iter().map(student_item));
        }

        if items.is_empty() {
            items.push(ListItem::new(Line::from(Span::styled(
                "No classes yet. Press [a] to add one.",
                Style::default().add_modifier(Modifier::DIM),
            ))));
        }

        List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    }

    fn class_item(&self, class: &ClassBlockViewModel) -> ListItem<'static> {
        let name = match self.renaming {
            Some((target, buffer)) if target == class.name => Span::styled(
                format!("✎ {}▏", buffer),
                Style::default().fg(Color::Cyan),
            ),
            _ => Span::styled(
                class.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        };

        let mut summary = format!("  {} students", class.students.len());
        if class.running_count > 0 {
            summary.push_str(&format!(", {} running", class.running_count));
        }

        ListItem::new(Line::from(vec![
            name,
            Span::styled(summary, Style::default().add_modifier(Modifier::DIM)),
        ]))
    }
}

fn student_item(row: &StudentRowViewModel) -> ListItem<'static> {
    let (label, color) = if row.tracking {
        ("[Stop]", Color::Green)
    } else {
        ("[Start]", Color::Gray)
    };

    ListItem::new(Line::from(vec![
        Span::raw(format!("  {:<20} ", row.name)),
        Span::raw(format!("{:>8} ", format_duration(row.total_ms))),
        Span::styled(label, Style::default().fg(color)),
    ]))
}
