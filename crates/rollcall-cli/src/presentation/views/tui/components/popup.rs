//! Popup Component
//!
//! The class/student list plus the three text-entry modes (add class, add
//! student, rename class).

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    widgets::ListState,
};
use rollcall_engine::Command;

use crate::presentation::view_models::{RosterViewModel, StatusBadge};
use crate::presentation::views::tui::{RosterListView, StatusBarView};

/// Actions the popup emits to the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupAction {
    Dispatch(Command),
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Browse,
    AddClass {
        buffer: String,
    },
    AddStudent {
        class: String,
        buffer: String,
    },
    Rename {
        class: String,
        buffer: String,
    },
}

/// One selectable line of the list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Class(String),
    Student { class: String, student: String },
}

impl Entry {
    pub fn class(&self) -> &str {
        match self {
            Entry::Class(class) | Entry::Student { class, .. } => class,
        }
    }
}

/// Flatten the roster into list order: each class header, then its students
pub fn entries(data: &RosterViewModel) -> Vec<Entry> {
    let mut entries = Vec::new();
    for class in &data.classes {
        entries.push(Entry::Class(class.name.clone()));
        for student in &class.students {
            entries.push(Entry::Student {
                class: class.name.clone(),
                student: student.name.clone(),
            });
        }
    }
    entries
}

pub struct PopupComponent {
    state: ListState,
    mode: EditMode,
}

impl PopupComponent {
    pub fn new() -> Self {
        Self {
            state: ListState::default().with_selected(Some(0)),
            mode: EditMode::Browse,
        }
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn selected_entry(&self, data: &RosterViewModel) -> Option<Entry> {
        let index = self.state.selected()?;
        entries(data).into_iter().nth(index)
    }

    /// Handle keyboard input
    ///
    /// Navigation and typing stay local; anything that changes the roster
    /// comes back as `PopupAction::Dispatch`.
    pub fn handle_input(&mut self, key: KeyEvent, data: &RosterViewModel) -> Option<PopupAction> {
        match self.mode {
            EditMode::Browse => self.handle_browse(key, data),
            EditMode::Rename { .. } => self.handle_rename(key, data),
            EditMode::AddClass { .. } | EditMode::AddStudent { .. } => self.handle_entry(key),
        }
    }

    /// Render list and status bar
    ///
    /// Performs index safety check before rendering.
    pub fn render(&mut self, f: &mut Frame, area: Rect, data: &RosterViewModel, status: &StatusBadge) {
        let len = entries(data).len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(selected) if selected >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }

        let chunks = Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).split(area);

        let list_view = match &self.mode {
            EditMode::Rename { class, buffer } => RosterListView::new(data).renaming(class, buffer),
            _ => RosterListView::new(data),
        };
        f.render_stateful_widget(list_view.build_list(), chunks[0], &mut self.state);

        let status_view = match &self.mode {
            EditMode::AddClass { buffer } => StatusBarView::new(status).prompt("New class", buffer),
            EditMode::AddStudent { buffer, .. } => {
                StatusBarView::new(status).prompt("New student", buffer)
            }
            _ => StatusBarView::new(status),
        };
        f.render_widget(status_view, chunks[1]);
    }

    fn handle_browse(&mut self, key: KeyEvent, data: &RosterViewModel) -> Option<PopupAction> {
        let selected = self.selected_entry(data);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(PopupAction::Quit),
            KeyCode::Char('j') | KeyCode::Down => {
                self.next(entries(data).len());
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous();
                None
            }
            KeyCode::Char('a') => {
                self.mode = EditMode::AddClass {
                    buffer: String::new(),
                };
                None
            }
            KeyCode::Char('s') => {
                if let Some(entry) = selected {
                    self.mode = EditMode::AddStudent {
                        class: entry.class().to_string(),
                        buffer: String::new(),
                    };
                }
                None
            }
            KeyCode::Char('e') => {
                if let Some(entry) = selected {
                    let class = entry.class().to_string();
                    self.mode = EditMode::Rename {
                        buffer: class.clone(),
                        class,
                    };
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match selected? {
                Entry::Student { class, student } => {
                    Some(PopupAction::Dispatch(Command::ToggleTimer { class, student }))
                }
                Entry::Class(_) => None,
            },
            KeyCode::Char('S') => selected.map(|entry| {
                PopupAction::Dispatch(Command::StartAll {
                    class: entry.class().to_string(),
                })
            }),
            KeyCode::Char('X') => selected.map(|entry| {
                PopupAction::Dispatch(Command::StopAll {
                    class: entry.class().to_string(),
                })
            }),
            KeyCode::Char('d') => selected.map(|entry| match entry {
                Entry::Class(name) => PopupAction::Dispatch(Command::DeleteClass { name }),
                Entry::Student { class, student } => {
                    PopupAction::Dispatch(Command::RemoveStudent { class, student })
                }
            }),
            KeyCode::Char('x') => Some(PopupAction::Dispatch(Command::Export)),
            _ => None,
        }
    }

    fn handle_entry(&mut self, key: KeyEvent) -> Option<PopupAction> {
        match key.code {
            KeyCode::Esc => {
                self.mode = EditMode::Browse;
                None
            }
            KeyCode::Enter => match std::mem::take(&mut self.mode) {
                EditMode::AddClass { buffer } => {
                    Some(PopupAction::Dispatch(Command::AddClass { name: buffer }))
                }
                EditMode::AddStudent { class, buffer } => {
                    Some(PopupAction::Dispatch(Command::AddStudent {
                        class,
                        student: buffer,
                    }))
                }
                _ => None,
            },
            _ => {
                if let EditMode::AddClass { buffer } | EditMode::AddStudent { buffer, .. } =
                    &mut self.mode
                {
                    edit_buffer(buffer, key.code);
                }
                None
            }
        }
    }

    // Leaving the field with Tab or the arrows commits like Enter does.
    fn handle_rename(&mut self, key: KeyEvent, data: &RosterViewModel) -> Option<PopupAction> {
        match key.code {
            KeyCode::Esc => {
                self.mode = EditMode::Browse;
                None
            }
            KeyCode::Enter | KeyCode::Tab => self.commit_rename(),
            KeyCode::Down => {
                let action = self.commit_rename();
                self.next(entries(data).len());
                action
            }
            KeyCode::Up => {
                let action = self.commit_rename();
                self.previous();
                action
            }
            code => {
                if let EditMode::Rename { buffer, .. } = &mut self.mode {
                    edit_buffer(buffer, code);
                }
                None
            }
        }
    }

    fn commit_rename(&mut self) -> Option<PopupAction> {
        let EditMode::Rename { class, buffer } = std::mem::take(&mut self.mode) else {
            return None;
        };

        let to = buffer.trim();
        if to.is_empty() || to == class {
            return None;
        }
        Some(PopupAction::Dispatch(Command::RenameClass {
            from: class,
            to: to.to_string(),
        }))
    }

    fn next(&mut self, data_len: usize) {
        if data_len == 0 {
            return;
        }

        let next = match self.state.selected() {
            Some(i) if i + 1 < data_len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(next));
    }

    fn previous(&mut self) {
        let prev = match self.state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(prev));
    }
}

impl Default for PopupComponent {
    fn default() -> Self {
        Self::new()
    }
}

fn edit_buffer(buffer: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}
