//! TUI Renderer for the popup
//!
//! Owns the terminal, routes keys to `PopupComponent`, and forwards the
//! commands it emits to a `PopupBackend`. The backend answers with a
//! `ScreenUpdate` telling the renderer whether to replace the whole screen
//! or patch one student row.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::Backend, backend::CrosstermBackend};
use rollcall_engine::Command;

use crate::presentation::view_models::{RosterViewModel, StatusBadge, StudentRowViewModel};
use crate::presentation::views::tui::components::{PopupAction, PopupComponent};

/// How the screen changes after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenUpdate {
    Full(RosterViewModel),
    Row {
        class: String,
        row: StudentRowViewModel,
        running_count: usize,
    },
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct Applied {
    pub update: ScreenUpdate,
    pub status: StatusBadge,
}

/// The side of the popup that owns state: it runs commands and reports back
pub trait PopupBackend {
    fn apply(&mut self, command: Command) -> Applied;

    /// Notifications that arrived without a command, e.g. a failed save
    fn notices(&mut self) -> Vec<StatusBadge>;

    /// A freshly presented screen, used when a row patch misses
    fn snapshot(&mut self) -> RosterViewModel;
}

/// Replace the screen, or patch a single row in place.
///
/// Returns false when the patched row is not on screen.
pub fn apply_update(screen: &mut RosterViewModel, update: ScreenUpdate) -> bool {
    match update {
        ScreenUpdate::Full(next) => {
            *screen = next;
            true
        }
        ScreenUpdate::Row {
            class,
            row,
            running_count,
        } => {
            let Some(block) = screen.classes.iter_mut().find(|c| c.name == class) else {
                return false;
            };
            let Some(slot) = block.students.iter_mut().find(|s| s.name == row.name) else {
                return false;
            };
            *slot = row;
            block.running_count = running_count;
            true
        }
        ScreenUpdate::Unchanged => true,
    }
}

pub struct TuiRenderer {
    screen: RosterViewModel,
    popup: PopupComponent,
    status: StatusBadge,
    should_quit: bool,
}

impl TuiRenderer {
    pub fn new(screen: RosterViewModel) -> Self {
        Self {
            screen,
            popup: PopupComponent::new(),
            status: StatusBadge::info("Ready"),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &RosterViewModel {
        &self.screen
    }

    pub fn status(&self) -> &StatusBadge {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set up the terminal, run until quit, and always restore the terminal
    pub fn run<B: PopupBackend>(mut self, backend: &mut B) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let result = self.event_loop(&mut terminal, backend);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop<T, B>(&mut self, terminal: &mut Terminal<T>, backend: &mut B) -> Result<()>
    where
        T: Backend,
        B: PopupBackend,
    {
        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key, backend);
            }

            if let Some(notice) = backend.notices().pop() {
                self.status = notice;
            }
        }
        Ok(())
    }

    pub fn handle_key<B: PopupBackend>(&mut self, key: KeyEvent, backend: &mut B) {
        // Only handle key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.popup.handle_input(key, &self.screen) {
            Some(PopupAction::Quit) => self.should_quit = true,
            Some(PopupAction::Dispatch(command)) => {
                let applied = backend.apply(command);
                if !apply_update(&mut self.screen, applied.update) {
                    self.screen = backend.snapshot();
                }
                self.status = applied.status;
            }
            None => {}
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        self.popup.render(f, area, &self.screen, &self.status);
    }
}
