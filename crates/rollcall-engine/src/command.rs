use std::sync::Arc;

use crate::Result;
use crate::clock::Clock;
use crate::export::{CsvReport, build_report};
use crate::roster::{Change, RenamePolicy, Roster, Skip};

/// A user action against the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddClass { name: String },
    RenameClass { from: String, to: String },
    DeleteClass { name: String },
    AddStudent { class: String, student: String },
    RemoveStudent { class: String, student: String },
    StartTimer { class: String, student: String },
    StopTimer { class: String, student: String },
    ToggleTimer { class: String, student: String },
    StartAll { class: String },
    StopAll { class: String },
    Export,
}

/// How much of a view must be refreshed after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderScope {
    /// Rebuild every class block
    Full,
    /// Patch a single student row in place
    Row { class: String, student: String },
    /// Nothing on screen changes
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged(Skip),
    Exported(CsvReport),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed)
    }
}

impl From<Change> for Outcome {
    fn from(change: Change) -> Self {
        match change {
            Change::Applied => Outcome::Changed,
            Change::Unchanged(skip) => Outcome::Unchanged(skip),
        }
    }
}

impl Command {
    /// Whether the command can alter the roster. Every mutation is flushed,
    /// even when its guard turns it into a no-op.
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Command::Export)
    }

    pub fn render_scope(&self) -> RenderScope {
        match self {
            Command::StartTimer { class, student }
            | Command::StopTimer { class, student }
            | Command::ToggleTimer { class, student } => RenderScope::Row {
                class: class.clone(),
                student: student.clone(),
            },
            Command::Export => RenderScope::None,
            _ => RenderScope::Full,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddClass { .. } => "add_class",
            Command::RenameClass { .. } => "rename_class",
            Command::DeleteClass { .. } => "delete_class",
            Command::AddStudent { .. } => "add_student",
            Command::RemoveStudent { .. } => "remove_student",
            Command::StartTimer { .. } => "start_timer",
            Command::StopTimer { .. } => "stop_timer",
            Command::ToggleTimer { .. } => "toggle_timer",
            Command::StartAll { .. } => "start_all",
            Command::StopAll { .. } => "stop_all",
            Command::Export => "export",
        }
    }
}

/// Applies commands to a roster, stamping them with the injected clock
#[derive(Clone)]
pub struct Dispatcher {
    clock: Arc<dyn Clock>,
    rename_policy: RenamePolicy,
}

impl Dispatcher {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            rename_policy: RenamePolicy::default(),
        }
    }

    pub fn with_rename_policy(mut self, policy: RenamePolicy) -> Self {
        self.rename_policy = policy;
        self
    }

    pub fn rename_policy(&self) -> RenamePolicy {
        self.rename_policy
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn dispatch(&self, roster: &mut Roster, command: Command) -> Result<Outcome> {
        let now = self.clock.now();

        let change = match command {
            Command::AddClass { name } => roster.add_class(&name, now),
            Command::RenameClass { from, to } => roster.rename_class(&from, &to, self.rename_policy),
            Command::DeleteClass { name } => roster.delete_class(&name),
            Command::AddStudent { class, student } => roster.add_student(&class, &student),
            Command::RemoveStudent { class, student } => roster.remove_student(&class, &student),
            Command::StartTimer { class, student } => roster.start_timer(&class, &student, now),
            Command::StopTimer { class, student } => roster.stop_timer(&class, &student, now),
            Command::ToggleTimer { class, student } => roster.toggle_timer(&class, &student, now),
            Command::StartAll { class } => roster.start_all(&class, now),
            Command::StopAll { class } => roster.stop_all(&class, now),
            Command::Export => {
                return Ok(Outcome::Exported(build_report(roster.classes(), now)?));
            }
        };

        Ok(change.into())
    }
}
