use rollcall_engine::{Command, Outcome};
use rollcall_runtime::FlushFailure;

use crate::presentation::view_models::{
    CommandOutcomeViewModel, CommandResultViewModel, Guidance, StatusBadge,
};

/// Past-tense summary of what a command does, for badges and the status line
pub fn describe_command(command: &Command) -> String {
    match command {
        Command::AddClass { name } => format!("Added class '{}'", name.trim()),
        Command::RenameClass { from, to } => {
            format!("Renamed class '{}' to '{}'", from, to.trim())
        }
        Command::DeleteClass { name } => format!("Deleted class '{}'", name),
        Command::AddStudent { class, student } => {
            format!("Added '{}' to '{}'", student.trim(), class)
        }
        Command::RemoveStudent { class, student } => {
            format!("Removed '{}' from '{}'", student, class)
        }
        Command::StartTimer { class, student } => {
            format!("Started timer for '{}' in '{}'", student, class)
        }
        Command::StopTimer { class, student } => {
            format!("Stopped timer for '{}' in '{}'", student, class)
        }
        Command::ToggleTimer { class, student } => {
            format!("Toggled timer for '{}' in '{}'", student, class)
        }
        Command::StartAll { class } => format!("Started all timers in '{}'", class),
        Command::StopAll { class } => format!("Stopped all timers in '{}'", class),
        Command::Export => "Exported report".to_string(),
    }
}

pub fn present_outcome(
    command: &Command,
    outcome: &Outcome,
    failures: &[FlushFailure],
) -> CommandResultViewModel<CommandOutcomeViewModel> {
    let reason = match outcome {
        Outcome::Unchanged(skip) => Some(skip.to_string()),
        _ => None,
    };

    let vm = CommandOutcomeViewModel {
        command: command.name().to_string(),
        changed: outcome.is_changed(),
        reason,
        persistence_errors: failures.iter().map(|f| f.message.clone()).collect(),
    };

    let badge = if !vm.persistence_errors.is_empty() {
        StatusBadge::warning("Change applied but could not be saved")
    } else if vm.changed {
        StatusBadge::success(describe_command(command))
    } else {
        StatusBadge::info("Nothing changed")
    };

    let mut result = CommandResultViewModel::new(vm).with_badge(badge);
    for guide in suggestions_for(command, outcome) {
        result = result.with_suggestion(guide);
    }
    result
}

/// One-line status for the popup
pub fn present_status(command: &Command, outcome: &Outcome) -> StatusBadge {
    match outcome {
        Outcome::Changed => StatusBadge::success(describe_command(command)),
        Outcome::Unchanged(skip) => StatusBadge::info(format!("Unchanged: {}", skip)),
        Outcome::Exported(report) => StatusBadge::success(format!(
            "Exported {} session(s) to {}",
            report.row_count, report.file_name
        )),
    }
}

fn suggestions_for(command: &Command, outcome: &Outcome) -> Vec<Guidance> {
    if !outcome.is_changed() {
        return vec![Guidance::new("See current classes and students").with_command("rollcall show")];
    }

    match command {
        Command::AddClass { name } => vec![
            Guidance::new("Add a student")
                .with_command(format!("rollcall student add \"{}\" <name>", name.trim())),
        ],
        Command::AddStudent { class, student } => vec![
            Guidance::new("Start the timer").with_command(format!(
                "rollcall timer start \"{}\" \"{}\"",
                class,
                student.trim()
            )),
        ],
        Command::StopTimer { .. } | Command::StopAll { .. } | Command::ToggleTimer { .. } => {
            vec![Guidance::new("Export completed sessions").with_command("rollcall export")]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::StatusLevel;
    use rollcall_engine::Skip;

    #[test]
    fn test_unchanged_outcome_carries_reason() {
        let command = Command::AddClass {
            name: "Math".into(),
        };
        let result = present_outcome(&command, &Outcome::Unchanged(Skip::DuplicateName), &[]);

        assert!(!result.content.changed);
        assert_eq!(result.content.reason.as_deref(), Some("name already exists"));
        assert_eq!(result.badge.unwrap().level, StatusLevel::Info);
    }

    #[test]
    fn test_failed_flush_downgrades_badge() {
        let command = Command::DeleteClass {
            name: "Math".into(),
        };
        let failures = [FlushFailure {
            message: "disk full".into(),
        }];
        let result = present_outcome(&command, &Outcome::Changed, &failures);

        assert_eq!(result.badge.unwrap().level, StatusLevel::Warning);
        assert_eq!(result.content.persistence_errors, vec!["disk full"]);
    }
}
