use anyhow::Result;
use rollcall_engine::{Command, RenderScope};
use rollcall_runtime::{DirectoryDownload, Workspace};
use std::path::Path;
use tracing::error;

use crate::presentation::presenters;
use crate::presentation::renderers::{Applied, PopupBackend, ScreenUpdate, TuiRenderer};
use crate::presentation::view_models::{RosterViewModel, StatusBadge};

pub fn handle(data_dir: &Path) -> Result<()> {
    let workspace = Workspace::open(data_dir)?;
    let download = DirectoryDownload::new(workspace.config().export_path());
    let mut session = PopupSession {
        workspace,
        download,
    };

    let screen = presenters::present_roster(session.workspace.roster());
    TuiRenderer::new(screen).run(&mut session)
}

/// Connects the popup to a live workspace
pub struct PopupSession {
    workspace: Workspace,
    download: DirectoryDownload,
}

impl PopupSession {
    pub fn new(workspace: Workspace, download: DirectoryDownload) -> Self {
        Self {
            workspace,
            download,
        }
    }

    fn export(&mut self) -> Applied {
        let status = match self.workspace.export(&self.download) {
            Ok((report, path)) => StatusBadge::success(format!(
                "Exported {} session(s) to {}",
                report.row_count,
                path.display()
            )),
            Err(err) => {
                error!(error = %err, "export failed");
                StatusBadge::error(format!("Export failed: {}", err))
            }
        };
        Applied {
            update: ScreenUpdate::Unchanged,
            status,
        }
    }
}

impl PopupBackend for PopupSession {
    fn apply(&mut self, command: Command) -> Applied {
        if command == Command::Export {
            return self.export();
        }

        let scope = command.render_scope();
        let outcome = match self.workspace.execute(command.clone()) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, command = command.name(), "command failed");
                return Applied {
                    update: ScreenUpdate::Full(self.snapshot()),
                    status: StatusBadge::error(err.to_string()),
                };
            }
        };

        let roster = self.workspace.roster();
        let update = match scope {
            RenderScope::Full => ScreenUpdate::Full(presenters::present_roster(roster)),
            RenderScope::Row { class, student } => match roster.class(&class) {
                Some(record) => match record.students.get(&student) {
                    Some(student_record) => ScreenUpdate::Row {
                        row: presenters::present_student_row(&student, student_record),
                        running_count: record.tracking_count(),
                        class,
                    },
                    None => ScreenUpdate::Unchanged,
                },
                None => ScreenUpdate::Unchanged,
            },
            RenderScope::None => ScreenUpdate::Unchanged,
        };

        Applied {
            update,
            status: presenters::present_status(&command, &outcome),
        }
    }

    fn notices(&mut self) -> Vec<StatusBadge> {
        self.workspace
            .take_failures()
            .into_iter()
            .map(|failure| StatusBadge::error(format!("Not saved: {}", failure.message)))
            .collect()
    }

    fn snapshot(&mut self) -> RosterViewModel {
        presenters::present_roster(self.workspace.roster())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_engine::ManualClock;
    use rollcall_runtime::Config;
    use rollcall_store::MemoryStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn session(store: &MemoryStore, export_dir: &Path) -> PopupSession {
        let clock = Arc::new(ManualClock::new("2024-09-02T09:00:00.000Z".parse().unwrap()));
        let workspace = Workspace::with_store(store.clone(), Config::default(), clock).unwrap();
        PopupSession::new(workspace, DirectoryDownload::new(export_dir))
    }

    #[test]
    fn test_structural_commands_rebuild_screen() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let mut session = session(&store, temp_dir.path());

        let applied = session.apply(Command::AddClass {
            name: "Math".into(),
        });
        match applied.update {
            ScreenUpdate::Full(screen) => assert_eq!(screen.classes.len(), 1),
            other => panic!("expected full rebuild, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_patches_row() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let mut session = session(&store, temp_dir.path());
        session.apply(Command::AddClass {
            name: "Math".into(),
        });
        session.apply(Command::AddStudent {
            class: "Math".into(),
            student: "Alice".into(),
        });

        let applied = session.apply(Command::ToggleTimer {
            class: "Math".into(),
            student: "Alice".into(),
        });

        match applied.update {
            ScreenUpdate::Row {
                class,
                row,
                running_count,
            } => {
                assert_eq!(class, "Math");
                assert_eq!(row.name, "Alice");
                assert!(row.tracking);
                assert_eq!(running_count, 1);
            }
            other => panic!("expected row patch, got {:?}", other),
        }
    }

    #[test]
    fn test_export_writes_file_and_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let mut session = session(&store, temp_dir.path());

        let applied = session.apply(Command::Export);

        assert_eq!(applied.update, ScreenUpdate::Unchanged);
        assert!(applied.status.label.contains("attendance_2024-09-02.csv"));
        assert!(temp_dir.path().join("attendance_2024-09-02.csv").exists());
    }

    #[test]
    fn test_failed_save_becomes_notice() {
        let temp_dir = TempDir::new().unwrap();
        let store = MemoryStore::new();
        let mut session = session(&store, temp_dir.path());
        store.fail_writes(true);

        session.apply(Command::AddClass {
            name: "Math".into(),
        });
        session.workspace.sync().unwrap();

        let notices = session.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].label.starts_with("Not saved:"));
    }
}
