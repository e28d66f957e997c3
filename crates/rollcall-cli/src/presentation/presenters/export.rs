use rollcall_engine::CsvReport;
use std::path::Path;

use crate::presentation::view_models::{CommandResultViewModel, ExportViewModel, Guidance, StatusBadge};

pub fn present_export(
    report: &CsvReport,
    path: Option<&Path>,
) -> CommandResultViewModel<ExportViewModel> {
    let vm = ExportViewModel {
        file_name: report.file_name.clone(),
        path: path.map(|p| p.display().to_string()),
        row_count: report.row_count,
    };

    let mut result = CommandResultViewModel::new(vm)
        .with_badge(StatusBadge::success(format!("Exported {} session(s)", report.row_count)));

    if report.row_count == 0 {
        result = result.with_suggestion(
            Guidance::new("Only stopped timers are exported; stop running ones first")
                .with_command("rollcall timer stop-all <class>"),
        );
    }
    result
}
