use anyhow::Result;
use rollcall_runtime::config::expand_tilde;
use rollcall_runtime::{DirectoryDownload, Workspace};
use std::io::Write;
use std::path::Path;

use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};
use crate::types::OutputFormat;

pub fn handle(
    data_dir: &Path,
    output_dir: Option<&str>,
    to_stdout: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut workspace = Workspace::open(data_dir)?;

    if to_stdout {
        let report = workspace.build_report()?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(&report.contents)?;
        out.flush()?;
        return Ok(());
    }

    let dir = match output_dir {
        Some(dir) => expand_tilde(dir),
        None => workspace.config().export_path(),
    };
    let (report, path) = workspace.export(&DirectoryDownload::new(dir))?;

    let result = presenters::present_export(&report, Some(&path));
    ConsoleRenderer::new(format).render(result)
}
