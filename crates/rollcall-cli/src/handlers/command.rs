use anyhow::Result;
use rollcall_engine::Command;
use rollcall_runtime::Workspace;
use std::path::Path;

use crate::presentation::presenters;
use crate::presentation::{ConsoleRenderer, Renderer};
use crate::types::OutputFormat;

/// Run one roster command and report whether it changed anything
pub fn handle(data_dir: &Path, command: Command, format: OutputFormat) -> Result<()> {
    let mut workspace = Workspace::open(data_dir)?;

    let outcome = workspace.execute(command.clone())?;
    workspace.sync()?;
    let failures = workspace.take_failures();

    let result = presenters::present_outcome(&command, &outcome, &failures);
    ConsoleRenderer::new(format).render(result)
}
