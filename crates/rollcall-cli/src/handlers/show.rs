use anyhow::Result;
use rollcall_runtime::Workspace;
use std::path::Path;

use crate::presentation::presenters;
use crate::presentation::view_models::{CommandResultViewModel, Guidance};
use crate::presentation::{ConsoleRenderer, Renderer};
use crate::types::OutputFormat;

pub fn handle(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let workspace = Workspace::open(data_dir)?;
    let vm = presenters::present_roster(workspace.roster());

    let mut result = CommandResultViewModel::new(vm);
    if workspace.roster().is_empty() {
        result = result.with_suggestion(
            Guidance::new("Create your first class").with_command("rollcall class add <name>"),
        );
    }
    ConsoleRenderer::new(format).render(result)
}
