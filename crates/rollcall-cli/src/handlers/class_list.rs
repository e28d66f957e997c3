use anyhow::Result;
use rollcall_runtime::Workspace;
use std::path::Path;

use crate::presentation::presenters;
use crate::presentation::view_models::CommandResultViewModel;
use crate::presentation::{ConsoleRenderer, Renderer};
use crate::types::OutputFormat;

pub fn handle(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let workspace = Workspace::open(data_dir)?;
    let vm = presenters::present_class_list(workspace.roster());
    ConsoleRenderer::new(format).render(CommandResultViewModel::new(vm))
}
