use anyhow::Result;
use rollcall_runtime::Config;
use std::path::Path;

use crate::presentation::presenters;
use crate::presentation::view_models::StatusBadge;
use crate::presentation::{ConsoleRenderer, Renderer};
use crate::types::OutputFormat;

pub fn show(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let config_path = Config::path_in(data_dir);
    let config = Config::load_from(&config_path)?;

    let result = presenters::present_config(data_dir, &config_path, &config);
    ConsoleRenderer::new(format).render(result)
}

/// Write the defaults, leaving an existing file alone
pub fn init(data_dir: &Path, format: OutputFormat) -> Result<()> {
    let config_path = Config::path_in(data_dir);

    let badge = if config_path.exists() {
        StatusBadge::info("Config already exists; left unchanged")
    } else {
        Config::default().save_to(&config_path)?;
        StatusBadge::success(format!("Wrote {}", config_path.display()))
    };

    let config = Config::load_from(&config_path)?;
    let result = presenters::present_config(data_dir, &config_path, &config).with_badge(badge);
    ConsoleRenderer::new(format).render(result)
}
