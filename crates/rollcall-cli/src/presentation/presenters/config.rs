use rollcall_runtime::Config;
use std::path::Path;

use crate::presentation::view_models::{CommandResultViewModel, ConfigViewModel, Guidance};

pub fn present_config(
    data_dir: &Path,
    config_path: &Path,
    config: &Config,
) -> CommandResultViewModel<ConfigViewModel> {
    let config_exists = config_path.exists();
    let vm = ConfigViewModel {
        data_dir: data_dir.display().to_string(),
        config_path: config_path.display().to_string(),
        config_exists,
        storage_path: config.storage_path(data_dir).display().to_string(),
        export_dir: config.export_path().display().to_string(),
        on_rename_conflict: match config.on_rename_conflict {
            rollcall_engine::RenamePolicy::Reject => "reject".to_string(),
            rollcall_engine::RenamePolicy::Overwrite => "overwrite".to_string(),
        },
    };

    let result = CommandResultViewModel::new(vm);
    if config_exists {
        result
    } else {
        result.with_suggestion(
            Guidance::new("Write a config file with the defaults").with_command("rollcall config init"),
        )
    }
}
