use crate::{Error, Result};
use rollcall_engine::RenamePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the data directory
pub const PATH_ENV: &str = "ROLLCALL_PATH";

/// Resolve the data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. ROLLCALL_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.rollcall
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var(PATH_ENV) {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("rollcall"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".rollcall"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand a leading `~/` to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file, relative to the data directory unless absolute
    pub storage_file: PathBuf,

    /// Where exported reports are written, relative to the working directory
    pub export_dir: PathBuf,

    pub on_rename_conflict: RenamePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_file: PathBuf::from("rollcall.db"),
            export_dir: PathBuf::from("."),
            on_rename_conflict: RenamePolicy::Reject,
        }
    }
}

impl Config {
    pub fn path_in(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Load `config.toml`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn storage_path(&self, data_dir: &Path) -> PathBuf {
        let file = expand_tilde(&self.storage_file.to_string_lossy());
        if file.is_absolute() {
            file
        } else {
            data_dir.join(file)
        }
    }

    pub fn export_path(&self) -> PathBuf {
        expand_tilde(&self.export_dir.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.storage_file, PathBuf::from("rollcall.db"));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.on_rename_conflict, RenamePolicy::Reject);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());

        let config = Config {
            export_dir: PathBuf::from("/tmp/reports"),
            on_rename_conflict: RenamePolicy::Overwrite,
            ..Config::default()
        };
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "on_rename_conflict = \"overwrite\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.on_rename_conflict, RenamePolicy::Overwrite);
        assert_eq!(loaded.storage_file, PathBuf::from("rollcall.db"));
        Ok(())
    }

    #[test]
    fn test_unknown_policy_is_config_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = Config::path_in(temp_dir.path());
        std::fs::write(&config_path, "on_rename_conflict = \"merge\"\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("nonexistent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_storage_path_relative_to_data_dir() {
        let config = Config::default();
        assert_eq!(
            config.storage_path(Path::new("/data/rollcall")),
            PathBuf::from("/data/rollcall/rollcall.db")
        );

        let absolute = Config {
            storage_file: PathBuf::from("/var/lib/attendance.db"),
            ..Config::default()
        };
        assert_eq!(
            absolute.storage_path(Path::new("/data/rollcall")),
            PathBuf::from("/var/lib/attendance.db")
        );
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_workspace_path(Some("/srv/rollcall"))?;
        assert_eq!(path, PathBuf::from("/srv/rollcall"));
        Ok(())
    }
}
