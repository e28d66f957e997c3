pub mod config;
pub mod download;
mod error;
pub mod persister;
pub mod workspace;

pub use config::{Config, resolve_workspace_path};
pub use download::{DirectoryDownload, Download};
pub use error::{Error, Result};
pub use persister::{FlushFailure, Persister};
pub use workspace::Workspace;
