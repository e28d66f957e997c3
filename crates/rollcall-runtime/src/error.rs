use std::fmt;

/// Result type for rollcall-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Storage layer error
    Store(rollcall_store::Error),

    /// Stored data could not be decoded
    Types(rollcall_types::Error),

    /// Engine layer error (export)
    Engine(rollcall_engine::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Background writer is gone
    Persister(String),

    /// Invalid operation or state
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(err) => write!(f, "Storage error: {}", err),
            Error::Types(err) => write!(f, "Invalid stored data: {}", err),
            Error::Engine(err) => write!(f, "Engine error: {}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Persister(msg) => write!(f, "Persistence error: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Store(err) => Some(err),
            Error::Types(err) => Some(err),
            Error::Engine(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(_) | Error::Persister(_) | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<rollcall_store::Error> for Error {
    fn from(err: rollcall_store::Error) -> Self {
        Error::Store(err)
    }
}

impl From<rollcall_types::Error> for Error {
    fn from(err: rollcall_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<rollcall_engine::Error> for Error {
    fn from(err: rollcall_engine::Error) -> Self {
        Error::Engine(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
