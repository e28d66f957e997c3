use std::fmt;

/// Result type for rollcall-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A timestamp string was not valid RFC 3339
    InvalidTimestamp {
        input: String,
        source: chrono::ParseError,
    },

    /// Stored roster could not be decoded
    Decode(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidTimestamp { input, source } => {
                write!(f, "Invalid timestamp '{}': {}", input, source)
            }
            Error::Decode(err) => write!(f, "Failed to decode roster: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidTimestamp { source, .. } => Some(source),
            Error::Decode(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err)
    }
}
