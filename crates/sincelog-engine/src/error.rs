use std::fmt;

/// Result type for sincelog-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the engine layer
#[derive(Debug)]
pub enum Error {
    /// Store layer error
    Index(sincelog_index::Error),

    /// Requested version has no term in the store
    UnknownVersion(String),

    /// The current version could not be determined
    CurrentVersion(Vec<String>),

    /// Store not created yet
    NotInitialized(String),
}

impl Error {
    /// Detail lines to show after the main message.
    pub fn messages(&self) -> &[String] {
        match self {
            Error::CurrentVersion(messages) => messages,
            _ => &[],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Index(err) => write!(f, "Index error: {}", err),
            Error::UnknownVersion(version) => write!(f, "Unknown version: {}", version),
            Error::CurrentVersion(_) => write!(f, "Couldn't get current version"),
            Error::NotInitialized(msg) => write!(f, "Workspace not initialized: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Index(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sincelog_index::Error> for Error {
    fn from(err: sincelog_index::Error) -> Self {
        Error::Index(err)
    }
}

impl From<sincelog_types::Error> for Error {
    fn from(err: sincelog_types::Error) -> Self {
        Error::Index(err.into())
    }
}
