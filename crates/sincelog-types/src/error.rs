use std::fmt;

/// Result type for sincelog-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A post type name that is not one of class, method, function, hook
    UnknownPostType(String),

    /// A change type name that is not one of introduced, modified, deprecated
    UnknownChangeType(String),

    /// Import payload could not be decoded
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownPostType(name) => write!(f, "Unknown post type: {}", name),
            Error::UnknownChangeType(name) => write!(f, "Unknown change type: {}", name),
            Error::Json(err) => write!(f, "Invalid import document: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(err) => Some(err),
            Error::UnknownPostType(_) | Error::UnknownChangeType(_) => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
