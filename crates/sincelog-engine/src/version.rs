use sincelog_index::{Database, TermRecord};
use sincelog_types::Taxonomy;
use std::fmt;

use crate::{Error, Result};

/// Site option naming the release the store was last imported from.
pub const IMPORTED_VERSION_OPTION: &str = "imported_version";
/// Site option recording when the last import finished (RFC 3339).
pub const IMPORTED_AT_OPTION: &str = "imported_at";

/// Why the current version could not be found. Carries every reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    store_failed: bool,
    messages: Vec<String>,
}

impl LookupError {
    /// No current version is recorded, or its term is gone.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            store_failed: false,
            messages: vec![message.into()],
        }
    }

    /// The store could not be read.
    pub fn store(message: impl Into<String>) -> Self {
        Self {
            store_failed: true,
            messages: vec![message.into()],
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_store_failure(&self) -> bool {
        self.store_failed
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages.join("; "))
    }
}

impl std::error::Error for LookupError {}

/// Source of the "current version" term.
pub trait CurrentVersionLookup {
    fn current_version_term(&self) -> std::result::Result<TermRecord, LookupError>;
}

impl CurrentVersionLookup for Database {
    fn current_version_term(&self) -> std::result::Result<TermRecord, LookupError> {
        let version = self
            .get_option(IMPORTED_VERSION_OPTION)
            .map_err(|e| LookupError::store(e.to_string()))?
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                let mut err = LookupError::new("No imported version recorded");
                err.push("Import a document that names its version, or pass <version> explicitly");
                err
            })?;

        self.find_term(Taxonomy::Since, version.trim())
            .map_err(|e| LookupError::store(e.to_string()))?
            .ok_or_else(|| LookupError::new(format!("Version term '{}' does not exist", version)))
    }
}

/// The current version if one is recorded and known.
///
/// A missing current version is `None`; a store failure is an error.
pub fn current_version<L>(lookup: &L) -> Result<Option<String>>
where
    L: CurrentVersionLookup + ?Sized,
{
    match lookup.current_version_term() {
        Ok(term) => Ok(Some(term.name)),
        Err(err) if err.is_store_failure() => Err(Error::CurrentVersion(err.messages().to_vec())),
        Err(_) => Ok(None),
    }
}

/// Explicit version if given and non-empty, else the current version.
///
/// The explicit value is not checked against known versions here.
pub fn resolve_version<L>(explicit: Option<&str>, lookup: &L) -> Result<String>
where
    L: CurrentVersionLookup + ?Sized,
{
    if let Some(version) = explicit
        && !version.is_empty()
    {
        return Ok(version.to_string());
    }

    match lookup.current_version_term() {
        Ok(term) => Ok(term.name),
        Err(err) => Err(Error::CurrentVersion(err.messages().to_vec())),
    }
}
