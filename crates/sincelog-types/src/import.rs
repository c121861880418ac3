use serde::{Deserialize, Serialize};

use crate::{DocTag, PostType, Result, SINCE_TAG, deprecated_version};

/// Parsed documentation handed over by the source parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDocument {
    /// Release the sources were parsed from; becomes the current version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub entries: Vec<ParsedEntry>,
}

impl ImportDocument {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// One documented element as produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub post_type: PostType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
    #[serde(default)]
    pub tags: Vec<DocTag>,
}

impl ParsedEntry {
    pub fn since_versions(&self) -> impl Iterator<Item = &str> {
        self.tags
            .iter()
            .filter(|t| t.is(SINCE_TAG))
            .map(|t| t.content.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn deprecated_version(&self) -> Option<&str> {
        deprecated_version(&self.tags)
    }
}
