use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{Error, PostType};

/// How an entry relates to a given version.
///
/// Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Introduced,
    Modified,
    Deprecated,
}

impl ChangeType {
    pub const ALL: [ChangeType; 3] = [
        ChangeType::Introduced,
        ChangeType::Modified,
        ChangeType::Deprecated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Introduced => "introduced",
            ChangeType::Modified => "modified",
            ChangeType::Deprecated => "deprecated",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Introduced => "Introduced",
            ChangeType::Modified => "Modified",
            ChangeType::Deprecated => "Deprecated",
        }
    }

    /// Classify an entry for `version`.
    ///
    /// Introduced wins over deprecated, which wins over modified.
    pub fn classify(version: &str, introduced: Option<&str>, deprecated: Option<&str>) -> Self {
        if introduced == Some(version) {
            ChangeType::Introduced
        } else if deprecated == Some(version) {
            ChangeType::Deprecated
        } else {
            ChangeType::Modified
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "introduced" => Ok(ChangeType::Introduced),
            "modified" => Ok(ChangeType::Modified),
            "deprecated" => Ok(ChangeType::Deprecated),
            other => Err(Error::UnknownChangeType(other.to_string())),
        }
    }
}

/// Denormalized per-version index: change type -> post type -> entry ids.
///
/// Backed by ordered maps so serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeIndex {
    changes: BTreeMap<ChangeType, BTreeMap<PostType, Vec<i64>>>,
}

impl ChangeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change_type: ChangeType, post_type: PostType, entry_id: i64) {
        self.changes
            .entry(change_type)
            .or_default()
            .entry(post_type)
            .or_default()
            .push(entry_id);
    }

    /// Ids in one bucket, in insertion order.
    pub fn bucket(&self, change_type: ChangeType, post_type: PostType) -> &[i64] {
        self.changes
            .get(&change_type)
            .and_then(|by_type| by_type.get(&post_type))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids for a change type, optionally restricted to one post type.
    pub fn ids(&self, change_type: ChangeType, post_type: Option<PostType>) -> Vec<i64> {
        match post_type {
            Some(post_type) => self.bucket(change_type, post_type).to_vec(),
            None => self
                .changes
                .get(&change_type)
                .map(|by_type| by_type.values().flatten().copied().collect())
                .unwrap_or_default(),
        }
    }

    /// Change type an entry was filed under, if any.
    pub fn change_type_of(&self, entry_id: i64) -> Option<ChangeType> {
        self.changes.iter().find_map(|(change_type, by_type)| {
            by_type
                .values()
                .any(|ids| ids.contains(&entry_id))
                .then_some(*change_type)
        })
    }

    pub fn len(&self) -> usize {
        self.changes
            .values()
            .flat_map(|by_type| by_type.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_tie_break_order() {
        assert_eq!(
            ChangeType::classify("4.0", Some("4.0"), Some("4.0")),
            ChangeType::Introduced
        );
        assert_eq!(
            ChangeType::classify("4.5", Some("4.0"), Some("4.5")),
            ChangeType::Deprecated
        );
        assert_eq!(
            ChangeType::classify("4.2", Some("4.0"), Some("4.5")),
            ChangeType::Modified
        );
        assert_eq!(
            ChangeType::classify("4.2", None, None),
            ChangeType::Modified
        );
    }

    #[test]
    fn test_index_buckets() {
        let mut index = ChangeIndex::new();
        index.push(ChangeType::Introduced, PostType::Function, 3);
        index.push(ChangeType::Introduced, PostType::Class, 1);
        index.push(ChangeType::Introduced, PostType::Function, 2);
        index.push(ChangeType::Modified, PostType::Hook, 9);

        assert_eq!(index.bucket(ChangeType::Introduced, PostType::Function), &[3, 2]);
        assert_eq!(index.ids(ChangeType::Introduced, None), vec![1, 3, 2]);
        assert!(index.ids(ChangeType::Deprecated, None).is_empty());
        assert_eq!(index.change_type_of(9), Some(ChangeType::Modified));
        assert_eq!(index.change_type_of(42), None);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_json_layout() {
        let mut index = ChangeIndex::new();
        index.push(ChangeType::Modified, PostType::Method, 7);
        index.push(ChangeType::Introduced, PostType::Hook, 5);

        let json = index.to_json().unwrap();
        assert_eq!(json, r#"{"introduced":{"hook":[5]},"modified":{"method":[7]}}"#);
        assert_eq!(ChangeIndex::from_json(&json).unwrap(), index);
    }
}
