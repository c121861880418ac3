use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::{Error, earliest_version};

pub const SINCE_TAG: &str = "since";
pub const DEPRECATED_TAG: &str = "deprecated";

static SINCE_DESCRIPTION_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="since-description">(.*)</span>"#).expect("valid regex")
});

static DEPRECATED_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    // A '.', '!' or '?' only ends the sentence when whitespace or the end follows,
    // so dotted versions stay inside it.
    Regex::new(r"[^.!?]*has been deprecated(?:[^.!?]|[.!?]\S)*[.!?]?\s*").expect("valid regex")
});

/// Kind of documented code element.
///
/// Variant order matches the stored names, so sorting by the enum and
/// sorting by `as_str()` agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Class,
    Function,
    Hook,
    Method,
}

impl PostType {
    pub const ALL: [PostType; 4] = [
        PostType::Class,
        PostType::Function,
        PostType::Hook,
        PostType::Method,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Class => "class",
            PostType::Function => "function",
            PostType::Hook => "hook",
            PostType::Method => "method",
        }
    }

    /// Plural label used as a report sub-header.
    pub fn label(&self) -> &'static str {
        match self {
            PostType::Class => "Classes",
            PostType::Function => "Functions",
            PostType::Hook => "Hooks",
            PostType::Method => "Methods",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(PostType::Class),
            "function" => Ok(PostType::Function),
            "hook" => Ok(PostType::Hook),
            "method" => Ok(PostType::Method),
            other => Err(Error::UnknownPostType(other.to_string())),
        }
    }
}

/// Taxonomies an entry can be related to through terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Taxonomy {
    Since,
    Package,
    SourceFile,
}

impl Taxonomy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Taxonomy::Since => "since",
            Taxonomy::Package => "package",
            Taxonomy::SourceFile => "source_file",
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A doc-comment annotation such as `@since 4.2 Added the $args parameter.`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DocTag {
    pub fn since(version: impl Into<String>) -> Self {
        Self {
            name: SINCE_TAG.to_string(),
            content: version.into(),
            description: None,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// Per-version changelog detail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub description: Option<String>,
}

impl ChangelogEntry {
    /// Description with the `since-description` span markup stripped.
    /// Returns `None` when nothing is left.
    pub fn modification(&self) -> Option<String> {
        let raw = self.description.as_deref()?;
        let text = SINCE_DESCRIPTION_MARKUP.replace_all(raw, "$1");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

/// Version -> detail map derived from an entry's `since` tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    versions: BTreeMap<String, ChangelogEntry>,
}

impl Changelog {
    pub fn from_tags(tags: &[DocTag]) -> Self {
        let mut versions = BTreeMap::new();
        for tag in tags.iter().filter(|t| t.is(SINCE_TAG)) {
            let version = tag.content.trim();
            if version.is_empty() {
                continue;
            }
            versions
                .entry(version.to_string())
                .or_insert_with(|| ChangelogEntry {
                    description: tag.description.clone(),
                });
        }
        Self { versions }
    }

    pub fn get(&self, version: &str) -> Option<&ChangelogEntry> {
        self.versions.get(version)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.versions.contains_key(version)
    }

    /// The version the entry first appeared in.
    pub fn introduced(&self) -> Option<&str> {
        earliest_version(self.versions.keys().map(String::as_str))
    }

}

/// First tag with the given name.
pub fn find_tag<'a>(tags: &'a [DocTag], name: &str) -> Option<&'a DocTag> {
    tags.iter().find(|t| t.is(name))
}

/// Version named by the first `deprecated` tag, if any.
pub fn deprecated_version(tags: &[DocTag]) -> Option<&str> {
    find_tag(tags, DEPRECATED_TAG)
        .map(|t| t.content.trim())
        .filter(|v| !v.is_empty())
}

/// A documented class, method, function or hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocEntry {
    pub id: i64,
    pub post_type: PostType,
    pub title: String,
    pub packages: Vec<String>,
    pub source_file: Option<String>,
    pub ticket: Option<String>,
    pub tags: Vec<DocTag>,
}

impl DocEntry {
    pub fn changelog(&self) -> Changelog {
        Changelog::from_tags(&self.tags)
    }

    /// What to use instead of a deprecated entry.
    ///
    /// The `deprecated` tag description minus the boilerplate
    /// "... has been deprecated." sentence.
    pub fn deprecation_alternative(&self) -> Option<String> {
        let description = find_tag(&self.tags, DEPRECATED_TAG)?.description.as_deref()?;
        let text = DEPRECATED_SENTENCE.replace_all(description, "");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, content: &str, description: Option<&str>) -> DocTag {
        DocTag {
            name: name.to_string(),
            content: content.to_string(),
            description: description.map(str::to_string),
        }
    }

    fn entry(tags: Vec<DocTag>) -> DocEntry {
        DocEntry {
            id: 1,
            post_type: PostType::Function,
            title: "wp_test".to_string(),
            packages: Vec::new(),
            source_file: None,
            ticket: None,
            tags,
        }
    }

    #[test]
    fn test_post_type_order_matches_names() {
        let mut by_enum = PostType::ALL.to_vec();
        by_enum.sort();
        let mut by_name = PostType::ALL.to_vec();
        by_name.sort_by_key(|p| p.as_str());
        assert_eq!(by_enum, by_name);
    }

    #[test]
    fn test_post_type_from_str() {
        assert_eq!("hook".parse::<PostType>().unwrap(), PostType::Hook);
        assert!("page".parse::<PostType>().is_err());
    }

    #[test]
    fn test_changelog_introduced_uses_version_order() {
        let changelog = Changelog::from_tags(&[
            tag("since", "4.10", None),
            tag("param", "string $a", None),
            tag("since", "4.9", Some("Added $a.")),
        ]);

        assert_eq!(changelog.introduced(), Some("4.9"));
        assert!(changelog.contains("4.10"));
        assert!(!changelog.contains("string $a"));
    }

    #[test]
    fn test_changelog_keeps_first_description() {
        let changelog = Changelog::from_tags(&[
            tag("since", "5.0", Some("first")),
            tag("since", "5.0", Some("second")),
        ]);

        assert_eq!(
            changelog.get("5.0").unwrap().description.as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_modification_strips_markup() {
        let detail = ChangelogEntry {
            description: Some(
                r#"<span class="since-description">Added the `$args` parameter.</span>"#
                    .to_string(),
            ),
        };
        assert_eq!(
            detail.modification().as_deref(),
            Some("Added the `$args` parameter.")
        );

        let blank = ChangelogEntry {
            description: Some("   ".to_string()),
        };
        assert_eq!(blank.modification(), None);
    }

    #[test]
    fn test_deprecated_version_trims() {
        let e = entry(vec![tag("deprecated", " 4.5 ", None)]);
        assert_eq!(deprecated_version(&e.tags), Some("4.5"));

        let e = entry(vec![tag("deprecated", "", None)]);
        assert_eq!(deprecated_version(&e.tags), None);
    }

    #[test]
    fn test_deprecation_alternative_strips_boilerplate() {
        let e = entry(vec![tag(
            "deprecated",
            "4.5",
            Some("This function has been deprecated. Use wp_new_thing() instead."),
        )]);
        assert_eq!(
            e.deprecation_alternative().as_deref(),
            Some("Use wp_new_thing() instead.")
        );

        let only_boilerplate = entry(vec![tag(
            "deprecated",
            "4.5",
            Some("This hook has been deprecated."),
        )]);
        assert_eq!(only_boilerplate.deprecation_alternative(), None);

        let dotted_version = entry(vec![tag(
            "deprecated",
            "5.0",
            Some("This function has been deprecated since 4.5.0. Use wp_new() instead."),
        )]);
        assert_eq!(
            dotted_version.deprecation_alternative().as_deref(),
            Some("Use wp_new() instead.")
        );
    }
}
