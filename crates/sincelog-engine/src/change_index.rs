use sincelog_index::Database;
use sincelog_types::{ChangeIndex, ChangeType, Changelog, Taxonomy, deprecated_version, sort_versions};
use tracing::{debug, info};

use crate::Result;

/// Term meta key the per-version change index is stored under.
pub const CHANGE_INDEX_META_KEY: &str = "change_index";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildSummary {
    pub versions: usize,
    pub classified: usize,
    pub skipped: usize,
}

/// Rebuild the change index for every version term.
///
/// All stored indexes are dropped first, then each version gets a fresh
/// index written in one go. Entries related to a version they have no
/// changelog data for are skipped.
pub fn rebuild_change_index(db: &Database) -> Result<RebuildSummary> {
    let removed = db.delete_term_meta_by_key(CHANGE_INDEX_META_KEY)?;
    debug!(removed, "dropped stored change indexes");

    let mut summary = RebuildSummary::default();

    for term in db.list_terms(Taxonomy::Since)? {
        let version = term.name.as_str();
        let mut changes = ChangeIndex::new();

        for entry_id in db.entry_ids_for_term(term.id, None)? {
            let Some(entry) = db.get_entry(entry_id)? else {
                continue;
            };
            let tags = db.entry_tags(entry_id)?;
            let changelog = Changelog::from_tags(&tags);

            if !changelog.contains(version) {
                debug!(
                    entry_id,
                    title = %entry.title,
                    version,
                    "no changelog data for tagged version, skipping"
                );
                summary.skipped += 1;
                continue;
            }

            let change_type =
                ChangeType::classify(version, changelog.introduced(), deprecated_version(&tags));
            changes.push(change_type, entry.post_type, entry_id);
            summary.classified += 1;
        }

        db.set_term_meta(term.id, CHANGE_INDEX_META_KEY, &changes.to_json()?)?;
        summary.versions += 1;
    }

    info!(
        versions = summary.versions,
        classified = summary.classified,
        skipped = summary.skipped,
        "change index rebuilt"
    );

    Ok(summary)
}

/// Stored change index for a version term, if one has been built.
pub fn read_change_index(db: &Database, term_id: i64) -> Result<Option<ChangeIndex>> {
    match db.get_term_meta(term_id, CHANGE_INDEX_META_KEY)? {
        Some(raw) => Ok(Some(ChangeIndex::from_json(&raw)?)),
        None => Ok(None),
    }
}

/// Per-version counts for listing known versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSummary {
    pub version: String,
    pub introduced: usize,
    pub modified: usize,
    pub deprecated: usize,
    pub indexed: bool,
}

/// Every version term, oldest first, with its indexed change counts.
pub fn version_summaries(db: &Database) -> Result<Vec<VersionSummary>> {
    let terms = db.list_terms(Taxonomy::Since)?;
    let mut names: Vec<String> = terms.iter().map(|t| t.name.clone()).collect();
    sort_versions(&mut names);

    let mut summaries = Vec::with_capacity(names.len());
    for name in names {
        let Some(term) = terms.iter().find(|t| t.name == name) else {
            continue;
        };
        let index = read_change_index(db, term.id)?;
        let count = |change_type| {
            index
                .as_ref()
                .map(|i| i.ids(change_type, None).len())
                .unwrap_or(0)
        };

        summaries.push(VersionSummary {
            introduced: count(ChangeType::Introduced),
            modified: count(ChangeType::Modified),
            deprecated: count(ChangeType::Deprecated),
            indexed: index.is_some(),
            version: name,
        });
    }

    Ok(summaries)
}
