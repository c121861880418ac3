use sincelog_index::Database;
use sincelog_types::{DocTag, SINCE_TAG, Taxonomy, deprecated_version};
use tracing::{debug, info};

use crate::{CHANGE_INDEX_META_KEY, RebuildSummary, Result, rebuild_change_index};

/// Make a deprecated entry show up under its deprecation version.
///
/// Given the entry's current tags, appends `since <deprecated version>` to
/// the stored tag list unless such a tag is already there, and relates the
/// entry to that version's term when the term exists. Terms are never
/// created here. Returns whether a tag was added.
pub fn tag_deprecated(db: &Database, entry_id: i64, tags: &[DocTag]) -> Result<bool> {
    let Some(version) = deprecated_version(tags) else {
        return Ok(false);
    };

    let already_tagged = tags
        .iter()
        .any(|t| t.is(SINCE_TAG) && t.content.trim() == version);

    if !already_tagged {
        let mut updated = tags.to_vec();
        updated.push(DocTag::since(version));
        db.set_entry_tags(entry_id, &updated)?;
        debug!(entry_id, version, "added since tag for deprecated version");
    }

    attach_deprecated_term(db, entry_id, version)?;

    Ok(!already_tagged)
}

/// Relate an entry to its deprecation version's term if that term exists.
///
/// Never creates the term. Returns whether the entry is now related.
pub fn attach_deprecated_term(db: &Database, entry_id: i64, version: &str) -> Result<bool> {
    match db.find_term(Taxonomy::Since, version)? {
        Some(term) => {
            db.attach_term(entry_id, term.id)?;
            Ok(true)
        }
        None => {
            debug!(entry_id, version, "no term for deprecated version, not attached");
            Ok(false)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillSummary {
    pub scanned: usize,
    pub tagged: usize,
    pub rebuild: RebuildSummary,
}

/// One-time repair for stores imported before deprecation tagging existed.
///
/// Does nothing if any change index is stored. Otherwise re-tags every
/// entry that has a version relation, from its stored tags, and rebuilds
/// the change index.
pub fn backfill_if_needed(db: &Database) -> Result<Option<BackfillSummary>> {
    if db.count_term_meta_by_key(CHANGE_INDEX_META_KEY)? > 0 {
        return Ok(None);
    }

    info!("no change index stored, backfilling deprecation tags");

    let mut summary = BackfillSummary::default();
    for entry_id in db.entry_ids_with_taxonomy(Taxonomy::Since)? {
        let tags = db.entry_tags(entry_id)?;
        if tag_deprecated(db, entry_id, &tags)? {
            summary.tagged += 1;
        }
        summary.scanned += 1;
    }

    summary.rebuild = rebuild_change_index(db)?;

    info!(
        scanned = summary.scanned,
        tagged = summary.tagged,
        "deprecation backfill finished"
    );

    Ok(Some(summary))
}
