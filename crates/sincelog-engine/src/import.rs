use sincelog_index::{Database, TICKET_META_KEY};
use sincelog_types::{ImportDocument, ParsedEntry, PostType, Taxonomy};
use std::cell::RefCell;
use tracing::{debug, info};

use crate::{
    IMPORTED_AT_OPTION, IMPORTED_VERSION_OPTION, Result, attach_deprecated_term,
    rebuild_change_index, tag_deprecated,
};

/// Callbacks the importer fires while writing a document into the store.
///
/// Observers are notified in registration order, inside the import
/// transaction.
pub trait ImportObserver {
    fn name(&self) -> &'static str;

    /// Called before the first entry is stored.
    fn on_import_started(&self, _db: &Database) -> Result<()> {
        Ok(())
    }

    /// Called after an entry and its relations have been stored.
    fn on_entry_imported(&self, _db: &Database, _entry_id: i64, _entry: &ParsedEntry) -> Result<()> {
        Ok(())
    }

    /// Called once after every entry has been stored.
    fn on_import_finished(&self, _db: &Database) -> Result<()> {
        Ok(())
    }
}

/// Adds `since` tags for deprecation versions as entries arrive.
///
/// A deprecation version's term may only be created by an entry stored
/// later in the same document, so relations are settled again once every
/// entry is in.
#[derive(Default)]
pub struct DeprecationTagger {
    deprecated: RefCell<Vec<(i64, String)>>,
}

impl DeprecationTagger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ImportObserver for DeprecationTagger {
    fn name(&self) -> &'static str {
        "deprecation-tagger"
    }

    fn on_import_started(&self, _db: &Database) -> Result<()> {
        self.deprecated.borrow_mut().clear();
        Ok(())
    }

    fn on_entry_imported(&self, db: &Database, entry_id: i64, entry: &ParsedEntry) -> Result<()> {
        tag_deprecated(db, entry_id, &entry.tags)?;
        if let Some(version) = entry.deprecated_version() {
            self.deprecated
                .borrow_mut()
                .push((entry_id, version.to_string()));
        }
        Ok(())
    }

    fn on_import_finished(&self, db: &Database) -> Result<()> {
        let deprecated = std::mem::take(&mut *self.deprecated.borrow_mut());

        let mut unattached = 0;
        for (entry_id, version) in &deprecated {
            if !attach_deprecated_term(db, *entry_id, version)? {
                unattached += 1;
            }
        }

        debug!(
            deprecated = deprecated.len(),
            unattached, "settled deprecation relations"
        );
        Ok(())
    }
}

/// Rebuilds the change index when the import is done.
pub struct ChangeIndexer;

impl ImportObserver for ChangeIndexer {
    fn name(&self) -> &'static str {
        "change-indexer"
    }

    fn on_import_finished(&self, db: &Database) -> Result<()> {
        rebuild_change_index(db)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum ImportProgress {
    EntryImported {
        entry_id: i64,
        post_type: PostType,
        title: String,
    },
    Finished {
        entries: usize,
        version: Option<String>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub entries: usize,
    pub version: Option<String>,
}

pub struct Importer<'a> {
    db: &'a Database,
    observers: Vec<Box<dyn ImportObserver>>,
}

impl<'a> Importer<'a> {
    /// Importer with no observers.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            observers: Vec::new(),
        }
    }

    /// Importer with the deprecation tagger followed by the change indexer.
    pub fn with_default_observers(db: &'a Database) -> Self {
        let mut importer = Self::new(db);
        importer.register(Box::new(DeprecationTagger::new()));
        importer.register(Box::new(ChangeIndexer));
        importer
    }

    pub fn register(&mut self, observer: Box<dyn ImportObserver>) {
        debug!(observer = observer.name(), "registered import observer");
        self.observers.push(observer);
    }

    pub fn observer_names(&self) -> Vec<&'static str> {
        self.observers.iter().map(|o| o.name()).collect()
    }

    /// Write every entry of `document` into the store in one transaction.
    pub fn run<F>(&self, document: &ImportDocument, mut on_progress: F) -> Result<ImportSummary>
    where
        F: FnMut(ImportProgress),
    {
        let summary = self.db.transaction(|db| {
            let mut summary = ImportSummary::default();

            for observer in &self.observers {
                observer.on_import_started(db).map_err(into_index)?;
            }

            for entry in &document.entries {
                let entry_id = store_entry(db, entry)?;

                for observer in &self.observers {
                    observer.on_entry_imported(db, entry_id, entry).map_err(into_index)?;
                }

                on_progress(ImportProgress::EntryImported {
                    entry_id,
                    post_type: entry.post_type,
                    title: entry.title.clone(),
                });
                summary.entries += 1;
            }

            if let Some(version) = document.version.as_deref().map(str::trim)
                && !version.is_empty()
            {
                db.set_option(IMPORTED_VERSION_OPTION, version)?;
                summary.version = Some(version.to_string());
            }
            db.set_option(IMPORTED_AT_OPTION, &chrono::Utc::now().to_rfc3339())?;

            for observer in &self.observers {
                observer.on_import_finished(db).map_err(into_index)?;
            }

            Ok(summary)
        })?;

        info!(
            entries = summary.entries,
            version = summary.version.as_deref().unwrap_or("-"),
            "import finished"
        );

        on_progress(ImportProgress::Finished {
            entries: summary.entries,
            version: summary.version.clone(),
        });

        Ok(summary)
    }
}

// The store's transaction helper speaks the index error type.
fn into_index(err: crate::Error) -> sincelog_index::Error {
    match err {
        crate::Error::Index(err) => err,
        other => sincelog_index::Error::Query(other.to_string()),
    }
}

/// Upsert one parsed entry with its meta and term relations.
fn store_entry(db: &Database, entry: &ParsedEntry) -> sincelog_index::Result<i64> {
    let entry_id = db.upsert_entry(entry.post_type, entry.title.trim())?;

    db.set_entry_tags(entry_id, &entry.tags)?;
    match entry.ticket.as_deref().map(str::trim) {
        Some(ticket) if !ticket.is_empty() => db.set_entry_meta(entry_id, TICKET_META_KEY, ticket)?,
        _ => db.delete_entry_meta(entry_id, TICKET_META_KEY)?,
    }

    for taxonomy in [Taxonomy::Since, Taxonomy::Package, Taxonomy::SourceFile] {
        db.detach_taxonomy(entry_id, taxonomy)?;
    }

    for version in entry.since_versions() {
        let term = db.get_or_insert_term(Taxonomy::Since, version)?;
        db.attach_term(entry_id, term.id)?;
    }
    for package in entry.packages.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        let term = db.get_or_insert_term(Taxonomy::Package, package)?;
        db.attach_term(entry_id, term.id)?;
    }
    if let Some(source_file) = entry.source_file.as_deref().map(str::trim)
        && !source_file.is_empty()
    {
        let term = db.get_or_insert_term(Taxonomy::SourceFile, source_file)?;
        db.attach_term(entry_id, term.id)?;
    }

    Ok(entry_id)
}
