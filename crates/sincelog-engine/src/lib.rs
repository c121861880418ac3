// NOTE: Pipeline Ordering
//
// The deprecation tagger adds a synthetic `since` tag for an entry's
// deprecated version; the change index is derived from `since` tags. So the
// tagger must see an entry before the index is built from it. The importer
// enforces this by notifying observers in registration order, and the
// default registry puts the tagger first.
//
// The change index is a cache. It is rebuilt wholesale, never patched, and
// its absence is the signal that a store predates the tagger.

pub mod change_index;
pub mod deprecation;
pub mod error;
pub mod import;
pub mod report;
pub mod version;

pub use change_index::{
    CHANGE_INDEX_META_KEY, RebuildSummary, VersionSummary, read_change_index,
    rebuild_change_index, version_summaries,
};
pub use deprecation::{
    BackfillSummary, attach_deprecated_term, backfill_if_needed, tag_deprecated,
};
pub use error::{Error, Result};
pub use import::{
    ChangeIndexer, DeprecationTagger, ImportObserver, ImportProgress, ImportSummary, Importer,
};
pub use report::{
    ChangeReport, ReportEntry, ReportOptions, ReportSection, ReportSettings, build_report,
    generate_report,
};
pub use version::{
    CurrentVersionLookup, IMPORTED_AT_OPTION, IMPORTED_VERSION_OPTION, LookupError,
    current_version, resolve_version,
};
