use sincelog_types::PostType;

/// Entry row from the store.
///
/// Only the columns; tags, ticket and term relations are loaded separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRecord {
    pub id: i64,
    pub post_type: PostType,
    pub title: String,
}

/// Taxonomy term row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    pub id: i64,
    /// Taxonomy name (since, package, source_file).
    pub taxonomy: String,
    pub name: String,
}
