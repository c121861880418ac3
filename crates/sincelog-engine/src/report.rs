use sincelog_index::Database;
use sincelog_types::{ChangeType, DocEntry, PostType, Taxonomy};
use tracing::{debug, info};

use crate::{Error, Result, backfill_if_needed, read_change_index, rebuild_change_index};

/// What to report on.
///
/// `None` filters mean "any": every change type in report order, or every
/// post type grouped under sub-headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub version: String,
    pub change_type: Option<ChangeType>,
    pub post_type: Option<PostType>,
}

impl ReportOptions {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            change_type: None,
            post_type: None,
        }
    }

    pub fn change_type(mut self, change_type: Option<ChangeType>) -> Self {
        self.change_type = change_type;
        self
    }

    pub fn post_type(mut self, post_type: Option<PostType>) -> Self {
        self.post_type = post_type;
        self
    }

    fn change_types(&self) -> Vec<ChangeType> {
        match self.change_type {
            Some(change_type) => vec![change_type],
            None => ChangeType::ALL.to_vec(),
        }
    }
}

/// Presentation settings for detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSettings {
    /// Prefix the ticket number is appended to.
    pub ticket_url: String,
    /// Shown when an entry has no package.
    pub unspecified_package: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            ticket_url: "https://core.trac.wordpress.org/ticket/".to_string(),
            unspecified_package: "unspecified".to_string(),
        }
    }
}

/// One entry as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub post_type: PostType,
    pub title: String,
    pub ticket: Option<String>,
    pub modification: Option<String>,
    pub alternative: Option<String>,
    pub source_file: Option<String>,
    pub packages: Vec<String>,
}

impl ReportEntry {
    pub fn from_entry(entry: DocEntry, change_type: ChangeType, version: &str) -> Self {
        let modification = match change_type {
            ChangeType::Modified => entry
                .changelog()
                .get(version)
                .and_then(|detail| detail.modification()),
            _ => None,
        };
        let alternative = match change_type {
            ChangeType::Deprecated => entry.deprecation_alternative(),
            _ => None,
        };

        Self {
            post_type: entry.post_type,
            title: entry.title,
            ticket: entry.ticket,
            modification,
            alternative,
            source_file: entry.source_file,
            packages: entry.packages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub change_type: ChangeType,
    /// Ordered by post type, then title.
    pub entries: Vec<ReportEntry>,
}

/// A report ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeReport {
    pub options: ReportOptions,
    pub sections: Vec<ReportSection>,
}

impl ChangeReport {
    pub fn render(&self, settings: &ReportSettings) -> String {
        let grouped_by_change = self.options.change_type.is_none();
        let grouped_by_type = self.options.post_type.is_none();

        let mut lines = vec![format!("Changes in {}", self.options.version), String::new()];

        for section in &self.sections {
            if grouped_by_change {
                lines.push(String::new());
                lines.push(section.change_type.label().to_string());
                lines.push(String::new());
            }

            let type_indent = if grouped_by_change { "\t" } else { "" };

            if section.entries.is_empty() {
                lines.push(format!("{}No changes.", type_indent));
                continue;
            }

            let title_indent = format!("{}{}", type_indent, if grouped_by_type { "\t" } else { "" });
            let detail_indent = format!("\t{}", title_indent);
            let mut current_type = None;

            for entry in &section.entries {
                if grouped_by_type && current_type != Some(entry.post_type) {
                    current_type = Some(entry.post_type);
                    lines.push(String::new());
                    lines.push(format!("{}{}", type_indent, entry.post_type.label()));
                    lines.push(String::new());
                }

                lines.push(format!("{}{}", title_indent, entry.title));

                if let Some(ticket) = &entry.ticket {
                    lines.push(format!(
                        "{}ticket: {}{}",
                        detail_indent, settings.ticket_url, ticket
                    ));
                }
                if let Some(modification) = &entry.modification {
                    lines.push(format!("{}modification: {}", detail_indent, modification));
                }
                if let Some(alternative) = &entry.alternative {
                    lines.push(format!("{}alternative: {}", detail_indent, alternative));
                }
                if let Some(source_file) = &entry.source_file {
                    lines.push(format!("{}source: {}", detail_indent, source_file));
                }

                let packages = if entry.packages.is_empty() {
                    settings.unspecified_package.clone()
                } else {
                    entry.packages.join(", ")
                };
                lines.push(format!("{}package: {}", detail_indent, packages));
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

/// Collect the report for a version.
///
/// Fails with `UnknownVersion` when the version has no term. Builds the
/// change index first if the store has none, or if this version's index
/// is missing.
pub fn build_report(db: &Database, options: &ReportOptions) -> Result<ChangeReport> {
    let term = db
        .find_term(Taxonomy::Since, &options.version)?
        .ok_or_else(|| Error::UnknownVersion(options.version.clone()))?;

    backfill_if_needed(db)?;

    let index = match read_change_index(db, term.id)? {
        Some(index) => index,
        None => {
            info!(version = %term.name, "change index missing for version, rebuilding");
            rebuild_change_index(db)?;
            read_change_index(db, term.id)?.unwrap_or_default()
        }
    };

    let mut sections = Vec::new();
    for change_type in options.change_types() {
        let ids = index.ids(change_type, options.post_type);
        let entries = db
            .load_entries(&ids)?
            .into_iter()
            .map(|entry| ReportEntry::from_entry(entry, change_type, &options.version))
            .collect::<Vec<_>>();

        debug!(%change_type, count = entries.len(), "collected report section");
        sections.push(ReportSection {
            change_type,
            entries,
        });
    }

    Ok(ChangeReport {
        options: options.clone(),
        sections,
    })
}

/// Collect and render the report for a version.
pub fn generate_report(
    db: &Database,
    options: &ReportOptions,
    settings: &ReportSettings,
) -> Result<String> {
    Ok(build_report(db, options)?.render(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(post_type: PostType, title: &str) -> ReportEntry {
        ReportEntry {
            post_type,
            title: title.to_string(),
            ticket: None,
            modification: None,
            alternative: None,
            source_file: None,
            packages: Vec::new(),
        }
    }

    #[test]
    fn test_empty_single_section_has_no_header() {
        let report = ChangeReport {
            options: ReportOptions::new("4.2").change_type(Some(ChangeType::Deprecated)),
            sections: vec![ReportSection {
                change_type: ChangeType::Deprecated,
                entries: Vec::new(),
            }],
        };

        assert_eq!(
            report.render(&ReportSettings::default()),
            "Changes in 4.2\n\nNo changes.\n"
        );
    }

    #[test]
    fn test_single_type_filter_drops_sub_headers() {
        let mut e = entry(PostType::Hook, "init");
        e.ticket = Some("123".to_string());
        e.packages = vec!["WordPress".to_string(), "Hooks".to_string()];

        let report = ChangeReport {
            options: ReportOptions::new("1.5.0")
                .change_type(Some(ChangeType::Introduced))
                .post_type(Some(PostType::Hook)),
            sections: vec![ReportSection {
                change_type: ChangeType::Introduced,
                entries: vec![e],
            }],
        };

        let settings = ReportSettings {
            ticket_url: "https://example.test/t/".to_string(),
            unspecified_package: "unspecified".to_string(),
        };
        assert_eq!(
            report.render(&settings),
            "Changes in 1.5.0\n\ninit\n\tticket: https://example.test/t/123\n\tpackage: WordPress, Hooks\n"
        );
    }

    #[test]
    fn test_post_type_header_once_per_block() {
        let report = ChangeReport {
            options: ReportOptions::new("4.2").change_type(Some(ChangeType::Modified)),
            sections: vec![ReportSection {
                change_type: ChangeType::Modified,
                entries: vec![
                    entry(PostType::Function, "a_func"),
                    entry(PostType::Function, "b_func"),
                ],
            }],
        };

        let text = report.render(&ReportSettings::default());
        assert_eq!(text.matches("Functions").count(), 1);
        assert!(text.contains("\ta_func\n\t\tpackage: unspecified\n\tb_func\n"));
    }

    #[test]
    fn test_unknown_version_is_an_error() {
        let db = Database::open_in_memory().unwrap();

        let err = generate_report(
            &db,
            &ReportOptions::new("99.99"),
            &ReportSettings::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::UnknownVersion(ref v) if v == "99.99"));
    }
}
