//! Classification and derivation helpers
//!
//! Pure functions shared by the store, the workflow engine and the listing
//! handlers: file-kind derivation, document-number formatting and the
//! composable filter predicate behind every listing view.

use crate::models::{Category, Department, Document, FileKind};

// =============================================================================
// File kind
// =============================================================================

/// Derive the file kind from a filename extension.
///
/// Total function: a missing or unknown extension maps to [`FileKind::Other`].
/// Matching is case-insensitive on the substring after the final dot.
pub fn file_kind(file_name: &str) -> FileKind {
    let ext = match file_name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return FileKind::Other,
    };
    match ext.as_str() {
        "pdf" => FileKind::Pdf,
        "doc" | "docx" => FileKind::Word,
        "xls" | "xlsx" => FileKind::Excel,
        _ => FileKind::Other,
    }
}

// =============================================================================
// Document numbers
// =============================================================================

/// Numbering scope for human-readable serials. Incoming and internal
/// documents carry no serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberScope {
    Outgoing,
    Archive,
    PortCompany,
}

impl NumberScope {
    pub fn prefix(self) -> &'static str {
        match self {
            NumberScope::Outgoing => "OUT",
            NumberScope::Archive => "ARCH",
            NumberScope::PortCompany => "PC",
        }
    }
}

/// Format a document serial as `{prefix}-{year}-{seq:03}`, e.g. `PC-2025-001`.
///
/// Sequences above 999 widen rather than wrap, so serials stay unique within
/// a scope even in a long-lived session.
pub fn format_document_number(prefix: &str, year: i32, seq: u32) -> String {
    format!("{}-{}-{:03}", prefix, year, seq)
}

// =============================================================================
// Listing filters
// =============================================================================

/// Filter set used by the listing views. All clauses compose with AND; an
/// absent clause matches everything.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    /// Case-insensitive substring match on title, topic and description.
    pub search: Option<String>,
    pub department: Option<Department>,
    pub category: Option<Category>,
    /// Case-insensitive substring match on the document serial.
    pub document_number: Option<String>,
}

impl DocumentFilter {
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !needle.is_empty() {
                let in_title = doc.title.to_lowercase().contains(&needle);
                let in_topic = doc.topic.to_lowercase().contains(&needle);
                let in_description = doc
                    .description
                    .as_ref()
                    .map(|d| d.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !in_title && !in_topic && !in_description {
                    return false;
                }
            }
        }

        if let Some(department) = self.department {
            if doc.department != Some(department) {
                return false;
            }
        }

        if let Some(category) = self.category {
            if doc.category != Some(category) {
                return false;
            }
        }

        if let Some(ref number) = self.document_number {
            let needle = number.to_lowercase();
            if !needle.is_empty() {
                let matched = doc
                    .document_number
                    .as_ref()
                    .map(|n| n.to_lowercase().contains(&needle))
                    .unwrap_or(false);
                if !matched {
                    return false;
                }
            }
        }

        true
    }
}
