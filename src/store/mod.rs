//! Document store
//!
//! The authoritative collection of documents for the running service, behind
//! the [`DocumentStore`] trait so the workflow engine and the handlers never
//! depend on a concrete backing store. The in-memory implementation preserves
//! insertion order and recomputes statistics by full scan on every call.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Datelike, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::classify::{self, NumberScope};
use crate::models::{DashboardStats, Document, DocumentPatch, DocumentStatus, DocumentType, Priority};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document {0} not found")]
    NotFound(Uuid),
}

/// Repository interface for documents.
///
/// `update` and `remove` on a missing id are a silent no-op by default,
/// matching the permissive policy of the legacy system. A store constructed
/// in strict mode reports [`StoreError::NotFound`] instead; both behaviors
/// are intentional and tested.
pub trait DocumentStore: Send + Sync {
    /// Append a fully formed document. The caller has already assigned the
    /// id, serial and timestamps; it is visible to every subsequent query.
    fn add(&self, doc: Document);

    fn get(&self, id: Uuid) -> Option<Document>;

    /// All documents in insertion order.
    fn all(&self) -> Vec<Document>;

    /// Documents of one type, insertion order preserved.
    fn by_type(&self, doc_type: DocumentType) -> Vec<Document>;

    /// Merge a partial update into the document with `id`. Returns the
    /// updated document, or `Ok(None)` when the id is unknown and the store
    /// is permissive.
    fn update(&self, id: Uuid, patch: DocumentPatch) -> Result<Option<Document>, StoreError>;

    /// Delete the document with `id`. Returns whether a document was removed.
    fn remove(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Dashboard counters, recomputed by scanning the full collection.
    fn stats(&self) -> DashboardStats;

    /// Next serial for a numbering scope, e.g. `PC-2025-001`. Sequences are
    /// per `(scope, year)` and owned by the store, so two submissions in the
    /// same batch can never be handed the same serial.
    fn next_document_number(&self, scope: NumberScope) -> String;
}

#[derive(Default)]
struct Inner {
    documents: Vec<Document>,
    serials: HashMap<(NumberScope, i32), u32>,
}

/// In-memory [`DocumentStore`].
pub struct MemoryStore {
    inner: RwLock<Inner>,
    strict: bool,
}

impl MemoryStore {
    /// Permissive store: missing ids on update/remove are silently ignored.
    pub fn new() -> Self {
        Self::with_strict_mode(false)
    }

    pub fn with_strict_mode(strict: bool) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            strict,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for MemoryStore {
    fn add(&self, doc: Document) {
        self.write().documents.push(doc);
    }

    fn get(&self, id: Uuid) -> Option<Document> {
        self.read().documents.iter().find(|d| d.id == id).cloned()
    }

    fn all(&self) -> Vec<Document> {
        self.read().documents.clone()
    }

    fn by_type(&self, doc_type: DocumentType) -> Vec<Document> {
        self.read()
            .documents
            .iter()
            .filter(|d| d.doc_type == doc_type)
            .cloned()
            .collect()
    }

    fn update(&self, id: Uuid, patch: DocumentPatch) -> Result<Option<Document>, StoreError> {
        let mut inner = self.write();
        match inner.documents.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.apply(patch);
                Ok(Some(doc.clone()))
            }
            None if self.strict => Err(StoreError::NotFound(id)),
            None => Ok(None),
        }
    }

    fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut inner = self.write();
        let before = inner.documents.len();
        inner.documents.retain(|d| d.id != id);
        let removed = inner.documents.len() < before;
        if !removed && self.strict {
            return Err(StoreError::NotFound(id));
        }
        Ok(removed)
    }

    fn stats(&self) -> DashboardStats {
        let inner = self.read();
        let mut stats = DashboardStats::default();
        for doc in &inner.documents {
            match doc.doc_type {
                DocumentType::Incoming => stats.incoming += 1,
                DocumentType::Outgoing => stats.outgoing += 1,
                DocumentType::Internal => stats.internal += 1,
                DocumentType::PortCompany => {}
            }
            if doc.status == DocumentStatus::Archived {
                stats.archived += 1;
            }
            if doc.priority == Priority::Urgent {
                stats.urgent += 1;
            }
            if doc.status == DocumentStatus::Pending {
                stats.pending += 1;
            }
        }
        stats
    }

    fn next_document_number(&self, scope: NumberScope) -> String {
        let year = Utc::now().year();
        let mut inner = self.write();
        let seq = inner.serials.entry((scope, year)).or_insert(0);
        *seq += 1;
        classify::format_document_number(scope.prefix(), year, *seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileKind;

    fn doc(doc_type: DocumentType, status: DocumentStatus, priority: Priority) -> Document {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            doc_type,
            title: "t".into(),
            topic: "t".into(),
            description: None,
            file_name: "t.pdf".into(),
            file_kind: FileKind::Pdf,
            file_size: None,
            attachments: vec![],
            department: None,
            category: None,
            audience: None,
            company: None,
            priority,
            status,
            gm_response: None,
            gm_comment: None,
            forwarded_by: None,
            forwarded_to: None,
            document_number: None,
            created_by: "com".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn add_makes_document_immediately_visible() {
        let store = MemoryStore::new();
        let d = doc(DocumentType::Incoming, DocumentStatus::Pending, Priority::Low);
        let id = d.id;
        store.add(d);
        assert!(store.get(id).is_some());
        assert_eq!(store.by_type(DocumentType::Incoming).len(), 1);
    }

    #[test]
    fn by_type_preserves_insertion_order() {
        let store = MemoryStore::new();
        let first = doc(DocumentType::Outgoing, DocumentStatus::Pending, Priority::Low);
        let second = doc(DocumentType::Outgoing, DocumentStatus::Pending, Priority::Low);
        let (first_id, second_id) = (first.id, second.id);
        store.add(first);
        store.add(doc(DocumentType::Incoming, DocumentStatus::Pending, Priority::Low));
        store.add(second);
        let outgoing = store.by_type(DocumentType::Outgoing);
        assert_eq!(
            outgoing.iter().map(|d| d.id).collect::<Vec<_>>(),
            vec![first_id, second_id]
        );
    }

    #[test]
    fn permissive_update_ignores_missing_id() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.update(Uuid::new_v4(), DocumentPatch::default()),
            Ok(None)
        ));
        assert!(matches!(store.remove(Uuid::new_v4()), Ok(false)));
    }

    #[test]
    fn strict_update_reports_not_found() {
        let store = MemoryStore::with_strict_mode(true);
        let id = Uuid::new_v4();
        assert_eq!(
            store.update(id, DocumentPatch::default()),
            Err(StoreError::NotFound(id))
        );
        assert_eq!(store.remove(id), Err(StoreError::NotFound(id)));
    }

    #[test]
    fn update_merges_partial_fields() {
        let store = MemoryStore::new();
        let mut d = doc(DocumentType::PortCompany, DocumentStatus::PendingSecretary, Priority::High);
        d.gm_comment = Some("hold until the audit".into());
        let id = d.id;
        store.add(d);

        let updated = store
            .update(
                id,
                DocumentPatch {
                    status: Some(DocumentStatus::ApprovedByDg),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, DocumentStatus::ApprovedByDg);
        assert_eq!(updated.gm_comment.as_deref(), Some("hold until the audit"));
    }

    #[test]
    fn stats_recount_the_full_collection() {
        let store = MemoryStore::new();
        for _ in 0..3 {
            store.add(doc(DocumentType::Incoming, DocumentStatus::InReview, Priority::Low));
        }
        store.add(doc(DocumentType::Outgoing, DocumentStatus::Pending, Priority::Medium));
        store.add(doc(DocumentType::Outgoing, DocumentStatus::Replied, Priority::Urgent));
        // Archived counts by status regardless of type.
        store.add(doc(DocumentType::Incoming, DocumentStatus::Archived, Priority::Low));

        let stats = store.stats();
        assert_eq!(
            stats,
            DashboardStats {
                incoming: 4,
                outgoing: 2,
                internal: 0,
                archived: 1,
                urgent: 1,
                pending: 1,
            }
        );
    }

    #[test]
    fn serials_are_monotonic_per_scope() {
        let store = MemoryStore::new();
        let year = Utc::now().year();
        assert_eq!(
            store.next_document_number(NumberScope::PortCompany),
            classify::format_document_number("PC", year, 1)
        );
        assert_eq!(
            store.next_document_number(NumberScope::PortCompany),
            classify::format_document_number("PC", year, 2)
        );
        // Scopes do not share a sequence.
        assert_eq!(
            store.next_document_number(NumberScope::Outgoing),
            classify::format_document_number("OUT", year, 1)
        );
    }

    #[test]
    fn serials_survive_document_removal() {
        let store = MemoryStore::new();
        let year = Utc::now().year();
        let first = store.next_document_number(NumberScope::Archive);
        let d = doc(DocumentType::Incoming, DocumentStatus::Archived, Priority::Low);
        let id = d.id;
        store.add(d);
        store.remove(id).unwrap();
        // The legacy scheme derived sequences from the collection length and
        // could reissue a serial after a delete; the counter cannot.
        let second = store.next_document_number(NumberScope::Archive);
        assert_eq!(first, classify::format_document_number("ARCH", year, 1));
        assert_eq!(second, classify::format_document_number("ARCH", year, 2));
    }
}
