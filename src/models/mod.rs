//! Data models for the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Incoming,
    Outgoing,
    Internal,
    PortCompany,
}

/// File kind derived from the filename extension. Never stored independently
/// of `file_name`; see [`crate::classify::file_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Pdf,
    Word,
    Excel,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Canonical document status. The legacy system carried a separate
/// `workflowStatus` field kept in lockstep with `status` for port company
/// documents; here the workflow states are plain variants of the one status
/// field and [`DocumentResponse`] projects them back out for API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    InReview,
    Replied,
    Archived,
    Completed,
    PendingSecretary,
    ForwardedToDg,
    ApprovedByDg,
    RejectedByDg,
    CommentedByDg,
}

impl DocumentStatus {
    /// Whether this status belongs to the port company approval pipeline.
    pub fn is_workflow(self) -> bool {
        matches!(
            self,
            DocumentStatus::PendingSecretary
                | DocumentStatus::ForwardedToDg
                | DocumentStatus::ApprovedByDg
                | DocumentStatus::RejectedByDg
                | DocumentStatus::CommentedByDg
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GmResponse {
    Approved,
    Rejected,
    Commented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    Technical,
    Commercial,
    Security,
    Captaincy,
    It,
    Hr,
    Management,
    Admin,
    Finance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Procurement,
    Contracts,
    Legal,
    Invoices,
}

/// Target audience tag for internal circulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    All,
    Directors,
    SimpleUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Dg,
    Secretary,
    Com,
    Admin,
    Company,
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub title: String,
    pub topic: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_kind: FileKind,
    pub file_size: Option<u64>,
    /// Storage paths; the first entry is the primary file.
    pub attachments: Vec<String>,
    pub department: Option<Department>,
    pub category: Option<Category>,
    pub audience: Option<Audience>,
    /// Submitting company name, only meaningful for port company documents.
    pub company: Option<String>,
    pub priority: Priority,
    pub status: DocumentStatus,
    pub gm_response: Option<GmResponse>,
    pub gm_comment: Option<String>,
    pub forwarded_by: Option<Role>,
    pub forwarded_to: Option<Role>,
    pub document_number: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Merge a partial update into this document. Absent fields are left
    /// untouched. `file_kind` is rederived whenever `file_name` changes so
    /// the two can never drift apart.
    pub fn apply(&mut self, patch: DocumentPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(topic) = patch.topic {
            self.topic = topic;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(file_name) = patch.file_name {
            self.file_kind = crate::classify::file_kind(&file_name);
            self.file_name = file_name;
        }
        if let Some(file_size) = patch.file_size {
            self.file_size = Some(file_size);
        }
        if let Some(attachments) = patch.attachments {
            self.attachments = attachments;
        }
        if let Some(department) = patch.department {
            self.department = Some(department);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(audience) = patch.audience {
            self.audience = Some(audience);
        }
        if let Some(company) = patch.company {
            self.company = Some(company);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(gm_response) = patch.gm_response {
            self.gm_response = Some(gm_response);
        }
        if let Some(gm_comment) = patch.gm_comment {
            self.gm_comment = Some(gm_comment);
        }
        if let Some(forwarded_by) = patch.forwarded_by {
            self.forwarded_by = Some(forwarded_by);
        }
        if let Some(forwarded_to) = patch.forwarded_to {
            self.forwarded_to = Some(forwarded_to);
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }
}

/// Partial update for a document. `id`, `doc_type`, `document_number` and
/// the creation stamps are deliberately absent: they are immutable once a
/// document exists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    pub attachments: Option<Vec<String>>,
    pub department: Option<Department>,
    pub category: Option<Category>,
    pub audience: Option<Audience>,
    pub company: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<DocumentStatus>,
    pub gm_response: Option<GmResponse>,
    pub gm_comment: Option<String>,
    pub forwarded_by: Option<Role>,
    pub forwarded_to: Option<Role>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub doc_type: DocumentType,
    pub title: String,
    pub topic: String,
    pub description: Option<String>,
    pub file_name: String,
    pub file_kind: FileKind,
    pub file_size: Option<u64>,
    pub attachments: Vec<String>,
    pub department: Option<Department>,
    pub category: Option<Category>,
    pub audience: Option<Audience>,
    pub company: Option<String>,
    pub priority: Priority,
    pub status: DocumentStatus,
    /// Presentation alias for port company documents; always equal to
    /// `status` when present.
    pub workflow_status: Option<DocumentStatus>,
    pub gm_response: Option<GmResponse>,
    pub gm_comment: Option<String>,
    pub forwarded_by: Option<Role>,
    pub forwarded_to: Option<Role>,
    pub document_number: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        let workflow_status = if doc.doc_type == DocumentType::PortCompany {
            Some(doc.status)
        } else {
            None
        };
        Self {
            id: doc.id,
            doc_type: doc.doc_type,
            title: doc.title,
            topic: doc.topic,
            description: doc.description,
            file_name: doc.file_name,
            file_kind: doc.file_kind,
            file_size: doc.file_size,
            attachments: doc.attachments,
            department: doc.department,
            category: doc.category,
            audience: doc.audience,
            company: doc.company,
            priority: doc.priority,
            status: doc.status,
            workflow_status,
            gm_response: doc.gm_response,
            gm_comment: doc.gm_comment,
            forwarded_by: doc.forwarded_by,
            forwarded_to: doc.forwarded_to,
            document_number: doc.document_number,
            created_by: doc.created_by,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub incoming: usize,
    pub outgoing: usize,
    pub internal: usize,
    pub archived: usize,
    pub urgent: usize,
    pub pending: usize,
}

// =============================================================================
// Users & Companies
// =============================================================================

/// Caller identity as resolved by the authentication layer. The engine
/// consumes `role` and `company_id` for scoping and `username`/`name` for
/// provenance stamps.
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
    pub name: String,
    pub company_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Company {
    pub id: String,
    pub nif: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub contact_person: String,
}

/// Company profile as presented to staff roles. Credentials never leave the
/// server.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyResponse {
    pub id: String,
    pub nif: String,
    pub name: String,
    pub email: String,
    pub contact_person: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            nif: company.nif,
            name: company.name,
            email: company.email,
            contact_person: company.contact_person,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// =============================================================================
// Upload collaborator
// =============================================================================

/// Descriptor returned by the upload collaborator for one stored file. The
/// storage path is opaque to the engine; it is recorded verbatim in
/// `attachments`.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub mime_type: String,
}

// =============================================================================
// API Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_document() -> Document {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        Document {
            id: Uuid::new_v4(),
            doc_type: DocumentType::PortCompany,
            title: "Berth request".into(),
            topic: "Berth request".into(),
            description: Some("Request from SEPCO to the DG".into()),
            file_name: "berth-request.pdf".into(),
            file_kind: FileKind::Pdf,
            file_size: Some(4096),
            attachments: vec!["/uploads/port_company/commercial/1_berth.pdf".into()],
            department: Some(Department::Commercial),
            category: None,
            audience: None,
            company: Some("SEPCO".into()),
            priority: Priority::High,
            status: DocumentStatus::PendingSecretary,
            gm_response: None,
            gm_comment: Some("needs a revised schedule".into()),
            forwarded_by: None,
            forwarded_to: None,
            document_number: Some("PC-2025-001".into()),
            created_by: "sepco".into(),
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn apply_preserves_unspecified_fields() {
        let mut doc = sample_document();
        let before_comment = doc.gm_comment.clone();
        doc.apply(DocumentPatch {
            status: Some(DocumentStatus::ApprovedByDg),
            ..Default::default()
        });
        assert_eq!(doc.status, DocumentStatus::ApprovedByDg);
        assert_eq!(doc.gm_comment, before_comment);
        assert_eq!(doc.company.as_deref(), Some("SEPCO"));
    }

    #[test]
    fn apply_rederives_file_kind_with_file_name() {
        let mut doc = sample_document();
        doc.apply(DocumentPatch {
            file_name: Some("minutes.docx".into()),
            ..Default::default()
        });
        assert_eq!(doc.file_kind, FileKind::Word);
    }

    #[test]
    fn response_projects_workflow_status_for_port_company_only() {
        let doc = sample_document();
        let resp = DocumentResponse::from(doc.clone());
        assert_eq!(resp.workflow_status, Some(DocumentStatus::PendingSecretary));

        let mut plain = doc;
        plain.doc_type = DocumentType::Incoming;
        plain.status = DocumentStatus::Pending;
        let resp = DocumentResponse::from(plain);
        assert_eq!(resp.workflow_status, None);
    }

    #[test]
    fn workflow_statuses_are_flagged() {
        assert!(DocumentStatus::PendingSecretary.is_workflow());
        assert!(DocumentStatus::CommentedByDg.is_workflow());
        assert!(!DocumentStatus::Pending.is_workflow());
        assert!(!DocumentStatus::Archived.is_workflow());
    }
}
