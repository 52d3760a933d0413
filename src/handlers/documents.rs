//! Document endpoints: listing views, submission upload, partial update,
//! delete, dashboard statistics and attachment bundles.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::fs;
use uuid::Uuid;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::classify::{self, DocumentFilter, NumberScope};
use crate::models::*;
use crate::store::{DocumentStore, StoreError};
use crate::validation::{sanitize_filename, validate_file_upload, validate_submission};
use crate::workflow;

use super::AppState;

// =============================================================================
// Submission kinds
// =============================================================================

/// What the upload form is creating. Mirrors the original upload views:
/// archive uploads land as incoming documents already in `archived` status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmissionKind {
    Incoming,
    Outgoing,
    Internal,
    Archive,
    PortCompany,
}

impl SubmissionKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "incoming" => Some(SubmissionKind::Incoming),
            "outgoing" => Some(SubmissionKind::Outgoing),
            "internal" => Some(SubmissionKind::Internal),
            "archive" => Some(SubmissionKind::Archive),
            "port_company" => Some(SubmissionKind::PortCompany),
            _ => None,
        }
    }

    fn doc_type(self) -> DocumentType {
        match self {
            SubmissionKind::Incoming | SubmissionKind::Archive => DocumentType::Incoming,
            SubmissionKind::Outgoing => DocumentType::Outgoing,
            SubmissionKind::Internal => DocumentType::Internal,
            SubmissionKind::PortCompany => DocumentType::PortCompany,
        }
    }

    fn initial_status(self) -> DocumentStatus {
        match self {
            SubmissionKind::Archive => DocumentStatus::Archived,
            SubmissionKind::PortCompany => DocumentStatus::PendingSecretary,
            _ => DocumentStatus::Pending,
        }
    }

    fn default_priority(self) -> Priority {
        match self {
            SubmissionKind::Archive => Priority::Low,
            SubmissionKind::PortCompany => Priority::High,
            _ => Priority::Medium,
        }
    }

    fn number_scope(self) -> Option<NumberScope> {
        match self {
            SubmissionKind::Outgoing => Some(NumberScope::Outgoing),
            SubmissionKind::Archive => Some(NumberScope::Archive),
            SubmissionKind::PortCompany => Some(NumberScope::PortCompany),
            SubmissionKind::Incoming | SubmissionKind::Internal => None,
        }
    }

    fn storage_segment(self) -> &'static str {
        match self {
            SubmissionKind::Incoming => "incoming",
            SubmissionKind::Outgoing => "outgoing",
            SubmissionKind::Internal => "internal",
            SubmissionKind::Archive => "archive",
            SubmissionKind::PortCompany => "port_company",
        }
    }
}

// =============================================================================
// Listing
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListDocumentsQuery {
    #[serde(rename = "type")]
    pub doc_type: Option<DocumentType>,
    pub search: Option<String>,
    pub department: Option<Department>,
    pub category: Option<Category>,
    pub document_number: Option<String>,
}

/// List documents, optionally narrowed by type and the standard filter set.
/// Company users only ever see their own submissions.
pub async fn list_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ListDocumentsQuery>,
) -> impl IntoResponse {
    let mut documents = match query.doc_type {
        Some(doc_type) => state.store.by_type(doc_type),
        None => state.store.all(),
    };

    if user.role == Role::Company {
        documents.retain(|d| workflow::visible_to(d, &user));
    }

    let filter = DocumentFilter {
        search: query.search,
        department: query.department,
        category: query.category,
        document_number: query.document_number,
    };
    let responses: Vec<DocumentResponse> = documents
        .into_iter()
        .filter(|d| filter.matches(d))
        .map(DocumentResponse::from)
        .collect();

    (StatusCode::OK, Json(ApiResponse::success(responses)))
}

/// Get a single document
pub async fn get_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.store.get(id) {
        Some(doc) => {
            if user.role == Role::Company && !workflow::visible_to(&doc, &user) {
                return (
                    StatusCode::NOT_FOUND,
                    Json(ApiResponse::<DocumentResponse>::error("Document not found")),
                );
            }
            (
                StatusCode::OK,
                Json(ApiResponse::success(DocumentResponse::from(doc))),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Document not found")),
        ),
    }
}

// =============================================================================
// Update & delete
// =============================================================================

/// Partially update a document. Workflow fields of port company documents
/// can only change through the workflow endpoints, so the forward-only
/// guarantee cannot be bypassed here.
pub async fn update_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(mut patch): Json<DocumentPatch>,
) -> impl IntoResponse {
    if user.role == Role::Company {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<DocumentResponse>::error(
                "Companies cannot edit documents",
            )),
        );
    }

    if let Some(doc) = state.store.get(id) {
        let touches_workflow = patch.status.is_some()
            || patch.gm_response.is_some()
            || patch.gm_comment.is_some()
            || patch.forwarded_by.is_some()
            || patch.forwarded_to.is_some();
        if doc.doc_type == DocumentType::PortCompany && touches_workflow {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Workflow fields of a port company document can only change \
                     through the workflow actions",
                )),
            );
        }
        // The workflow statuses are reserved for port company documents.
        if doc.doc_type != DocumentType::PortCompany
            && patch.status.map_or(false, DocumentStatus::is_workflow)
        {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "Workflow statuses only apply to port company documents",
                )),
            );
        }
    }

    if patch.updated_at.is_none() {
        patch.updated_at = Some(Utc::now());
    }

    match state.store.update(id, patch) {
        Ok(Some(doc)) => (
            StatusCode::OK,
            Json(ApiResponse::success(DocumentResponse::from(doc))),
        ),
        // Permissive store: unknown id is a documented no-op.
        Ok(None) => (
            StatusCode::OK,
            Json(ApiResponse {
                success: true,
                data: None,
                error: None,
            }),
        ),
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Document not found")),
        ),
    }
}

/// Delete a document
pub async fn delete_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if user.role == Role::Company {
        match state.store.get(id) {
            Some(doc) if workflow::visible_to(&doc, &user) => {}
            _ => {
                return (
                    StatusCode::FORBIDDEN,
                    Json(ApiResponse::<()>::error(
                        "Companies can only delete their own documents",
                    )),
                )
            }
        }
    }

    match state.store.remove(id) {
        Ok(removed) => {
            if removed {
                tracing::info!("User {} deleted document {}", user.username, id);
            }
            (StatusCode::OK, Json(ApiResponse::success(())))
        }
        Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Document not found")),
        ),
    }
}

// =============================================================================
// Submission upload
// =============================================================================

struct UploadPart {
    file_name: String,
    content_type: String,
    data: Bytes,
}

#[derive(Default)]
struct SubmissionForm {
    document_type: Option<String>,
    department: Option<String>,
    topic: Option<String>,
    description: Option<String>,
    category: Option<String>,
    audience: Option<String>,
    company: Option<String>,
    priority: Option<String>,
}

/// Create documents from a multipart submission. One document is created per
/// uploaded file; if a file fails to store, the documents already created for
/// the earlier files remain and the failure is reported as such.
pub async fn create_documents(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut form = SubmissionForm::default();
    let mut files: Vec<UploadPart> = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Multipart parsing error: {}", e);
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Vec<DocumentResponse>>::error(format!(
                        "Failed to process upload ({})",
                        e
                    ))),
                );
            }
        };

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = match field.bytes().await {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!("Failed to read file bytes: {}", e);
                    return (
                        StatusCode::BAD_REQUEST,
                        Json(ApiResponse::error(format!(
                            "Failed to read uploaded file ({})",
                            e
                        ))),
                    );
                }
            };
            files.push(UploadPart {
                file_name,
                content_type,
                data,
            });
            continue;
        }

        let name = field.name().unwrap_or_default().to_string();
        let value = match field.text().await {
            Ok(v) => v,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Invalid form field ({})", e))),
                );
            }
        };
        match name.as_str() {
            "document_type" => form.document_type = Some(value),
            "department" => form.department = Some(value),
            "topic" => form.topic = Some(value),
            "description" => form.description = Some(value),
            "category" => form.category = Some(value),
            "audience" => form.audience = Some(value),
            "company" => form.company = Some(value),
            "priority" => form.priority = Some(value),
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
    }

    // Companies always submit into the approval pipeline, for themselves.
    let kind = if user.role == Role::Company {
        SubmissionKind::PortCompany
    } else {
        match form.document_type.as_deref().and_then(SubmissionKind::parse) {
            Some(kind) => kind,
            None => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(
                        "Field 'document_type' must be one of incoming, outgoing, \
                         internal, archive, port_company",
                    )),
                );
            }
        }
    };

    let company = if user.role == Role::Company {
        Some(user.name.clone())
    } else {
        form.company.clone()
    };

    // Company letters land in the commercial department unless stated.
    let department_text = match form.department.clone() {
        Some(d) if !d.trim().is_empty() => Some(d),
        _ if kind == SubmissionKind::PortCompany => Some("commercial".to_string()),
        other => other,
    };

    let topic = form.topic.clone().unwrap_or_default();

    // All validation happens before any file I/O: a rejected submission
    // creates nothing.
    if let Err(e) = validate_submission(&topic, department_text.as_deref(), files.len()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        );
    }
    for part in &files {
        if let Err(e) = validate_file_upload(&part.content_type, part.data.len(), state.max_upload_size)
        {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("{}: {}", part.file_name, e))),
            );
        }
    }

    let department = match department_text.as_deref().map(parse_enum::<Department>) {
        Some(Ok(d)) => Some(d),
        Some(Err(value)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown department '{}'", value))),
            );
        }
        None => None,
    };
    let category = match form.category.as_deref().map(parse_enum::<Category>) {
        Some(Ok(c)) => Some(c),
        Some(Err(value)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown category '{}'", value))),
            );
        }
        None => None,
    };
    let audience = match form.audience.as_deref().map(parse_enum::<Audience>) {
        Some(Ok(a)) => Some(a),
        Some(Err(value)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown audience '{}'", value))),
            );
        }
        None => None,
    };
    let priority = match form.priority.as_deref().map(parse_enum::<Priority>) {
        Some(Ok(p)) => p,
        Some(Err(value)) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Unknown priority '{}'", value))),
            );
        }
        None => kind.default_priority(),
    };

    let description = form.description.clone().or_else(|| {
        (kind == SubmissionKind::PortCompany).then(|| {
            format!(
                "Letter from {} to the general director",
                company.as_deref().unwrap_or("a port company")
            )
        })
    });

    // Store files and create one document per file. A failing file aborts
    // the loop; earlier documents stay, and the error says so.
    let mut created: Vec<DocumentResponse> = Vec::new();
    for part in &files {
        let stored = match store_file(&state.upload_dir, kind, department_text.as_deref(), part).await
        {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!("Failed to store file '{}': {}", part.file_name, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error(format!(
                        "Failed to store file '{}' ({}); {} document(s) from this \
                         submission were already created",
                        part.file_name,
                        e,
                        created.len()
                    ))),
                );
            }
        };

        let now = Utc::now();
        let document_number = kind
            .number_scope()
            .map(|scope| state.store.next_document_number(scope));
        let doc = Document {
            id: Uuid::new_v4(),
            doc_type: kind.doc_type(),
            title: topic.clone(),
            topic: topic.clone(),
            description: description.clone(),
            file_name: stored.file_name.clone(),
            file_kind: classify::file_kind(&stored.file_name),
            file_size: Some(stored.file_size),
            attachments: vec![stored.file_path.clone()],
            department,
            category,
            audience,
            company: company.clone(),
            priority,
            status: kind.initial_status(),
            gm_response: None,
            gm_comment: None,
            forwarded_by: None,
            forwarded_to: None,
            document_number,
            created_by: user.username.clone(),
            created_at: now,
            updated_at: now,
        };
        state.store.add(doc.clone());
        created.push(DocumentResponse::from(doc));
    }

    tracing::info!(
        "User {} created {} document(s) of kind {:?}",
        user.username,
        created.len(),
        kind
    );
    (StatusCode::CREATED, Json(ApiResponse::success(created)))
}

// =============================================================================
// Dashboard
// =============================================================================

/// Dashboard counters
pub async fn dashboard_stats(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(state.store.stats())))
}

// =============================================================================
// Attachment bundle
// =============================================================================

/// Download a document's stored attachments as a zip bundle. Available to the
/// correspondence office and administrators.
pub async fn download_bundle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Response {
    if !matches!(user.role, Role::Com | Role::Admin) {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error("Not allowed")),
        )
            .into_response();
    }

    let doc = match state.store.get(id) {
        Some(doc) => doc,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::<()>::error("Document not found")),
            )
                .into_response();
        }
    };

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut bundled = 0usize;
    for path in &doc.attachments {
        let data = match fs::read(path).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Skipping attachment {:?}: {}", path, e);
                continue;
            }
        };
        let entry_name = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or("attachment");
        let result = writer
            .start_file(entry_name, FileOptions::default())
            .and_then(|_| writer.write_all(&data).map_err(zip::result::ZipError::Io));
        if let Err(e) = result {
            tracing::error!("Failed to write zip entry for {:?}: {}", path, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to build bundle")),
            )
                .into_response();
        }
        bundled += 1;
    }

    if bundled == 0 {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("No stored attachments available")),
        )
            .into_response();
    }

    let bytes = match writer.finish() {
        Ok(cursor) => cursor.into_inner(),
        Err(e) => {
            tracing::error!("Failed to finalize bundle for {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error("Failed to build bundle")),
            )
                .into_response();
        }
    };

    let stem = doc.document_number.unwrap_or_else(|| doc.id.to_string());
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.zip\"", stem),
            ),
        ],
        bytes,
    )
        .into_response()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a snake_case wire name into one of the model enums.
fn parse_enum<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| value.to_string())
}

/// Upload collaborator: persist one file under
/// `{upload_dir}/{kind}/{department}/{timestamp}_{sanitized}` and describe it.
async fn store_file(
    upload_dir: &PathBuf,
    kind: SubmissionKind,
    department: Option<&str>,
    part: &UploadPart,
) -> std::io::Result<StoredFile> {
    let dir = upload_dir
        .join(kind.storage_segment())
        .join(department.unwrap_or("general"));
    fs::create_dir_all(&dir).await?;

    let unique_name = format!(
        "{}_{}",
        Utc::now().timestamp_millis(),
        sanitize_filename(&part.file_name)
    );
    let file_path = dir.join(&unique_name);
    if !file_path.starts_with(upload_dir) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path escapes upload directory",
        ));
    }
    fs::write(&file_path, &part.data).await?;

    Ok(StoredFile {
        file_path: file_path.to_string_lossy().to_string(),
        file_name: part.file_name.clone(),
        file_size: part.data.len() as u64,
        mime_type: part.content_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::auth::SessionStore;
    use crate::store::MemoryStore;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(MemoryStore::new()),
            sessions: Arc::new(SessionStore::new(8)),
            upload_dir: PathBuf::from("./uploads"),
            max_upload_size: 50 * 1024 * 1024,
            is_production: false,
        }
    }

    fn incoming_doc() -> Document {
        let now = Utc::now();
        Document {
            id: Uuid::new_v4(),
            doc_type: DocumentType::Incoming,
            title: "Harbor dues notice".into(),
            topic: "Harbor dues notice".into(),
            description: None,
            file_name: "notice.pdf".into(),
            file_kind: FileKind::Pdf,
            file_size: None,
            attachments: vec![],
            department: None,
            category: None,
            audience: None,
            company: None,
            priority: Priority::Medium,
            status: DocumentStatus::Pending,
            gm_response: None,
            gm_comment: None,
            forwarded_by: None,
            forwarded_to: None,
            document_number: None,
            created_by: "secretary".into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn staff(role: Role) -> AuthUser {
        AuthUser {
            username: "secretary".into(),
            role,
            name: "Secretary".into(),
            company_id: None,
        }
    }

    #[tokio::test]
    async fn plain_documents_refuse_workflow_statuses() {
        let state = test_state();
        let doc = incoming_doc();
        let id = doc.id;
        state.store.add(doc);

        let patch = DocumentPatch {
            status: Some(DocumentStatus::ForwardedToDg),
            ..Default::default()
        };
        let response = update_document(
            State(state.clone()),
            Extension(staff(Role::Secretary)),
            Path(id),
            Json(patch),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        // The document is left untouched.
        assert_eq!(state.store.get(id).unwrap().status, DocumentStatus::Pending);
    }

    #[tokio::test]
    async fn plain_documents_still_accept_plain_statuses() {
        let state = test_state();
        let doc = incoming_doc();
        let id = doc.id;
        state.store.add(doc);

        let patch = DocumentPatch {
            status: Some(DocumentStatus::Archived),
            ..Default::default()
        };
        let response = update_document(
            State(state.clone()),
            Extension(staff(Role::Secretary)),
            Path(id),
            Json(patch),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            state.store.get(id).unwrap().status,
            DocumentStatus::Archived
        );
    }

    #[test]
    fn submission_kinds_map_to_the_original_upload_views() {
        // Archive uploads land as incoming documents already archived.
        let archive = SubmissionKind::Archive;
        assert_eq!(archive.doc_type(), DocumentType::Incoming);
        assert_eq!(archive.initial_status(), DocumentStatus::Archived);
        assert_eq!(archive.default_priority(), Priority::Low);
        assert_eq!(archive.number_scope(), Some(NumberScope::Archive));

        let outgoing = SubmissionKind::Outgoing;
        assert_eq!(outgoing.initial_status(), DocumentStatus::Pending);
        assert_eq!(outgoing.default_priority(), Priority::Medium);
        assert_eq!(outgoing.number_scope(), Some(NumberScope::Outgoing));

        let port = SubmissionKind::PortCompany;
        assert_eq!(port.doc_type(), DocumentType::PortCompany);
        assert_eq!(port.initial_status(), DocumentStatus::PendingSecretary);
        assert_eq!(port.default_priority(), Priority::High);
        assert_eq!(port.number_scope(), Some(NumberScope::PortCompany));

        assert_eq!(SubmissionKind::Incoming.number_scope(), None);
        assert_eq!(SubmissionKind::Internal.number_scope(), None);
        assert_eq!(SubmissionKind::parse("port_company"), Some(port));
        assert_eq!(SubmissionKind::parse("fax"), None);
    }

    #[test]
    fn enum_fields_parse_from_wire_names() {
        assert_eq!(parse_enum::<Department>("commercial"), Ok(Department::Commercial));
        assert_eq!(parse_enum::<Category>("legal"), Ok(Category::Legal));
        assert_eq!(parse_enum::<Priority>("urgent"), Ok(Priority::Urgent));
        assert_eq!(
            parse_enum::<Department>("logistics"),
            Err("logistics".to_string())
        );
    }

    #[tokio::test]
    async fn store_file_writes_under_kind_and_department() {
        let dir = tempdir().unwrap();
        let part = UploadPart {
            file_name: "berth report.pdf".into(),
            content_type: "application/pdf".into(),
            data: Bytes::from_static(b"%PDF-1.4"),
        };

        let stored = store_file(
            &dir.path().to_path_buf(),
            SubmissionKind::PortCompany,
            Some("commercial"),
            &part,
        )
        .await
        .unwrap();

        assert!(stored.file_path.contains("port_company"));
        assert!(stored.file_path.contains("commercial"));
        assert!(stored.file_path.ends_with("berth_report.pdf"));
        assert_eq!(stored.file_name, "berth report.pdf");
        assert_eq!(stored.file_size, 8);
        let written = fs::read(&stored.file_path).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn store_file_defuses_traversal_names() {
        let dir = tempdir().unwrap();
        let part = UploadPart {
            file_name: "../../outside.pdf".into(),
            content_type: "application/pdf".into(),
            data: Bytes::from_static(b"x"),
        };

        let stored = store_file(
            &dir.path().to_path_buf(),
            SubmissionKind::Incoming,
            None,
            &part,
        )
        .await
        .unwrap();

        let path = PathBuf::from(&stored.file_path);
        assert!(path.starts_with(dir.path()));
        assert!(stored.file_path.contains("general"));
    }
}
