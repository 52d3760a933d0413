//! Workflow endpoints for the port company approval pipeline

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::models::{ApiResponse, AuthUser, DocumentResponse, DocumentStatus, DocumentType};
use crate::store::{DocumentStore, StoreError};
use crate::workflow::{self, WorkflowAction, WorkflowError};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct InboxQuery {
    pub status: Option<DocumentStatus>,
}

// =============================================================================
// Actions
// =============================================================================

/// Secretary forwards a pending document to the DG
pub async fn forward_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    act(&state, &user, id, WorkflowAction::Forward).await
}

/// DG approves a forwarded document
pub async fn approve_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    act(&state, &user, id, WorkflowAction::Approve).await
}

/// Secretary or DG rejects a document, depending on its state
pub async fn reject_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    act(&state, &user, id, WorkflowAction::Reject).await
}

/// DG holds a forwarded document with a comment
pub async fn comment_document(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(input): Json<CommentRequest>,
) -> impl IntoResponse {
    if input.comment.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<DocumentResponse>::error(
                "Field 'comment' is required",
            )),
        );
    }
    act(&state, &user, id, WorkflowAction::Comment(input.comment)).await
}

async fn act(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    action: WorkflowAction,
) -> (StatusCode, Json<ApiResponse<DocumentResponse>>) {
    let doc = match state.store.get(id) {
        Some(doc) => doc,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("Document not found")),
            )
        }
    };

    let patch = match workflow::transition(&doc, &action, user, Utc::now()) {
        Ok(patch) => patch,
        Err(e) => {
            tracing::warn!(
                "User {} denied workflow action on {}: {}",
                user.username,
                id,
                e
            );
            return (workflow_status_code(&e), Json(ApiResponse::error(e.to_string())));
        }
    };

    match state.store.update(id, patch) {
        Ok(Some(updated)) => (
            StatusCode::OK,
            Json(ApiResponse::success(DocumentResponse::from(updated))),
        ),
        // The document was fetched above, so it cannot vanish in the
        // single-threaded session model; treat both cases as not found.
        Ok(None) | Err(StoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Document not found")),
        ),
    }
}

fn workflow_status_code(err: &WorkflowError) -> StatusCode {
    match err {
        WorkflowError::NotWorkflowDocument => StatusCode::BAD_REQUEST,
        WorkflowError::RoleNotPermitted { .. } => StatusCode::FORBIDDEN,
        WorkflowError::InvalidTransition { .. } => StatusCode::CONFLICT,
    }
}

// =============================================================================
// Inbox
// =============================================================================

/// Role-scoped view over the port company pipeline: the secretary triages
/// everything, the DG sees what still needs a decision, the correspondence
/// office receives approved letters and a company tracks its own submissions.
pub async fn inbox(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<InboxQuery>,
) -> impl IntoResponse {
    let documents = workflow::inbox(state.store.by_type(DocumentType::PortCompany), &user);
    let responses: Vec<DocumentResponse> = documents
        .into_iter()
        .filter(|d| query.status.map(|s| d.status == s).unwrap_or(true))
        .map(DocumentResponse::from)
        .collect();
    (StatusCode::OK, Json(ApiResponse::success(responses)))
}
