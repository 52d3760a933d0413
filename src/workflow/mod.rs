//! Workflow engine for port company documents
//!
//! A port company document moves through a fixed approval pipeline:
//!
//! ```text
//! pending_secretary --forward (secretary)--> forwarded_to_dg
//! pending_secretary --reject  (secretary)--> rejected_by_dg
//! forwarded_to_dg   --approve (dg)-------->  approved_by_dg
//! forwarded_to_dg   --reject  (dg)-------->  rejected_by_dg
//! forwarded_to_dg   --comment (dg)-------->  commented_by_dg
//! ```
//!
//! The legacy UI only hid action buttons and trusted callers to respect the
//! table; here the guard lives in the engine. A transition whose current
//! status does not match the table, or whose actor holds the wrong role, is
//! rejected and the document is left untouched.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{
    AuthUser, Document, DocumentPatch, DocumentStatus, DocumentType, GmResponse, Role,
};

/// An action a caller may attempt against a port company document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    /// Secretary hands the document to the general director.
    Forward,
    /// DG accepts; the document becomes visible to the correspondence office.
    Approve,
    /// Secretary-level triage rejection or DG rejection, depending on state.
    Reject,
    /// DG holds the document with a comment instead of deciding.
    Comment(String),
}

impl WorkflowAction {
    fn name(&self) -> &'static str {
        match self {
            WorkflowAction::Forward => "forward",
            WorkflowAction::Approve => "approve",
            WorkflowAction::Reject => "reject",
            WorkflowAction::Comment(_) => "comment",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Document is not a port company document")]
    NotWorkflowDocument,

    #[error("Role {role:?} may not {action} a document")]
    RoleNotPermitted { role: Role, action: &'static str },

    #[error("Cannot {action} a document in status {status:?}")]
    InvalidTransition {
        action: &'static str,
        status: DocumentStatus,
    },
}

/// Validate a transition against the table and produce the partial update to
/// write through the store. The document itself is not mutated here; the
/// caller owns the write so a rejected transition leaves no trace.
pub fn transition(
    doc: &Document,
    action: &WorkflowAction,
    actor: &AuthUser,
    now: DateTime<Utc>,
) -> Result<DocumentPatch, WorkflowError> {
    if doc.doc_type != DocumentType::PortCompany {
        return Err(WorkflowError::NotWorkflowDocument);
    }

    let mut patch = DocumentPatch {
        updated_at: Some(now),
        ..Default::default()
    };

    match action {
        WorkflowAction::Forward => {
            require_role(actor, Role::Secretary, action)?;
            require_status(doc, DocumentStatus::PendingSecretary, action)?;
            patch.status = Some(DocumentStatus::ForwardedToDg);
            patch.forwarded_by = Some(Role::Secretary);
            patch.forwarded_to = Some(Role::Dg);
        }
        WorkflowAction::Approve => {
            require_role(actor, Role::Dg, action)?;
            require_status(doc, DocumentStatus::ForwardedToDg, action)?;
            patch.status = Some(DocumentStatus::ApprovedByDg);
            patch.gm_response = Some(GmResponse::Approved);
            patch.forwarded_by = Some(Role::Dg);
            patch.forwarded_to = Some(Role::Com);
        }
        WorkflowAction::Reject => match actor.role {
            // Secretary triage rejection: no GM response recorded.
            Role::Secretary => {
                require_status(doc, DocumentStatus::PendingSecretary, action)?;
                patch.status = Some(DocumentStatus::RejectedByDg);
            }
            Role::Dg => {
                require_status(doc, DocumentStatus::ForwardedToDg, action)?;
                patch.status = Some(DocumentStatus::RejectedByDg);
                patch.gm_response = Some(GmResponse::Rejected);
            }
            role => {
                return Err(WorkflowError::RoleNotPermitted {
                    role,
                    action: action.name(),
                })
            }
        },
        WorkflowAction::Comment(text) => {
            require_role(actor, Role::Dg, action)?;
            require_status(doc, DocumentStatus::ForwardedToDg, action)?;
            patch.status = Some(DocumentStatus::CommentedByDg);
            patch.gm_response = Some(GmResponse::Commented);
            patch.gm_comment = Some(text.clone());
        }
    }

    Ok(patch)
}

fn require_role(
    actor: &AuthUser,
    expected: Role,
    action: &WorkflowAction,
) -> Result<(), WorkflowError> {
    if actor.role == expected {
        Ok(())
    } else {
        Err(WorkflowError::RoleNotPermitted {
            role: actor.role,
            action: action.name(),
        })
    }
}

fn require_status(
    doc: &Document,
    expected: DocumentStatus,
    action: &WorkflowAction,
) -> Result<(), WorkflowError> {
    if doc.status == expected {
        Ok(())
    } else {
        Err(WorkflowError::InvalidTransition {
            action: action.name(),
            status: doc.status,
        })
    }
}

// =============================================================================
// Read-side projections
// =============================================================================

/// Whether a port company document appears in a role's workflow inbox.
///
/// Secretary triages everything; the DG stops seeing documents it already
/// approved or commented on; the correspondence office only receives approved
/// documents; a company sees its own submissions.
pub fn visible_to(doc: &Document, user: &AuthUser) -> bool {
    if doc.doc_type != DocumentType::PortCompany {
        return false;
    }
    match user.role {
        Role::Secretary | Role::Admin => true,
        Role::Dg => !matches!(
            doc.status,
            DocumentStatus::ApprovedByDg | DocumentStatus::CommentedByDg
        ),
        Role::Com => doc.status == DocumentStatus::ApprovedByDg,
        Role::Company => doc.company.as_deref() == Some(user.name.as_str()),
    }
}

/// Role-scoped inbox over an already-fetched document list.
pub fn inbox(documents: Vec<Document>, user: &AuthUser) -> Vec<Document> {
    documents
        .into_iter()
        .filter(|d| visible_to(d, user))
        .collect()
}
