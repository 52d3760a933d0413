//! HTTP request handlers

pub mod auth;
pub mod documents;
pub mod middleware;
pub mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use crate::handlers::auth::SessionStore;
use crate::store::DocumentStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub sessions: Arc<SessionStore>,
    pub upload_dir: PathBuf,
    pub max_upload_size: usize,
    pub is_production: bool,
}
