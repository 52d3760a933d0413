//! Port Correspondence Portal
//!
//! A web application for tracking a port authority's correspondence and for
//! routing letters from port companies through the general director's
//! approval workflow.
//!
//! ## Features
//!
//! - **Listing views**: incoming, outgoing, internal and archived documents
//!   with composable filters
//! - **Submission upload**: multipart upload creating one tracked document
//!   per file, with generated serials
//! - **Approval workflow**: secretary triage, DG decision, correspondence
//!   office hand-off

mod classify;
mod config;
mod handlers;
mod models;
mod store;
mod validation;
mod workflow;

use axum::{
    http::{header, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use handlers::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "port_correspondence=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Starting Port Correspondence Portal");
    tracing::info!("Environment: {:?}", config.environment);
    if config.strict_store {
        tracing::info!("Strict store mode: missing ids report NotFound");
    }

    // Ensure upload directory exists
    let upload_dir = PathBuf::from(&config.upload_dir);
    fs::create_dir_all(&upload_dir).await?;
    tracing::info!("Upload directory: {:?}", upload_dir);

    // Create application state
    let state = AppState {
        store: Arc::new(store::MemoryStore::with_strict_mode(config.strict_store)),
        sessions: Arc::new(handlers::auth::SessionStore::new(
            config.session_expiry_hours,
        )),
        upload_dir,
        max_upload_size: config.max_upload_size,
        is_production: config.is_production(),
    };

    // Build CORS layer
    let cors = if config.is_production() {
        CorsLayer::new()
            .allow_origin(
                config
                    .cors_origins
                    .iter()
                    .filter_map(|o| o.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    } else {
        CorsLayer::permissive()
    };

    // Routes that require an authenticated caller
    let protected_routes = Router::new()
        .route("/documents", get(handlers::documents::list_documents))
        .route("/documents", post(handlers::documents::create_documents))
        .route("/documents/:id", get(handlers::documents::get_document))
        .route("/documents/:id", put(handlers::documents::update_document))
        .route(
            "/documents/:id",
            delete(handlers::documents::delete_document),
        )
        .route(
            "/documents/:id/bundle",
            get(handlers::documents::download_bundle),
        )
        .route("/companies", get(handlers::auth::list_companies))
        .route("/dashboard/stats", get(handlers::documents::dashboard_stats))
        .route("/workflow/inbox", get(handlers::workflow::inbox))
        .route(
            "/workflow/:id/forward",
            post(handlers::workflow::forward_document),
        )
        .route(
            "/workflow/:id/approve",
            post(handlers::workflow::approve_document),
        )
        .route(
            "/workflow/:id/reject",
            post(handlers::workflow::reject_document),
        )
        .route(
            "/workflow/:id/comment",
            post(handlers::workflow::comment_document),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::middleware::require_user,
        ));

    let api_routes = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .merge(protected_routes);

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::middleware::security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(config.max_upload_size))
        .layer(cors)
        .with_state(state);

    // Start server
    let addr = config.server_addr();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
