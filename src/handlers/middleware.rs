//! Middleware for authentication and security headers

use crate::handlers::auth::{current_user, SESSION_COOKIE};
use crate::handlers::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Authenticated user extracted by middleware, available via Extension<AuthUser>
pub async fn require_user(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let user = match current_user(&state, request.headers()) {
        Some(user) => user,
        None => {
            tracing::debug!("Rejected unauthenticated request (cookie {})", SESSION_COOKIE);
            return (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({"success": false, "error": "Not authenticated"})),
            )
                .into_response();
        }
    };

    let mut request = request;
    request.extensions_mut().insert(user);

    next.run(request).await
}

/// Security headers middleware
pub async fn security_headers(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "Referrer-Policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    if state.is_production {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains"),
        );
    }

    response
}
