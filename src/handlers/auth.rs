//! Authentication handlers
//!
//! Callers authenticate against a fixed credential table (the role accounts
//! plus the registered port companies) and receive an opaque session token.
//! Only the SHA-256 hash of a token is kept server side.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::models::{ApiResponse, AuthUser, Company, CompanyResponse, LoginRequest, Role};

use super::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "pc_session";

// =============================================================================
// Credential table
// =============================================================================

struct Account {
    password: &'static str,
    role: Role,
    name: &'static str,
}

fn account_for(username: &str) -> Option<Account> {
    match username {
        "dg" => Some(Account {
            password: "dg",
            role: Role::Dg,
            name: "General Director",
        }),
        "secretary" => Some(Account {
            password: "secretary",
            role: Role::Secretary,
            name: "Secretary",
        }),
        "com" => Some(Account {
            password: "com",
            role: Role::Com,
            name: "Correspondence Office",
        }),
        "admin" => Some(Account {
            password: "admin",
            role: Role::Admin,
            name: "Administrator",
        }),
        _ => None,
    }
}

/// Registered port companies. Company logins match on name or email.
pub fn companies() -> Vec<Company> {
    vec![
        Company {
            id: "1".into(),
            nif: "123456789".into(),
            name: "SEPCO".into(),
            email: "sepco@example.com".into(),
            password: "sepco123".into(),
            contact_person: "Ahmed Elsayed".into(),
        },
        Company {
            id: "2".into(),
            nif: "234567891".into(),
            name: "TCN".into(),
            email: "tcn@example.com".into(),
            password: "tcn123".into(),
            contact_person: "Mariam Fall".into(),
        },
        Company {
            id: "3".into(),
            nif: "345678912".into(),
            name: "MURILOG".into(),
            email: "murilog@example.com".into(),
            password: "murilog123".into(),
            contact_person: "Omar Ba".into(),
        },
        Company {
            id: "4".into(),
            nif: "456789123".into(),
            name: "OUMRANA".into(),
            email: "oumrana@example.com".into(),
            password: "oumrana123".into(),
            contact_person: "Sidi Brahim".into(),
        },
    ]
}

/// Resolve a username/password pair against the credential table.
pub fn authenticate(username: &str, password: &str) -> Option<AuthUser> {
    if let Some(account) = account_for(username) {
        if account.password == password {
            return Some(AuthUser {
                username: username.to_string(),
                role: account.role,
                name: account.name.to_string(),
                company_id: None,
            });
        }
        return None;
    }

    companies()
        .into_iter()
        .find(|c| {
            (c.email.eq_ignore_ascii_case(username) || c.name.eq_ignore_ascii_case(username))
                && c.password == password
        })
        .map(|c| AuthUser {
            username: c.email,
            role: Role::Company,
            name: c.name,
            company_id: Some(c.id),
        })
}

// =============================================================================
// Session store
// =============================================================================

struct Session {
    user: AuthUser,
    expires_at: DateTime<Utc>,
}

/// In-memory session map keyed by token hash.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    expiry: Duration,
}

impl SessionStore {
    pub fn new(expiry_hours: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            expiry: Duration::hours(expiry_hours as i64),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Session>> {
        self.sessions.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Create a session and return the cleartext token for the cookie.
    /// Expired sessions are swept here so the map never grows past the
    /// number of live logins.
    pub fn create(&self, user: AuthUser) -> String {
        let token = generate_session_token();
        let now = Utc::now();
        let session = Session {
            user,
            expires_at: now + self.expiry,
        };
        let mut sessions = self.write();
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(hash_token(&token), session);
        token
    }

    pub fn resolve(&self, token: &str) -> Option<AuthUser> {
        let hash = hash_token(token);
        let mut sessions = self.write();
        match sessions.get(&hash) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user.clone()),
            Some(_) => {
                // Lazy eviction of an expired session.
                sessions.remove(&hash);
                None
            }
            None => None,
        }
    }

    pub fn revoke(&self, token: &str) {
        self.write().remove(&hash_token(token));
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry.num_seconds()
    }
}

// =============================================================================
// Endpoints
// =============================================================================

/// Login with a username/password pair
pub async fn login(State(state): State<AppState>, Json(input): Json<LoginRequest>) -> Response {
    match authenticate(&input.username, &input.password) {
        Some(user) => {
            tracing::info!("User {} logged in as {:?}", user.username, user.role);
            let token = state.sessions.create(user.clone());
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
                SESSION_COOKIE,
                token,
                state.sessions.expiry_seconds()
            );
            (
                StatusCode::OK,
                [(header::SET_COOKIE, cookie)],
                Json(ApiResponse::success(user)),
            )
                .into_response()
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AuthUser>::error("Invalid username or password")),
        )
            .into_response(),
    }
}

/// Logout and clear the session cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        state.sessions.revoke(&token);
    }

    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0",
        SESSION_COOKIE
    );

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(())),
    )
}

/// Registered company profiles, for staff roles
pub async fn list_companies(Extension(user): Extension<AuthUser>) -> impl IntoResponse {
    if user.role == Role::Company {
        return (
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<Vec<CompanyResponse>>::error("Not allowed")),
        );
    }
    let profiles: Vec<CompanyResponse> = companies().into_iter().map(Into::into).collect();
    (StatusCode::OK, Json(ApiResponse::success(profiles)))
}

/// Get the currently authenticated user
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    match current_user(&state, &headers) {
        Some(user) => (StatusCode::OK, Json(ApiResponse::success(user))),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Not authenticated")),
        ),
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

pub fn current_user(state: &AppState, headers: &HeaderMap) -> Option<AuthUser> {
    let token = extract_session_token(headers)?;
    state.sessions.resolve(&token)
}

pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie in cookie_header.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", SESSION_COOKIE)) {
            return Some(value.to_string());
        }
    }

    None
}

fn generate_session_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    hex::encode(bytes)
}

fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn test_state() -> AppState {
        AppState {
            store: Arc::new(MemoryStore::new()),
            sessions: Arc::new(SessionStore::new(8)),
            upload_dir: PathBuf::from("./uploads"),
            max_upload_size: 50 * 1024 * 1024,
            is_production: false,
        }
    }

    #[test]
    fn role_accounts_authenticate() {
        let user = authenticate("secretary", "secretary").unwrap();
        assert_eq!(user.role, Role::Secretary);
        assert_eq!(user.company_id, None);

        assert!(authenticate("secretary", "wrong").is_none());
        assert!(authenticate("nobody", "nobody").is_none());
    }

    #[test]
    fn company_accounts_match_name_or_email() {
        let by_name = authenticate("sepco", "sepco123").unwrap();
        assert_eq!(by_name.role, Role::Company);
        assert_eq!(by_name.name, "SEPCO");
        assert_eq!(by_name.company_id.as_deref(), Some("1"));

        let by_email = authenticate("SEPCO@example.com", "sepco123").unwrap();
        assert_eq!(by_email.company_id.as_deref(), Some("1"));

        assert!(authenticate("sepco", "tcn123").is_none());
    }

    #[test]
    fn sessions_round_trip_and_revoke() {
        let store = SessionStore::new(8);
        let user = authenticate("dg", "dg").unwrap();
        let token = store.create(user);

        let resolved = store.resolve(&token).unwrap();
        assert_eq!(resolved.role, Role::Dg);

        store.revoke(&token);
        assert!(store.resolve(&token).is_none());
    }

    #[test]
    fn expired_sessions_do_not_resolve() {
        let store = SessionStore::new(0);
        let user = authenticate("dg", "dg").unwrap();
        let token = store.create(user);
        assert!(store.resolve(&token).is_none());
    }

    #[test]
    fn resolving_an_expired_session_evicts_it() {
        let store = SessionStore::new(0);
        let user = authenticate("dg", "dg").unwrap();
        let token = store.create(user);
        assert_eq!(store.sessions.read().unwrap().len(), 1);

        assert!(store.resolve(&token).is_none());
        assert!(store.sessions.read().unwrap().is_empty());
    }

    #[test]
    fn creating_a_session_sweeps_expired_ones() {
        let store = SessionStore::new(0);
        for _ in 0..5 {
            store.create(authenticate("dg", "dg").unwrap());
        }
        // Every earlier session is already expired, so only the newest entry
        // survives each sweep.
        assert_eq!(store.sessions.read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_login_sets_no_cookie() {
        let state = test_state();
        let response = login(
            State(state),
            Json(LoginRequest {
                username: "dg".into(),
                password: "wrong".into(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn successful_login_sets_session_cookie() {
        let state = test_state();
        let response = login(
            State(state),
            Json(LoginRequest {
                username: "dg".into(),
                password: "dg".into(),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        assert!(cookie.to_str().unwrap().starts_with(SESSION_COOKIE));
    }

    #[test]
    fn company_profiles_omit_credentials() {
        let profiles: Vec<CompanyResponse> = companies().into_iter().map(Into::into).collect();
        assert_eq!(profiles.len(), 4);
        assert_eq!(profiles[0].name, "SEPCO");
        assert_eq!(profiles[0].nif, "123456789");
        assert_eq!(profiles[0].contact_person, "Ahmed Elsayed");

        let json = serde_json::to_value(&profiles).unwrap();
        for profile in json.as_array().unwrap() {
            assert!(profile.get("password").is_none());
        }
    }

    #[test]
    fn token_hash_is_sha256_hex() {
        let hash = hash_token("abc");
        assert_eq!(hash.len(), 64);
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }

    #[test]
    fn session_token_extracted_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("other=1; {}=tok123; theme=dark", SESSION_COOKIE)
                .parse()
                .unwrap(),
        );
        assert_eq!(extract_session_token(&headers).as_deref(), Some("tok123"));
    }
}
