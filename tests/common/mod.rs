//! Shared harness for router-level integration tests.
//!
//! The real router runs against in-memory implementations of the
//! repository, session store, rate limiter and health traits, so no
//! database or Redis is needed.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use notes_server::api::{create_router, AppState};
use notes_server::config::{Config, SESSION_COOKIE_NAME};
use notes_server::domain::{Note, Session, User};
use notes_server::errors::{AppError, AppResult};
use notes_server::infra::{
    HealthCheck, NoteRepository, RateLimiter, SessionStore, UnitOfWork, UserRepository,
};
use notes_server::services::Services;

pub const TEST_SECRET: &str = "integration-test-session-secret-0123456789";
pub const PASSWORD: &str = "correct horse battery";
pub const PEER_ADDR: &str = "198.51.100.4:51000";

// =============================================================================
// In-memory infrastructure
// =============================================================================

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<HashMap<Uuid, User>>,
    stale_email_lookups: AtomicBool,
}

impl InMemoryUsers {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Make `find_by_email` miss existing users, as a lookup does when a
    /// concurrent join commits between the check and the insert.
    pub fn make_email_lookups_stale(&self) {
        self.stale_email_lookups.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.users.lock().unwrap().clear();
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if self.stale_email_lookups.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, email: String, password_hash: String) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(AppError::conflict("User"));
        }
        let user = User::new(Uuid::new_v4(), email, password_hash);
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// Notes kept in insertion order; listing walks them newest first.
#[derive(Default)]
pub struct InMemoryNotes {
    notes: Mutex<Vec<Note>>,
}

impl InMemoryNotes {
    pub fn count(&self) -> usize {
        self.notes.lock().unwrap().len()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNotes {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Note>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Note>> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id && n.user_id == user_id)
            .cloned())
    }

    async fn create(&self, user_id: Uuid, title: String, body: String) -> AppResult<Note> {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title,
            body,
            user_id,
            created_at: now,
            updated_at: now,
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.user_id == user_id));
        Ok(notes.len() != before)
    }
}

pub struct InMemoryUnitOfWork {
    users: Arc<InMemoryUsers>,
    notes: Arc<InMemoryNotes>,
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn notes(&self) -> Arc<dyn NoteRepository> {
        self.notes.clone()
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessions {
    pub fn all(&self) -> Vec<Session> {
        self.sessions.lock().unwrap().values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessions {
    async fn save(&self, session: &Session) -> AppResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn load(&self, id: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(id).cloned())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.sessions.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Fixed-window counter without expiry; each test gets a fresh one.
#[derive(Default)]
pub struct InMemoryRateLimiter {
    counts: Mutex<HashMap<String, u64>>,
    unavailable: bool,
}

impl InMemoryRateLimiter {
    /// A limiter whose backing store is down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn hit(
        &self,
        identifier: &str,
        max_requests: u64,
        _window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        if self.unavailable {
            return Err(AppError::internal("rate limit store unreachable"));
        }
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(identifier.to_string()).or_insert(0);
        *count += 1;
        Ok((*count, *count <= max_requests))
    }
}

pub struct AlwaysHealthy;

#[async_trait]
impl HealthCheck for AlwaysHealthy {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

// =============================================================================
// Test application
// =============================================================================

pub struct TestApp {
    router: Router,
    pub config: Config,
    pub users: Arc<InMemoryUsers>,
    pub notes: Arc<InMemoryNotes>,
    pub sessions: Arc<InMemorySessions>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_rate_limiter(InMemoryRateLimiter::default())
    }

    pub fn with_rate_limiter(rate_limiter: InMemoryRateLimiter) -> Self {
        let config = Config::with_session_secret(TEST_SECRET);
        let users = Arc::new(InMemoryUsers::default());
        let notes = Arc::new(InMemoryNotes::default());
        let sessions = Arc::new(InMemorySessions::default());

        let uow = Arc::new(InMemoryUnitOfWork {
            users: users.clone(),
            notes: notes.clone(),
        });
        let services = Services::new(uow, sessions.clone(), &config);
        let state = AppState::new(
            &services,
            Arc::new(rate_limiter),
            Arc::new(AlwaysHealthy),
            Arc::new(AlwaysHealthy),
            &config,
        );

        Self {
            router: create_router(state),
            config,
            users,
            notes,
            sessions,
        }
    }

    async fn send(&self, mut request: Request<Body>) -> TestResponse {
        let peer: SocketAddr = PEER_ADDR.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let headers: Vec<(&str, &str)> = cookie.map(|c| ("cookie", c)).into_iter().collect();
        self.post_form_with_headers(uri, fields, &headers).await
    }

    pub async fn post_form_with_headers(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        self.send(request.body(Body::from(body)).unwrap()).await
    }

    pub async fn post_multipart(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        const BOUNDARY: &str = "notes-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            );
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        self.send(request.body(Body::from(body)).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, json: Value) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Join with `email` and return the `Cookie` header value for the session.
    pub async fn join(&self, email: &str) -> String {
        let response = self
            .post_form("/join", &[("email", email), ("password", PASSWORD)], None)
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        response.session_cookie().expect("join sets a session cookie")
    }

    /// Create a note as the cookie's user and return its id.
    pub async fn create_note(&self, cookie: &str, title: &str, body: &str) -> String {
        let response = self
            .post_form("/notes/new", &[("title", title), ("body", body)], Some(cookie))
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        let location = response.location().expect("redirect to the new note");
        location
            .strip_prefix("/notes/")
            .expect("note path")
            .to_string()
    }
}

// =============================================================================
// Responses
// =============================================================================

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The raw `Set-Cookie` header for the session cookie, if any.
    pub fn set_session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{}=", SESSION_COOKIE_NAME)))
            .map(str::to_string)
    }

    /// `name=value` of the session cookie, ready for a `Cookie` header.
    pub fn session_cookie(&self) -> Option<String> {
        self.set_session_cookie()
            .and_then(|raw| raw.split(';').next().map(str::to_string))
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// Messages for `field` in a field error document.
    pub fn field_errors(&self, field: &str) -> Vec<String> {
        self.json()["errors"]["fieldErrors"][field]
            .as_array()
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}
