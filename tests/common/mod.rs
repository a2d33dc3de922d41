//! Minimal stand-in for the school backend: just enough of the auth surface
//! (token exchange + current-user lookup) plus two page endpoints, served on
//! an ephemeral local port.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::json;

/// One provisioned account, with fields exactly as the backend would send
/// them (unnormalized casing on purpose).
#[derive(Debug, Clone)]
pub struct BackendUser {
    pub username: String,
    pub password: String,
    pub token: String,
    pub role: String,
    pub level: Option<String>,
    pub department: Option<String>,
    pub full_name: Option<String>,
}

pub fn student_alice() -> BackendUser {
    BackendUser {
        username: "alice".into(),
        password: "x".into(),
        token: "abc".into(),
        role: "Student".into(),
        level: Some("SS2".into()),
        department: Some("Science".into()),
        full_name: Some("Alice A.".into()),
    }
}

pub fn teacher_tunde() -> BackendUser {
    BackendUser {
        username: "tunde".into(),
        password: "chalk".into(),
        token: "tok-tunde".into(),
        role: "teacher".into(),
        level: None,
        department: None,
        full_name: Some("Tunde B.".into()),
    }
}

struct MockState {
    users: Vec<BackendUser>,
    hits: AtomicUsize,
}

pub struct MockBackend {
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Total requests the backend has seen, across all endpoints.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

#[derive(Deserialize)]
struct TokenForm {
    username: String,
    password: String,
}

async fn token_exchange(
    State(state): State<Arc<MockState>>,
    Form(form): Form<TokenForm>,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match state
        .users
        .iter()
        .find(|u| u.username == form.username && u.password == form.password)
    {
        Some(u) => (StatusCode::OK, Json(json!({"access_token": u.token, "token_type": "bearer"}))),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Incorrect username or password"}))),
    }
}

fn bearer_user<'a>(state: &'a MockState, headers: &HeaderMap) -> Option<&'a BackendUser> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    let token = auth.strip_prefix("Bearer ")?;
    state.users.iter().find(|u| u.token == token)
}

async fn user_info(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match bearer_user(&state, &headers) {
        Some(u) => (
            StatusCode::OK,
            Json(json!({
                "username": u.username,
                "role": u.role,
                "level": u.level,
                "department": u.department,
                "full_name": u.full_name,
            })),
        ),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Could not validate credentials"}))),
    }
}

async fn student_dashboard(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match bearer_user(&state, &headers) {
        Some(_) => (
            StatusCode::OK,
            Json(json!([
                {"subject": "mathematics", "average": 71.5},
                {"subject": "physics", "average": 64.0}
            ])),
        ),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Could not validate credentials"}))),
    }
}

async fn teacher_dashboard(State(state): State<Arc<MockState>>, headers: HeaderMap) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match bearer_user(&state, &headers) {
        Some(_) => (StatusCode::OK, Json(json!({"classes": 3, "students": 87}))),
        None => (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Could not validate credentials"}))),
    }
}

/// Serve the mock on 127.0.0.1:0 and return its base URL. The server task
/// lives until the test's runtime shuts down.
pub async fn spawn_backend(users: Vec<BackendUser>) -> MockBackend {
    let state = Arc::new(MockState { users, hits: AtomicUsize::new(0) });
    let app = Router::new()
        .route("/api/token", post(token_exchange))
        .route("/api/auth/user-info", get(user_info))
        .route("/students/dashboard", get(student_dashboard))
        .route("/teacher/dashboard", get(teacher_dashboard))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockBackend { base_url: format!("http://{}", addr), state }
}

/// A base URL nothing listens on, for network-failure scenarios.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind throwaway listener");
    let addr = listener.local_addr().expect("throwaway addr");
    drop(listener);
    format!("http://{}", addr)
}
