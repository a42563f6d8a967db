#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::FixedOffset;
use hrdesk_client::{AppContext, ClientConfig, MemoryStorage};
use serde_json::{Value, json};
use tokio::sync::Notify;

pub const PASSWORD: &str = "correct horse";

/// Knobs and counters shared between a test and its mock API.
#[derive(Clone, Default)]
pub struct MockState {
    /// `/auth/me` answers 200 with this user, or 401 when unset.
    pub me: Arc<Mutex<Option<Value>>>,
    pub me_hits: Arc<AtomicUsize>,
    pub login_hits: Arc<AtomicUsize>,
    pub logout_hits: Arc<AtomicUsize>,
    pub lov_hits: Arc<AtomicUsize>,
    pub lov_fail: Arc<AtomicBool>,
    /// `/lovs/type/Slow` answers only once this is notified.
    pub lov_release: Arc<Notify>,
    pub last_body: Arc<Mutex<Option<Value>>>,
}

impl MockState {
    pub fn set_me(&self, user: Option<Value>) {
        *self.me.lock().unwrap() = user;
    }

    pub fn hits(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub async fn wait_for(counter: &AtomicUsize, hits: usize) {
        while Self::hits(counter) < hits {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }
}

pub struct TestServer {
    pub base_url: String,
    pub state: MockState,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Self {
        hrdesk_observability::init_for_tests();
        let state = MockState::default();
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    pub async fn context(&self) -> (AppContext, MemoryStorage) {
        let storage = MemoryStorage::new();
        let ctx = self.context_over(storage.clone()).await;
        (ctx, storage)
    }

    /// A fresh context over existing storage, as after an app restart.
    pub async fn context_over(&self, storage: MemoryStorage) -> AppContext {
        let config = ClientConfig::new(self.base_url.clone())
            .with_utc_offset(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
            .with_warm_lov_types(vec!["UserRole".to_string()]);
        AppContext::with_storage(config, Arc::new(storage))
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn user(id: &str, role: &str) -> Value {
    json!({
        "_id": id,
        "email": format!("{}@example.com", id),
        "name": format!("User {id}"),
        "roleId": role,
        "isActive": true,
        "department": "HR"
    })
}

fn ok(data: Value) -> Response {
    (StatusCode::OK, Json(json!({ "success": true, "data": data }))).into_response()
}

fn router(state: MockState) -> Router {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/lovs/type/:lov_type", get(lov_by_type))
        .route("/echo/headers", get(echo_headers))
        .route("/errors/:kind", get(error_kind))
        .route("/shifts", post(echo_body))
        .with_state(state)
}

async fn me(State(state): State<MockState>) -> Response {
    state.me_hits.fetch_add(1, Ordering::SeqCst);
    let user = state.me.lock().unwrap().clone();
    match user {
        Some(user) => ok(json!({ "user": user })),
        None => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthorized" }))).into_response(),
    }
}

async fn login(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    state.login_hits.fetch_add(1, Ordering::SeqCst);
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"] != PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": { "code": "AUTH_FAILED", "message": "Invalid credentials" }
            })),
        )
            .into_response();
    }

    let local = email.split('@').next().unwrap_or_default();
    let role = local.to_ascii_uppercase();
    ok(json!({ "user": user(local, &role), "token": format!("token-{local}") }))
}

async fn logout(State(state): State<MockState>) -> Response {
    state.logout_hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "message": "logout unavailable" })),
    )
        .into_response()
}

async fn lov_by_type(State(state): State<MockState>, Path(lov_type): Path<String>) -> Response {
    state.lov_hits.fetch_add(1, Ordering::SeqCst);
    if lov_type == "Slow" {
        state.lov_release.notified().await;
    }
    if state.lov_fail.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "lov store down" } })),
        )
            .into_response();
    }
    ok(json!({
        "_id": format!("lov-{lov_type}"),
        "name": lov_type,
        "type": lov_type,
        "values": [
            { "label": "Admin", "value": "ADMIN", "isActive": true },
            { "label": "Legacy", "value": "LEGACY", "isActive": false },
            { "label": "Manager", "value": "MANAGER", "isActive": true }
        ]
    }))
}

async fn echo_headers(headers: HeaderMap) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    ok(json!({
        "authorization": header("authorization"),
        "reqrole": header("reqrole"),
        "contentType": header("content-type"),
    }))
}

async fn error_kind(Path(kind): Path<String>) -> Response {
    match kind.as_str() {
        "nested" => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "success": false, "error": { "code": "E", "message": "nested message" } })),
        )
            .into_response(),
        "flat" => (StatusCode::BAD_REQUEST, Json(json!({ "message": "flat message" }))).into_response(),
        "data" => (StatusCode::CONFLICT, Json(json!({ "data": "data message" }))).into_response(),
        "opaque" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        "unauth" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": { "message": "token revoked" } })),
        )
            .into_response(),
        "soft" => (
            StatusCode::OK,
            Json(json!({ "success": false, "error": { "message": "soft failure" } })),
        )
            .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn echo_body(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    *state.last_body.lock().unwrap() = Some(body.clone());
    let mut created = body;
    created["_id"] = json!("shift-1");
    ok(created)
}
