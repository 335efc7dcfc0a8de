// SPDX-License-Identifier: MIT

//! Shared test helpers: a mock Vault backend and session fixtures.
//!
//! The mock backend is a real HTTP server on an ephemeral port, so the
//! client under test exercises its full transport path. Handlers validate
//! bearer tokens against a single "currently valid" access token; the
//! refresh endpoint mints whatever `refresh_grants` is staged with and
//! makes it the valid token, mirroring the backend's token rotation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use serde_json::{json, Value};

use vault_client::SessionEvents;

/// Observable state of the mock backend.
#[derive(Default)]
#[allow(dead_code)]
pub struct MockState {
    /// The access token the protected endpoints currently accept.
    pub valid_access: Mutex<String>,
    /// Access token the refresh endpoint will grant; `None` means refresh
    /// responds 401.
    pub refresh_grants: Mutex<Option<String>>,
    /// Force the accounts endpoint to answer with this status regardless of
    /// the presented token.
    pub force_status: Mutex<Option<u16>>,
    pub refresh_calls: AtomicUsize,
    pub accounts_calls: AtomicUsize,
    /// Bearer token presented on each accounts call, in order.
    pub seen_bearers: Mutex<Vec<Option<String>>>,
}

#[allow(dead_code)]
pub struct MockVault {
    pub base_url: String,
    pub state: Arc<MockState>,
}

/// Start the mock backend on an ephemeral local port.
#[allow(dead_code)]
pub async fn spawn_mock_vault() -> MockVault {
    let state = Arc::new(MockState::default());

    let app = Router::new()
        .route("/token/", post(login))
        .route("/token/refresh/", post(refresh))
        .route("/logout/", post(logout))
        .route("/api/users/accounts/", get(accounts))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockVault {
        base_url: format!("http://{addr}"),
        state,
    }
}

fn bearer_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

async fn login(State(_state): State<Arc<MockState>>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body.get("email").and_then(Value::as_str).is_none()
        || body.get("password").and_then(Value::as_str).is_none()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "email and password required"})),
        );
    }
    (
        StatusCode::OK,
        Json(json!({"access": "login-access", "refresh": "login-refresh"})),
    )
}

async fn refresh(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    if body.get("refresh").and_then(Value::as_str).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "refresh required"})),
        );
    }

    match state.refresh_grants.lock().unwrap().clone() {
        Some(access) => {
            *state.valid_access.lock().unwrap() = access.clone();
            (StatusCode::OK, Json(json!({ "access": access })))
        }
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "refresh token expired"})),
        ),
    }
}

async fn logout(State(_state): State<Arc<MockState>>) -> StatusCode {
    StatusCode::OK
}

async fn accounts(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.accounts_calls.fetch_add(1, Ordering::SeqCst);
    let bearer = bearer_of(&headers);
    state.seen_bearers.lock().unwrap().push(bearer.clone());

    if let Some(status) = *state.force_status.lock().unwrap() {
        return (
            StatusCode::from_u16(status).unwrap(),
            Json(json!({"detail": "forced status"})),
        );
    }

    let valid = state.valid_access.lock().unwrap().clone();
    match bearer {
        Some(token) if !valid.is_empty() && token == valid => {
            (StatusCode::OK, Json(accounts_payload()))
        }
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "token not valid"})),
        ),
    }
}

/// A fixed accounts payload matching `vault_client::models::Account`.
#[allow(dead_code)]
pub fn accounts_payload() -> Value {
    json!([
        {
            "id": "8f9f2f3e-2f51-4d37-9b5c-9a2e4f0c1d2a",
            "name": "Everyday Checking",
            "account_type": "checking",
            "currency": "USD",
            "balance": "1250.75"
        },
        {
            "id": "4c1d7a8b-0e6f-4a2b-8c3d-5e6f7a8b9c0d",
            "name": "Rainy Day",
            "account_type": "savings",
            "currency": "USD",
            "balance": "9800.00"
        }
    ])
}

/// Session hook that records invalidation notifications.
#[derive(Default)]
pub struct RecordingEvents {
    pub invalidated: AtomicUsize,
}

impl SessionEvents for RecordingEvents {
    fn session_invalidated(&self) {
        self.invalidated.fetch_add(1, Ordering::SeqCst);
    }
}

/// Mint an unsigned-by-us JWT whose `exp` is `offset_secs` from now.
/// The client never checks signatures, but the token must decode.
#[allow(dead_code)]
pub fn make_jwt(offset_secs: i64) -> String {
    #[derive(Serialize)]
    struct Claims {
        sub: String,
        exp: i64,
        iat: i64,
    }

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "user-1".to_string(),
        exp: now + offset_secs,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"test-signing-key"),
    )
    .expect("Failed to create JWT")
}
