// SPDX-License-Identifier: MIT

//! Authenticated HTTP client for the Vault API.
//!
//! Every outgoing request carries the stored access token as a bearer
//! credential. On a 401 the client performs exactly one refresh-and-retry
//! cycle: it posts the refresh token to the token endpoint, writes the new
//! access token to the store, and replays the original request once. A second
//! 401, or any other failure, is surfaced to the caller unchanged. If the
//! refresh itself fails the session is unrecoverable: tokens are cleared and
//! the injected [`SessionEvents`] hook is notified so the UI can navigate to
//! the login page.

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{ApiError, Result};
use crate::store::TokenStore;

/// Token obtain endpoint (email + password in, token pair out).
const LOGIN_PATH: &str = "token/";
/// Token refresh endpoint (refresh token in, new access token out).
const REFRESH_PATH: &str = "token/refresh/";
/// Account registration endpoint.
const REGISTER_PATH: &str = "api/user/register/";
/// Server-side logout endpoint.
const LOGOUT_PATH: &str = "logout/";

/// Notifications about session lifecycle, injected by the embedding UI.
///
/// The concrete navigation mechanism (redirecting a browser context, swapping
/// a view stack, printing a message) lives with the embedder.
pub trait SessionEvents: Send + Sync {
    /// The session became unrecoverable; the user must sign in again.
    fn session_invalidated(&self);
}

/// Default hook for headless use: does nothing.
pub struct NoopSessionEvents;

impl SessionEvents for NoopSessionEvents {
    fn session_invalidated(&self) {}
}

/// Token pair returned by the login endpoint.
#[derive(Debug, Clone, Deserialize)]
struct TokenPair {
    access: String,
    refresh: String,
}

/// Body returned by the refresh endpoint.
#[derive(Debug, Clone, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Authenticated Vault API client.
#[derive(Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    events: Arc<dyn SessionEvents>,
}

impl VaultClient {
    /// Create a client against `base_url` with a no-op session hook.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        Self::with_events(base_url, store, Arc::new(NoopSessionEvents))
    }

    /// Create a client with an explicit session-invalidated hook.
    pub fn with_events(
        base_url: impl Into<String>,
        store: Arc<dyn TokenStore>,
        events: Arc<dyn SessionEvents>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            store,
            events,
        }
    }

    /// The token store this client reads and maintains.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Drop the session and notify the embedding UI. Called by the client
    /// and the route guard when a refresh attempt fails.
    pub(crate) fn invalidate_session(&self) {
        self.store.clear();
        self.events.session_invalidated();
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    // ─── Core request path ───────────────────────────────────────────────────

    /// Issue an authenticated request and return the parsed JSON body.
    ///
    /// The retry flag is per-call state: at most one refresh-and-retry cycle
    /// happens per original request, so a 401 on the replayed attempt is
    /// returned as an ordinary [`ApiError::Http`] failure.
    pub async fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let mut retried = false;
        loop {
            let token = self.store.access();
            tracing::debug!(%method, path, retried, "Issuing API request");
            let response = self.send(method.clone(), path, body, token.as_deref()).await?;

            if response.status() == StatusCode::UNAUTHORIZED && !retried {
                retried = true;
                tracing::debug!(path, "Got 401, attempting token refresh");
                match self.refresh_access_token().await {
                    // The new token is in the store before the retry is sent,
                    // so the replayed request never carries the stale one.
                    Ok(_) => continue,
                    Err(e) => {
                        tracing::warn!(error = %e, "Token refresh failed; session invalidated");
                        self.invalidate_session();
                        return Err(ApiError::AuthExpired);
                    }
                }
            }

            return Self::into_json(response).await;
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn into_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET `path` and deserialize the response body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.request(Method::GET, path, None).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// POST `body` to `path` and deserialize the response body.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let value = self.request(Method::POST, path, Some(&body)).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // ─── Session management ──────────────────────────────────────────────────

    /// Exchange the stored refresh token for a new access token and write it
    /// to the store.
    ///
    /// A missing refresh token fails immediately without touching the
    /// network. The refresh call itself goes out unauthenticated; it must not
    /// re-enter the retry path.
    pub async fn refresh_access_token(&self) -> Result<String> {
        let refresh = self.store.refresh().ok_or(ApiError::AuthExpired)?;

        let response = self
            .http
            .post(self.url(REFRESH_PATH))
            .json(&json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        self.store.set_access(&body.access);
        tracing::info!("Access token refreshed");
        Ok(body.access)
    }

    /// Sign in with email and password, storing the returned token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let response = self
            .http
            .post(self.url(LOGIN_PATH))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        let pair: TokenPair = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        self.store.set_session(&pair.access, &pair.refresh);
        tracing::info!(email, "Signed in");
        Ok(())
    }

    /// Register a new user account. Does not sign in.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<Value> {
        let response = self
            .http
            .post(self.url(REGISTER_PATH))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Self::into_json(response).await
    }

    /// Sign out: tell the server (best effort) and drop the local session.
    pub async fn logout(&self) -> Result<()> {
        if let Err(e) = self.request(Method::POST, LOGOUT_PATH, None).await {
            tracing::debug!(error = %e, "Server-side logout failed; clearing local session anyway");
        }
        self.store.clear();
        tracing::info!("Signed out");
        Ok(())
    }
}
