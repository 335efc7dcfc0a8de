// SPDX-License-Identifier: MIT

//! Client error types surfaced to callers of the API client and route guard.

/// Error type for API calls made through [`crate::client::VaultClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The access token is gone or expired and could not be refreshed.
    /// The session has been cleared; the user must sign in again.
    #[error("Session expired; sign in again")]
    AuthExpired,

    /// Non-2xx response from the server, surfaced unchanged.
    /// A 401 carried by this variant means the request already went through
    /// its single refresh-and-retry cycle.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Network-level failure: no response was received.
    #[error("Network error: {0}")]
    Transport(String),

    /// The server responded 2xx but the body did not match the expected shape.
    #[error("Invalid response payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// True when the failure means the session is unauthenticated and the
    /// caller should send the user to the login page.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            ApiError::AuthExpired | ApiError::Http { status: 401, .. }
        )
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
