// SPDX-License-Identifier: MIT

//! Route guard for protected views.
//!
//! Runs before a protected view renders and before any of its data fetching:
//! a denied decision must never let protected content flash or a doomed
//! request go out. The guard checks the stored access token's expiry and, if
//! it is expired but a refresh token exists, performs a just-in-time refresh
//! with the same semantics as the client's 401 path.

use chrono::{Duration, Utc};

use crate::client::VaultClient;
use crate::token;

/// Clock-skew allowance when comparing a token's `exp` against local time.
const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Session is valid; render the protected view.
    Allow,
    /// Session is missing or unrecoverable; navigate to the login page.
    RedirectToLogin,
}

/// Gate placed in front of protected views.
pub struct RouteGuard {
    client: VaultClient,
}

impl RouteGuard {
    /// Build a guard over the same client (and therefore the same token
    /// store) the protected views use for data.
    pub fn new(client: VaultClient) -> Self {
        Self { client }
    }

    /// Decide whether a protected view may render.
    ///
    /// No network traffic happens unless the stored access token is expired
    /// or undecodable; an unexpired token yields `Allow` with no storage
    /// mutation, so repeated checks are idempotent.
    pub async fn authorize(&self) -> Decision {
        let store = self.client.store();

        let Some(access) = store.access() else {
            tracing::debug!("No access token stored; redirecting to login");
            return Decision::RedirectToLogin;
        };

        // A token we cannot decode is handled exactly like an expired one:
        // try to refresh, otherwise deny.
        let expired = match token::expires_at(&access) {
            Ok(expiry) => expiry <= Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECS),
            Err(e) => {
                tracing::warn!(error = %e, "Stored access token undecodable; treating as expired");
                true
            }
        };

        if !expired {
            return Decision::Allow;
        }

        match self.client.refresh_access_token().await {
            Ok(_) => {
                tracing::debug!("Expired access token refreshed; allowing");
                Decision::Allow
            }
            Err(e) => {
                tracing::warn!(error = %e, "Refresh failed during guard check; session invalidated");
                self.client.invalidate_session();
                Decision::RedirectToLogin
            }
        }
    }
}
