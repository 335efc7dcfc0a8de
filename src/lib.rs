// SPDX-License-Identifier: MIT

//! Vault client: the service layer of the Vault retail-banking frontend.
//!
//! Wraps the Vault REST API behind an authenticated HTTP client that
//! transparently refreshes an expired access token (one refresh, one retry
//! per request), and a route guard that validates the stored session before
//! a protected view renders. Rendering itself is out of scope; the UI is
//! plugged in through the [`store::TokenStore`] and
//! [`client::SessionEvents`] capabilities.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod store;
pub mod token;

pub use client::{SessionEvents, VaultClient};
pub use error::{ApiError, Result};
pub use guard::{Decision, RouteGuard};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
