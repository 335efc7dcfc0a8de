// SPDX-License-Identifier: MIT

//! Session token storage.
//!
//! The client and the route guard share one session per device: an access
//! token and a refresh token. Storage is injected as a capability so the
//! embedding UI can decide where tokens live (in memory, on disk, behind a
//! platform keystore) and so tests can substitute an in-memory fake.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Storage for the two session token slots.
///
/// Implementations must be safe to share across tasks; the client writes the
/// access token slot after a successful refresh and both the client and guard
/// clear the store when the session becomes unrecoverable.
pub trait TokenStore: Send + Sync {
    /// Current access token, if any.
    fn access(&self) -> Option<String>;

    /// Current refresh token, if any.
    fn refresh(&self) -> Option<String>;

    /// Replace only the access token (refresh flow).
    fn set_access(&self, token: &str);

    /// Replace both tokens (login flow).
    fn set_session(&self, access: &str, refresh: &str);

    /// Drop both tokens (logout, or refresh failure).
    fn clear(&self);
}

/// The two named token slots.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

/// In-memory token store. Default for embedding and for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    slots: Mutex<Slots>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access(&self) -> Option<String> {
        self.slots.lock().unwrap().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.slots.lock().unwrap().refresh.clone()
    }

    fn set_access(&self, token: &str) {
        self.slots.lock().unwrap().access = Some(token.to_string());
    }

    fn set_session(&self, access: &str, refresh: &str) {
        let mut slots = self.slots.lock().unwrap();
        slots.access = Some(access.to_string());
        slots.refresh = Some(refresh.to_string());
    }

    fn clear(&self) {
        *self.slots.lock().unwrap() = Slots::default();
    }
}

/// File-backed token store used by the CLI so a session survives between
/// invocations. Tokens are kept as a small JSON document; a missing or
/// unreadable file is treated as an empty session.
pub struct FileTokenStore {
    path: PathBuf,
    slots: Mutex<Slots>,
}

impl FileTokenStore {
    /// Open a store at `path`, loading any previously persisted session.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let slots = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt session file");
                Slots::default()
            }),
            Err(_) => Slots::default(),
        };
        Self {
            path,
            slots: Mutex::new(slots),
        }
    }

    fn persist(&self, slots: &Slots) {
        let result = serde_json::to_string_pretty(slots)
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(&self.path, json));
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist session");
        }
    }
}

impl TokenStore for FileTokenStore {
    fn access(&self) -> Option<String> {
        self.slots.lock().unwrap().access.clone()
    }

    fn refresh(&self) -> Option<String> {
        self.slots.lock().unwrap().refresh.clone()
    }

    fn set_access(&self, token: &str) {
        let mut slots = self.slots.lock().unwrap();
        slots.access = Some(token.to_string());
        self.persist(&slots);
    }

    fn set_session(&self, access: &str, refresh: &str) {
        let mut slots = self.slots.lock().unwrap();
        slots.access = Some(access.to_string());
        slots.refresh = Some(refresh.to_string());
        self.persist(&slots);
    }

    fn clear(&self) {
        let mut slots = self.slots.lock().unwrap();
        *slots = Slots::default();
        self.persist(&slots);
    }
}
