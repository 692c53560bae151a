use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Session lifetime of a stored token.
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Holds a single opaque token string.
pub trait TokenStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: String);
    fn clear(&self);
}

#[derive(Debug)]
struct StoredToken {
    value: String,
    stored_at: Instant,
}

/// In-memory store; a token older than its max age reads as absent.
#[derive(Debug)]
pub struct SessionTokenStore {
    entry: Mutex<Option<StoredToken>>,
    max_age: Duration,
}

impl Default for SessionTokenStore {
    fn default() -> Self {
        Self::with_max_age(SESSION_MAX_AGE)
    }
}

impl SessionTokenStore {
    #[must_use]
    pub const fn with_max_age(max_age: Duration) -> Self {
        Self {
            entry: Mutex::new(None),
            max_age,
        }
    }
}

impl TokenStore for SessionTokenStore {
    fn get(&self) -> Option<String> {
        let mut guard = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        let expired = guard
            .as_ref()
            .is_some_and(|stored| stored.stored_at.elapsed() >= self.max_age);
        if expired {
            tracing::debug!("Session token expired");
            *guard = None;
        }
        guard.as_ref().map(|stored| stored.value.clone())
    }

    fn set(&self, token: String) {
        let mut guard = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(StoredToken {
            value: token,
            stored_at: Instant::now(),
        });
    }

    fn clear(&self) {
        let mut guard = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
