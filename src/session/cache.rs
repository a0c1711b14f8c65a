//! TTL session cache for iterative re-enrichment.
//!
//! An operator who reassigns an ambiguous token to a specific employee
//! expects only that token's days to be recomputed; the session cache holds
//! the per-run evaluated state between those round-trips. The cache is an
//! explicitly constructed service with an injected TTL, not ambient module
//! state, so concurrent evaluation runs never cross-talk and tests can use
//! short lifetimes.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{EvaluatedDay, ResolvedIdentity};

/// Default session lifetime.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// Evaluated state for one token inside a session. Writes are
/// last-write-wins per token key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSession {
    /// The pinned (possibly operator-overridden) identity for the token.
    pub identity: ResolvedIdentity,
    /// The token's recomputed days.
    pub days: Vec<EvaluatedDay>,
}

/// The externally visible state of one session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Per-token evaluated state.
    pub tokens: HashMap<String, TokenSession>,
}

struct SessionEntry {
    touched: Instant,
    state: SessionState,
}

/// An in-memory session store with a fixed time-to-live.
///
/// Expired sessions are evicted lazily on every operation; reads and writes
/// refresh the session's lifetime.
pub struct SessionCache {
    ttl: Duration,
    inner: Mutex<HashMap<String, SessionEntry>>,
}

impl SessionCache {
    /// Creates a cache with the default one-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Creates a cache with an explicit TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        SessionCache {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, SessionEntry>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn evict_expired(&self, sessions: &mut HashMap<String, SessionEntry>) {
        let ttl = self.ttl;
        let now = Instant::now();
        sessions.retain(|_, entry| now.duration_since(entry.touched) < ttl);
    }

    /// Creates a fresh session and returns its id.
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);
        sessions.insert(
            id.clone(),
            SessionEntry {
                touched: Instant::now(),
                state: SessionState::default(),
            },
        );
        id
    }

    /// Returns a snapshot of the session state, refreshing its lifetime.
    pub fn read(&self, id: &str) -> EngineResult<SessionState> {
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })?;
        entry.touched = Instant::now();
        Ok(entry.state.clone())
    }

    /// Stores (or replaces) one token's evaluated state in the session.
    pub fn put_token(&self, id: &str, token: &str, state: TokenSession) -> EngineResult<()> {
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })?;
        entry.touched = Instant::now();
        entry.state.tokens.insert(token.to_string(), state);
        Ok(())
    }

    /// Refreshes the session's lifetime without reading it.
    pub fn touch(&self, id: &str) -> EngineResult<()> {
        let mut sessions = self.lock();
        self.evict_expired(&mut sessions);
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })?;
        entry.touched = Instant::now();
        Ok(())
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdentityStatus;

    fn token_session() -> TokenSession {
        TokenSession {
            identity: ResolvedIdentity {
                token: "0007".to_string(),
                normalized_token: "0007".to_string(),
                status: IdentityStatus::Matched,
                employee_id: Some("emp_001".to_string()),
                display_name: Some("Reyes, Ana".to_string()),
                candidates: vec![],
            },
            days: vec![],
        }
    }

    #[test]
    fn test_create_read_roundtrip() {
        let cache = SessionCache::new();
        let id = cache.create();
        let state = cache.read(&id).unwrap();
        assert!(state.tokens.is_empty());
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let cache = SessionCache::new();
        assert!(matches!(
            cache.read("missing"),
            Err(EngineError::SessionNotFound { .. })
        ));
        assert!(cache.touch("missing").is_err());
        assert!(cache.put_token("missing", "0007", token_session()).is_err());
    }

    #[test]
    fn test_put_token_last_write_wins() {
        let cache = SessionCache::new();
        let id = cache.create();

        let mut first = token_session();
        first.identity.employee_id = Some("emp_001".to_string());
        cache.put_token(&id, "0007", first).unwrap();

        let mut second = token_session();
        second.identity.employee_id = Some("emp_002".to_string());
        cache.put_token(&id, "0007", second).unwrap();

        let state = cache.read(&id).unwrap();
        assert_eq!(state.tokens.len(), 1);
        assert_eq!(
            state.tokens["0007"].identity.employee_id.as_deref(),
            Some("emp_002")
        );
    }

    #[test]
    fn test_expired_session_is_evicted() {
        let cache = SessionCache::with_ttl(Duration::from_millis(10));
        let id = cache.create();
        std::thread::sleep(Duration::from_millis(25));
        assert!(matches!(
            cache.read(&id),
            Err(EngineError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_touch_extends_lifetime() {
        let cache = SessionCache::with_ttl(Duration::from_millis(60));
        let id = cache.create();
        std::thread::sleep(Duration::from_millis(35));
        cache.touch(&id).unwrap();
        std::thread::sleep(Duration::from_millis(35));
        // Without the touch the session would have expired by now.
        assert!(cache.read(&id).is_ok());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let cache = SessionCache::new();
        let a = cache.create();
        let b = cache.create();
        cache.put_token(&a, "0007", token_session()).unwrap();

        assert_eq!(cache.read(&a).unwrap().tokens.len(), 1);
        assert!(cache.read(&b).unwrap().tokens.is_empty());
    }
}
