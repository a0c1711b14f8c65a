//! Evaluation session state held between enrichment round-trips.

mod cache;

pub use cache::{DEFAULT_SESSION_TTL, SessionCache, SessionState, TokenSession};
