// =============================================================================
// Watchlist Store — session-scoped key-value storage
// =============================================================================
//
// Each client session owns an ordered list of watchlists. The store is the
// only state shared across requests; it is passed to the API layer explicitly
// through `AppState` and is never touched by chart or quote assembly.
//
// Sessions exist only once the store has minted them. A client-supplied id
// the store never issued (or has since evicted) is treated as no session.
// The in-memory store is bounded: idle sessions expire after a TTL and the
// least recently saved session is evicted when the table is full.
// =============================================================================

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::types::Watchlist;

/// Default upper bound on live sessions held in memory.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// Default idle time after which a session is dropped (30 days).
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Storage for per-session watchlists.
pub trait WatchlistStore: Send + Sync {
    /// Start a new session holding `watchlists` and return its id.
    fn create_session(&self, watchlists: Vec<Watchlist>) -> String;

    /// All watchlists saved under `session_id` (empty if none).
    fn get(&self, session_id: &str) -> Vec<Watchlist>;

    /// Replace the watchlists saved under `session_id`.
    ///
    /// Fails with the lists handed back when the session is unknown or has
    /// expired, so the caller can start a fresh session with them.
    fn put(&self, session_id: &str, watchlists: Vec<Watchlist>) -> Result<(), Vec<Watchlist>>;

    /// Look up a single watchlist by id within a session.
    fn find(&self, session_id: &str, watchlist_id: &str) -> Option<Watchlist> {
        self.get(session_id)
            .into_iter()
            .find(|w| w.id == watchlist_id)
    }
}

struct SessionEntry {
    watchlists: Vec<Watchlist>,
    last_saved: Instant,
    /// Monotonic save counter; the lowest value is evicted first.
    seq: u64,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<String, SessionEntry>,
    next_seq: u64,
}

impl Sessions {
    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Process-local store. Contents are lost on restart.
pub struct InMemoryWatchlistStore {
    sessions: RwLock<Sessions>,
    max_sessions: usize,
    ttl: Duration,
}

impl InMemoryWatchlistStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_SESSION_TTL)
    }

    /// A store holding at most `max_sessions` sessions, each dropped after
    /// `ttl` without a save.
    pub fn with_limits(max_sessions: usize, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(Sessions::default()),
            max_sessions: max_sessions.max(1),
            ttl,
        }
    }

    fn is_live(&self, entry: &SessionEntry) -> bool {
        entry.last_saved.elapsed() < self.ttl
    }
}

impl WatchlistStore for InMemoryWatchlistStore {
    fn create_session(&self, watchlists: Vec<Watchlist>) -> String {
        let mut sessions = self.sessions.write();

        let before = sessions.entries.len();
        sessions.entries.retain(|_, entry| entry.last_saved.elapsed() < self.ttl);
        let expired = before - sessions.entries.len();

        let mut evicted = 0;
        while sessions.entries.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.entries.remove(&oldest);
            evicted += 1;
        }

        if expired > 0 || evicted > 0 {
            debug!(expired, evicted, live = sessions.entries.len(), "watchlist sessions pruned");
        }

        let id = Uuid::new_v4().to_string();
        let seq = sessions.bump();
        sessions.entries.insert(
            id.clone(),
            SessionEntry {
                watchlists,
                last_saved: Instant::now(),
                seq,
            },
        );
        id
    }

    fn get(&self, session_id: &str) -> Vec<Watchlist> {
        self.sessions
            .read()
            .entries
            .get(session_id)
            .filter(|entry| self.is_live(entry))
            .map(|entry| entry.watchlists.clone())
            .unwrap_or_default()
    }

    fn put(&self, session_id: &str, watchlists: Vec<Watchlist>) -> Result<(), Vec<Watchlist>> {
        let mut sessions = self.sessions.write();
        let seq = sessions.bump();

        match sessions.entries.get_mut(session_id) {
            Some(entry) if entry.last_saved.elapsed() < self.ttl => {
                entry.watchlists = watchlists;
                entry.last_saved = Instant::now();
                entry.seq = seq;
                Ok(())
            }
            Some(_) => {
                sessions.entries.remove(session_id);
                Err(watchlists)
            }
            None => Err(watchlists),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist(id: &str, symbols: &[&str]) -> Watchlist {
        Watchlist {
            id: id.to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn unknown_session_is_empty() {
        let store = InMemoryWatchlistStore::new();
        assert!(store.get("nobody").is_empty());
        assert!(store.find("nobody", "w1").is_none());
    }

    #[test]
    fn put_to_unminted_session_is_rejected() {
        let store = InMemoryWatchlistStore::new();
        let rejected = store.put("forged", vec![watchlist("w1", &["AAPL"])]).unwrap_err();
        assert_eq!(rejected.len(), 1);
        assert!(store.get("forged").is_empty());
    }

    #[test]
    fn put_replaces_session_lists() {
        let store = InMemoryWatchlistStore::new();
        let s1 = store.create_session(vec![watchlist("w1", &["AAPL"]), watchlist("w2", &["TCS"])]);
        store.put(&s1, vec![watchlist("w3", &["INFY"])]).unwrap();

        let lists = store.get(&s1);
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, "w3");
    }

    #[test]
    fn sessions_are_isolated() {
        let store = InMemoryWatchlistStore::new();
        let s1 = store.create_session(vec![watchlist("w1", &["AAPL"])]);
        let s2 = store.create_session(vec![watchlist("w1", &["TCS"])]);
        assert_ne!(s1, s2);

        assert_eq!(store.find(&s1, "w1").unwrap().symbols, vec!["AAPL"]);
        assert_eq!(store.find(&s2, "w1").unwrap().symbols, vec!["TCS"]);
        assert!(store.find(&s1, "w2").is_none());
    }

    #[test]
    fn full_store_evicts_least_recently_saved() {
        let store = InMemoryWatchlistStore::with_limits(2, DEFAULT_SESSION_TTL);
        let a = store.create_session(vec![watchlist("a", &[])]);
        let b = store.create_session(vec![watchlist("b", &[])]);

        // Saving to `a` makes `b` the oldest.
        store.put(&a, vec![watchlist("a2", &[])]).unwrap();
        let c = store.create_session(vec![watchlist("c", &[])]);

        assert!(store.get(&b).is_empty());
        assert!(store.put(&b, Vec::new()).is_err());
        assert_eq!(store.get(&a)[0].id, "a2");
        assert_eq!(store.get(&c)[0].id, "c");
    }

    #[test]
    fn many_sessions_stay_within_bound() {
        let store = InMemoryWatchlistStore::with_limits(3, DEFAULT_SESSION_TTL);
        let ids: Vec<String> = (0..50).map(|_| store.create_session(Vec::new())).collect();
        assert_eq!(store.sessions.read().entries.len(), 3);
        assert!(store.put(&ids[0], Vec::new()).is_err());
        assert!(store.put(&ids[49], Vec::new()).is_ok());
    }

    #[test]
    fn expired_session_is_gone() {
        let store = InMemoryWatchlistStore::with_limits(10, Duration::ZERO);
        let s1 = store.create_session(vec![watchlist("w1", &["AAPL"])]);

        assert!(store.get(&s1).is_empty());
        assert!(store.put(&s1, Vec::new()).is_err());
        assert!(store.sessions.read().entries.is_empty());
    }
}
