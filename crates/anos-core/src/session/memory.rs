//! Process-local session store backed by a sharded concurrent map.
//!
//! Each session is a `VecDeque` so FIFO eviction is O(1). Requests for
//! different session ids land on independent map shards and never block each
//! other. Nothing survives a restart.

use std::collections::VecDeque;

use dashmap::DashMap;
use tracing::debug;

use anos_types::chat::Turn;
use anos_types::config::DEFAULT_HISTORY_CAP;
use anos_types::error::RepositoryError;

use super::store::SessionStore;

/// In-memory [`SessionStore`] with a fixed per-session retention cap.
pub struct InMemorySessionStore {
    cap: usize,
    sessions: DashMap<String, VecDeque<Turn>>,
}

impl InMemorySessionStore {
    /// Store with the default cap of 10 turns per session.
    pub fn new() -> Self {
        Self::with_cap(DEFAULT_HISTORY_CAP)
    }

    /// Store with a custom cap. A cap of zero is raised to one.
    pub fn with_cap(cap: usize) -> Self {
        Self {
            cap: cap.max(1),
            sessions: DashMap::new(),
        }
    }

    /// The retention cap applied on every append.
    pub fn cap(&self) -> usize {
        self.cap
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    async fn get_or_create(&self, session_id: &str) -> Result<Vec<Turn>, RepositoryError> {
        let entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                debug!(session_id, "Session created");
                VecDeque::new()
            });
        Ok(entry.iter().cloned().collect())
    }

    async fn append_turn(&self, session_id: &str, turn: Turn) -> Result<(), RepositoryError> {
        let mut entry = self.sessions.entry(session_id.to_string()).or_default();
        entry.push_back(turn);

        let mut evicted = 0usize;
        while entry.len() > self.cap {
            entry.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            debug!(session_id, evicted, "Evicted oldest turns");
        }
        Ok(())
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<Turn>, RepositoryError> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|turns| turns.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, session_id: &str) -> Result<(), RepositoryError> {
        if self.sessions.remove(session_id).is_some() {
            debug!(session_id, "Session cleared");
        }
        Ok(())
    }

    async fn contains(&self, session_id: &str) -> Result<bool, RepositoryError> {
        Ok(self.sessions.contains_key(session_id))
    }

    async fn session_count(&self) -> Result<usize, RepositoryError> {
        Ok(self.sessions.len())
    }
}
