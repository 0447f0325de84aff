//! Per-session exchange serialization.
//!
//! Two concurrent exchanges on one session would otherwise interleave their
//! appends (user A, user B, reply A, reply B). Holding a session's guard for
//! the whole exchange keeps each user/assistant pair adjacent. Distinct
//! sessions get distinct mutexes and never wait on each other.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-session async mutexes.
#[derive(Default)]
pub struct SessionLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    pub async fn acquire(&self, session_id: &str) -> OwnedMutexGuard<()> {
        // Clone the Arc out before awaiting so no map shard stays locked.
        let lock = self
            .locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Forget the session's mutex unless an exchange holds or awaits it.
    ///
    /// A held mutex stays registered so the next exchange on the session
    /// still queues behind the in-flight one.
    pub fn remove_if_idle(&self, session_id: &str) -> bool {
        self.locks
            .remove_if(session_id, |_, lock| Arc::strong_count(lock) == 1)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_session_is_exclusive() {
        let locks = SessionLocks::new();
        let _guard = locks.acquire("s").await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire("s")).await;
        assert!(second.is_err(), "second acquire should block while first is held");
    }

    #[tokio::test]
    async fn test_distinct_sessions_do_not_block() {
        let locks = SessionLocks::new();
        let _a = locks.acquire("a").await;
        let b = tokio::time::timeout(Duration::from_millis(50), locks.acquire("b")).await;
        assert!(b.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_drops_idle_entry() {
        let locks = SessionLocks::new();
        drop(locks.acquire("s").await);
        assert!(locks.remove_if_idle("s"));
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_remove_keeps_held_entry() {
        let locks = SessionLocks::new();
        let _guard = locks.acquire("s").await;
        assert!(!locks.remove_if_idle("s"));
        assert_eq!(locks.len(), 1);

        let next = tokio::time::timeout(Duration::from_millis(50), locks.acquire("s")).await;
        assert!(next.is_err(), "next exchange must still wait for the held guard");
    }
}
