//! SessionStore trait definition.
//!
//! Follows the same RPITIT pattern as the other repository ports so that a
//! persistent or shared backend can replace the in-memory store without
//! touching the relay.

use anos_types::chat::Turn;
use anos_types::error::RepositoryError;

/// Port for per-session turn storage.
///
/// Implementations enforce their own retention cap on every append; callers
/// never trim history themselves.
pub trait SessionStore: Send + Sync {
    /// Return the session's turns, creating an empty session if absent.
    fn get_or_create(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// Append a turn, evicting the oldest turns past the retention cap.
    ///
    /// Creates the session if it does not exist yet.
    fn append_turn(
        &self,
        session_id: &str,
        turn: Turn,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Return the session's turns, oldest first, or empty if unknown.
    ///
    /// Never creates a session.
    fn get_history(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, RepositoryError>> + Send;

    /// Remove the session entirely. Clearing an unknown session is a no-op.
    fn clear(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Whether a session entry currently exists.
    fn contains(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;

    /// Number of live sessions.
    fn session_count(
        &self,
    ) -> impl std::future::Future<Output = Result<usize, RepositoryError>> + Send;
}
