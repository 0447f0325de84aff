use thiserror::Error;

use crate::llm::LlmError;

/// Failure of one chat exchange, as seen by the relay's callers.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The request was rejected before any state changed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The provider rejected the configured credential.
    #[error("upstream authentication failed: {0}")]
    UpstreamAuth(String),

    /// The provider's rate or quota limit was hit.
    #[error("upstream quota exceeded: {0}")]
    UpstreamQuota(String),

    /// Transport, timeout, malformed reply, or any other failure.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<LlmError> for RelayError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::AuthenticationFailed(detail) => RelayError::UpstreamAuth(detail),
            LlmError::QuotaExceeded(detail) => RelayError::UpstreamQuota(detail),
            other => RelayError::Upstream(other.to_string()),
        }
    }
}

impl From<RepositoryError> for RelayError {
    fn from(e: RepositoryError) -> Self {
        RelayError::Upstream(e.to_string())
    }
}

/// Errors from session store backends.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),
}

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
