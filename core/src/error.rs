// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Failure taxonomy for the collection sync layer.
///
/// Nothing here is fatal to the embedding process: every variant is caught at
/// the controller boundary and converted into user-facing feedback. The worst
/// case is a stale or empty collection view.
#[derive(Debug, Error)]
pub enum SyncError {
  #[error("Remote store unreachable: {source}")]
  Transport {
    #[source]
    source: AnyhowError,
  },

  /// Duplicate-key insert rejected by the backend. For the likes collection
  /// the controller downgrades this to a benign "already present" outcome
  /// rather than propagating it as a failure.
  #[error("Uniqueness constraint violated for item '{item_id}'")]
  Constraint { item_id: String },

  /// Stored JSON under a local-storage key could not be parsed. The local
  /// adapter swallows this and treats the key as holding no data.
  #[error("Malformed stored payload under key '{key}': {source}")]
  Serialization {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  /// Input rejected before any persistence attempt.
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Internal sync error: {0}")]
  Internal(String),
}

// Constraint violations are classified at the adapter, where the offending
// item id is known; any other driver error is a transport failure.
impl From<sqlx::Error> for SyncError {
  fn from(err: sqlx::Error) -> Self {
    SyncError::Transport { source: err.into() }
  }
}

pub type SyncResult<T, E = SyncError> = std::result::Result<T, E>;
