//! Storage error type.

use tally_primitives::{AccountId, TallyError};

/// Failure reported by an [`AccountStore`](crate::AccountStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The embedded database failed.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// A lock guarding the backend was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,

    /// Stored bytes for an account failed to decode.
    #[error("record for {account} is corrupt: {reason}")]
    Corrupt { account: AccountId, reason: String },

    /// Any other backend-specific failure.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Map a failure on the read path into the engine taxonomy.
    pub fn into_read_error(self) -> TallyError {
        match self {
            Self::Corrupt { account, reason } => {
                TallyError::Corrupt(format!("{account}: {reason}"))
            }
            other => TallyError::Store(other.to_string()),
        }
    }

    /// Map a failure on the commit path into the engine taxonomy.
    pub fn into_write_error(self) -> TallyError {
        TallyError::WriteError(self.to_string())
    }
}
