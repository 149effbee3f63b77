//! Error types for the Tally engine.
//!
//! Every failure an instruction can produce is a [`TallyError`]. Each
//! variant maps to a stable numeric [`ErrorCode`] so hosts can report
//! failures without depending on the Rust type.

use std::fmt;

use crate::account::AccountKind;
use crate::types::{AccountId, Pubkey};

/// Numeric result codes reported to hosts.
///
/// Codes start at `1`; success is reported out of band. These repr values
/// are part of the external contract and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    AlreadyInitialized = 1,
    NotFound = 2,
    Unauthorized = 3,
    Overflow = 4,
    WriteError = 5,
    InvalidInstruction = 6,
    KindMismatch = 7,
    Corrupt = 8,
    Store = 9,
}

impl ErrorCode {
    /// Convert from a numeric code reported by a host.
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::AlreadyInitialized),
            2 => Some(Self::NotFound),
            3 => Some(Self::Unauthorized),
            4 => Some(Self::Overflow),
            5 => Some(Self::WriteError),
            6 => Some(Self::InvalidInstruction),
            7 => Some(Self::KindMismatch),
            8 => Some(Self::Corrupt),
            9 => Some(Self::Store),
            _ => None,
        }
    }

    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "ERR_ALREADY_INITIALIZED"),
            Self::NotFound => write!(f, "ERR_NOT_FOUND"),
            Self::Unauthorized => write!(f, "ERR_UNAUTHORIZED"),
            Self::Overflow => write!(f, "ERR_OVERFLOW"),
            Self::WriteError => write!(f, "ERR_WRITE"),
            Self::InvalidInstruction => write!(f, "ERR_INVALID_INSTRUCTION"),
            Self::KindMismatch => write!(f, "ERR_KIND_MISMATCH"),
            Self::Corrupt => write!(f, "ERR_CORRUPT"),
            Self::Store => write!(f, "ERR_STORE"),
        }
    }
}

/// Engine error type.
///
/// All variants are detected before anything is committed, so receiving
/// one of them means the store is exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TallyError {
    /// Initialize targeted an account id that is already bound.
    #[error("account {0} is already initialized")]
    AlreadyInitialized(AccountId),

    /// A mutating instruction targeted an account that does not exist.
    #[error("account {0} not found")]
    NotFound(AccountId),

    /// The signer set does not include the required identity.
    #[error("missing signature from {required}")]
    Unauthorized { required: Pubkey },

    /// A checked numeric transition left the `i64` range.
    #[error("{field} transition overflows i64")]
    Overflow { field: &'static str },

    /// The store failed to durably commit. Nothing was written.
    #[error("commit failed: {0}")]
    WriteError(String),

    /// Instruction bytes could not be decoded.
    #[error("invalid instruction: {0}")]
    InvalidInstruction(String),

    /// The instruction does not apply to this kind of account.
    #[error("{instruction} does not apply to {found} accounts")]
    KindMismatch {
        instruction: &'static str,
        found: AccountKind,
    },

    /// Stored bytes failed to decode into an account record.
    #[error("corrupt account record: {0}")]
    Corrupt(String),

    /// The store failed to read.
    #[error("store read failed: {0}")]
    Store(String),
}

impl TallyError {
    /// The numeric code reported for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyInitialized(_) => ErrorCode::AlreadyInitialized,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Unauthorized { .. } => ErrorCode::Unauthorized,
            Self::Overflow { .. } => ErrorCode::Overflow,
            Self::WriteError(_) => ErrorCode::WriteError,
            Self::InvalidInstruction(_) => ErrorCode::InvalidInstruction,
            Self::KindMismatch { .. } => ErrorCode::KindMismatch,
            Self::Corrupt(_) => ErrorCode::Corrupt,
            Self::Store(_) => ErrorCode::Store,
        }
    }

    /// True for failures of the storage layer rather than of the
    /// instruction itself. Such failures are safe to retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::WriteError(_) | Self::Store(_))
    }
}

/// Convenience result type for the engine.
pub type TallyResult<T> = Result<T, TallyError>;
