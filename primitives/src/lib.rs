//! `tally-primitives`: foundational types for the Tally account engine.
//!
//! This crate provides the identities, account records, instruction wire
//! format, error codes and hashing/signature helpers shared by the storage
//! backends and the execution engine.
//!
//! Nothing here touches storage or performs logging; every function is a
//! deterministic computation over its inputs.

pub mod types;
pub mod error;
pub mod account;
pub mod instruction;
pub mod codec;
pub mod crypto;
pub mod receipt;

// Re-export commonly used types at the crate root for convenience.
pub use types::{Pubkey, AccountId, SignerSet, Hash, API_VERSION};
pub use error::{ErrorCode, TallyError, TallyResult};
pub use account::{Account, AccountKind};
pub use instruction::{Instruction, SignedInstruction};
pub use receipt::{AccountSnapshot, Committed, CommitResult};
