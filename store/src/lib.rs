//! `tally-store`: account storage backends for the Tally engine.
//!
//! - [`AccountStore`]: load/save contract the engine commits through
//! - [`MemStore`]: in-memory store for tests and embedding
//! - [`SledStore`]: durable store over an embedded `sled` database
//! - [`StoreError`]: backend failures
//!
//! Stores hold encoded record bytes and decode on `load`, so a damaged
//! record surfaces as [`StoreError::Corrupt`] from every backend alike.

pub mod error;
pub mod account_store;
pub mod mem_store;
pub mod sled_store;

pub use error::StoreError;
pub use account_store::AccountStore;
pub use mem_store::MemStore;
pub use sled_store::SledStore;
