//! Tally engine: authority-gated, all-or-nothing state transitions over
//! Counter and Avatar accounts.
//!
//! - [`guard`]: signer-set checks, the only source of [`Authorized`] tokens
//! - [`handlers`]: pure per-instruction transitions
//! - [`strategy`]: how LevelUp moves a level
//! - [`dispatcher`]: validation then execution, no storage access
//! - [`executor`]: load, dispatch, save
//! - [`locks`]: per-account serialization
//! - [`ledger`]: host façade tying a store to an executor
//! - [`config`]: TOML configuration

pub mod config;
pub mod dispatcher;
pub mod executor;
pub mod guard;
pub mod handlers;
pub mod ledger;
pub mod locks;
pub mod strategy;

pub use config::{ConfigError, EngineConfig, LedgerConfig, StoreConfig};
pub use dispatcher::{Dispatcher, Mutation, Validated};
pub use executor::TransactionExecutor;
pub use guard::{AuthorityGuard, Authorized};
pub use ledger::Ledger;
pub use locks::AccountLocks;
pub use strategy::{FixedStep, LevelStrategy};
