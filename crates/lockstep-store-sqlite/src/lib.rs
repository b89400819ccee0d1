//! SQLite backend for the Lockstep schema ledger and applier.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. The applier commits DDL and
//! its ledger row in one immediate transaction, so an observer never sees
//! schema applied without a corresponding ledger entry.

mod applier;
mod encode;
mod ledger;
mod schema;

pub mod error;

pub use applier::{ExecHook, SchemaApplier};
pub use error::{Error, Result};
pub use ledger::SchemaLedger;
