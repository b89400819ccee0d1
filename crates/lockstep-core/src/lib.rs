//! Core types and trait definitions for the Lockstep migration engine.
//!
//! This crate is deliberately free of database and HTTP dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod collection;
pub mod error;
pub mod outcome;
pub mod record;
pub mod store;
pub mod version;

pub use error::{Error, Result};
