//! Vector-store side of the Lockstep migration engine.
//!
//! [`CollectionManager`] drives versioned collections and their stable alias
//! through any [`lockstep_core::store::VectorStore`] backend;
//! [`HttpVectorStore`] is the REST backend for a Qdrant-style vector
//! database.

mod http;
mod manager;

pub mod error;

pub use error::{Error, Result};
pub use http::HttpVectorStore;
pub use manager::CollectionManager;

#[cfg(test)]
mod tests;
