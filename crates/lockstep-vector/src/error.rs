//! Error type for `lockstep-vector`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The rollback target does not exist; the alias was left untouched.
  #[error("collection version not found: {base_name} v{version}")]
  VersionNotFound { base_name: String, version: String },

  #[error("building HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  /// The vector store is unreachable. Surfaced directly — never retried
  /// internally.
  #[error("vector store unreachable: {0}")]
  Connectivity(#[source] reqwest::Error),

  #[error("vector store returned {status}: {body}")]
  Api { status: u16, body: String },

  #[error("deserialising vector store response: {0}")]
  Json(#[source] reqwest::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
