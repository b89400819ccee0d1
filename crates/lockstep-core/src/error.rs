//! Error types for `lockstep-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The schema source contains no `THIS VERSION: <token>` marker line.
  /// Fatal: nothing is executed or recorded for an unversioned schema.
  #[error("schema source has no version marker (`THIS VERSION: <token>`)")]
  MissingVersion,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
