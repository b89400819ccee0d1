//! The `VectorStore` trait — the contract a vector database client must
//! satisfy.
//!
//! The trait is implemented by storage backends (e.g. the HTTP client in
//! `lockstep-vector`). The collection manager depends on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::collection::{CollectionInfo, VectorParams};

/// Abstraction over a vector database exposing named collections and
/// rebindable aliases.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes. None of the operations retry internally:
/// alias and collection writes are correctness-sensitive, and retrying a
/// half-applied write could compound inconsistency.
pub trait VectorStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Create a physical collection with the given vector parameters.
  fn create_collection<'a>(
    &'a self,
    name: &'a str,
    params: &'a VectorParams,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// List the names of all physical collections.
  fn list_collections(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Look up a collection by physical name or by alias. The returned info
  /// carries the resolved physical name. `None` if neither a collection nor
  /// an alias with this name exists.
  fn get_collection<'a>(
    &'a self,
    name_or_alias: &'a str,
  ) -> impl Future<Output = Result<Option<CollectionInfo>, Self::Error>> + Send + 'a;

  /// Point `alias` at `collection`.
  fn create_alias<'a>(
    &'a self,
    collection: &'a str,
    alias: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove `alias`. Deleting an alias that does not exist is not an error.
  fn delete_alias<'a>(
    &'a self,
    alias: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
