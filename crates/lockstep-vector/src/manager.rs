//! [`CollectionManager`] — versioned collections behind a stable alias.
//!
//! Per base name the store is either *unversioned* (no collections) or
//! *active* at some version (the alias resolves to exactly one versioned
//! collection); transitions happen only through explicit calls here.
//! Physical collections are immutable — a new version is a new collection,
//! and cutover is an alias repoint.

use lockstep_core::{
  collection::{
    CollectionVersion, DistanceMetric, VectorParams, compare_versions,
    version_from_name, versioned_name,
  },
  store::VectorStore,
};

use crate::{Error, Result};

/// Manages versioned collections and their alias through any
/// [`VectorStore`] backend.
///
/// The alias repoint is delete-then-create — the contract offers no atomic
/// repoint primitive — so there is a brief window where the alias resolves
/// to nothing. Callers may retry *resolution* failures; they must not
/// blindly retry the writes themselves.
pub struct CollectionManager<S: VectorStore> {
  store: S,
}

impl<S: VectorStore> CollectionManager<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// Create the physical collection for `version` and point the alias at
  /// it. The collection name is derived as `{base}_v{version}` with dots
  /// replaced by underscores.
  pub async fn create_with_version(
    &self,
    base_name: &str,
    vector_size: u64,
    version: &str,
    distance: DistanceMetric,
  ) -> Result<CollectionVersion> {
    let name = versioned_name(base_name, version);
    let params = VectorParams { size: vector_size, distance };

    self
      .store
      .create_collection(&name, &params)
      .await
      .map_err(box_store)?;
    self.repoint(base_name, &name).await?;

    tracing::info!(collection = %name, alias = %base_name, "created versioned collection");
    Ok(CollectionVersion {
      base_name:      base_name.to_owned(),
      version:        version.to_owned(),
      versioned_name: name,
      vector_size,
      distance,
    })
  }

  /// Repoint the alias at an existing version — the rollback primitive.
  ///
  /// Verifies the target collection exists first; if it does not, fails
  /// with [`Error::VersionNotFound`] without touching the current alias.
  pub async fn switch_alias(
    &self,
    base_name: &str,
    target_version: &str,
  ) -> Result<String> {
    let name = versioned_name(base_name, target_version);

    let existing = self.store.list_collections().await.map_err(box_store)?;
    if !existing.iter().any(|c| c == &name) {
      return Err(Error::VersionNotFound {
        base_name: base_name.to_owned(),
        version:   target_version.to_owned(),
      });
    }

    self.repoint(base_name, &name).await?;
    tracing::info!(alias = %base_name, collection = %name, "alias switched");
    Ok(name)
  }

  /// All versions in `base_name`'s family, sorted ascending with numeric
  /// component ordering (`2.0.0` before `10.0.0`).
  pub async fn list_versions(&self, base_name: &str) -> Result<Vec<String>> {
    let collections =
      self.store.list_collections().await.map_err(box_store)?;

    let mut versions: Vec<String> = collections
      .iter()
      .filter_map(|name| version_from_name(base_name, name))
      .collect();
    versions.sort_by(|a, b| compare_versions(a, b));
    Ok(versions)
  }

  /// The version the alias currently resolves to, or `None` when no alias
  /// or collection exists for this base name.
  pub async fn get_current_version(
    &self,
    base_name: &str,
  ) -> Result<Option<String>> {
    let info =
      self.store.get_collection(base_name).await.map_err(box_store)?;
    Ok(info.and_then(|i| version_from_name(base_name, &i.name)))
  }

  async fn repoint(&self, alias: &str, collection: &str) -> Result<()> {
    self.store.delete_alias(alias).await.map_err(box_store)?;
    self
      .store
      .create_alias(collection, alias)
      .await
      .map_err(box_store)?;
    Ok(())
  }
}

fn box_store<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
