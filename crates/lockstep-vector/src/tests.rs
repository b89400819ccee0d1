//! Integration tests for `CollectionManager` against an in-memory store.

use std::{
  collections::BTreeMap,
  convert::Infallible,
  sync::{Arc, Mutex},
};

use lockstep_core::{
  collection::{CollectionInfo, DistanceMetric, VectorParams},
  store::VectorStore,
};

use crate::{CollectionManager, Error};

// ─── In-memory fake ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Inner {
  collections: BTreeMap<String, VectorParams>,
  aliases:     BTreeMap<String, String>, // alias → physical collection
}

/// A `VectorStore` holding collections and aliases in maps. Mirrors the
/// contract the HTTP backend implements, including alias resolution in
/// `get_collection`.
#[derive(Clone, Default)]
struct MemoryVectorStore {
  inner: Arc<Mutex<Inner>>,
}

impl MemoryVectorStore {
  fn alias_target(&self, alias: &str) -> Option<String> {
    self.inner.lock().unwrap().aliases.get(alias).cloned()
  }
}

impl VectorStore for MemoryVectorStore {
  type Error = Infallible;

  async fn create_collection(
    &self,
    name: &str,
    params: &VectorParams,
  ) -> Result<(), Infallible> {
    self
      .inner
      .lock()
      .unwrap()
      .collections
      .insert(name.to_owned(), *params);
    Ok(())
  }

  async fn list_collections(&self) -> Result<Vec<String>, Infallible> {
    Ok(self.inner.lock().unwrap().collections.keys().cloned().collect())
  }

  async fn get_collection(
    &self,
    name_or_alias: &str,
  ) -> Result<Option<CollectionInfo>, Infallible> {
    let inner = self.inner.lock().unwrap();

    if let Some(params) = inner.collections.get(name_or_alias) {
      return Ok(Some(CollectionInfo {
        name:    name_or_alias.to_owned(),
        vectors: Some(*params),
      }));
    }
    if let Some(target) = inner.aliases.get(name_or_alias) {
      return Ok(inner.collections.get(target).map(|params| CollectionInfo {
        name:    target.clone(),
        vectors: Some(*params),
      }));
    }
    Ok(None)
  }

  async fn create_alias(
    &self,
    collection: &str,
    alias: &str,
  ) -> Result<(), Infallible> {
    self
      .inner
      .lock()
      .unwrap()
      .aliases
      .insert(alias.to_owned(), collection.to_owned());
    Ok(())
  }

  async fn delete_alias(&self, alias: &str) -> Result<(), Infallible> {
    self.inner.lock().unwrap().aliases.remove(alias);
    Ok(())
  }
}

fn manager() -> (CollectionManager<MemoryVectorStore>, MemoryVectorStore) {
  let store = MemoryVectorStore::default();
  (CollectionManager::new(store.clone()), store)
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_with_version_creates_and_aliases() {
  let (m, store) = manager();

  let created = m
    .create_with_version("docs", 1024, "1.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();

  assert_eq!(created.versioned_name, "docs_v1_0_0");
  assert_eq!(created.vector_size, 1024);
  assert_eq!(store.alias_target("docs").as_deref(), Some("docs_v1_0_0"));
  assert_eq!(
    m.get_current_version("docs").await.unwrap().as_deref(),
    Some("1.0.0")
  );
}

#[tokio::test]
async fn new_version_repoints_alias_and_keeps_old_collection() {
  let (m, store) = manager();

  m.create_with_version("docs", 1024, "1.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();
  m.create_with_version("docs", 1024, "2.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();

  assert_eq!(store.alias_target("docs").as_deref(), Some("docs_v2_0_0"));
  // Old versions are immutable and stay available for rollback.
  let collections = store.list_collections().await.unwrap();
  assert!(collections.contains(&"docs_v1_0_0".to_owned()));
  assert!(collections.contains(&"docs_v2_0_0".to_owned()));
}

#[tokio::test]
async fn get_current_version_none_when_unversioned() {
  let (m, _store) = manager();
  assert_eq!(m.get_current_version("docs").await.unwrap(), None);
}

// ─── Rollback ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn switch_alias_rolls_back_to_older_version() {
  let (m, store) = manager();

  m.create_with_version("docs", 1024, "1.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();
  m.create_with_version("docs", 1024, "2.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();

  let name = m.switch_alias("docs", "1.0.0").await.unwrap();
  assert_eq!(name, "docs_v1_0_0");
  assert_eq!(store.alias_target("docs").as_deref(), Some("docs_v1_0_0"));
  assert_eq!(
    m.get_current_version("docs").await.unwrap().as_deref(),
    Some("1.0.0")
  );
}

#[tokio::test]
async fn switch_alias_to_missing_version_is_non_destructive() {
  let (m, store) = manager();

  m.create_with_version("docs", 1024, "1.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();
  m.create_with_version("docs", 1024, "2.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();

  let err = m.switch_alias("docs", "9.9.9").await.unwrap_err();
  assert!(matches!(
    err,
    Error::VersionNotFound { ref base_name, ref version }
      if base_name == "docs" && version == "9.9.9"
  ));

  // The failed switch must not touch the existing alias.
  assert_eq!(store.alias_target("docs").as_deref(), Some("docs_v2_0_0"));
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_versions_sorts_numerically() {
  let (m, _store) = manager();

  for v in ["2.0.0", "10.0.0", "1.0.0"] {
    m.create_with_version("docs", 1024, v, DistanceMetric::Cosine)
      .await
      .unwrap();
  }

  let versions = m.list_versions("docs").await.unwrap();
  assert_eq!(versions, ["1.0.0", "2.0.0", "10.0.0"]);
}

#[tokio::test]
async fn list_versions_ignores_other_families() {
  let (m, _store) = manager();

  m.create_with_version("docs", 1024, "1.0.0", DistanceMetric::Cosine)
    .await
    .unwrap();
  m.create_with_version("chunks", 768, "3.0.0", DistanceMetric::Dot)
    .await
    .unwrap();

  assert_eq!(m.list_versions("docs").await.unwrap(), ["1.0.0"]);
  assert_eq!(m.list_versions("chunks").await.unwrap(), ["3.0.0"]);
}

#[tokio::test]
async fn list_versions_empty_for_unknown_base() {
  let (m, _store) = manager();
  assert!(m.list_versions("docs").await.unwrap().is_empty());
}
