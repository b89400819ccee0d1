//! Versioned-collection types and the naming transform.
//!
//! A base name like `docs` owns a family of immutable physical collections
//! (`docs_v1_0_0`, `docs_v2_0_0`, …) plus one stable alias named `docs` that
//! always resolves to exactly one of them. New versions are new collections;
//! nothing is mutated after creation.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

// ─── Vector parameters ───────────────────────────────────────────────────────

/// Distance metric for a vector collection, using the store's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
  Cosine,
  Euclid,
  Dot,
}

/// Vector parameters a collection is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorParams {
  pub size:     u64,
  pub distance: DistanceMetric,
}

/// What the store reports about a collection. When looked up through an
/// alias, `name` is the resolved physical collection name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
  pub name:    String,
  #[serde(default)]
  pub vectors: Option<VectorParams>,
}

/// A versioned physical collection, never mutated once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionVersion {
  pub base_name:      String,
  pub version:        String,
  pub versioned_name: String,
  pub vector_size:    u64,
  pub distance:       DistanceMetric,
}

// ─── Naming transform ────────────────────────────────────────────────────────

/// Derive the physical collection name for `base` at `version`:
/// `{base}_v{version}` with `.` replaced by `_`.
pub fn versioned_name(base: &str, version: &str) -> String {
  format!("{base}_v{}", version.replace('.', "_"))
}

/// Invert [`versioned_name`]: recover the version string from a physical
/// collection name. Returns `None` for names not in `base`'s family.
pub fn version_from_name(base: &str, name: &str) -> Option<String> {
  let prefix = format!("{base}_v");
  name
    .strip_prefix(&prefix)
    .filter(|rest| !rest.is_empty())
    .map(|rest| rest.replace('_', "."))
}

// ─── Version ordering ────────────────────────────────────────────────────────

/// Order version strings component-wise: split on `.`, compare components
/// numerically where both parse as integers, as strings otherwise. A version
/// with more components orders after its prefix (`1.0` < `1.0.0`).
///
/// This sorts `10.0.0` after `2.0.0`, which plain lexicographic comparison
/// of the underscore-joined names does not.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
  let xs: Vec<&str> = a.split('.').collect();
  let ys: Vec<&str> = b.split('.').collect();

  for i in 0..xs.len().max(ys.len()) {
    let ord = match (xs.get(i), ys.get(i)) {
      (Some(x), Some(y)) => match (x.parse::<u64>(), y.parse::<u64>()) {
        (Ok(nx), Ok(ny)) => nx.cmp(&ny),
        _ => x.cmp(y),
      },
      (Some(_), None) => Ordering::Greater,
      (None, Some(_)) => Ordering::Less,
      (None, None) => break,
    };
    if ord != Ordering::Equal {
      return ord;
    }
  }
  Ordering::Equal
}
