//! Runtime configuration, deserialised from `lockstep.toml` with
//! `LOCKSTEP_*` environment variable overrides.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use lockstep_core::collection::DistanceMetric;
use serde::Deserialize;

#[derive(Deserialize, Clone)]
pub struct Settings {
  /// Path to the versioned schema script (must carry a
  /// `THIS VERSION: <token>` marker line).
  pub schema_path: PathBuf,

  /// SQLite database file holding the application schema and the ledger.
  pub store_path: PathBuf,

  /// Base URL of the vector store, e.g. `http://localhost:6333`.
  pub vector_url: String,

  #[serde(default)]
  pub vector_api_key: Option<String>,

  /// Base name of the collection family; doubles as the alias name.
  pub collection: String,

  pub vector_size: u64,
  pub distance:    DistanceMetric,
}

pub fn load(path: &Path) -> anyhow::Result<Settings> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("LOCKSTEP"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise Settings")
}
