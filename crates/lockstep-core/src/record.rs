//! Ledger record types — one row per schema version ever applied.
//!
//! Rows are upserted by version key: re-applying a version updates its row
//! in place, it never duplicates. The "current" schema version is defined as
//! the most recent row with [`RecordStatus::Success`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome recorded on a ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
  Success,
  Failed,
}

impl RecordStatus {
  /// The string stored in the `status` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Success => "success",
      Self::Failed => "failed",
    }
  }
}

/// One row of the schema version ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaVersionRecord {
  pub version:           String,
  pub checksum:          String,
  pub applied_at:        DateTime<Utc>,
  pub applied_by:        String,
  pub execution_time_ms: u64,
  pub status:            RecordStatus,
  pub description:       Option<String>,
}

/// Input to a ledger write. `applied_at` is always set by the ledger; it is
/// not accepted from callers.
#[derive(Debug, Clone)]
pub struct NewVersionRecord {
  pub version:           String,
  pub checksum:          String,
  pub status:            RecordStatus,
  pub execution_time_ms: u64,
  pub applied_by:        String,
  pub description:       Option<String>,
}
