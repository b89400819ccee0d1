//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; statuses as the lowercase
//! strings from [`RecordStatus::as_str`].

use chrono::{DateTime, Utc};
use lockstep_core::record::{RecordStatus, SchemaVersionRecord};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_status(s: &str) -> Result<RecordStatus> {
  match s {
    "success" => Ok(RecordStatus::Success),
    "failed" => Ok(RecordStatus::Failed),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

/// Raw strings read directly from a `schema_versions` row.
pub struct RawRecord {
  pub version:           String,
  pub checksum:          String,
  pub applied_at:        String,
  pub applied_by:        String,
  pub execution_time_ms: i64,
  pub status:            String,
  pub description:       Option<String>,
}

impl RawRecord {
  pub fn into_record(self) -> Result<SchemaVersionRecord> {
    Ok(SchemaVersionRecord {
      version:           self.version,
      checksum:          self.checksum,
      applied_at:        decode_dt(&self.applied_at)?,
      applied_by:        self.applied_by,
      execution_time_ms: self.execution_time_ms.max(0) as u64,
      status:            decode_status(&self.status)?,
      description:       self.description,
    })
  }
}
