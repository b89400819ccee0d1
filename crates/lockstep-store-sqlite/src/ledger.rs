//! [`SchemaLedger`] — persistence over the `schema_versions` table.

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use lockstep_core::record::{NewVersionRecord, RecordStatus, SchemaVersionRecord};

use crate::{
  encode::{RawRecord, encode_dt},
  schema::LEDGER_SCHEMA,
  Error, Result,
};

/// History rows are clamped to this window regardless of the caller's limit.
const HISTORY_LIMIT_MAX: usize = 100;

// ─── Ledger ──────────────────────────────────────────────────────────────────

/// The version-history ledger backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted and shared
/// with the applier, which needs the same connection for its transactional
/// apply.
#[derive(Clone)]
pub struct SchemaLedger {
  conn: tokio_rusqlite::Connection,
}

impl SchemaLedger {
  /// Open (or create) the database file at `path`. The ledger table itself
  /// is not created here; writes bootstrap it on demand.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Ok(Self { conn })
  }

  /// Open an in-memory ledger — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Ok(Self { conn })
  }

  pub(crate) fn connection(&self) -> &tokio_rusqlite::Connection {
    &self.conn
  }

  /// The most recent record with the given status, or `None`.
  ///
  /// A missing ledger table is the expected state on first run and is
  /// reported as `None`, not as an error.
  pub async fn latest(
    &self,
    status: RecordStatus,
  ) -> Result<Option<SchemaVersionRecord>> {
    let status_str = status.as_str();

    let raw: Option<RawRecord> = match self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT version, checksum, applied_at, applied_by,
                      execution_time_ms, status, description
               FROM schema_versions
               WHERE status = ?1
               ORDER BY applied_at DESC, rowid DESC
               LIMIT 1",
              rusqlite::params![status_str],
              read_raw,
            )
            .optional()?,
        )
      })
      .await
    {
      Ok(raw) => raw,
      Err(e) if is_missing_table(&e) => None,
      Err(e) => return Err(Error::Database(e)),
    };

    raw.map(RawRecord::into_record).transpose()
  }

  /// Upsert a record keyed by version. On conflict the existing row's
  /// `applied_at`, `checksum`, `execution_time_ms`, `status`, and
  /// `description` are updated in place — one row per distinct version,
  /// never duplicated. Creates the ledger table if missing.
  pub async fn record(&self, rec: NewVersionRecord) -> Result<()> {
    let applied_at = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute_batch(LEDGER_SCHEMA)?;
        upsert_record(conn, &rec, &applied_at)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Most-recent-first history. `limit` is clamped to `[1, 100]` before
  /// querying. Empty when the ledger table does not exist yet.
  pub async fn history(&self, limit: usize) -> Result<Vec<SchemaVersionRecord>> {
    let limit = limit.clamp(1, HISTORY_LIMIT_MAX) as i64;

    let raws: Vec<RawRecord> = match self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT version, checksum, applied_at, applied_by,
                  execution_time_ms, status, description
           FROM schema_versions
           ORDER BY applied_at DESC, rowid DESC
           LIMIT ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit], read_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await
    {
      Ok(raws) => raws,
      Err(e) if is_missing_table(&e) => Vec::new(),
      Err(e) => return Err(Error::Database(e)),
    };

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn read_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
  Ok(RawRecord {
    version:           row.get(0)?,
    checksum:          row.get(1)?,
    applied_at:        row.get(2)?,
    applied_by:        row.get(3)?,
    execution_time_ms: row.get(4)?,
    status:            row.get(5)?,
    description:       row.get(6)?,
  })
}

/// Upsert one row. Shared with the applier, which runs this inside the same
/// transaction as the DDL it records.
pub(crate) fn upsert_record(
  conn: &rusqlite::Connection,
  rec: &NewVersionRecord,
  applied_at: &str,
) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO schema_versions
       (version, checksum, applied_at, applied_by,
        execution_time_ms, status, description)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT(version) DO UPDATE SET
       checksum          = excluded.checksum,
       applied_at        = excluded.applied_at,
       applied_by        = excluded.applied_by,
       execution_time_ms = excluded.execution_time_ms,
       status            = excluded.status,
       description       = excluded.description",
    rusqlite::params![
      rec.version,
      rec.checksum,
      applied_at,
      rec.applied_by,
      rec.execution_time_ms as i64,
      rec.status.as_str(),
      rec.description,
    ],
  )?;
  Ok(())
}

/// `true` when the error is SQLite complaining that the ledger table does
/// not exist yet.
fn is_missing_table(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(_, Some(msg)))
      if msg.contains("no such table: schema_versions")
  )
}
