//! [`SchemaApplier`] — load → extract → compare → apply/skip → record.
//!
//! The apply transaction is opened immediate (write-locking), which
//! serialises concurrent appliers against the same database file; no
//! cross-database lock is provided.

use std::{sync::Arc, time::Instant};

use chrono::Utc;
use rusqlite::TransactionBehavior;

use lockstep_core::{
  outcome::ApplyOutcome,
  record::{NewVersionRecord, RecordStatus},
  version::SchemaDefinition,
};

use crate::{
  encode::encode_dt,
  ledger::{upsert_record, SchemaLedger},
  schema::LEDGER_SCHEMA,
  Result,
};

/// Executes a schema script against a connection. Injectable so tests can
/// count or fail executions; defaults to [`rusqlite::Connection::execute_batch`].
pub type ExecHook =
  Arc<dyn Fn(&rusqlite::Connection, &str) -> rusqlite::Result<()> + Send + Sync>;

// ─── Applier ─────────────────────────────────────────────────────────────────

/// Applies versioned schema scripts, recording every outcome in the ledger.
pub struct SchemaApplier {
  ledger:     SchemaLedger,
  applied_by: String,
  exec:       ExecHook,
}

impl SchemaApplier {
  pub fn new(ledger: SchemaLedger) -> Self {
    Self {
      ledger,
      applied_by: default_applied_by(),
      exec: Arc::new(|conn, sql| conn.execute_batch(sql)),
    }
  }

  /// Override the `applied_by` attribution recorded on ledger rows.
  pub fn with_applied_by(mut self, applied_by: impl Into<String>) -> Self {
    self.applied_by = applied_by.into();
    self
  }

  /// Replace the execution hook.
  pub fn with_exec_hook(mut self, exec: ExecHook) -> Self {
    self.exec = exec;
    self
  }

  /// Apply a schema source to the store.
  ///
  /// Decision against the latest successful ledger record:
  /// - no prior record → apply;
  /// - same version, same checksum → skip (zero DDL, zero writes);
  /// - same version, different checksum → re-apply with a drift warning;
  /// - different version → apply. Forward and backward moves are both
  ///   allowed here; downgrade policy belongs to the caller.
  ///
  /// A missing version marker fails fast before any DDL or ledger write.
  /// A DDL failure rolls back and returns [`ApplyOutcome::Failed`], after a
  /// best-effort attempt to record a failed row.
  pub async fn apply(
    &self,
    source_text: &str,
    description: Option<String>,
  ) -> Result<ApplyOutcome> {
    let def = SchemaDefinition::parse(source_text)?;

    match self.ledger.latest(RecordStatus::Success).await? {
      Some(prior)
        if prior.version == def.version && prior.checksum == def.checksum =>
      {
        tracing::info!(version = %def.version, "schema already current, skipping");
        return Ok(ApplyOutcome::Skipped { version: def.version });
      }
      Some(prior) if prior.version == def.version => {
        tracing::warn!(
          version = %def.version,
          prior_checksum = %prior.checksum,
          new_checksum = %def.checksum,
          "schema drift: version unchanged but content differs, re-applying"
        );
      }
      Some(prior) => {
        tracing::info!(from = %prior.version, to = %def.version, "schema version change");
      }
      None => {
        tracing::info!(version = %def.version, "no prior schema version, applying");
      }
    }

    self.execute(def, description).await
  }

  /// Run the DDL and upsert the success row in one immediate transaction;
  /// both commit together.
  async fn execute(
    &self,
    def: SchemaDefinition,
    description: Option<String>,
  ) -> Result<ApplyOutcome> {
    let exec = Arc::clone(&self.exec);
    let sql = def.source_text.clone();
    let rec = NewVersionRecord {
      version:           def.version.clone(),
      checksum:          def.checksum.clone(),
      status:            RecordStatus::Success,
      execution_time_ms: 0,
      applied_by:        self.applied_by.clone(),
      description,
    };

    let result = self
      .ledger
      .connection()
      .call(move |conn| {
        let tx =
          conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let started = Instant::now();
        exec(&tx, &sql)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        tx.execute_batch(LEDGER_SCHEMA)?;
        let rec = NewVersionRecord { execution_time_ms: elapsed_ms, ..rec };
        upsert_record(&tx, &rec, &encode_dt(Utc::now()))?;

        tx.commit()?;
        Ok(elapsed_ms)
      })
      .await;

    match result {
      Ok(elapsed_ms) => {
        tracing::info!(version = %def.version, elapsed_ms, "schema applied");
        Ok(ApplyOutcome::Applied {
          version:           def.version,
          execution_time_ms: elapsed_ms,
        })
      }
      Err(e) => {
        let reason = e.to_string();
        tracing::error!(version = %def.version, error = %reason, "schema apply failed, rolled back");

        // Best-effort failure record in a fresh transaction. If this write
        // also fails, log and move on rather than masking the original
        // failure.
        let failed = NewVersionRecord {
          version:           def.version.clone(),
          checksum:          def.checksum,
          status:            RecordStatus::Failed,
          execution_time_ms: 0,
          applied_by:        self.applied_by.clone(),
          description:       Some(reason.clone()),
        };
        if let Err(record_err) = self.ledger.record(failed).await {
          tracing::warn!(error = %record_err, "could not record failure row");
        }

        Ok(ApplyOutcome::Failed { version: def.version, reason })
      }
    }
  }
}

fn default_applied_by() -> String {
  std::env::var("USER").unwrap_or_else(|_| "unknown".to_owned())
}
