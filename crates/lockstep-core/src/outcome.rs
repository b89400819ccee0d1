//! The tagged result of a schema apply.
//!
//! Expected outcomes — applied, skipped, failed-and-rolled-back — are values
//! returned to the caller. Thrown errors are reserved for unrecoverable
//! conditions: a missing version marker, or the ledger itself being
//! inaccessible.

/// What a single apply run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
  /// The DDL ran and the success ledger row was committed with it, in the
  /// same transaction.
  Applied {
    version:           String,
    execution_time_ms: u64,
  },

  /// Prior success row has the same version and checksum — the idempotent
  /// fast path. Zero DDL executed, zero writes performed.
  Skipped { version: String },

  /// The DDL failed and was rolled back. A failed ledger row was recorded
  /// best-effort in a separate transaction; if that write also failed it was
  /// logged and swallowed rather than masking `reason`.
  Failed { version: String, reason: String },
}

impl ApplyOutcome {
  /// The schema version this outcome refers to.
  pub fn version(&self) -> &str {
    match self {
      Self::Applied { version, .. }
      | Self::Skipped { version }
      | Self::Failed { version, .. } => version,
    }
  }

  /// `true` for `Applied` and `Skipped` — the store is in the desired state.
  pub fn is_success(&self) -> bool {
    !matches!(self, Self::Failed { .. })
  }
}
