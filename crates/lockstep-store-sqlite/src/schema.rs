//! DDL for the schema version ledger.
//!
//! Idempotent thanks to `CREATE TABLE IF NOT EXISTS`: writes issue it before
//! touching the table, so the first successful apply bootstraps the ledger
//! atomically with its own row. Reads never create anything — a missing
//! table is the expected first-run state and reads report it as empty.

/// Ledger DDL; one row per distinct schema version ever applied.
pub const LEDGER_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS schema_versions (
    version           TEXT PRIMARY KEY,
    checksum          TEXT NOT NULL,    -- SHA-256 hex of the applied source
    applied_at        TEXT NOT NULL,    -- ISO 8601 UTC
    applied_by        TEXT NOT NULL,
    execution_time_ms INTEGER NOT NULL,
    status            TEXT NOT NULL,    -- 'success' | 'failed'
    description       TEXT
);
";
