//! `lockstep` — keeps a relational schema store and a vector collection
//! store at a known, consistent version across deployments.
//!
//! # Usage
//!
//! ```
//! lockstep migrate
//! lockstep status
//! lockstep history --limit 10
//! lockstep rollback 1.0.0
//! ```
//!
//! Reads `lockstep.toml` (or the path given with `--config`), overridable
//! with `LOCKSTEP_*` environment variables.

mod config;
mod workflow;

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lockstep_core::record::RecordStatus;
use lockstep_store_sqlite::SchemaLedger;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about = "Schema and collection version migrations")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "lockstep.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Apply the schema script, then align the vector collection and alias.
  Migrate,
  /// Report the current version of each store.
  Status,
  /// Show the schema version ledger, most recent first.
  History {
    #[arg(long, default_value_t = 20)]
    limit: usize,
  },
  /// List collection versions for the configured base name.
  Versions,
  /// Repoint the collection alias at an existing version.
  Rollback { version: String },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = config::load(&cli.config)?;

  match cli.command {
    Command::Migrate => {
      let report = workflow::run_migration(&settings).await?;
      workflow::print_report(&report);
      if report.schema.is_success() {
        Ok(ExitCode::SUCCESS)
      } else {
        Ok(ExitCode::FAILURE)
      }
    }

    Command::Status => {
      let ledger = SchemaLedger::open(&settings.store_path)
        .await
        .context("opening store")?;
      match ledger.latest(RecordStatus::Success).await? {
        Some(rec) => println!(
          "schema:     {} (applied {} by {})",
          rec.version, rec.applied_at, rec.applied_by
        ),
        None => println!("schema:     no version applied"),
      }

      let manager = workflow::vector_manager(&settings)?;
      match manager.get_current_version(&settings.collection).await? {
        Some(version) => {
          println!("collection: {} at {}", settings.collection, version);
        }
        None => println!("collection: {} unversioned", settings.collection),
      }
      Ok(ExitCode::SUCCESS)
    }

    Command::History { limit } => {
      let ledger = SchemaLedger::open(&settings.store_path)
        .await
        .context("opening store")?;
      let rows = ledger.history(limit).await?;
      if rows.is_empty() {
        println!("ledger is empty");
      }
      for rec in rows {
        println!(
          "{:<12} {:<8} {}  {}  {} ms",
          rec.version,
          rec.status.as_str(),
          rec.applied_at,
          rec.applied_by,
          rec.execution_time_ms,
        );
      }
      Ok(ExitCode::SUCCESS)
    }

    Command::Versions => {
      let manager = workflow::vector_manager(&settings)?;
      let current =
        manager.get_current_version(&settings.collection).await?;
      for version in manager.list_versions(&settings.collection).await? {
        let marker =
          if current.as_deref() == Some(&*version) { " (current)" } else { "" };
        println!("{version}{marker}");
      }
      Ok(ExitCode::SUCCESS)
    }

    Command::Rollback { version } => {
      let manager = workflow::vector_manager(&settings)?;
      let versioned_name =
        manager.switch_alias(&settings.collection, &version).await?;
      println!(
        "alias {} now points at {versioned_name}",
        settings.collection
      );
      Ok(ExitCode::SUCCESS)
    }
  }
}
