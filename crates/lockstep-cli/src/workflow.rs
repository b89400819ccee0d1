//! The migration workflow: schema applier first, then the collection
//! manager, with an operator-facing report.
//!
//! The vector store is only touched after the schema side succeeded or
//! skipped — the alias is never cut over on top of a failed schema apply.

use anyhow::Context as _;
use lockstep_core::outcome::ApplyOutcome;
use lockstep_store_sqlite::{SchemaApplier, SchemaLedger};
use lockstep_vector::{CollectionManager, HttpVectorStore};
use uuid::Uuid;

use crate::config::Settings;

// ─── Report ──────────────────────────────────────────────────────────────────

/// What happened on the vector-store side of a run.
pub enum CollectionOutcome {
  /// First deploy of this version: collection created and alias pointed.
  Created { versioned_name: String },
  /// Collection already existed; the alias was repointed to it.
  Switched { versioned_name: String },
  /// The alias already resolves to this version.
  UpToDate { version: String },
  /// Not attempted because the schema apply failed.
  SkippedAfterFailure,
}

pub struct MigrationReport {
  pub run_id:     Uuid,
  pub schema:     ApplyOutcome,
  pub collection: CollectionOutcome,
}

pub fn print_report(report: &MigrationReport) {
  println!("migration run {}", report.run_id);

  match &report.schema {
    ApplyOutcome::Applied { version, execution_time_ms } => {
      println!("  schema:     applied {version} in {execution_time_ms} ms");
    }
    ApplyOutcome::Skipped { version } => {
      println!("  schema:     {version} already current (skipped)");
    }
    ApplyOutcome::Failed { version, reason } => {
      println!("  schema:     FAILED at {version}: {reason}");
    }
  }

  match &report.collection {
    CollectionOutcome::Created { versioned_name } => {
      println!("  collection: created {versioned_name} and pointed alias at it");
    }
    CollectionOutcome::Switched { versioned_name } => {
      println!("  collection: alias switched to {versioned_name}");
    }
    CollectionOutcome::UpToDate { version } => {
      println!("  collection: already at {version}");
    }
    CollectionOutcome::SkippedAfterFailure => {
      println!("  collection: skipped (schema apply failed)");
    }
  }
}

// ─── Workflow ────────────────────────────────────────────────────────────────

pub async fn run_migration(
  settings: &Settings,
) -> anyhow::Result<MigrationReport> {
  let run_id = Uuid::new_v4();
  tracing::info!(%run_id, "starting migration run");

  let source =
    std::fs::read_to_string(&settings.schema_path).with_context(|| {
      format!("reading schema {}", settings.schema_path.display())
    })?;

  let ledger =
    SchemaLedger::open(&settings.store_path).await.with_context(|| {
      format!("opening store at {}", settings.store_path.display())
    })?;
  let applier = SchemaApplier::new(ledger);

  let schema =
    applier.apply(&source, None).await.context("applying schema")?;

  let collection = if schema.is_success() {
    let manager = vector_manager(settings)?;
    align_collection(&manager, settings, schema.version()).await?
  } else {
    CollectionOutcome::SkippedAfterFailure
  };

  Ok(MigrationReport { run_id, schema, collection })
}

pub fn vector_manager(
  settings: &Settings,
) -> anyhow::Result<CollectionManager<HttpVectorStore>> {
  let store = HttpVectorStore::new(
    settings.vector_url.clone(),
    settings.vector_api_key.clone(),
  )?;
  Ok(CollectionManager::new(store))
}

/// Bring the collection family to `version`: create it on first deploy,
/// switch the alias when the collection already exists, do nothing when
/// the alias is already current.
async fn align_collection(
  manager: &CollectionManager<HttpVectorStore>,
  settings: &Settings,
  version: &str,
) -> anyhow::Result<CollectionOutcome> {
  let current = manager.get_current_version(&settings.collection).await?;
  if current.as_deref() == Some(version) {
    return Ok(CollectionOutcome::UpToDate { version: version.to_owned() });
  }

  let known = manager.list_versions(&settings.collection).await?;
  if known.iter().any(|v| v == version) {
    let versioned_name =
      manager.switch_alias(&settings.collection, version).await?;
    Ok(CollectionOutcome::Switched { versioned_name })
  } else {
    let created = manager
      .create_with_version(
        &settings.collection,
        settings.vector_size,
        version,
        settings.distance,
      )
      .await?;
    Ok(CollectionOutcome::Created { versioned_name: created.versioned_name })
  }
}
