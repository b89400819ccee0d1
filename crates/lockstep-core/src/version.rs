//! Version-marker extraction and content checksums for schema sources.
//!
//! A schema script declares its own version in a comment line:
//! `-- THIS VERSION: 2.0.0`. The marker is matched case-insensitively with
//! arbitrary surrounding whitespace; the token is taken verbatim, with no
//! semantic-version validation. Checksums are SHA-256 over the exact source
//! bytes and exist to detect silent drift, not as a security boundary.

use sha2::{Digest, Sha256};

use crate::{Error, Result};

// ─── SchemaDefinition ────────────────────────────────────────────────────────

/// A schema source together with its extracted version and checksum.
///
/// Built transiently each time a schema script is loaded; never persisted —
/// only the version and checksum make it into the ledger.
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
  pub source_text: String,
  pub version:     String,
  pub checksum:    String,
}

impl SchemaDefinition {
  /// Parse a schema source: extract its version marker and compute the
  /// checksum of the full text. Fails with [`Error::MissingVersion`] if no
  /// marker line is present.
  pub fn parse(source_text: impl Into<String>) -> Result<Self> {
    let source_text = source_text.into();
    let version = extract_version(&source_text)?;
    let checksum = compute_checksum(&source_text);
    Ok(Self { source_text, version, checksum })
  }
}

// ─── Marker extraction ───────────────────────────────────────────────────────

/// Scan `text` for a version marker line and return its token verbatim.
/// The first matching line wins.
pub fn extract_version(text: &str) -> Result<String> {
  text
    .lines()
    .find_map(marker_token)
    .map(str::to_owned)
    .ok_or(Error::MissingVersion)
}

/// Match `THIS VERSION: <token>` within one line, case-insensitively and
/// tolerating whitespace runs between the words and around the colon.
///
/// `to_ascii_uppercase` maps bytes one-to-one, so offsets into the uppercased
/// copy are valid into the original line.
fn marker_token(line: &str) -> Option<&str> {
  let upper = line.to_ascii_uppercase();
  let bytes = upper.as_bytes();

  for (start, _) in upper.match_indices("THIS") {
    let mut idx = start + "THIS".len();

    let ws_start = idx;
    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
      idx += 1;
    }
    if idx == ws_start || !upper[idx..].starts_with("VERSION") {
      continue;
    }
    idx += "VERSION".len();

    while idx < bytes.len() && bytes[idx].is_ascii_whitespace() {
      idx += 1;
    }
    if bytes.get(idx) != Some(&b':') {
      continue;
    }
    idx += 1;

    if let Some(token) = line[idx..].split_whitespace().next() {
      return Some(token);
    }
  }
  None
}

// ─── Checksum ────────────────────────────────────────────────────────────────

/// SHA-256 hex digest of the exact source bytes.
///
/// Deterministic: identical input always yields an identical digest; any
/// single-byte change yields a different one.
pub fn compute_checksum(text: &str) -> String {
  let mut hasher = Sha256::new();
  hasher.update(text.as_bytes());
  hex::encode(hasher.finalize())
}
