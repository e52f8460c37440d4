//! JSON snapshots of a collection.
//!
//! A snapshot is `{"records": [...]}` with every [`ProfileRecord`] in its
//! serde form. The CLI keeps its collection in one snapshot between runs.
//!
//! [`ProfileRecord`]: crate::models::ProfileRecord

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use crate::collection::ProfileCollection;

/// Serialize a collection as pretty JSON.
pub fn to_json(collection: &ProfileCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Write a snapshot.
///
/// If `output` is `Some`, writes to that file path, creating parent
/// directories. Otherwise writes to stdout for piping.
pub fn write_snapshot(collection: &ProfileCollection, output: Option<&Path>) -> Result<()> {
    let json = to_json(collection)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create directory: {}", parent.display())
                    })?;
                }
            }
            std::fs::write(path, &json)
                .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
            info!(
                records = collection.len(),
                path = %path.display(),
                "snapshot written"
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Read a snapshot written by [`write_snapshot`].
pub fn load_snapshot(path: &Path) -> Result<ProfileCollection> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    let collection: ProfileCollection = serde_json::from_str(&content)
        .with_context(|| format!("Invalid snapshot: {}", path.display()))?;
    Ok(collection)
}

/// Like [`load_snapshot`], but a missing file is an empty collection.
pub fn load_or_empty(path: &Path) -> Result<ProfileCollection> {
    if !path.exists() {
        warn!(path = %path.display(), "no snapshot found; run `floatchat ingest` first");
        return Ok(ProfileCollection::new());
    }
    load_snapshot(path)
}
