//! Single-file inspection.
//!
//! Extracts one file without touching the snapshot and reports what was
//! found. Used by `floatchat inspect` to check how a file will be read
//! before ingesting it.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::config::Config;
use crate::context;
use crate::extract::{self, Extraction};
use crate::ingest;
use crate::models::ProfileRecord;

/// Inspection result, printed as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub file: String,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ProfileRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_line: Option<String>,
}

/// Extract `path` with the configured options.
pub fn inspect_file(config: &Config, path: &Path) -> Result<InspectReport> {
    let hash = ingest::hash_file(path)?;
    let extraction = extract::extract_path(path, &config.extract_options(Some(hash)))?;

    let file = path.display().to_string();
    Ok(match extraction {
        Extraction::Record(record) => InspectReport {
            file,
            outcome: "record",
            context_line: Some(context::context_line(&record)),
            record: Some(record),
        },
        Extraction::NoUsableData => InspectReport {
            file,
            outcome: "no_usable_data",
            record: None,
            context_line: None,
        },
    })
}

pub fn run_inspect(config: &Config, path: &Path) -> Result<()> {
    let report = inspect_file(config, path)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
