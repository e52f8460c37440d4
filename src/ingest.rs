//! Batch ingestion.
//!
//! Expands the given paths into a file list (directories are walked and
//! filtered through the include/exclude globs), extracts every file
//! independently, and gathers the outcomes into an [`IngestReport`]. One
//! bad file never stops the batch.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::collection::ProfileCollection;
use crate::config::{Config, IngestConfig};
use crate::export;
use crate::extract::{self, Extraction};
use crate::models::ProfileRecord;

/// A file that could not be ingested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestFailure {
    pub file: String,
    pub reason: String,
}

/// Per-file outcomes of one batch.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub records: Vec<ProfileRecord>,
    pub failures: Vec<IngestFailure>,
    /// Files that parsed but held no usable coordinates or parameters.
    pub skipped_empty: Vec<String>,
}

impl IngestReport {
    pub fn files_seen(&self) -> usize {
        self.records.len() + self.failures.len() + self.skipped_empty.len()
    }
}

/// Files selected from the input paths, plus paths that could not be walked.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: Vec<PathBuf>,
    pub failures: Vec<IngestFailure>,
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn failure(path: &Path, reason: impl ToString) -> IngestFailure {
    IngestFailure {
        file: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Expand `paths` into the files to ingest.
///
/// Files named directly are always taken; globs apply to files found by
/// walking a directory, matched against the path relative to that directory.
pub fn scan_paths(paths: &[PathBuf], config: &IngestConfig) -> Result<ScanResult> {
    let include_set = build_globset(&config.include_globs)?;

    let mut default_excludes = vec!["**/.git/**".to_string(), "**/.*/**".to_string()];
    default_excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut result = ScanResult::default();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for root in paths {
        if root.is_file() {
            if seen.insert(root.clone()) {
                result.files.push(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            warn!(path = %root.display(), "path does not exist");
            result.failures.push(failure(root, "path does not exist"));
            continue;
        }

        let mut found = Vec::new();
        let walker = WalkDir::new(root).follow_links(config.follow_symlinks);
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().unwrap_or(root.as_path()).to_path_buf();
                    result.failures.push(failure(&path, e));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(root).unwrap_or(path);
            let rel_str = relative.to_string_lossy().to_string();

            if exclude_set.is_match(&rel_str) || !include_set.is_match(&rel_str) {
                continue;
            }
            found.push(path.to_path_buf());
        }

        // Sort for deterministic ordering
        found.sort();
        for path in found {
            if seen.insert(path.clone()) {
                result.files.push(path);
            }
        }
    }

    Ok(result)
}

/// Hex SHA-256 of a file's bytes.
pub fn hash_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Extract every file in `files`, collecting each outcome.
pub fn ingest_files(files: &[PathBuf], config: &Config) -> IngestReport {
    let mut report = IngestReport::default();

    for path in files {
        let hash = match hash_file(path) {
            Ok(h) => h,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "cannot read file");
                report.failures.push(failure(path, e));
                continue;
            }
        };

        let options = config.extract_options(Some(hash));
        match extract::extract_path(path, &options) {
            Ok(Extraction::Record(record)) => {
                debug!(
                    file = %path.display(),
                    parameters = record.parameter_stats.len(),
                    "extracted profile"
                );
                report.records.push(record);
            }
            Ok(Extraction::NoUsableData) => {
                info!(file = %path.display(), "no usable data, skipped");
                report.skipped_empty.push(path.display().to_string());
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "extraction failed");
                report.failures.push(failure(path, e.cause));
            }
        }
    }

    report
}

/// Scan `paths` and extract everything found.
pub fn ingest_paths(paths: &[PathBuf], config: &Config) -> Result<IngestReport> {
    let scan = scan_paths(paths, &config.ingest)?;
    let mut report = ingest_files(&scan.files, config);
    let mut failures = scan.failures;
    failures.append(&mut report.failures);
    report.failures = failures;
    Ok(report)
}

/// `floatchat ingest`.
///
/// New records are appended to the snapshot at `store.snapshot_path`, skipping
/// files whose content hash is already stored. With `output`, only this
/// batch is written, to that path.
pub fn run_ingest(
    config: &Config,
    paths: &[PathBuf],
    output: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    if dry_run {
        let scan = scan_paths(paths, &config.ingest)?;
        println!("ingest (dry-run)");
        println!("  files found: {}", scan.files.len());
        for file in &scan.files {
            println!("    {}", file.display());
        }
        for f in &scan.failures {
            println!("  unreadable: {} ({})", f.file, f.reason);
        }
        return Ok(());
    }

    let report = ingest_paths(paths, config)?;
    let extracted = report.records.len();

    let (mut collection, target) = match output {
        Some(path) => (ProfileCollection::new(), path.to_path_buf()),
        None => (
            export::load_or_empty(&config.store.snapshot_path)?,
            config.store.snapshot_path.clone(),
        ),
    };

    let mut known: HashSet<String> = collection
        .records()
        .iter()
        .filter_map(|r| r.source.content_hash.clone())
        .collect();
    let mut duplicates = 0usize;
    let fresh: Vec<ProfileRecord> = report
        .records
        .iter()
        .filter(|r| {
            // insert() is false for a hash already stored or seen earlier in this batch
            let dup = r
                .source
                .content_hash
                .as_ref()
                .map(|h| !known.insert(h.clone()))
                .unwrap_or(false);
            if dup {
                duplicates += 1;
            }
            !dup
        })
        .cloned()
        .collect();
    let added = fresh.len();
    collection.extend(fresh);

    export::write_snapshot(&collection, Some(&target))?;

    println!("ingest");
    println!("  files: {}", report.files_seen());
    println!("  records extracted: {}", extracted);
    println!("  records added: {}", added);
    if duplicates > 0 {
        println!("  already stored: {}", duplicates);
    }
    println!("  skipped (no usable data): {}", report.skipped_empty.len());
    println!("  failures: {}", report.failures.len());
    for f in &report.failures {
        println!("    {}: {}", f.file, f.reason);
    }
    println!("  snapshot: {} ({} records)", target.display(), collection.len());
    println!("ok");

    Ok(())
}
