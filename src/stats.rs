//! Collection statistics.
//!
//! Summarizes what the snapshot holds: record counts by region, parameter
//! and source kind, how many records rely on the default location, and the
//! span of observation dates. Used by `floatchat stats`.

use anyhow::Result;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::config::Config;
use crate::export;
use crate::models::ProfileRecord;

/// Aggregate counts over a set of records.
#[derive(Debug, Default, PartialEq)]
pub struct CollectionStats {
    pub total: usize,
    pub real_data: usize,
    pub default_location: usize,
    pub without_location: usize,
    pub by_region: BTreeMap<String, usize>,
    pub by_parameter: BTreeMap<String, usize>,
    pub by_source: BTreeMap<String, usize>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub last_ingest_ts: Option<i64>,
}

pub fn collect_stats(records: &[ProfileRecord]) -> CollectionStats {
    let mut stats = CollectionStats {
        total: records.len(),
        ..Default::default()
    };

    for r in records {
        if r.source.is_real_data {
            stats.real_data += 1;
        }
        match r.coordinates {
            Some(c) if c.is_default => stats.default_location += 1,
            Some(_) => {}
            None => stats.without_location += 1,
        }
        for tag in &r.region_tags {
            *stats.by_region.entry(tag.clone()).or_default() += 1;
        }
        for (name, s) in &r.parameter_stats {
            if s.count > 0 {
                *stats.by_parameter.entry(name.clone()).or_default() += 1;
            }
        }
        *stats
            .by_source
            .entry(r.source.kind.as_str().to_string())
            .or_default() += 1;

        if let Some(date) = r.timestamp.as_ref().and_then(|t| t.date()) {
            stats.first_date = Some(stats.first_date.map_or(date, |d| d.min(date)));
            stats.last_date = Some(stats.last_date.map_or(date, |d| d.max(date)));
        }
        let ts = r.source.ingested_at.timestamp();
        stats.last_ingest_ts = Some(stats.last_ingest_ts.map_or(ts, |t| t.max(ts)));
    }

    stats
}

/// Run the stats command: load the snapshot and print a summary.
pub fn run_stats(config: &Config) -> Result<()> {
    let path = &config.store.snapshot_path;
    let collection = export::load_or_empty(path)?;
    let stats = collect_stats(collection.records());
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("FloatChat — Collection Stats");
    println!("============================");
    println!();
    println!("  Snapshot:    {}", path.display());
    println!("  Size:        {}", format_bytes(size));
    println!();
    println!("  Records:     {}", stats.total);
    println!("  Real data:   {}", stats.real_data);
    println!("  Default loc: {}", stats.default_location);
    println!("  No location: {}", stats.without_location);
    match (stats.first_date, stats.last_date) {
        (Some(first), Some(last)) => println!("  Dates:       {} .. {}", first, last),
        _ => println!("  Dates:       none"),
    }
    if let Some(ts) = stats.last_ingest_ts {
        println!("  Last ingest: {}", format_ts_relative(ts));
    }

    print_table("REGION", &stats.by_region);
    print_table("PARAMETER", &stats.by_parameter);
    print_table("SOURCE", &stats.by_source);

    println!();
    Ok(())
}

fn print_table(heading: &str, counts: &BTreeMap<String, usize>) {
    if counts.is_empty() {
        return;
    }
    println!();
    println!("  {:<28} {:>8}", heading, "RECORDS");
    println!("  {}", "-".repeat(37));
    let mut rows: Vec<(&String, &usize)> = counts.iter().collect();
    rows.sort_by(|a, b| b.1.cmp(a.1));
    for (name, count) in rows {
        println!("  {:<28} {:>8}", name, count);
    }
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Format a Unix timestamp as a relative time string (e.g. "3 hours ago").
fn format_ts_relative(ts: i64) -> String {
    let delta = chrono::Utc::now().timestamp() - ts;

    if delta < 0 {
        return format_ts_iso(ts);
    }

    if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if delta < 86400 * 30 {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        format_ts_iso(ts)
    }
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}
