//! Flat text context for language-model collaborators.
//!
//! One line per record, joined with ` || `:
//!
//! ```text
//! REAL DATA - Profile 2023-03-15 from Arabian Sea, Indian Ocean (File: a.nc) | TEMP: 20.00-25.00 °C (mean: 22.50)
//! ```

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::export;
use crate::models::{ProfileRecord, SourceKind};
use crate::parameters::PARAMETERS;
use crate::search::{SearchHit, SearchPhase};

pub const EMPTY_CONTEXT: &str = "No relevant data found.";

/// Render one record as a context line.
pub fn context_line(record: &ProfileRecord) -> String {
    let origin = if record.source.is_real_data {
        "REAL DATA"
    } else {
        "SYNTHETIC"
    };
    let date = record
        .timestamp
        .as_ref()
        .map(|t| t.date_label())
        .unwrap_or_else(|| "(undated)".to_string());

    let mut header = format!(
        "{} - Profile {} from {}",
        origin,
        date,
        record.region_tags.join(", ")
    );
    if record.source.kind == SourceKind::Uploaded {
        header.push_str(&format!(" (File: {})", record.source.name));
    }
    if record.uses_default_coordinates() {
        header.push_str(" (default location)");
    }

    let mut parts = vec![header];
    for param in PARAMETERS {
        if let Some(stats) = record.stats(param.parameter) {
            let units = if stats.units.is_empty() {
                param.default_units
            } else {
                stats.units.as_str()
            };
            parts.push(format!(
                "{}: {:.2}-{:.2} {} (mean: {:.2})",
                param.label, stats.min, stats.max, units, stats.mean
            ));
        }
    }
    parts.join(" | ")
}

/// Render records in order.
pub fn build_context<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ProfileRecord>,
{
    let lines: Vec<String> = records.into_iter().map(context_line).collect();
    if lines.is_empty() {
        EMPTY_CONTEXT.to_string()
    } else {
        lines.join(" || ")
    }
}

/// Render ranked hits in rank order.
pub fn hits_context(hits: &[SearchHit<'_>]) -> String {
    build_context(hits.iter().map(|h| h.record))
}

/// `floatchat context`: print the context block for a query.
pub fn run_context(config: &Config, query: &str) -> Result<()> {
    let collection = export::load_or_empty(&config.store.snapshot_path)?;
    let outcome = collection.search(query, &config.search_params());
    if outcome.phase == SearchPhase::Relaxed {
        info!("context built from relaxed matches");
    }
    println!("{}", hits_context(&outcome.hits));
    Ok(())
}
