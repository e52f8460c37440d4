use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::extract::ExtractOptions;
use crate::models::SourceKind;
use crate::search::{SearchParams, ToleranceOverrides, ToleranceProfile};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub retrieval: RetrievalConfig,
    pub scoring: ScoringConfig,
    pub ingest: IngestConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    #[serde(default = "default_true")]
    pub use_default_coordinates: bool,
    #[serde(default = "default_coordinates")]
    pub default_coordinates: [f64; 2],
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            use_default_coordinates: true,
            default_coordinates: default_coordinates(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_coordinates() -> [f64; 2] {
    [15.0, 75.0]
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_final_limit")]
    pub final_limit: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            final_limit: default_final_limit(),
        }
    }
}

fn default_final_limit() -> usize {
    15
}

/// Per-field overrides of the built-in strict and relaxed profiles.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ScoringConfig {
    pub strict: ToleranceOverrides,
    pub relaxed: ToleranceOverrides,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default = "default_source_kind")]
    pub source_kind: SourceKind,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
            follow_symlinks: false,
            source_kind: default_source_kind(),
        }
    }
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.nc".to_string()]
}
fn default_source_kind() -> SourceKind {
    SourceKind::Uploaded
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("./data/profiles.json")
}

impl Config {
    pub fn strict_profile(&self) -> ToleranceProfile {
        self.scoring.strict.apply(ToleranceProfile::strict())
    }

    pub fn relaxed_profile(&self) -> ToleranceProfile {
        self.scoring.relaxed.apply(ToleranceProfile::relaxed())
    }

    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            strict: self.strict_profile(),
            relaxed: self.relaxed_profile(),
            final_limit: self.retrieval.final_limit,
        }
    }

    /// Extraction settings for one file.
    pub fn extract_options(&self, content_hash: Option<String>) -> ExtractOptions {
        let [lat, lon] = self.extraction.default_coordinates;
        ExtractOptions {
            default_coordinates: self
                .extraction
                .use_default_coordinates
                .then_some((lat, lon)),
            source_kind: self.ingest.source_kind,
            content_hash,
        }
    }
}

fn validate_profile(name: &str, p: &ToleranceProfile) -> Result<()> {
    if p.near_days < 0 || p.week_days < 0 || p.extended_days < 0 {
        bail!("scoring.{}: day windows must be >= 0", name);
    }
    if p.year_tolerance < 0 {
        bail!("scoring.{}.year_tolerance must be >= 0", name);
    }
    if p.month_tolerance > 11 {
        bail!("scoring.{}.month_tolerance must be <= 11", name);
    }
    if p.near_days > p.week_days {
        bail!("scoring.{}: near_days must be <= week_days", name);
    }
    if p.extended_days != 0 && p.extended_days < p.week_days {
        bail!("scoring.{}: extended_days must be 0 or >= week_days", name);
    }
    if !(p.exact_day_points >= p.near_day_points && p.near_day_points >= p.week_points) {
        bail!(
            "scoring.{}: day points must not increase with distance (exact >= near >= week)",
            name
        );
    }
    if p.extended_days != 0 && p.extended_points > p.week_points {
        bail!("scoring.{}: extended_points must be <= week_points", name);
    }
    if p.near_year_points > p.year_points || p.near_month_points > p.month_points {
        bail!(
            "scoring.{}: tolerance points must be <= exact-match points",
            name
        );
    }
    Ok(())
}

/// Check a parsed config. Called by [`load_config`].
pub fn validate(config: &Config) -> Result<()> {
    if config.retrieval.final_limit < 1 {
        bail!("retrieval.final_limit must be >= 1");
    }

    let [lat, lon] = config.extraction.default_coordinates;
    if !crate::qc::is_valid_latitude(lat) || !crate::qc::is_valid_longitude(lon) {
        bail!(
            "extraction.default_coordinates [{}, {}] is out of range",
            lat,
            lon
        );
    }

    if config.ingest.include_globs.is_empty() {
        bail!("ingest.include_globs must not be empty");
    }

    let strict = config.strict_profile();
    let relaxed = config.relaxed_profile();
    validate_profile("strict", &strict)?;
    validate_profile("relaxed", &relaxed)?;

    // Relaxed may only widen windows; otherwise it could drop strict matches.
    let strict_extended = if strict.extended_days == 0 {
        strict.week_days
    } else {
        strict.extended_days
    };
    let relaxed_extended = if relaxed.extended_days == 0 {
        relaxed.week_days
    } else {
        relaxed.extended_days
    };
    if relaxed.near_days < strict.near_days
        || relaxed.week_days < strict.week_days
        || relaxed_extended < strict_extended
        || relaxed.year_tolerance < strict.year_tolerance
        || relaxed.month_tolerance < strict.month_tolerance
        || (strict.cross_month_days && !relaxed.cross_month_days)
    {
        bail!("scoring.relaxed windows must be at least as wide as scoring.strict windows");
    }
    if strict.same_month_points > 0 && relaxed.same_month_points == 0 {
        bail!("scoring.relaxed.same_month_points must be > 0 when strict awards it");
    }

    Ok(())
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

/// Load `path` if it exists, otherwise the built-in defaults.
pub fn load_config_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        Ok(Config::default())
    }
}
