//! Profile extraction: one array file in, zero or one [`ProfileRecord`] out.
//!
//! # Algorithm
//!
//! 1. Resolve variable names through the alias tables in [`crate::parameters`].
//! 2. Coordinates: pair latitude/longitude by index and keep the first pair
//!    that is present and in range. If none qualifies, optionally substitute
//!    the configured default location, flagged with `is_default`.
//! 3. Parameters: drop missing and physically implausible values, then take
//!    min/max/mean/std/count. A parameter with nothing left is skipped.
//! 4. Time: the first present value of the time variable, interpreted by its
//!    CF `"<unit> since <epoch>"` units, defaulting to ARGO JULD days since
//!    1950-01-01.
//! 5. Region tags from the real coordinate, or the default tag.
//!
//! A file with neither a real coordinate nor a single usable parameter
//! yields [`Extraction::NoUsableData`]. That is an outcome, not an error.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Coordinates, ParameterStats, ProfileRecord, ProfileTime, Provenance, SourceKind};
use crate::parameters::{
    resolve, LATITUDE_ALIASES, LONGITUDE_ALIASES, PARAMETERS, PLATFORM_ALIASES, TIME_ALIASES,
};
use crate::qc;
use crate::regions::{self, DEFAULT_REGION};
use crate::source::{ArraySource, NetcdfSource, SourceError};

/// Largest time offset accepted, in seconds (about 31,000 years).
const MAX_TIME_OFFSET_SECS: f64 = 1.0e12;

/// A file could not be read as an array file.
#[derive(Debug, Error)]
#[error("failed to extract {file}: {cause}")]
pub struct ExtractionError {
    pub file: String,
    #[source]
    pub cause: SourceError,
}

/// Result of a successful extraction pass.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::large_enum_variant)]
pub enum Extraction {
    Record(ProfileRecord),
    /// The file parsed but had no valid coordinates and no valid parameters.
    NoUsableData,
}

impl Extraction {
    pub fn into_record(self) -> Option<ProfileRecord> {
        match self {
            Extraction::Record(r) => Some(r),
            Extraction::NoUsableData => None,
        }
    }
}

/// Extraction settings, decoupled from application config.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Location substituted when the file has no valid coordinate.
    /// `None` leaves such records without coordinates.
    pub default_coordinates: Option<(f64, f64)>,
    pub source_kind: SourceKind,
    /// SHA-256 of the source bytes, when the caller computed one.
    pub content_hash: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_coordinates: None,
            source_kind: SourceKind::Uploaded,
            content_hash: None,
        }
    }
}

/// Open a NetCDF file and extract it.
pub fn extract_path(path: &Path, options: &ExtractOptions) -> Result<Extraction, ExtractionError> {
    let source = NetcdfSource::open(path).map_err(|cause| ExtractionError {
        file: path.display().to_string(),
        cause,
    })?;
    extract_profile(&source, options)
}

/// Extract a profile from any [`ArraySource`].
pub fn extract_profile<S: ArraySource>(
    source: &S,
    options: &ExtractOptions,
) -> Result<Extraction, ExtractionError> {
    let wrap = |cause: SourceError| ExtractionError {
        file: source.label().to_string(),
        cause,
    };

    let names = source.variable_names();

    let real_coordinates = extract_coordinates(source, &names).map_err(wrap)?;
    let parameter_stats = extract_parameters(source, &names).map_err(wrap)?;

    if real_coordinates.is_none() && parameter_stats.is_empty() {
        debug!(file = source.label(), "no usable coordinates or parameters");
        return Ok(Extraction::NoUsableData);
    }

    let timestamp = extract_time(source, &names).map_err(wrap)?;

    let region_tags = match real_coordinates.as_ref() {
        Some(c) => regions::classify(Some(c)),
        None => vec![DEFAULT_REGION.to_string()],
    };
    let grid_cell = real_coordinates.as_ref().map(|c| c.grid_cell());

    let coordinates = real_coordinates.or_else(|| {
        options.default_coordinates.map(|(latitude, longitude)| {
            debug!(file = source.label(), "using default coordinates");
            Coordinates {
                latitude,
                longitude,
                is_default: true,
            }
        })
    });

    let record = ProfileRecord {
        id: Uuid::new_v4().to_string(),
        coordinates,
        grid_cell,
        timestamp,
        region_tags,
        parameter_stats,
        source: Provenance {
            kind: options.source_kind,
            name: source.label().to_string(),
            is_real_data: options.source_kind != SourceKind::Synthesized,
            content_hash: options.content_hash.clone(),
            ingested_at: Utc::now(),
        },
        platform_number: extract_platform(source, &names),
        raw_variable_names: names,
    };

    Ok(Extraction::Record(record))
}

fn fill_value<S: ArraySource>(source: &S, variable: &str) -> Option<f64> {
    source
        .variable_attribute(variable, "_FillValue")
        .and_then(|v| v.as_number())
}

fn read_resolved<S: ArraySource>(source: &S, variable: &str) -> Result<Vec<f64>, SourceError> {
    Ok(source.read_values(variable)?.unwrap_or_default())
}

fn extract_coordinates<S: ArraySource>(
    source: &S,
    names: &[String],
) -> Result<Option<Coordinates>, SourceError> {
    let (lat_name, lon_name) = match (
        resolve(LATITUDE_ALIASES, names),
        resolve(LONGITUDE_ALIASES, names),
    ) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => return Ok(None),
    };

    let lats = read_resolved(source, lat_name)?;
    let lons = read_resolved(source, lon_name)?;
    let lat_fill = fill_value(source, lat_name);
    let lon_fill = fill_value(source, lon_name);

    let found = lats
        .iter()
        .zip(lons.iter())
        .filter(|(lat, lon)| !qc::is_missing(**lat, lat_fill) && !qc::is_missing(**lon, lon_fill))
        .find_map(|(lat, lon)| Coordinates::new(*lat, *lon));

    Ok(found)
}

fn extract_parameters<S: ArraySource>(
    source: &S,
    names: &[String],
) -> Result<BTreeMap<String, ParameterStats>, SourceError> {
    let mut stats = BTreeMap::new();

    for param in PARAMETERS {
        let variable = match resolve(param.aliases, names) {
            Some(v) => v,
            None => continue,
        };

        let raw = read_resolved(source, variable)?;
        let cleaned = qc::clean_values(&raw, fill_value(source, variable), param.valid_range);

        let summary = match qc::summarize(&cleaned) {
            Some(s) => s,
            None => {
                debug!(
                    file = source.label(),
                    variable,
                    raw = raw.len(),
                    "no valid values after filtering"
                );
                continue;
            }
        };

        let units = source
            .variable_attribute(variable, "units")
            .and_then(|v| v.as_text().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| param.default_units.to_string());

        stats.insert(
            param.canonical.to_string(),
            ParameterStats {
                min: summary.min,
                max: summary.max,
                mean: summary.mean,
                std: summary.std,
                count: summary.count,
                units,
            },
        );
    }

    Ok(stats)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn parse(word: &str) -> Option<Self> {
        match word.trim().to_lowercase().as_str() {
            "days" | "day" | "d" => Some(TimeUnit::Days),
            "hours" | "hour" | "h" => Some(TimeUnit::Hours),
            "minutes" | "minute" | "min" => Some(TimeUnit::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(TimeUnit::Seconds),
            _ => None,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            TimeUnit::Days => 86_400.0,
            TimeUnit::Hours => 3_600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }
}

fn argo_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1950, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Parse CF time units such as `days since 1950-01-01 00:00:00 UTC`.
fn parse_time_units(units: &str) -> Option<(TimeUnit, NaiveDateTime)> {
    let (unit, epoch) = units.split_once(" since ")?;
    let unit = TimeUnit::parse(unit)?;
    let epoch = epoch.trim();

    let datetime_part: String = epoch.chars().take(19).collect();
    let parsed = NaiveDateTime::parse_from_str(&datetime_part, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(&datetime_part, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            let date_part: String = epoch.chars().take(10).collect();
            NaiveDate::parse_from_str(&date_part, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some((unit, parsed))
}

fn offset_to_datetime(offset: f64, unit: TimeUnit, epoch: NaiveDateTime) -> Option<DateTime<Utc>> {
    let secs = offset * unit.seconds();
    if !secs.is_finite() || secs.abs() > MAX_TIME_OFFSET_SECS {
        return None;
    }
    let delta = Duration::milliseconds((secs * 1000.0).round() as i64);
    epoch.checked_add_signed(delta).map(|dt| dt.and_utc())
}

fn extract_time<S: ArraySource>(
    source: &S,
    names: &[String],
) -> Result<Option<ProfileTime>, SourceError> {
    let variable = match resolve(TIME_ALIASES, names) {
        Some(v) => v,
        None => return Ok(None),
    };

    let values = read_resolved(source, variable)?;
    let fill = fill_value(source, variable);
    let (unit, epoch) = source
        .variable_attribute(variable, "units")
        .and_then(|v| v.as_text().and_then(parse_time_units))
        .unwrap_or((TimeUnit::Days, argo_epoch()));

    // 99999 is the ARGO fill only for day offsets; in finer units it is a real time.
    let missing = |v: f64| match unit {
        TimeUnit::Days => qc::is_missing(v, fill),
        _ => qc::is_fill(v, fill),
    };
    let first = match values.iter().copied().find(|v| !missing(*v)) {
        Some(v) => v,
        None => return Ok(None),
    };

    Ok(offset_to_datetime(first, unit, epoch).map(ProfileTime::from_datetime))
}

fn extract_platform<S: ArraySource>(source: &S, names: &[String]) -> Option<String> {
    let from_global = source.global_attribute("platform_number").and_then(|v| {
        match v.as_text() {
            Some(t) => Some(t.trim().to_string()),
            None => v.as_number().map(|n| format!("{}", n as i64)),
        }
    });

    from_global
        .filter(|s| !s.is_empty())
        .or_else(|| resolve(PLATFORM_ALIASES, names).and_then(|v| source.read_text(v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{AttrValue, MemorySource};

    fn record(source: &MemorySource, options: &ExtractOptions) -> ProfileRecord {
        extract_profile(source, options)
            .unwrap()
            .into_record()
            .expect("expected a record")
    }

    #[test]
    fn extracts_scenario_a_profile() {
        let src = MemorySource::new("bob.nc")
            .with_variable("LATITUDE", vec![13.5])
            .with_variable("LONGITUDE", vec![80.2])
            .with_variable("TEMP", vec![20.0, 22.5, 25.0])
            .with_units("TEMP", "degree_Celsius");

        let rec = record(&src, &ExtractOptions::default());
        let temp = &rec.parameter_stats["TEMP"];
        assert_eq!((temp.min, temp.max, temp.mean, temp.count), (20.0, 25.0, 22.5, 3));
        assert_eq!(temp.units, "degree_Celsius");
        assert!(rec.region_tags.iter().any(|t| t == "Bay of Bengal"));
        assert_eq!(rec.grid_cell.as_deref(), Some("N13E080"));
        assert!(!rec.uses_default_coordinates());
    }

    #[test]
    fn skips_invalid_coordinate_pairs() {
        let src = MemorySource::new("f.nc")
            .with_variable("lat", vec![f64::NAN, 95.0, 15.0])
            .with_variable("lon", vec![70.0, 70.0, 65.0])
            .with_variable("TEMP", vec![10.0]);
        let rec = record(&src, &ExtractOptions::default());
        let c = rec.coordinates.unwrap();
        assert_eq!((c.latitude, c.longitude), (15.0, 65.0));
        assert_eq!(rec.region_tags[0], "Arabian Sea");
    }

    #[test]
    fn missing_coordinates_are_absent_without_default() {
        let src = MemorySource::new("nocoords.nc").with_variable("TEMP", vec![12.0, 14.0]);
        let rec = record(&src, &ExtractOptions::default());
        assert!(rec.coordinates.is_none());
        assert!(rec.grid_cell.is_none());
        assert_eq!(rec.region_tags, vec![DEFAULT_REGION]);
    }

    #[test]
    fn default_coordinates_are_flagged() {
        let src = MemorySource::new("nocoords.nc").with_variable("TEMP", vec![12.0]);
        let options = ExtractOptions {
            default_coordinates: Some((15.0, 75.0)),
            ..Default::default()
        };
        let rec = record(&src, &options);
        let c = rec.coordinates.unwrap();
        assert!(c.is_default);
        assert_eq!((c.latitude, c.longitude), (15.0, 75.0));
        // default location must not masquerade as an Arabian Sea observation
        assert_eq!(rec.region_tags, vec![DEFAULT_REGION]);
    }

    #[test]
    fn out_of_range_values_are_discarded_not_clipped() {
        let src = MemorySource::new("f.nc")
            .with_variable("PSAL", vec![34.0, 35.0, 60.0, -1.0, 99999.0])
            .with_variable("PRES", vec![5.0, 12000.0]);
        let rec = record(&src, &ExtractOptions::default());
        let psal = &rec.parameter_stats["PSAL"];
        assert_eq!((psal.min, psal.max, psal.count), (34.0, 35.0, 2));
        assert_eq!(psal.units, "PSU");
        assert_eq!(rec.parameter_stats["PRES"].count, 1);
    }

    #[test]
    fn declared_fill_value_is_dropped() {
        let src = MemorySource::new("f.nc")
            .with_variable("DOXY", vec![-1.0, 210.0, 220.0])
            .with_attribute("DOXY", "_FillValue", AttrValue::Number(-1.0));
        let rec = record(&src, &ExtractOptions::default());
        assert_eq!(rec.parameter_stats["DOXY"].count, 2);
    }

    #[test]
    fn parameter_with_no_valid_values_is_skipped() {
        let src = MemorySource::new("f.nc")
            .with_variable("LATITUDE", vec![0.0])
            .with_variable("LONGITUDE", vec![60.0])
            .with_variable("TEMP", vec![99999.0, f64::NAN]);
        let rec = record(&src, &ExtractOptions::default());
        assert!(rec.parameter_stats.is_empty());
        assert_eq!(rec.region_tags[0], "Equatorial Indian Ocean");
    }

    #[test]
    fn nothing_usable_is_not_an_error() {
        let src = MemorySource::new("empty.nc")
            .with_variable("TEMP", vec![99999.0])
            .with_variable("N_LEVELS", vec![1.0, 2.0]);
        let out = extract_profile(&src, &ExtractOptions::default()).unwrap();
        assert_eq!(out, Extraction::NoUsableData);
    }

    #[test]
    fn unreadable_variable_reports_file_and_cause() {
        let src = MemorySource::new("broken.nc").with_unreadable("TEMP");
        let err = extract_profile(&src, &ExtractOptions::default()).unwrap_err();
        assert_eq!(err.file, "broken.nc");
        assert!(matches!(err.cause, SourceError::Read { .. }));
        assert!(err.to_string().contains("broken.nc"));
    }

    #[test]
    fn juld_defaults_to_days_since_1950() {
        let src = MemorySource::new("f.nc")
            .with_variable("TEMP", vec![10.0])
            .with_variable("JULD", vec![99999.0, 26736.5]);
        let rec = record(&src, &ExtractOptions::default());
        let t = rec.timestamp.unwrap();
        assert_eq!((t.year, t.month, t.day), (2023, 3, 15));
        assert_eq!(t.datetime.as_deref(), Some("2023-03-15T12:00:00Z"));
    }

    #[test]
    fn cf_time_units_are_honored() {
        let src = MemorySource::new("f.nc")
            .with_variable("TEMP", vec![10.0])
            .with_variable("time", vec![86_400.0 * 2.0])
            .with_units("time", "seconds since 2020-01-01 00:00:00");
        let t = record(&src, &ExtractOptions::default()).timestamp.unwrap();
        assert_eq!(t.date_label(), "2020-01-03");
    }

    #[test]
    fn large_second_offsets_are_not_sentinels() {
        let src = MemorySource::new("f.nc")
            .with_variable("TEMP", vec![10.0])
            .with_variable("time", vec![f64::NAN, -1.0, 1_678_881_600.0])
            .with_units("time", "seconds since 1970-01-01 00:00:00")
            .with_attribute("time", "_FillValue", AttrValue::Number(-1.0));
        let t = record(&src, &ExtractOptions::default()).timestamp.unwrap();
        assert_eq!(t.datetime.as_deref(), Some("2023-03-15T12:00:00Z"));
    }

    #[test]
    fn missing_time_leaves_timestamp_absent() {
        let src = MemorySource::new("f.nc").with_variable("TEMP", vec![10.0]);
        assert!(record(&src, &ExtractOptions::default()).timestamp.is_none());
    }

    #[test]
    fn platform_from_global_then_variable() {
        let src = MemorySource::new("f.nc")
            .with_variable("TEMP", vec![10.0])
            .with_text("PLATFORM_NUMBER", "2902114");
        assert_eq!(
            record(&src, &ExtractOptions::default()).platform_number.as_deref(),
            Some("2902114")
        );

        let src = src.with_global("platform_number", AttrValue::Number(5904321.0));
        assert_eq!(
            record(&src, &ExtractOptions::default()).platform_number.as_deref(),
            Some("5904321")
        );
    }

    #[test]
    fn provenance_reflects_options() {
        let src = MemorySource::new("synthetic").with_variable("TEMP", vec![10.0]);
        let options = ExtractOptions {
            source_kind: SourceKind::Synthesized,
            content_hash: Some("abc".into()),
            ..Default::default()
        };
        let rec = record(&src, &options);
        assert!(!rec.source.is_real_data);
        assert_eq!(rec.source.content_hash.as_deref(), Some("abc"));
        assert_eq!(rec.raw_variable_names, vec!["TEMP"]);
    }

    #[test]
    fn parse_time_units_variants() {
        let (u, e) = parse_time_units("days since 1950-01-01 00:00:00 UTC").unwrap();
        assert_eq!(u, TimeUnit::Days);
        assert_eq!(e, argo_epoch());
        let (u, _) = parse_time_units("hours since 2000-01-01T06:00:00").unwrap();
        assert_eq!(u, TimeUnit::Hours);
        assert!(parse_time_units("degree_Celsius").is_none());
        assert!(parse_time_units("fortnights since 2000-01-01").is_none());
    }
}
