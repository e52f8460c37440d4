//! Core data models used throughout FloatChat.
//!
//! These types represent the normalized profiles that flow from the
//! extractor, through the in-memory collection, into the relevance scorer.
//! Every type serializes to a plain JSON mapping so storage collaborators
//! (document databases, object stores) can persist records as-is.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::parameters::Parameter;

/// Representative location of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// True when the configured fallback location was substituted because
    /// the source had no valid coordinate.
    #[serde(default)]
    pub is_default: bool,
}

impl Coordinates {
    /// Build coordinates from raw values, returning `None` when either
    /// component is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if crate::qc::is_valid_latitude(latitude) && crate::qc::is_valid_longitude(longitude) {
            Some(Self {
                latitude,
                longitude,
                is_default: false,
            })
        } else {
            None
        }
    }

    /// 1-degree grid label, e.g. `N13E080`.
    pub fn grid_cell(&self) -> String {
        let lat_dir = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let lon_dir = if self.longitude >= 0.0 { 'E' } else { 'W' };
        format!(
            "{}{:02}{}{:03}",
            lat_dir,
            self.latitude.abs().trunc() as i64,
            lon_dir,
            self.longitude.abs().trunc() as i64
        )
    }
}

/// Northern-hemisphere season of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}

/// Calendar fields of a profile observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// ISO 8601 datetime, when the source carried a full timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,
    pub season: Season,
}

impl ProfileTime {
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            datetime: Some(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            season: Season::from_month(dt.month()),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            datetime: None,
            season: Season::from_month(date.month()),
        }
    }

    /// The calendar date, if the stored fields form a valid one.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// `YYYY-MM-DD` for display.
    pub fn date_label(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Statistics for one parameter after quality filtering.
///
/// `min <= mean <= max` and `count > 0` hold for every stored entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
    pub count: usize,
    pub units: String,
}

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A file handed to us directly (upload, local path).
    Uploaded,
    /// A file pulled by the FTP/GDAC mirror collaborator.
    FtpExtracted,
    /// Placeholder data generated without a real measurement file.
    Synthesized,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Uploaded => "uploaded",
            SourceKind::FtpExtracted => "ftp_extracted",
            SourceKind::Synthesized => "synthesized",
        }
    }
}

/// Provenance of a [`ProfileRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    pub kind: SourceKind,
    /// File name (or label) the record was extracted from.
    pub name: String,
    pub is_real_data: bool,
    /// SHA-256 of the source bytes, when read from disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,
    pub ingested_at: DateTime<Utc>,
}

/// The normalized unit produced by the extractor and ranked by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Synthetic UUID assigned at creation.
    pub id: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_cell: Option<String>,
    pub timestamp: Option<ProfileTime>,
    pub region_tags: Vec<String>,
    pub parameter_stats: BTreeMap<String, ParameterStats>,
    pub source: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_number: Option<String>,
    #[serde(default)]
    pub raw_variable_names: Vec<String>,
}

impl ProfileRecord {
    /// Stats for a canonical parameter, if present with at least one value.
    pub fn stats(&self, parameter: Parameter) -> Option<&ParameterStats> {
        self.parameter_stats
            .get(parameter.canonical())
            .filter(|s| s.count > 0)
    }

    pub fn has_parameter(&self, parameter: Parameter) -> bool {
        self.stats(parameter).is_some()
    }

    /// True when the location is a configured placeholder.
    pub fn uses_default_coordinates(&self) -> bool {
        self.coordinates.map(|c| c.is_default).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_cell_formats_hemispheres() {
        let c = Coordinates::new(13.5, 80.2).unwrap();
        assert_eq!(c.grid_cell(), "N13E080");
        let c = Coordinates::new(-41.9, -3.0).unwrap();
        assert_eq!(c.grid_cell(), "S41W003");
    }

    #[test]
    fn out_of_range_coordinates_rejected() {
        assert!(Coordinates::new(91.0, 10.0).is_none());
        assert!(Coordinates::new(10.0, -180.5).is_none());
        assert!(Coordinates::new(f64::NAN, 10.0).is_none());
        assert!(Coordinates::new(-90.0, 180.0).is_some());
    }

    #[test]
    fn season_follows_northern_hemisphere() {
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Spring);
        assert_eq!(Season::from_month(7), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Autumn);
    }
}
