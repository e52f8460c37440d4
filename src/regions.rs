//! Named ocean regions.
//!
//! Regions are rectangular latitude/longitude boxes checked in table order;
//! the first box containing a coordinate wins. Boxes inside the Indian
//! Ocean basin also carry the basin tag so basin-wide questions still match
//! them. Coordinates outside every box fall back to [`DEFAULT_REGION`].

use crate::models::Coordinates;

/// Tag assigned when no bounding box matches.
pub const DEFAULT_REGION: &str = "Indian Ocean";

#[derive(Debug)]
pub struct Region {
    pub name: &'static str,
    /// Inclusive latitude bounds.
    pub lat: (f64, f64),
    /// Inclusive longitude bounds.
    pub lon: (f64, f64),
    /// Whether the box also belongs to the Indian Ocean basin tag.
    pub in_indian_basin: bool,
}

pub const REGIONS: &[Region] = &[
    Region {
        name: "Arabian Sea",
        lat: (8.0, 28.0),
        lon: (50.0, 78.0),
        in_indian_basin: true,
    },
    Region {
        name: "Bay of Bengal",
        lat: (5.0, 25.0),
        lon: (78.0, 100.0),
        in_indian_basin: true,
    },
    Region {
        name: "Equatorial Indian Ocean",
        lat: (-10.0, 10.0),
        lon: (40.0, 100.0),
        in_indian_basin: true,
    },
    Region {
        name: "Southern Ocean",
        lat: (-90.0, -40.0),
        lon: (-180.0, 180.0),
        in_indian_basin: false,
    },
];

/// Query phrases mapped to the region they name, longest phrases first so
/// "equatorial indian ocean" is claimed before "indian ocean".
const QUERY_KEYWORDS: &[(&str, &str)] = &[
    ("equatorial indian ocean", "Equatorial Indian Ocean"),
    ("bay of bengal", "Bay of Bengal"),
    ("southern ocean", "Southern Ocean"),
    ("arabian sea", "Arabian Sea"),
    ("indian ocean", DEFAULT_REGION),
    ("equatorial", "Equatorial Indian Ocean"),
    ("arabian", "Arabian Sea"),
    ("bengal", "Bay of Bengal"),
    ("southern", "Southern Ocean"),
];

impl Region {
    pub fn contains(&self, coords: &Coordinates) -> bool {
        coords.latitude >= self.lat.0
            && coords.latitude <= self.lat.1
            && coords.longitude >= self.lon.0
            && coords.longitude <= self.lon.1
    }
}

/// Region tags for a coordinate. Never empty.
pub fn classify(coords: Option<&Coordinates>) -> Vec<String> {
    let region = coords.and_then(|c| REGIONS.iter().find(|r| r.contains(c)));
    match region {
        Some(r) if r.in_indian_basin => vec![r.name.to_string(), DEFAULT_REGION.to_string()],
        Some(r) => vec![r.name.to_string()],
        None => vec![DEFAULT_REGION.to_string()],
    }
}

/// Lowercase a region name and turn underscores into spaces, so
/// `Arabian_Sea` and `arabian sea` compare equal.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replace('_', " ")
}

/// Regions mentioned in an already-normalized query, in order of first mention
/// in the keyword table. Each matched phrase is blanked out before shorter
/// phrases are tried.
pub fn regions_in_query(normalized_query: &str) -> Vec<&'static str> {
    let mut remaining = format!(" {} ", normalized_query);
    let mut found: Vec<&'static str> = Vec::new();

    for (phrase, region) in QUERY_KEYWORDS {
        let needle = format!(" {} ", phrase);
        let mut matched = false;
        while let Some(pos) = remaining.find(&needle) {
            let blank = " ".repeat(needle.len());
            remaining.replace_range(pos..pos + needle.len(), &blank);
            matched = true;
        }
        if matched && !found.contains(region) {
            found.push(region);
        }
    }

    found
}
