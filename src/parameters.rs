//! Canonical parameter table.
//!
//! Source files do not follow one naming convention, so every canonical
//! parameter carries an ordered list of variable-name aliases. Resolution
//! probes the aliases in order and takes the first one present. The same
//! table holds the physically plausible range used for quality filtering,
//! default units, and the words a user may type to ask about the parameter.

use serde::{Deserialize, Serialize};

/// Canonical measured parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Parameter {
    Temp,
    Psal,
    Pres,
    Doxy,
    Chla,
    Nitrate,
    PhInSitu,
    Bbp700,
}

/// One row of the parameter table.
#[derive(Debug)]
pub struct ParameterSpec {
    pub parameter: Parameter,
    /// ARGO variable name used as the key in `parameter_stats`.
    pub canonical: &'static str,
    /// Short label for context lines.
    pub label: &'static str,
    /// Ordered variable-name aliases; first match wins.
    pub aliases: &'static [&'static str],
    /// Inclusive plausible range; values outside are instrument error.
    pub valid_range: (f64, f64),
    pub default_units: &'static str,
    /// Lowercase query words that refer to this parameter.
    pub query_keywords: &'static [&'static str],
}

pub const PARAMETERS: &[ParameterSpec] = &[
    ParameterSpec {
        parameter: Parameter::Temp,
        canonical: "TEMP",
        label: "TEMP",
        aliases: &["TEMP", "temperature", "temp", "Temperature", "TEMP_ADJUSTED"],
        valid_range: (-5.0, 50.0),
        default_units: "°C",
        query_keywords: &["temperature", "temp", "temperatures"],
    },
    ParameterSpec {
        parameter: Parameter::Psal,
        canonical: "PSAL",
        label: "SAL",
        aliases: &["PSAL", "salinity", "salt", "Salinity", "PSAL_ADJUSTED"],
        valid_range: (0.0, 50.0),
        default_units: "PSU",
        query_keywords: &["salinity", "salt", "saline"],
    },
    ParameterSpec {
        parameter: Parameter::Pres,
        canonical: "PRES",
        label: "PRES",
        aliases: &["PRES", "pressure", "depth", "Pressure", "PRES_ADJUSTED", "DEPTH"],
        valid_range: (0.0, 10000.0),
        default_units: "dbar",
        query_keywords: &["pressure", "depth", "deep"],
    },
    ParameterSpec {
        parameter: Parameter::Doxy,
        canonical: "DOXY",
        label: "DOXY",
        aliases: &["DOXY", "oxygen", "Oxygen", "DOXY_ADJUSTED"],
        valid_range: (0.0, 600.0),
        default_units: "µmol/kg",
        query_keywords: &["oxygen", "doxy", "o2"],
    },
    ParameterSpec {
        parameter: Parameter::Chla,
        canonical: "CHLA",
        label: "CHLA",
        aliases: &["CHLA", "chlorophyll", "Chlorophyll", "CHLA_ADJUSTED"],
        valid_range: (0.0, 100.0),
        default_units: "mg/m³",
        query_keywords: &["chlorophyll", "chla"],
    },
    ParameterSpec {
        parameter: Parameter::Nitrate,
        canonical: "NITRATE",
        label: "NITRATE",
        aliases: &["NITRATE", "nitrate", "NITRATE_ADJUSTED"],
        valid_range: (0.0, 100.0),
        default_units: "µmol/kg",
        query_keywords: &["nitrate", "nitrates"],
    },
    ParameterSpec {
        parameter: Parameter::PhInSitu,
        canonical: "PH_IN_SITU_TOTAL",
        label: "pH",
        aliases: &["PH_IN_SITU_TOTAL", "ph", "pH", "PH_IN_SITU_TOTAL_ADJUSTED"],
        valid_range: (6.5, 9.0),
        default_units: "pH units",
        query_keywords: &["ph", "acidity"],
    },
    ParameterSpec {
        parameter: Parameter::Bbp700,
        canonical: "BBP700",
        label: "BBP700",
        aliases: &["BBP700", "bbp700", "BBP700_ADJUSTED"],
        valid_range: (0.0, 0.1),
        default_units: "m⁻¹",
        query_keywords: &["backscatter", "backscattering", "bbp", "bbp700"],
    },
];

pub const LATITUDE_ALIASES: &[&str] = &["LATITUDE", "latitude", "lat", "Latitude", "LAT"];
pub const LONGITUDE_ALIASES: &[&str] = &["LONGITUDE", "longitude", "lon", "Longitude", "LON"];
pub const TIME_ALIASES: &[&str] = &["JULD", "time", "TIME", "date_time"];
pub const PLATFORM_ALIASES: &[&str] = &["PLATFORM_NUMBER", "platform_number"];

impl Parameter {
    pub fn spec(self) -> &'static ParameterSpec {
        PARAMETERS
            .iter()
            .find(|s| s.parameter == self)
            .unwrap_or(&PARAMETERS[0])
    }

    pub fn canonical(self) -> &'static str {
        self.spec().canonical
    }

    pub fn all() -> impl Iterator<Item = Parameter> {
        PARAMETERS.iter().map(|s| s.parameter)
    }

    /// Look up a parameter by its canonical name (e.g. `"PSAL"`).
    pub fn from_canonical(name: &str) -> Option<Parameter> {
        PARAMETERS
            .iter()
            .find(|s| s.canonical == name)
            .map(|s| s.parameter)
    }
}

/// Return the first alias that names an available variable.
pub fn resolve<'a>(aliases: &[&'a str], available: &[String]) -> Option<&'a str> {
    aliases
        .iter()
        .copied()
        .find(|alias| available.iter().any(|name| name == alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolve_prefers_alias_order_over_file_order() {
        let available = names(&["TEMP_ADJUSTED", "temperature", "TEMP"]);
        let spec = Parameter::Temp.spec();
        assert_eq!(resolve(spec.aliases, &available), Some("TEMP"));
    }

    #[test]
    fn resolve_falls_through_to_later_alias() {
        let available = names(&["PRES", "salt"]);
        assert_eq!(resolve(Parameter::Psal.spec().aliases, &available), Some("salt"));
        assert_eq!(resolve(LATITUDE_ALIASES, &available), None);
    }

    #[test]
    fn resolve_is_case_sensitive_per_alias() {
        let available = names(&["Lat"]);
        assert_eq!(resolve(LATITUDE_ALIASES, &available), None);
        let available = names(&["LAT"]);
        assert_eq!(resolve(LATITUDE_ALIASES, &available), Some("LAT"));
    }

    #[test]
    fn every_parameter_has_a_spec_row() {
        for p in [
            Parameter::Temp,
            Parameter::Psal,
            Parameter::Pres,
            Parameter::Doxy,
            Parameter::Chla,
            Parameter::Nitrate,
            Parameter::PhInSitu,
            Parameter::Bbp700,
        ] {
            assert_eq!(p.spec().parameter, p);
            assert_eq!(Parameter::from_canonical(p.canonical()), Some(p));
            let (lo, hi) = p.spec().valid_range;
            assert!(lo < hi);
        }
    }
}
