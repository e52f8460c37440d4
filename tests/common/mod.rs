#![allow(dead_code)]

use std::path::Path;

/// One synthetic ARGO profile written as a NetCDF file.
pub struct ProfileFile<'a> {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Days since 1950-01-01.
    pub juld: Option<f64>,
    /// A CF `time` variable: offset and its units string.
    pub time: Option<(f64, &'a str)>,
    pub temp: &'a [f64],
    pub psal: &'a [f64],
    pub platform: Option<&'a str>,
}

impl Default for ProfileFile<'_> {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            juld: None,
            time: None,
            temp: &[],
            psal: &[],
            platform: None,
        }
    }
}

pub fn write_profile(path: &Path, profile: &ProfileFile<'_>) {
    let levels = profile.temp.len().max(profile.psal.len()).max(1);
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("N_PROF", 1).unwrap();
    file.add_dimension("N_LEVELS", levels).unwrap();

    if let Some(platform) = profile.platform {
        file.add_attribute("platform_number", platform).unwrap();
    }

    let scalars = [
        ("LATITUDE", profile.latitude, "degree_north"),
        ("LONGITUDE", profile.longitude, "degree_east"),
        ("JULD", profile.juld, "days since 1950-01-01 00:00:00 UTC"),
    ];
    for (name, value, units) in scalars {
        if let Some(value) = value {
            let mut var = file.add_variable::<f64>(name, &["N_PROF"]).unwrap();
            var.put_attribute("units", units).unwrap();
            var.put_values(&[value], ..).unwrap();
        }
    }

    if let Some((offset, units)) = profile.time {
        let mut var = file.add_variable::<f64>("time", &["N_PROF"]).unwrap();
        var.put_attribute("units", units).unwrap();
        var.put_values(&[offset], ..).unwrap();
    }

    let columns = [
        ("TEMP", profile.temp, "degree_Celsius"),
        ("PSAL", profile.psal, "psu"),
    ];
    for (name, values, units) in columns {
        if values.is_empty() {
            continue;
        }
        let mut padded = values.to_vec();
        padded.resize(levels, 99999.0);
        let mut var = file
            .add_variable::<f64>(name, &["N_PROF", "N_LEVELS"])
            .unwrap();
        var.put_attribute("units", units).unwrap();
        var.put_values(&padded, ..).unwrap();
    }
}
