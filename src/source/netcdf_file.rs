//! NetCDF-backed [`ArraySource`].
//!
//! Numeric variables are read through the netCDF library's type
//! conversion, so `float`, `double` and integer variables all arrive as
//! `f64`. Multi-dimensional variables come back flattened in storage order.

use std::path::Path;

use netcdf::AttributeValue;

use super::{ArraySource, AttrValue, SourceError};

/// An open NetCDF file. The handle closes when this value is dropped.
pub struct NetcdfSource {
    label: String,
    file: netcdf::File,
}

impl NetcdfSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = netcdf::open(path).map_err(|e| SourceError::Open(e.to_string()))?;
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { label, file })
    }
}

fn convert_attribute(value: AttributeValue) -> Option<AttrValue> {
    match value {
        AttributeValue::Str(s) => Some(AttrValue::Text(s)),
        AttributeValue::Strs(list) => list.into_iter().next().map(AttrValue::Text),
        AttributeValue::Double(v) => Some(AttrValue::Number(v)),
        AttributeValue::Float(v) => Some(AttrValue::Number(v as f64)),
        AttributeValue::Int(v) => Some(AttrValue::Number(v as f64)),
        AttributeValue::Short(v) => Some(AttrValue::Number(v as f64)),
        AttributeValue::Longlong(v) => Some(AttrValue::Number(v as f64)),
        AttributeValue::Doubles(v) => v.first().map(|x| AttrValue::Number(*x)),
        AttributeValue::Floats(v) => v.first().map(|x| AttrValue::Number(*x as f64)),
        _ => None,
    }
}

impl ArraySource for NetcdfSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn variable_names(&self) -> Vec<String> {
        self.file.variables().map(|v| v.name()).collect()
    }

    fn read_values(&self, variable: &str) -> Result<Option<Vec<f64>>, SourceError> {
        let var = match self.file.variable(variable) {
            Some(v) => v,
            None => return Ok(None),
        };
        let values = var
            .get_values::<f64, _>(..)
            .map_err(|e| SourceError::Read {
                variable: variable.to_string(),
                message: e.to_string(),
            })?;
        Ok(Some(values))
    }

    fn variable_attribute(&self, variable: &str, attribute: &str) -> Option<AttrValue> {
        let var = self.file.variable(variable)?;
        let attr = var.attribute(attribute)?;
        attr.value().ok().and_then(convert_attribute)
    }

    fn global_attribute(&self, attribute: &str) -> Option<AttrValue> {
        let attr = self.file.attribute(attribute)?;
        attr.value().ok().and_then(convert_attribute)
    }

    fn read_text(&self, variable: &str) -> Option<String> {
        let var = self.file.variable(variable)?;
        let len: usize = var.dimensions().iter().map(|d| d.len()).product();
        if len == 0 {
            return None;
        }
        let mut buf = vec![0_u8; len];
        var.get_raw_values(&mut buf, ..).ok()?;
        let text = String::from_utf8_lossy(&buf);
        text.split(|c: char| c == '\0' || c.is_whitespace())
            .find(|part| !part.is_empty())
            .map(|part| part.to_string())
    }
}
