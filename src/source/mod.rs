//! Read access to self-describing array files.
//!
//! The [`ArraySource`] trait is everything the extractor needs from a
//! measurement file: the list of variable names, numeric values flattened
//! to `f64`, and a few attributes. [`NetcdfSource`] reads real NetCDF files;
//! [`MemorySource`] holds arrays built in code, for tests and for
//! collaborators that already decoded a file elsewhere.
//!
//! A source owns its underlying handle. Dropping the source releases it,
//! on success and error paths alike.

pub mod memory;
pub mod netcdf_file;

pub use memory::MemorySource;
pub use netcdf_file::NetcdfSource;

use thiserror::Error;

/// Failure reading a source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot open file: {0}")]
    Open(String),
    #[error("cannot read variable '{variable}': {message}")]
    Read { variable: String, message: String },
}

/// An attribute value reduced to the two shapes the extractor cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(f64),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s.as_str()),
            AttrValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Named-array access used by the profile extractor.
pub trait ArraySource {
    /// Label used for provenance and error messages (usually the file name).
    fn label(&self) -> &str;

    /// Every variable name in the source, in file order.
    fn variable_names(&self) -> Vec<String>;

    /// Read a numeric variable, flattened in storage order.
    ///
    /// Returns `Ok(None)` when the variable does not exist.
    fn read_values(&self, variable: &str) -> Result<Option<Vec<f64>>, SourceError>;

    /// A variable attribute such as `units` or `_FillValue`.
    fn variable_attribute(&self, variable: &str, attribute: &str) -> Option<AttrValue>;

    /// A global (file-level) attribute.
    fn global_attribute(&self, attribute: &str) -> Option<AttrValue>;

    /// A character variable decoded as trimmed text, if present and readable.
    fn read_text(&self, variable: &str) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_value_number_from_text() {
        assert_eq!(AttrValue::Text(" 99999.0 ".into()).as_number(), Some(99999.0));
        assert_eq!(AttrValue::Number(1.5).as_text(), None);
    }
}
