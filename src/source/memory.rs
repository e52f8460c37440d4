//! In-memory [`ArraySource`] for tests and pre-decoded data.
//!
//! Variables keep insertion order so `variable_names` behaves like a file
//! listing. A variable can be marked unreadable to exercise read failures.

use std::collections::BTreeMap;

use super::{ArraySource, AttrValue, SourceError};

#[derive(Debug, Clone, Default)]
struct MemoryVariable {
    values: Vec<f64>,
    attributes: BTreeMap<String, AttrValue>,
    unreadable: bool,
}

/// Arrays and attributes held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    label: String,
    variables: Vec<(String, MemoryVariable)>,
    text_variables: BTreeMap<String, String>,
    globals: BTreeMap<String, AttrValue>,
}

impl MemorySource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Add (or replace) a numeric variable.
    pub fn with_variable(mut self, name: &str, values: Vec<f64>) -> Self {
        match self.variables.iter_mut().find(|(n, _)| n == name) {
            Some((_, var)) => var.values = values,
            None => self.variables.push((
                name.to_string(),
                MemoryVariable {
                    values,
                    ..Default::default()
                },
            )),
        }
        self
    }

    pub fn with_attribute(mut self, variable: &str, attribute: &str, value: AttrValue) -> Self {
        if let Some((_, var)) = self.variables.iter_mut().find(|(n, _)| n == variable) {
            var.attributes.insert(attribute.to_string(), value);
        }
        self
    }

    pub fn with_units(self, variable: &str, units: &str) -> Self {
        self.with_attribute(variable, "units", AttrValue::Text(units.to_string()))
    }

    pub fn with_global(mut self, attribute: &str, value: AttrValue) -> Self {
        self.globals.insert(attribute.to_string(), value);
        self
    }

    pub fn with_text(mut self, variable: &str, text: &str) -> Self {
        self.text_variables
            .insert(variable.to_string(), text.to_string());
        self
    }

    /// Declare a variable that exists but fails to read.
    pub fn with_unreadable(mut self, name: &str) -> Self {
        self.variables.push((
            name.to_string(),
            MemoryVariable {
                unreadable: true,
                ..Default::default()
            },
        ));
        self
    }
}

impl ArraySource for MemorySource {
    fn label(&self) -> &str {
        &self.label
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables
            .iter()
            .map(|(n, _)| n.clone())
            .chain(self.text_variables.keys().cloned())
            .collect()
    }

    fn read_values(&self, variable: &str) -> Result<Option<Vec<f64>>, SourceError> {
        match self.variables.iter().find(|(n, _)| n == variable) {
            Some((_, var)) if var.unreadable => Err(SourceError::Read {
                variable: variable.to_string(),
                message: "variable marked unreadable".to_string(),
            }),
            Some((_, var)) => Ok(Some(var.values.clone())),
            None => Ok(None),
        }
    }

    fn variable_attribute(&self, variable: &str, attribute: &str) -> Option<AttrValue> {
        self.variables
            .iter()
            .find(|(n, _)| n == variable)
            .and_then(|(_, var)| var.attributes.get(attribute).cloned())
    }

    fn global_attribute(&self, attribute: &str) -> Option<AttrValue> {
        self.globals.get(attribute).cloned()
    }

    fn read_text(&self, variable: &str) -> Option<String> {
        self.text_variables
            .get(variable)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variables_keep_insertion_order() {
        let src = MemorySource::new("t")
            .with_variable("TEMP", vec![1.0])
            .with_variable("LATITUDE", vec![2.0])
            .with_text("PLATFORM_NUMBER", "2902114 ");
        assert_eq!(
            src.variable_names(),
            vec!["TEMP", "LATITUDE", "PLATFORM_NUMBER"]
        );
        assert_eq!(src.read_text("PLATFORM_NUMBER").as_deref(), Some("2902114"));
    }

    #[test]
    fn missing_and_unreadable_variables() {
        let src = MemorySource::new("t").with_unreadable("PSAL");
        assert!(src.read_values("TEMP").unwrap().is_none());
        assert!(matches!(
            src.read_values("PSAL"),
            Err(SourceError::Read { .. })
        ));
    }

    #[test]
    fn attributes_attach_to_existing_variables_only() {
        let src = MemorySource::new("t")
            .with_variable("TEMP", vec![])
            .with_units("TEMP", "degree_Celsius")
            .with_units("PSAL", "psu");
        assert_eq!(
            src.variable_attribute("TEMP", "units"),
            Some(AttrValue::Text("degree_Celsius".into()))
        );
        assert_eq!(src.variable_attribute("PSAL", "units"), None);
    }
}
