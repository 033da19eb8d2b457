//! Selection state
//!
//! A selection maps every catalog metric to its currently chosen value.

use crate::catalog::MetricCatalog;
use crate::errors::SelectionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Current metric choices, one entry per catalog metric.
///
/// Invariant: every value is legal for its metric. [`Selection::set`] and
/// [`Selection::from_defaults`] preserve it; [`Selection::apply`] relies on
/// its input having been validated by the vector codec.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    values: BTreeMap<String, String>,
}

impl Selection {
    /// Seed a selection from the catalog defaults
    pub fn from_defaults(catalog: &MetricCatalog) -> Self {
        let values = catalog
            .metrics()
            .iter()
            .map(|m| (m.code.to_string(), m.default.to_string()))
            .collect();
        Self { values }
    }

    /// Set every metric back to its catalog default
    pub fn reset_to_defaults(&mut self, catalog: &MetricCatalog) {
        *self = Self::from_defaults(catalog);
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    /// Whether the selection holds an entry for `code`
    pub fn contains(&self, code: &str) -> bool {
        self.values.contains_key(code)
    }

    /// Assign a value after checking it against the catalog.
    ///
    /// Leaves the selection untouched on error.
    pub fn set(
        &mut self,
        catalog: &MetricCatalog,
        code: &str,
        value: &str,
    ) -> Result<(), SelectionError> {
        let metric = catalog
            .get(code)
            .ok_or_else(|| SelectionError::UnknownMetric {
                code: code.to_string(),
            })?;

        if !metric.accepts(value) {
            return Err(SelectionError::IllegalValue {
                code: code.to_string(),
                value: value.to_string(),
            });
        }

        self.values.insert(code.to_string(), value.to_string());
        Ok(())
    }

    /// Overwrite every given metric that already exists in the selection.
    ///
    /// Pairs for metrics the selection does not hold are ignored.
    pub fn apply<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (code, value) in pairs {
            if let Some(slot) = self.values.get_mut(code) {
                *slot = value.to_string();
            }
        }
    }

    /// Copy values of `codes` from `source` into this selection
    pub fn overlay<'a, I>(&mut self, source: &Selection, codes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for code in codes {
            if let Some(value) = source.get(code) {
                self.values.insert(code.to_string(), value.to_string());
            }
        }
    }

    /// Deep copy detached from the live selection
    pub fn snapshot(&self) -> Selection {
        self.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
