//! Scoring oracle
//!
//! The oracle turns a selection and its macro vector into a raw score using
//! the CVSS v4.0 lookup tables. Table contents are data, loaded through
//! [`crate::config::ScoringData`]; the oracle itself is a trait so the full
//! CVSS formula can be supplied by another implementation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use types::macro_vector::MacroVector;
use types::selection::Selection;

use crate::macro_vector::effective_value;

/// Metrics whose effective values decide whether any impact exists
const IMPACT_METRICS: [&str; 6] = ["VC", "VI", "VA", "SC", "SI", "SA"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Macro vector {0} missing from lookup table")]
    UnknownMacroVector(MacroVector),
}

/// Score of every macro vector, keyed by its digit string
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTable(HashMap<String, Decimal>);

impl LookupTable {
    pub fn get(&self, macro_vector: &MacroVector) -> Option<Decimal> {
        self.0.get(&macro_vector.to_string()).copied()
    }

    pub fn insert(&mut self, macro_vector: MacroVector, score: Decimal) {
        self.0.insert(macro_vector.to_string(), score);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MacroVector, Decimal)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (MacroVector, Decimal)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(mv, score)| (mv.to_string(), score))
                .collect(),
        )
    }
}

/// Maximum severity depth of each equivalence class level.
///
/// Keys are class levels as strings, matching the published table layout;
/// EQ3 and EQ6 are jointly indexed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaxSeverityTable {
    pub eq1: BTreeMap<String, u32>,
    pub eq2: BTreeMap<String, u32>,
    pub eq3eq6: BTreeMap<String, BTreeMap<String, u32>>,
    pub eq4: BTreeMap<String, u32>,
    pub eq5: BTreeMap<String, u32>,
}

/// Pure scoring function over a selection and its macro vector
pub trait ScoringOracle: Send + Sync {
    fn score(
        &self,
        selection: &Selection,
        lookup: &LookupTable,
        max_severity: &MaxSeverityTable,
        macro_vector: &MacroVector,
    ) -> Result<Decimal, OracleError>;
}

/// Table-lookup oracle.
///
/// Returns zero when no vulnerable or subsequent system impact exists and the
/// macro vector's table score otherwise. It does not interpolate within a
/// macro vector, so `max_severity` is unused.
#[derive(Debug, Clone, Copy, Default)]
pub struct LookupOracle;

impl ScoringOracle for LookupOracle {
    fn score(
        &self,
        selection: &Selection,
        lookup: &LookupTable,
        _max_severity: &MaxSeverityTable,
        macro_vector: &MacroVector,
    ) -> Result<Decimal, OracleError> {
        let no_impact = IMPACT_METRICS
            .iter()
            .all(|metric| effective_value(selection, metric) == "N");
        if no_impact {
            return Ok(Decimal::ZERO);
        }

        lookup
            .get(macro_vector)
            .ok_or(OracleError::UnknownMacroVector(*macro_vector))
    }
}
