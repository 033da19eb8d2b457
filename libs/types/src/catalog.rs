//! Metric catalog
//!
//! The catalog is stored in canonical vector order, so it doubles as the
//! expected metric order used by the codec: Base, Threat, Environmental,
//! Supplemental. The leading run of Base metrics is mandatory.

use crate::errors::CatalogError;
use crate::metric::MetricGroup::{
    Base, EnvironmentalModified as Modified, EnvironmentalSecurity as Security, Supplemental,
    Threat,
};
use crate::metric::{MetricDef, MetricGroup};
use serde::Serialize;
use std::collections::HashSet;

/// Literal prefix of every CVSS v4.0 vector string
pub const VECTOR_PREFIX: &str = "CVSS:4.0";

const IMPACT: &[&str] = &["H", "L", "N"];
const MODIFIED_IMPACT: &[&str] = &["X", "H", "L", "N"];
const MODIFIED_SUBSEQUENT_IMPACT: &[&str] = &["X", "S", "H", "L", "N"];
const REQUIREMENT: &[&str] = &["X", "H", "M", "L"];

/// CVSS v4.0 metrics in canonical order
static CVSS_V4_METRICS: [MetricDef; 32] = [
    // Base
    MetricDef::new("AV", "Attack Vector", Base, &["N", "A", "L", "P"], "N"),
    MetricDef::new("AC", "Attack Complexity", Base, &["L", "H"], "L"),
    MetricDef::new("AT", "Attack Requirements", Base, &["N", "P"], "N"),
    MetricDef::new("PR", "Privileges Required", Base, &["N", "L", "H"], "N"),
    MetricDef::new("UI", "User Interaction", Base, &["N", "P", "A"], "N"),
    MetricDef::new("VC", "Vulnerable System Confidentiality Impact", Base, IMPACT, "N"),
    MetricDef::new("VI", "Vulnerable System Integrity Impact", Base, IMPACT, "N"),
    MetricDef::new("VA", "Vulnerable System Availability Impact", Base, IMPACT, "N"),
    MetricDef::new("SC", "Subsequent System Confidentiality Impact", Base, IMPACT, "N"),
    MetricDef::new("SI", "Subsequent System Integrity Impact", Base, IMPACT, "N"),
    MetricDef::new("SA", "Subsequent System Availability Impact", Base, IMPACT, "N"),
    // Threat
    MetricDef::new("E", "Exploit Maturity", Threat, &["X", "A", "P", "U"], "X"),
    // Environmental
    MetricDef::new("CR", "Confidentiality Requirements", Security, REQUIREMENT, "X"),
    MetricDef::new("IR", "Integrity Requirements", Security, REQUIREMENT, "X"),
    MetricDef::new("AR", "Availability Requirements", Security, REQUIREMENT, "X"),
    MetricDef::new("MAV", "Attack Vector", Modified, &["X", "N", "A", "L", "P"], "X"),
    MetricDef::new("MAC", "Attack Complexity", Modified, &["X", "L", "H"], "X"),
    MetricDef::new("MAT", "Attack Requirements", Modified, &["X", "N", "P"], "X"),
    MetricDef::new("MPR", "Privileges Required", Modified, &["X", "N", "L", "H"], "X"),
    MetricDef::new("MUI", "User Interaction", Modified, &["X", "N", "P", "A"], "X"),
    MetricDef::new("MVC", "Vulnerable System Confidentiality Impact", Modified, MODIFIED_IMPACT, "X"),
    MetricDef::new("MVI", "Vulnerable System Integrity Impact", Modified, MODIFIED_IMPACT, "X"),
    MetricDef::new("MVA", "Vulnerable System Availability Impact", Modified, MODIFIED_IMPACT, "X"),
    MetricDef::new("MSC", "Subsequent System Confidentiality Impact", Modified, MODIFIED_IMPACT, "X"),
    MetricDef::new("MSI", "Subsequent System Integrity Impact", Modified, MODIFIED_SUBSEQUENT_IMPACT, "X"),
    MetricDef::new("MSA", "Subsequent System Availability Impact", Modified, MODIFIED_SUBSEQUENT_IMPACT, "X"),
    // Supplemental
    MetricDef::new("S", "Safety", Supplemental, &["X", "N", "P"], "X"),
    MetricDef::new("AU", "Automatable", Supplemental, &["X", "N", "Y"], "X"),
    MetricDef::new("R", "Recovery", Supplemental, &["X", "A", "U", "I"], "X"),
    MetricDef::new("V", "Value Density", Supplemental, &["X", "D", "C"], "X"),
    MetricDef::new("RE", "Vulnerability Response Effort", Supplemental, &["X", "L", "M", "H"], "X"),
    MetricDef::new("U", "Provider Urgency", Supplemental, &["X", "Clear", "Green", "Amber", "Red"], "X"),
];

/// Immutable catalog of selectable metrics.
///
/// Built once and injected wherever metrics are looked up; there is no
/// process-wide instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCatalog {
    metrics: Vec<MetricDef>,
    /// Length of the leading run of required Base metrics
    mandatory: usize,
}

impl MetricCatalog {
    /// Build a catalog from metrics given in canonical order.
    pub fn new(metrics: Vec<MetricDef>) -> Result<Self, CatalogError> {
        if metrics.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for metric in &metrics {
            if !seen.insert(metric.code) {
                return Err(CatalogError::DuplicateCode {
                    code: metric.code.to_string(),
                });
            }
            if !metric.accepts(metric.default) {
                return Err(CatalogError::IllegalDefault {
                    code: metric.code.to_string(),
                    default: metric.default.to_string(),
                });
            }
        }

        let mandatory = metrics
            .iter()
            .take_while(|m| m.group == MetricGroup::Base && !m.is_optional())
            .count();

        Ok(Self { metrics, mandatory })
    }

    /// The standard CVSS v4.0 catalog
    pub fn cvss_v4() -> Self {
        Self {
            metrics: CVSS_V4_METRICS.to_vec(),
            mandatory: 11,
        }
    }

    /// All metrics in canonical order
    pub fn metrics(&self) -> &[MetricDef] {
        &self.metrics
    }

    pub fn get(&self, code: &str) -> Option<&MetricDef> {
        self.metrics.iter().find(|m| m.code == code)
    }

    /// Number of leading entries that every vector must carry
    pub fn mandatory_count(&self) -> usize {
        self.mandatory
    }

    /// Short codes of a group, in canonical order
    pub fn codes_in(&self, group: MetricGroup) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics
            .iter()
            .filter(move |m| m.group == group)
            .map(|m| m.code)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::cvss_v4()
    }
}
