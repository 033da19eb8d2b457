//! Metric definitions
//!
//! A metric is one CVSS v4.0 dimension (e.g. Attack Vector) with a closed,
//! ordered set of letter-coded values and a default.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value marking an optional metric as "not defined".
///
/// Metrics holding this value are omitted from the canonical vector string.
pub const NOT_DEFINED: &str = "X";

/// Metric group as defined by CVSS v4.0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricGroup {
    /// Mandatory exploitability and impact metrics
    Base,
    /// Supplemental metrics (Safety, Automatable, ...)
    Supplemental,
    /// Environmental metrics overriding Base values (MAV, MAC, ...)
    EnvironmentalModified,
    /// Environmental security requirements (CR, IR, AR)
    EnvironmentalSecurity,
    /// Threat metrics (Exploit Maturity)
    Threat,
}

impl MetricGroup {
    /// All groups, in declaration order
    pub const ALL: [MetricGroup; 5] = [
        MetricGroup::Base,
        MetricGroup::Supplemental,
        MetricGroup::EnvironmentalModified,
        MetricGroup::EnvironmentalSecurity,
        MetricGroup::Threat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricGroup::Base => "Base",
            MetricGroup::Supplemental => "Supplemental",
            MetricGroup::EnvironmentalModified => "Environmental (Modified Base)",
            MetricGroup::EnvironmentalSecurity => "Environmental (Security Requirements)",
            MetricGroup::Threat => "Threat",
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static definition of a single metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricDef {
    /// Short code used in the vector string (e.g. "AV")
    pub code: &'static str,
    /// Human readable name (e.g. "Attack Vector")
    pub name: &'static str,
    pub group: MetricGroup,
    /// Legal values in display order
    pub values: &'static [&'static str],
    pub default: &'static str,
}

impl MetricDef {
    pub const fn new(
        code: &'static str,
        name: &'static str,
        group: MetricGroup,
        values: &'static [&'static str],
        default: &'static str,
    ) -> Self {
        Self {
            code,
            name,
            group,
            values,
            default,
        }
    }

    /// Check whether `value` is one of this metric's legal values.
    ///
    /// Matching is exact: the catalog fixes the case of every value.
    pub fn accepts(&self, value: &str) -> bool {
        self.values.iter().any(|v| *v == value)
    }

    /// Whether the metric can be left "not defined"
    pub fn is_optional(&self) -> bool {
        self.accepts(NOT_DEFINED)
    }
}
