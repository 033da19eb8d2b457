//! Severity classifier.
//! Maps a numeric score to its qualitative CVSS rating and display color.

use crate::numeric::Score;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative severity rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Display color, as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            Severity::None => "#4CAF50",
            Severity::Low => "#8BC34A",
            Severity::Medium => "#FFC107",
            Severity::High => "#FF5722",
            Severity::Critical => "#D32F2F",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

pub struct SeverityClassifier;

impl SeverityClassifier {
    /// Classify a score; intervals are half-open with inclusive lower bounds.
    ///
    /// Expects a score already clamped to [0, 10].
    pub fn classify(score: Decimal) -> Severity {
        if score.is_zero() {
            Severity::None
        } else if score < Decimal::from(4) {
            Severity::Low
        } else if score < Decimal::from(7) {
            Severity::Medium
        } else if score < Decimal::from(9) {
            Severity::High
        } else {
            Severity::Critical
        }
    }
}

/// A rounded score together with its rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: Score,
    pub severity: Severity,
    #[serde(rename = "severity_label")]
    pub label: &'static str,
    pub color: &'static str,
}

impl ScoreResult {
    pub fn new(score: Score) -> Self {
        let severity = SeverityClassifier::classify(score.as_decimal());
        Self {
            score,
            severity,
            label: severity.label(),
            color: severity.color(),
        }
    }
}
