//! Error types for the CVSS calculator
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Rejection reasons for a decoded vector string.
///
/// Every variant is recoverable: the selection the vector was meant for is
/// left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    #[error("Not a CVSS v4.0 vector: expected prefix CVSS:4.0, found {found:?}")]
    MalformedPrefix { found: String },

    #[error("Unexpected metric {key:?}: too many metrics or wrong order")]
    UnexpectedMetric { key: String },

    #[error("Incomplete base metrics: expected {expected}, found {found:?}")]
    MissingMandatory {
        expected: String,
        found: Option<String>,
    },

    #[error("Illegal value {value:?} for metric {metric}, expected one of {allowed:?}")]
    IllegalValue {
        metric: String,
        value: Option<String>,
        allowed: Vec<String>,
    },
}

impl VectorError {
    /// Stable machine-readable code for the rejection reason
    pub fn code(&self) -> &'static str {
        match self {
            VectorError::MalformedPrefix { .. } => "MALFORMED_PREFIX",
            VectorError::UnexpectedMetric { .. } => "UNEXPECTED_METRIC",
            VectorError::MissingMandatory { .. } => "MISSING_MANDATORY_METRIC",
            VectorError::IllegalValue { .. } => "ILLEGAL_METRIC_VALUE",
        }
    }
}

/// Direct assignment errors on a selection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown metric: {code}")]
    UnknownMetric { code: String },

    #[error("Illegal value {value:?} for metric {code}")]
    IllegalValue { code: String, value: String },
}

/// Configuration-time defects in a metric catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate metric code: {code}")]
    DuplicateCode { code: String },

    #[error("Default {default:?} of metric {code} is not a legal value")]
    IllegalDefault { code: String, default: String },

    #[error("Metric catalog is empty")]
    Empty,
}
