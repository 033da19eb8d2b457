//! Scoring data configuration
//!
//! The lookup and max-severity tables are plain data, loaded once from a
//! JSON document and injected into every session.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::oracle::{LookupTable, MaxSeverityTable};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read scoring data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid scoring data {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tables consumed by the scoring oracle
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringData {
    pub lookup: LookupTable,
    #[serde(default)]
    pub max_severity: MaxSeverityTable,
}

impl ScoringData {
    pub fn new(lookup: LookupTable, max_severity: MaxSeverityTable) -> Self {
        Self {
            lookup,
            max_severity,
        }
    }

    /// Load tables from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let data: ScoringData = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            path = %path.display(),
            lookup_entries = data.lookup.len(),
            "Scoring data loaded"
        );
        Ok(data)
    }
}
