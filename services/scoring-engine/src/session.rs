//! Calculator session orchestrator
//!
//! Owns the live selection and ties together the codec, macro-vector
//! derivation, category scoring and event emission. Everything a session
//! needs (catalog, scoring tables, deriver, oracle) is injected at
//! construction.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use types::catalog::MetricCatalog;
use types::errors::{SelectionError, VectorError};
use types::ids::SessionId;
use types::macro_vector::MacroVector;
use types::numeric::Score;
use types::selection::Selection;
use types::severity::ScoreResult;

use crate::category::{CategoryScore, CategoryScorer, ChartData};
use crate::codec;
use crate::config::ScoringData;
use crate::events::{self, SessionEvent, SessionEventKind};
use crate::macro_vector::{Cvss4MacroVectorDeriver, MacroVectorDeriver};
use crate::oracle::{LookupOracle, OracleError, ScoringOracle};

/// Callback invoked with every session event
pub type Listener = Box<dyn FnMut(&SessionEvent) + Send>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Vector rejected: {0}")]
    Vector(#[from] VectorError),

    #[error("Scoring error: {0}")]
    Scoring(#[from] OracleError),
}

/// Scores of the live selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    pub vector: String,
    pub macro_vector: MacroVector,
    /// Score of the full selection
    pub overall: ScoreResult,
    /// Per-category scores in display order
    pub categories: Vec<CategoryScore>,
}

/// Outcome of an accepted change.
///
/// The change is committed even when the scoring tables cannot score the new
/// selection; that failure is carried in `scores`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub vector: String,
    pub macro_vector: MacroVector,
    pub scores: Result<ScoreReport, OracleError>,
}

impl Applied {
    pub fn is_scored(&self) -> bool {
        self.scores.is_ok()
    }

    pub fn into_report(self) -> Result<ScoreReport, SessionError> {
        Ok(self.scores?)
    }
}

pub struct Session {
    id: SessionId,
    catalog: Arc<MetricCatalog>,
    data: Arc<ScoringData>,
    deriver: Arc<dyn MacroVectorDeriver>,
    oracle: Arc<dyn ScoringOracle>,
    selection: Selection,
    /// Catalog defaults every category overlay starts from
    defaults: Selection,
    macro_vector: MacroVector,
    listeners: Vec<Listener>,
}

impl Session {
    /// Create a session with the standard deriver and lookup oracle
    pub fn new(catalog: Arc<MetricCatalog>, data: Arc<ScoringData>) -> Self {
        Self::with_components(
            catalog,
            data,
            Arc::new(Cvss4MacroVectorDeriver),
            Arc::new(LookupOracle),
        )
    }

    /// Create a session with custom scoring collaborators
    pub fn with_components(
        catalog: Arc<MetricCatalog>,
        data: Arc<ScoringData>,
        deriver: Arc<dyn MacroVectorDeriver>,
        oracle: Arc<dyn ScoringOracle>,
    ) -> Self {
        let selection = Selection::from_defaults(&catalog);
        let defaults = selection.snapshot();
        let macro_vector = deriver.derive(&selection);
        let id = SessionId::new();

        info!(session_id = %id, metrics = catalog.len(), "Session initialized");

        Self {
            id,
            catalog,
            data,
            deriver,
            oracle,
            selection,
            defaults,
            macro_vector,
            listeners: Vec::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Canonical vector string of the live selection
    pub fn vector(&self) -> String {
        codec::encode(&self.selection, &self.catalog)
    }

    /// Macro vector of the live selection
    pub fn macro_vector(&self) -> MacroVector {
        self.macro_vector
    }

    /// Register a listener notified after every change
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Return every metric to its default and rebuild the default snapshot
    pub fn reset_to_defaults(&mut self) -> Applied {
        self.selection.reset_to_defaults(&self.catalog);
        self.defaults = self.selection.snapshot();
        debug!(session_id = %self.id, "Selection reset to defaults");
        self.commit_change(SessionEventKind::Reset)
    }

    /// Assign one metric; illegal values leave the selection unchanged
    pub fn set_metric(&mut self, code: &str, value: &str) -> Result<Applied, SessionError> {
        self.selection.set(&self.catalog, code, value)?;
        debug!(session_id = %self.id, code, value, "Metric set");
        Ok(self.commit_change(SessionEventKind::MetricSet {
            code: code.to_string(),
            value: value.to_string(),
        }))
    }

    /// Decode `input` and commit it only if the whole vector is valid.
    ///
    /// On rejection the selection is untouched, the reason is logged and a
    /// `VectorRejected` event is emitted. `Err` always means nothing changed.
    pub fn load_vector(&mut self, input: &str) -> Result<Applied, SessionError> {
        let candidate = match codec::decode(input, &self.catalog) {
            Ok(candidate) => candidate,
            Err(err) => {
                warn!(
                    session_id = %self.id,
                    code = err.code(),
                    reason = %err,
                    "Invalid vector ignored"
                );
                self.notify(events::rejection(&err));
                return Err(err.into());
            }
        };

        candidate.commit(&mut self.selection);
        info!(session_id = %self.id, metrics = candidate.len(), "Vector applied");
        Ok(self.commit_change(SessionEventKind::VectorApplied {
            metrics: candidate.len(),
        }))
    }

    /// Score of the full live selection
    pub fn score(&self) -> Result<ScoreResult, OracleError> {
        let raw = self.oracle.score(
            &self.selection,
            &self.data.lookup,
            &self.data.max_severity,
            &self.macro_vector,
        )?;
        Ok(ScoreResult::new(Score::new(raw)))
    }

    /// Independent scores of the five categories, in display order
    pub fn category_scores(&self) -> Result<Vec<CategoryScore>, OracleError> {
        self.scorer().score_all(&self.defaults, &self.selection)
    }

    pub fn chart_data(&self) -> Result<ChartData, OracleError> {
        Ok(ChartData::from_scores(&self.category_scores()?))
    }

    /// Recompute the macro vector and every score, notifying listeners
    pub fn recompute_all(&mut self) -> Applied {
        self.commit_change(SessionEventKind::Recomputed)
    }

    /// Current scores without notifying listeners
    pub fn report(&self) -> Result<ScoreReport, SessionError> {
        Ok(self.score_report()?)
    }

    fn score_report(&self) -> Result<ScoreReport, OracleError> {
        Ok(ScoreReport {
            vector: self.vector(),
            macro_vector: self.macro_vector,
            overall: self.score()?,
            categories: self.category_scores()?,
        })
    }

    fn scorer(&self) -> CategoryScorer<'_> {
        CategoryScorer {
            catalog: &self.catalog,
            deriver: self.deriver.as_ref(),
            oracle: self.oracle.as_ref(),
            lookup: &self.data.lookup,
            max_severity: &self.data.max_severity,
        }
    }

    fn commit_change(&mut self, kind: SessionEventKind) -> Applied {
        self.macro_vector = self.deriver.derive(&self.selection);
        self.notify(kind);

        let scores = self.score_report();
        if let Err(err) = &scores {
            warn!(session_id = %self.id, error = %err, "Change applied but not scored");
        }
        Applied {
            vector: self.vector(),
            macro_vector: self.macro_vector,
            scores,
        }
    }

    fn notify(&mut self, kind: SessionEventKind) {
        let event = SessionEvent::new(self.id, kind, self.vector(), self.macro_vector);
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("vector", &self.vector())
            .field("macro_vector", &self.macro_vector)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
