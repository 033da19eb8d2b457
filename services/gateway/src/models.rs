use scoring_engine::category::{CategoryScore, ChartData};
use scoring_engine::session::{Applied, ScoreReport};
use serde::{Deserialize, Serialize};
use types::macro_vector::MacroVector;
use types::metric::{MetricDef, MetricGroup};
use types::severity::ScoreResult;

#[derive(Debug, Clone, Deserialize)]
pub struct VectorRequest {
    pub vector: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricValueRequest {
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub engine_version: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub prefix: &'static str,
    pub mandatory: usize,
    pub metrics: Vec<MetricDef>,
    pub groups: Vec<GroupCodes>,
}

/// Short codes of one metric group, in canonical order
#[derive(Debug, Clone, Serialize)]
pub struct GroupCodes {
    pub group: MetricGroup,
    pub label: &'static str,
    pub codes: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VectorResponse {
    pub vector: String,
    pub macro_vector: MacroVector,
    pub overall: ScoreResult,
}

/// Full score report plus the chart series for the categories
#[derive(Debug, Clone, Serialize)]
pub struct ScoresResponse {
    #[serde(flatten)]
    pub report: ScoreReport,
    pub chart: ChartData,
}

impl From<ScoreReport> for ScoresResponse {
    fn from(report: ScoreReport) -> Self {
        let chart = ChartData::from_scores(&report.categories);
        Self { report, chart }
    }
}

/// Scores attached to an applied change
#[derive(Debug, Clone, Serialize)]
pub struct ChangeScores {
    pub overall: ScoreResult,
    pub categories: Vec<CategoryScore>,
    pub chart: ChartData,
}

/// Response to an accepted change. Scores are absent when the loaded tables
/// cannot score the new selection; the change is applied either way.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedResponse {
    pub applied: bool,
    pub vector: String,
    pub macro_vector: MacroVector,
    #[serde(flatten)]
    pub scores: Option<ChangeScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_error: Option<String>,
}

impl From<Applied> for AppliedResponse {
    fn from(applied: Applied) -> Self {
        let (scores, scoring_error) = match applied.scores {
            Ok(report) => (
                Some(ChangeScores {
                    overall: report.overall,
                    chart: ChartData::from_scores(&report.categories),
                    categories: report.categories,
                }),
                None,
            ),
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            applied: true,
            vector: applied.vector,
            macro_vector: applied.macro_vector,
            scores,
            scoring_error,
        }
    }
}
