use crate::models::{CatalogResponse, GroupCodes, HealthResponse};
use crate::state::AppState;
use axum::{extract::State, Json};
use types::catalog::VECTOR_PREFIX;
use types::metric::MetricGroup;

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        engine_version: scoring_engine::SERVICE_VERSION,
    })
}

/// Metrics, legal values and defaults in canonical vector order
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        prefix: VECTOR_PREFIX,
        mandatory: state.catalog.mandatory_count(),
        metrics: state.catalog.metrics().to_vec(),
        groups: MetricGroup::ALL
            .iter()
            .map(|&group| GroupCodes {
                group,
                label: group.as_str(),
                codes: state.catalog.codes_in(group).collect(),
            })
            .collect(),
    })
}
