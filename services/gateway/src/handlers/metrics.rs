use crate::error::AppError;
use crate::models::{MetricValueRequest, AppliedResponse};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn put_metric(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(payload): Json<MetricValueRequest>,
) -> Result<Json<AppliedResponse>, AppError> {
    if payload.value.is_empty() {
        return Err(AppError::BadRequest("Metric value must not be empty".into()));
    }

    let applied = state.session()?.set_metric(&code, &payload.value)?;
    Ok(Json(applied.into()))
}
