use crate::error::AppError;
use crate::models::ScoresResponse;
use crate::state::AppState;
use axum::{extract::State, Json};

/// Overall score plus the five independent category scores
pub async fn get_scores(State(state): State<AppState>) -> Result<Json<ScoresResponse>, AppError> {
    let report = state.session()?.report()?;
    Ok(Json(report.into()))
}
