use crate::error::AppError;
use crate::models::{AppliedResponse, VectorRequest, VectorResponse};
use crate::state::AppState;
use axum::{extract::State, Json};

pub async fn get_vector(State(state): State<AppState>) -> Result<Json<VectorResponse>, AppError> {
    let session = state.session()?;
    let overall = session
        .score()
        .map_err(|e| AppError::ServiceUnavailable(e.to_string()))?;

    Ok(Json(VectorResponse {
        vector: session.vector(),
        macro_vector: session.macro_vector(),
        overall,
    }))
}

/// Decode and commit a vector. A rejected vector leaves the session as it was.
pub async fn put_vector(
    State(state): State<AppState>,
    Json(payload): Json<VectorRequest>,
) -> Result<Json<AppliedResponse>, AppError> {
    let applied = state.session()?.load_vector(&payload.vector)?;
    Ok(Json(applied.into()))
}

pub async fn reset(State(state): State<AppState>) -> Result<Json<AppliedResponse>, AppError> {
    let applied = state.session()?.reset_to_defaults();
    Ok(Json(applied.into()))
}
