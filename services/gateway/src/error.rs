use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scoring_engine::session::SessionError;
use serde_json::json;
use thiserror::Error;
use types::errors::SelectionError;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Well-formed request the calculator refused; carries the rejection code
    #[error("{message}")]
    Unprocessable { code: &'static str, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Vector(err) => AppError::Unprocessable {
                code: err.code(),
                message: err.to_string(),
            },
            SessionError::Selection(err @ SelectionError::UnknownMetric { .. }) => {
                AppError::NotFound(err.to_string())
            }
            SessionError::Selection(err @ SelectionError::IllegalValue { .. }) => {
                AppError::Unprocessable {
                    code: "ILLEGAL_METRIC_VALUE",
                    message: err.to_string(),
                }
            }
            // The selection is valid but the loaded tables cannot score it
            SessionError::Scoring(err) => AppError::ServiceUnavailable(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::Unprocessable { code, message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, code)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, msg, "SCORING_UNAVAILABLE")
            }
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::errors::VectorError;

    #[test]
    fn test_vector_rejection_keeps_code() {
        let err = AppError::from(SessionError::Vector(VectorError::MalformedPrefix {
            found: "CVSS:3.1".into(),
        }));
        match err {
            AppError::Unprocessable { code, .. } => assert_eq!(code, "MALFORMED_PREFIX"),
            other => panic!("Expected Unprocessable, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_metric_is_not_found() {
        let err = AppError::from(SessionError::Selection(SelectionError::UnknownMetric {
            code: "XX".into(),
        }));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_illegal_value_is_unprocessable() {
        let err = AppError::from(SessionError::Selection(SelectionError::IllegalValue {
            code: "AV".into(),
            value: "Z".into(),
        }));
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
