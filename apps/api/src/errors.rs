use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::planner::errors::PlannerError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn session_not_found(id: Uuid) -> Self {
        AppError::NotFound(format!("Session {id} not found"))
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::InvalidSelection
            | PlannerError::UnknownLabel { .. }
            | PlannerError::UnknownSkill(_) => {
                AppError::Validation(err.to_string())
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(anyhow::anyhow!("Generation task failed: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_label_maps_to_validation() {
        let err: AppError = PlannerError::UnknownLabel {
            kind: "preparation time",
            value: "forever".to_string(),
        }
        .into();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("forever")));
    }

    #[test]
    fn test_unknown_skill_maps_to_validation() {
        let err: AppError = PlannerError::UnknownSkill("Docker".to_string()).into();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("Docker")));
    }

    #[test]
    fn test_ai_failures_map_to_internal() {
        let err: AppError = PlannerError::EmptyResponse.into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::session_not_found(Uuid::nil()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }
}
