use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::program::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every failure is caught at the handler boundary and mapped here; nothing
/// escapes uncaught. User-facing messages stay French (they are part of the
/// wire contract); the detailed cause goes to the logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Méthode non autorisée")]
    MethodNotAllowed,

    #[error("Clé API manquante")]
    MissingApiKey,

    /// Non-2xx from the generation API. The upstream body is passed through
    /// verbatim as `details`.
    #[error("Upstream error (status {status}): {details}")]
    Upstream { status: u16, details: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => AppError::MissingApiKey,
            LlmError::Api { status, body } => AppError::Upstream {
                status,
                details: body,
            },
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": err.to_string() }),
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": "Méthode non autorisée" }),
            ),
            AppError::MissingApiKey => {
                tracing::error!("generation request refused: API key not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Clé API manquante" }),
                )
            }
            AppError::Upstream { status, details } => {
                tracing::error!("upstream generation API returned {status}: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Erreur lors de la génération du programme",
                        "details": details,
                    }),
                )
            }
            AppError::Internal(err) => {
                tracing::error!("unexpected error during generation: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Erreur lors de la génération du programme",
                        "details": err.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::Validation(ValidationError::MissingFields(vec!["niveau"]));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_method_not_allowed_maps_to_405() {
        let response = AppError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_missing_key_and_upstream_map_to_500() {
        assert_eq!(
            AppError::MissingApiKey.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let upstream = AppError::Upstream {
            status: 529,
            details: "overloaded".to_string(),
        };
        assert_eq!(
            upstream.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_llm_api_error_becomes_upstream() {
        let err: AppError = LlmError::Api {
            status: 500,
            body: "quota exceeded".to_string(),
        }
        .into();
        match err {
            AppError::Upstream { status, details } => {
                assert_eq!(status, 500);
                assert_eq!(details, "quota exceeded");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn test_llm_missing_key_becomes_missing_api_key() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert!(matches!(err, AppError::MissingApiKey));
    }
}
