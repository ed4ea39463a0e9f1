use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::pipeline::validation::ValidationError;
use crate::scraper::ScrapeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable input: {0}")]
    UnprocessableEntity(String),

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Generation error: {0}")]
    Llm(String),

    #[error("Scraper error: {0}")]
    Scraper(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::RateLimited { attempts } => {
                tracing::warn!("Generation rate limited after {attempts} attempts");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "RATE_LIMITED",
                    "The generation service is currently rate limited. Please try again later."
                        .to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("Generation error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "GENERATION_ERROR",
                    "The generation service returned unusable output. Please try again, or use a different reference URL.".to_string(),
                )
            }
            AppError::Scraper(msg) => {
                tracing::error!("Scraper error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCRAPER_ERROR",
                    "The scraping service could not be reached".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
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

/// Validation gate failures are user-correctable: the input itself is
/// unusable, so the descriptive message passes straight through as a 422.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::UnprocessableEntity(err.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::ResourceExhausted { attempts } => AppError::RateLimited { attempts },
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl From<ScrapeError> for AppError {
    fn from(err: ScrapeError) -> Self {
        AppError::Scraper(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_unprocessable() {
        let err: AppError = ValidationError::ClientSideCrash.into();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[test]
    fn test_resource_exhausted_maps_to_rate_limited() {
        let err: AppError = LlmError::ResourceExhausted { attempts: 3 }.into();
        assert!(matches!(err, AppError::RateLimited { attempts: 3 }));
    }

    #[test]
    fn test_empty_response_maps_to_llm() {
        let err: AppError = LlmError::EmptyResponse.into();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
