use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::outreach::extractor::ExtractionError;
use crate::outreach::generator::GenerationError;
use crate::outreach::pipeline::PipelineFailure;
use crate::sources::document_reader::DocumentReadError;
use crate::sources::page_fetcher::FetchError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Pipeline(#[from] PipelineFailure),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Pipeline(failure) => {
                let (status, code) = pipeline_status(failure);
                (status, code, failure.user_message())
            }
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred".to_string(),
            ),
        }
    }
}

fn pipeline_status(failure: &PipelineFailure) -> (StatusCode, &'static str) {
    match failure {
        PipelineFailure::Fetch(FetchError::InvalidUrl(_)) => {
            (StatusCode::BAD_REQUEST, "FETCH_FAILED")
        }
        PipelineFailure::Fetch(FetchError::MissingSessionCookies { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "FETCH_FAILED")
        }
        PipelineFailure::Fetch(_) => (StatusCode::BAD_GATEWAY, "FETCH_FAILED"),
        PipelineFailure::ResumeRead(DocumentReadError::Io { .. }) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "RESUME_READ_FAILED")
        }
        // A parser panic on a malformed upload lands here as a failed blocking task.
        PipelineFailure::ResumeRead(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "RESUME_READ_FAILED")
        }
        PipelineFailure::Extraction(ExtractionError::EmptyInput) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_FAILED")
        }
        PipelineFailure::Extraction(_) => (StatusCode::BAD_GATEWAY, "EXTRACTION_FAILED"),
        PipelineFailure::Generation(GenerationError::Model(_)) => {
            (StatusCode::BAD_GATEWAY, "GENERATION_FAILED")
        }
        PipelineFailure::Generation(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "GENERATION_FAILED")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Pipeline(failure) => tracing::error!("Pipeline error: {failure}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            AppError::Validation(_) | AppError::PayloadTooLarge(_) => {}
        }

        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
