//! Axum route handlers for the outreach API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::outreach::generator::{GeneratedOutput, GenerationMode};
use crate::outreach::job_record::JobRecord;
use crate::outreach::pipeline::{PipelineFailure, PipelineOutcome};
use crate::outreach::presenter::Presentation;
use crate::sources::document_reader::ResumeSource;
use crate::state::AppState;

/// Body limit for the multipart upload route (axum's default is 2 MB).
pub const MAX_RESUME_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractJobRequest {
    pub raw_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractJobResponse {
    pub job_record: JobRecord,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub job_url: String,
    #[serde(default)]
    pub mode: GenerationMode,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub run_id: Uuid,
    pub job_record: JobRecord,
    pub output: GeneratedOutput,
    pub presentation: Presentation,
    pub generated_at: DateTime<Utc>,
}

impl GenerateResponse {
    fn new(state: &AppState, outcome: PipelineOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            presentation: state.presenter.display(&outcome.output),
            job_record: outcome.job_record,
            output: outcome.output,
            generated_at: Utc::now(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/extract
///
/// Structures raw posting text without generating anything.
/// Useful for previewing extraction before a full run.
pub async fn handle_extract_job(
    State(state): State<AppState>,
    Json(request): Json<ExtractJobRequest>,
) -> Result<Json<ExtractJobResponse>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::Validation("raw_text cannot be empty".to_string()));
    }

    let job_record = state
        .pipeline
        .extractor()
        .extract(&request.raw_text)
        .await
        .map_err(PipelineFailure::Extraction)?;

    Ok(Json(ExtractJobResponse { job_record }))
}

/// POST /api/v1/outreach/generate
///
/// Full run against the configured resume: fetch → read → extract → generate.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    if request.job_url.trim().is_empty() {
        return Err(AppError::Validation("job_url cannot be empty".to_string()));
    }

    let resume = ResumeSource::Path(state.default_resume.clone());
    let outcome = state
        .pipeline
        .run(&request.job_url, &resume, request.mode)
        .await?;

    Ok(Json(GenerateResponse::new(&state, outcome)))
}

/// POST /api/v1/outreach/generate/upload
///
/// Multipart variant: fields `job_url`, optional `mode`, and a `resume` file.
/// Falls back to the configured resume when no file is attached.
pub async fn handle_generate_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut job_url: Option<String> = None;
    let mut mode = GenerationMode::default();
    let mut upload: Option<(Option<String>, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_url" => job_url = Some(read_text_field(field).await?),
            "mode" => mode = parse_mode(&read_text_field(field).await?)?,
            "resume" => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Failed to read resume upload", e))?;
                if !bytes.is_empty() {
                    upload = Some((file_name, bytes));
                }
            }
            _ => {}
        }
    }

    let job_url = job_url
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_url cannot be empty".to_string()))?;

    let resume = match upload {
        Some((file_name, bytes)) => ResumeSource::Blob { file_name, bytes },
        None => ResumeSource::Path(state.default_resume.clone()),
    };

    let outcome = state.pipeline.run(&job_url, &resume, mode).await?;

    Ok(Json(GenerateResponse::new(&state, outcome)))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error("Invalid multipart field", e))
}

/// Length-limit failures become 413; anything else is a malformed request.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(format!(
            "Resume upload exceeds the {} MB limit",
            MAX_RESUME_UPLOAD_BYTES / (1024 * 1024)
        ));
    }
    AppError::Validation(format!("{context}: {err}"))
}

fn parse_mode(raw: &str) -> Result<GenerationMode, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "extended" => Ok(GenerationMode::Extended),
        "simple" => Ok(GenerationMode::Simple),
        other => Err(AppError::Validation(format!(
            "mode must be 'simple' or 'extended', got '{other}'"
        ))),
    }
}
