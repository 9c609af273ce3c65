//! Upload, job and analysis endpoints.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::JobPosting;
use crate::analysis::{analyze_job, analyze_resume, JobProfile, ResumeProfile};
use crate::errors::AppError;
use crate::extraction::{extract_text, ExtractedText, Upload};
use crate::generation::TemplateId;
use crate::jobs::{fetch_job_description, validate_url, FetchedJob};
use crate::pipeline::{run_analysis, run_upload_pipeline, AnalysisOutcome, UploadOutcome};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobTextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct JobFetchRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_text: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub extracted: ExtractedText,
    pub profile: ResumeProfile,
}

// ────────────────────────────────────────────────────────────────────────────
// Multipart
// ────────────────────────────────────────────────────────────────────────────

/// Fields of an upload form; text fields other than the known ones are ignored.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Upload>,
    job_description: Option<String>,
    template: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart, max_bytes: usize) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes: Bytes = field.bytes().await.map_err(multipart_error)?;
                if bytes.len() > max_bytes {
                    return Err(AppError::PayloadTooLarge(format!(
                        "file is {} bytes; the limit is {} bytes",
                        bytes.len(),
                        max_bytes
                    )));
                }
                if bytes.is_empty() {
                    return Err(AppError::Validation("uploaded file is empty".to_string()));
                }
                form.file = Some(Upload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            "job_description" => form.job_description = Some(field.text().await.map_err(multipart_error)?),
            "template" => form.template = Some(field.text().await.map_err(multipart_error)?),
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("invalid multipart body: {}", e.body_text()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/upload
pub async fn handle_resume_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let form = read_upload_form(multipart, state.config.max_upload_bytes).await?;
    let upload = form
        .file
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;

    let extracted = extract_text(upload).await?;
    let profile = analyze_resume(&extracted.text)?;
    info!(
        "Analyzed uploaded résumé: {} skills, {} experience entries",
        profile.skills.total(),
        profile.experience.len()
    );

    Ok(Json(ResumeUploadResponse { extracted, profile }))
}

/// POST /api/v1/jobs/analyze
pub async fn handle_job_analyze(Json(request): Json<JobTextRequest>) -> Result<Json<JobProfile>, AppError> {
    Ok(Json(analyze_job(&request.text)?))
}

/// POST /api/v1/jobs/fetch
pub async fn handle_job_fetch(
    State(state): State<AppState>,
    Json(request): Json<JobFetchRequest>,
) -> Result<Json<FetchedJob>, AppError> {
    validate_url(&request.url).map_err(|e| AppError::Validation(e.to_string()))?;

    let fetched = fetch_job_description(
        &state.http,
        state.ai.as_ref(),
        &request.url,
        state.fetch_timeout(),
    )
    .await?;
    Ok(Json(fetched))
}

/// POST /api/v1/jobs/posting
///
/// Structured posting fields read by the AI model. Requires an AI key.
pub async fn handle_job_posting(
    State(state): State<AppState>,
    Json(request): Json<JobFetchRequest>,
) -> Result<Json<JobPosting>, AppError> {
    let ai = state.ai.as_ref().ok_or(AppError::AiUnavailable)?;
    let url = validate_url(&request.url).map_err(|e| AppError::Validation(e.to_string()))?;
    let posting = ai.analyze_job_posting(url.as_str()).await?;
    Ok(Json(posting))
}

/// POST /api/v1/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisOutcome>, AppError> {
    let outcome = run_analysis(&state, &request.resume_text, &request.job_text).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/analysis/upload
///
/// Full pipeline. An unknown `template` falls back to the default template.
pub async fn handle_analysis_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadOutcome>, AppError> {
    let form = read_upload_form(multipart, state.config.max_upload_bytes).await?;
    let upload = form
        .file
        .ok_or_else(|| AppError::Validation("multipart field 'file' is required".to_string()))?;
    let job_text = form
        .job_description
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("multipart field 'job_description' is required".to_string()))?;

    let template = match form.template.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => TemplateId::default(),
        Some(raw) => TemplateId::parse(raw).unwrap_or_else(|_| {
            warn!("Unknown template '{}', using {}", raw, TemplateId::default().as_str());
            TemplateId::default()
        }),
    };

    let outcome = run_upload_pipeline(&state, upload, &job_text, template).await?;
    Ok(Json(outcome))
}
