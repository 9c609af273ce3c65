//! Axum route handlers for the generation and export API.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_job, analyze_resume};
use crate::errors::AppError;
use crate::export::{render, ExportFormat};
use crate::generation::generator::{generate_resume, FieldOverrides, GeneratedResume};
use crate::generation::templates::{catalog, TemplateId, TemplateInfo};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub resume_text: String,
    pub job_text: String,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub overrides: Option<FieldOverrides>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub resume: GeneratedResume,
    pub template: TemplateInfo,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub resume: GeneratedResume,
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<TemplateInfo>,
    pub formats: Vec<ExportFormat>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: catalog(),
        formats: ExportFormat::ALL.to_vec(),
    })
}

/// POST /api/v1/resumes/generate
///
/// Analyzes both texts, scores them and populates the chosen template.
/// Unknown template ids are rejected.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let template = match request.template.as_deref() {
        Some(raw) => TemplateId::parse(raw)?,
        None => TemplateId::default(),
    };

    let resume = analyze_resume(&request.resume_text)?;
    let job = analyze_job(&request.job_text)?;
    let report = state.scorer.score(&resume, &job).await?;

    let generated = generate_resume(&resume, &job, &report, template, request.overrides);

    Ok(Json(GenerateResponse {
        resume: generated,
        template: template.info(),
    }))
}

/// POST /api/v1/resumes/export
///
/// Renders a (possibly edited) generated résumé and returns the file itself.
pub async fn handle_export(Json(request): Json<ExportRequest>) -> Result<Response, AppError> {
    if request.resume.fields.name.trim().is_empty() {
        return Err(AppError::Validation("resume.fields.name cannot be empty".to_string()));
    }

    let file = render(&request.resume, request.format).await?;
    let filename = format!(
        "{}_resume.{}",
        request.resume.template.as_str(),
        request.format.extension()
    );

    Ok(file_response(request.format, file.bytes, &filename, Disposition::Attachment))
}

/// GET /api/v1/downloads/:filename
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let (format, bytes) = state.exports.load(&filename).await?;
    Ok(file_response(format, bytes, &filename, Disposition::Attachment))
}

/// GET /api/v1/previews/:filename
///
/// Same file as the download route, served for viewing in the browser.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let (format, bytes) = state.exports.load(&filename).await?;
    Ok(file_response(format, bytes, &filename, Disposition::Inline))
}

#[derive(Debug, Clone, Copy)]
enum Disposition {
    Attachment,
    Inline,
}

fn file_response(format: ExportFormat, bytes: Vec<u8>, filename: &str, disposition: Disposition) -> Response {
    let kind = match disposition {
        Disposition::Attachment => "attachment",
        Disposition::Inline => "inline",
    };
    (
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("{kind}; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
