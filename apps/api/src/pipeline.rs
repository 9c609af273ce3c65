//! Request pipelines shared by the HTTP handlers.
//!
//! Analysis: analyze résumé + job → score → suggestions → optional AI review.
//! Upload:   extract text → analysis → generate every template → export every
//!           format → store, returning download links.

use serde::Serialize;
use tracing::{info, warn};

use crate::ai::AiInsights;
use crate::analysis::{analyze_job, analyze_resume, JobProfile, ResumeProfile};
use crate::errors::AppError;
use crate::export::{render, ExportFormat};
use crate::extraction::{extract_text, ExtractedText, Upload};
use crate::generation::{generate_resume, GeneratedResume, TemplateId};
use crate::matching::suggestions::merge_ai_action_items;
use crate::matching::{generate_suggestions, MatchReport, Suggestion};
use crate::state::AppState;
use crate::storage::StoredFile;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub resume: ResumeProfile,
    pub job: JobProfile,
    pub report: MatchReport,
    pub suggestions: Vec<Suggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<AiInsights>,
    /// "ai_enhanced" when the AI review succeeded, otherwise "local".
    pub analysis_method: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedArtifact {
    pub resume: GeneratedResume,
    pub files: Vec<StoredFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadOutcome {
    pub extracted: ExtractedText,
    pub analysis: AnalysisOutcome,
    pub primary: GeneratedArtifact,
    pub alternates: Vec<GeneratedArtifact>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipelines
// ────────────────────────────────────────────────────────────────────────────

pub async fn run_analysis(
    state: &AppState,
    resume_text: &str,
    job_text: &str,
) -> Result<AnalysisOutcome, AppError> {
    let resume = analyze_resume(resume_text)?;
    let job = analyze_job(job_text)?;

    let report = state.scorer.score(&resume, &job).await?;
    info!(
        "Match score {:.1} ({:?}) via {}",
        report.overall_score, report.match_strength, report.scorer_backend
    );

    let mut suggestions = generate_suggestions(&report, &resume, &job);

    let mut ai_insights = None;
    if let Some(ai) = &state.ai {
        match ai.enhance_analysis(resume_text, job_text).await {
            Ok(insights) => {
                merge_ai_action_items(&mut suggestions, &insights.recommended_action_items);
                ai_insights = Some(insights);
            }
            Err(e) => warn!("AI enhancement failed, continuing with local analysis: {e}"),
        }
    }

    Ok(AnalysisOutcome {
        analysis_method: if ai_insights.is_some() { "ai_enhanced" } else { "local" },
        resume,
        job,
        report,
        suggestions,
        ai_insights,
    })
}

/// Renders one generated résumé in every format and stores the files.
pub async fn export_all(state: &AppState, resume: &GeneratedResume) -> Result<Vec<StoredFile>, AppError> {
    let mut files = Vec::with_capacity(ExportFormat::ALL.len());
    for format in ExportFormat::ALL {
        let rendered = render(resume, format).await?;
        files.push(state.exports.save(resume.template, &rendered).await?);
    }
    Ok(files)
}

pub async fn run_upload_pipeline(
    state: &AppState,
    upload: Upload,
    job_text: &str,
    template: TemplateId,
) -> Result<UploadOutcome, AppError> {
    let extracted = extract_text(upload).await?;

    let analysis = run_analysis(state, &extracted.text, job_text).await?;

    let mut artifacts = Vec::with_capacity(TemplateId::ALL.len());
    for id in std::iter::once(template).chain(template.alternates()) {
        let resume = generate_resume(&analysis.resume, &analysis.job, &analysis.report, id, None);
        let files = export_all(state, &resume).await?;
        artifacts.push(GeneratedArtifact { resume, files });
    }
    let mut artifacts = artifacts.into_iter();
    let primary = artifacts
        .next()
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("no résumé was generated")))?;

    Ok(UploadOutcome {
        extracted,
        analysis,
        primary,
        alternates: artifacts.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{SAMPLE_JOB, SAMPLE_RESUME};
    use crate::ai::stub;
    use crate::config::Config;
    use axum::http::StatusCode;
    use bytes::Bytes;
    use serde_json::json;
    use std::sync::atomic::Ordering;

    fn state_in(dir: &std::path::Path) -> AppState {
        let config = Config {
            export_dir: dir.to_path_buf(),
            ..Config::default()
        };
        AppState::new(config).unwrap()
    }

    fn state_with_ai(dir: &std::path::Path, ai_url: String) -> AppState {
        let config = Config {
            export_dir: dir.to_path_buf(),
            ai_api_key: Some("test-key".to_string()),
            ai_api_url: ai_url,
            ..Config::default()
        };
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_ai_failure_falls_back_to_local_analysis() {
        let dir = tempfile::tempdir().unwrap();
        let (url, hits) =
            stub::serve(vec![(StatusCode::INTERNAL_SERVER_ERROR, json!({"error": {"message": "down"}}))]).await;
        let state = state_with_ai(dir.path(), url);

        let outcome = run_analysis(&state, SAMPLE_RESUME, SAMPLE_JOB).await.unwrap();
        assert_eq!(outcome.analysis_method, "local");
        assert!(outcome.ai_insights.is_none());
        assert!(!outcome.suggestions.iter().any(|s| s.category == "ai_recommendation"));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_ai_action_items_are_merged_into_suggestions() {
        let dir = tempfile::tempdir().unwrap();
        let insights = json!({
            "overall_assessment": "Strong backend fit",
            "recommended_action_items": ["Quantify the impact of the Kubernetes migration"]
        });
        let (url, _) = stub::serve(vec![(StatusCode::OK, stub::completion(&insights.to_string()))]).await;
        let state = state_with_ai(dir.path(), url);

        let outcome = run_analysis(&state, SAMPLE_RESUME, SAMPLE_JOB).await.unwrap();
        assert_eq!(outcome.analysis_method, "ai_enhanced");
        let insights = outcome.ai_insights.unwrap();
        assert_eq!(insights.overall_assessment.as_deref(), Some("Strong backend fit"));
        assert!(outcome
            .suggestions
            .iter()
            .any(|s| s.category == "ai_recommendation"
                && s.message == "Quantify the impact of the Kubernetes migration"));
    }

    #[tokio::test]
    async fn test_analysis_without_ai_is_local() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let outcome = run_analysis(&state, SAMPLE_RESUME, SAMPLE_JOB).await.unwrap();
        assert_eq!(outcome.analysis_method, "local");
        assert!(outcome.ai_insights.is_none());
        assert!(!outcome.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_short_job_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let err = run_analysis(&state, SAMPLE_RESUME, "Rust dev").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_upload_pipeline_stores_every_template_and_format() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(dir.path());
        let upload = Upload {
            file_name: Some("resume.txt".to_string()),
            content_type: Some("text/plain".to_string()),
            bytes: Bytes::from_static(SAMPLE_RESUME.as_bytes()),
        };

        let outcome = run_upload_pipeline(&state, upload, SAMPLE_JOB, TemplateId::TechFocused)
            .await
            .unwrap();

        assert_eq!(outcome.primary.resume.template, TemplateId::TechFocused);
        assert_eq!(outcome.alternates.len(), 2);
        assert_eq!(outcome.primary.files.len(), 3);
        for artifact in std::iter::once(&outcome.primary).chain(&outcome.alternates) {
            for file in &artifact.files {
                assert!(file.filename.starts_with(artifact.resume.template.as_str()));
                assert!(dir.path().join(&file.filename).exists());
            }
        }
    }
}
