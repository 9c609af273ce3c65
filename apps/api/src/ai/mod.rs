//! AI integration — optional, key-gated. Job posting extraction from a URL and
//! qualitative résumé review on top of the local match report.

pub mod client;
pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use client::{AiClient, AiError};
use client::{truncate_chars, CallOptions};

use crate::errors::AppError;

const RESUME_PROMPT_CHARS: usize = 3000;
const JOB_PROMPT_CHARS: usize = 2000;

const JOB_POSTING_OPTIONS: CallOptions = CallOptions {
    max_tokens: 2000,
    temperature: 0.1,
};
const ENHANCE_OPTIONS: CallOptions = CallOptions {
    max_tokens: 1500,
    temperature: 0.2,
};

/// Fields the model extracts from a job posting page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub experience_required: Option<String>,
    pub education_requirements: Option<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub salary_range: Option<String>,
    pub benefits: Vec<String>,
    pub company_description: Option<String>,
    pub clean_job_description: Option<String>,
    pub analysis_quality: Option<String>,
}

impl JobPosting {
    /// Description text usable for analysis: the cleaned description, or the
    /// structured fields stitched together when the model omitted it.
    pub fn description_text(&self) -> String {
        if let Some(text) = self.clean_job_description.as_deref() {
            if !text.trim().is_empty() {
                return text.trim().to_string();
            }
        }

        let mut parts: Vec<String> = Vec::new();
        if let Some(title) = &self.job_title {
            parts.push(title.clone());
        }
        if !self.responsibilities.is_empty() {
            parts.push(format!("Responsibilities: {}", self.responsibilities.join("; ")));
        }
        if !self.technical_skills.is_empty() {
            parts.push(format!("Technical skills: {}", self.technical_skills.join(", ")));
        }
        if !self.soft_skills.is_empty() {
            parts.push(format!("Soft skills: {}", self.soft_skills.join(", ")));
        }
        if let Some(exp) = &self.experience_required {
            parts.push(format!("Experience: {exp}"));
        }
        if let Some(edu) = &self.education_requirements {
            parts.push(format!("Education: {edu}"));
        }
        parts.join("\n")
    }
}

/// Qualitative review returned by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiInsights {
    pub overall_assessment: Option<String>,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub suggested_additions: Vec<String>,
    pub formatting_improvements: Vec<String>,
    pub ats_optimization_tips: Vec<String>,
    pub industry_specific_advice: Vec<String>,
    pub experience_gap_analysis: Option<String>,
    pub skill_gap_analysis: Option<String>,
    pub recommended_action_items: Vec<String>,
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        AppError::Ai(err.to_string())
    }
}

impl AiClient {
    /// Asks the model to read and structure the posting at `url`.
    pub async fn analyze_job_posting(&self, url: &str) -> Result<JobPosting, AiError> {
        info!("Analyzing job posting with {}: {}", self.model(), url);
        let prompt = prompts::JOB_POSTING_PROMPT.replace("{url}", url);
        let system = format!("{} {}", prompts::JOB_POSTING_SYSTEM, prompts::JSON_ONLY_SYSTEM);
        self.call_json(&prompt, &system, JOB_POSTING_OPTIONS).await
    }

    /// Reviews a résumé against a job description.
    pub async fn enhance_analysis(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> Result<AiInsights, AiError> {
        info!("Requesting AI résumé review");
        let prompt = prompts::ENHANCE_PROMPT
            .replace("{resume}", truncate_chars(resume_text, RESUME_PROMPT_CHARS))
            .replace("{job}", truncate_chars(job_text, JOB_PROMPT_CHARS));
        let system = format!("{} {}", prompts::ENHANCE_SYSTEM, prompts::JSON_ONLY_SYSTEM);
        self.call_json(&prompt, &system, ENHANCE_OPTIONS).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_posting_tolerates_missing_fields() {
        let posting: JobPosting =
            serde_json::from_str(r#"{"job_title": "Data Engineer", "technical_skills": ["spark"]}"#)
                .unwrap();
        assert_eq!(posting.job_title.as_deref(), Some("Data Engineer"));
        assert!(posting.benefits.is_empty());
    }

    #[test]
    fn test_description_text_prefers_clean_description() {
        let posting = JobPosting {
            job_title: Some("Data Engineer".to_string()),
            clean_job_description: Some("  Build pipelines.  ".to_string()),
            ..Default::default()
        };
        assert_eq!(posting.description_text(), "Build pipelines.");
    }

    #[test]
    fn test_description_text_falls_back_to_fields() {
        let posting = JobPosting {
            job_title: Some("Data Engineer".to_string()),
            technical_skills: vec!["spark".to_string(), "airflow".to_string()],
            ..Default::default()
        };
        assert_eq!(
            posting.description_text(),
            "Data Engineer\nTechnical skills: spark, airflow"
        );
    }

    #[test]
    fn test_insights_accept_null_strings() {
        let insights: AiInsights = serde_json::from_str(
            r#"{"overall_assessment": null, "recommended_action_items": ["Add metrics"]}"#,
        )
        .unwrap();
        assert_eq!(insights.recommended_action_items, vec!["Add metrics"]);
    }

    #[test]
    fn test_prompts_have_placeholders() {
        assert!(prompts::JOB_POSTING_PROMPT.contains("{url}"));
        assert!(prompts::ENHANCE_PROMPT.contains("{resume}"));
        assert!(prompts::ENHANCE_PROMPT.contains("{job}"));
    }
}
