//! Job profile — requirements, keywords and posting signals read from a job description.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::keywords::{top_keywords, JOB_KEYWORD_LIMIT};
use super::resume::{SkillSet, TextStats};
use super::signals::{detect_industry, required_education, required_experience_years, EducationLevel};
use super::skills::{contains_term, find_soft_skills, find_technical_skills};
use super::{validate_text, MIN_JOB_CHARS};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobLevel {
    Senior,
    Mid,
    Junior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobProfile {
    /// First line of the posting when it reads like a title.
    pub title: Option<String>,
    pub required_skills: SkillSet,
    /// Frequency-ranked significant terms, at most twenty.
    pub keywords: Vec<String>,
    pub experience_required: Option<u32>,
    pub job_level: JobLevel,
    pub education_required: Option<EducationLevel>,
    pub remote_friendly: bool,
    pub company_size: CompanySize,
    pub urgent_hire: bool,
    pub competitive_position: bool,
    pub industry: String,
    pub complexity_score: f64,
    pub stats: TextStats,
}

// Checked in order; the first level with a matching indicator wins.
const LEVEL_INDICATORS: &[(JobLevel, &[&str])] = &[
    (JobLevel::Senior, &["senior", "lead", "principal", "architect", "manager", "director"]),
    (JobLevel::Mid, &["mid-level", "intermediate", "experienced", "specialist", "engineer"]),
    (JobLevel::Junior, &["junior", "entry", "graduate", "intern", "trainee", "associate"]),
];

const SIZE_INDICATORS: &[(CompanySize, &[&str])] = &[
    (CompanySize::Startup, &["startup", "early stage", "seed", "series a"]),
    (CompanySize::Small, &["small", "growing", "10-50", "50-100"]),
    (CompanySize::Medium, &["medium", "100-500", "500-1000"]),
    (CompanySize::Large, &["large", "enterprise", "1000+", "fortune"]),
];

const URGENT_INDICATORS: &[&str] = &["urgent", "immediate", "asap", "immediately", "right away"];
const COMPETITIVE_INDICATORS: &[&str] = &["competitive", "multiple candidates", "fast-paced", "dynamic"];

static REQUIRED_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:required|must have|essential)\b").unwrap());
static PREFERRED_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:preferred|nice to have|bonus)\b").unwrap());
static YEAR_MARKERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:years?|yrs?)\b").unwrap());

fn job_level(text_lower: &str) -> JobLevel {
    LEVEL_INDICATORS
        .iter()
        .find(|(_, words)| words.iter().any(|w| contains_term(text_lower, w)))
        .map(|(level, _)| *level)
        .unwrap_or(JobLevel::Mid)
}

fn company_size(text_lower: &str) -> CompanySize {
    SIZE_INDICATORS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text_lower.contains(w)))
        .map(|(size, _)| *size)
        .unwrap_or(CompanySize::Unknown)
}

/// Requirement density: required, preferred and year markers plus one point per
/// fifty words, times ten, capped at 100.
fn complexity_score(text_lower: &str) -> f64 {
    let factors = REQUIRED_MARKERS.find_iter(text_lower).count() as f64
        + PREFERRED_MARKERS.find_iter(text_lower).count() as f64
        + YEAR_MARKERS.find_iter(text_lower).count() as f64
        + text_lower.split_whitespace().count() as f64 / 50.0;
    (factors * 10.0).min(100.0)
}

fn title_line(text: &str) -> Option<String> {
    let first = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    let plausible = first.len() <= 80
        && !first.ends_with('.')
        && first.split_whitespace().count() <= 10;
    plausible.then(|| first.trim_end_matches(':').to_string())
}

/// Builds the profile of a job description.
pub fn analyze_job(text: &str) -> Result<JobProfile, AppError> {
    validate_text("Job description", text, MIN_JOB_CHARS)?;

    let lower = text.to_lowercase();
    let any_of = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    Ok(JobProfile {
        title: title_line(text),
        required_skills: SkillSet {
            technical: find_technical_skills(&lower),
            soft: find_soft_skills(&lower),
        },
        keywords: top_keywords(text, JOB_KEYWORD_LIMIT),
        experience_required: required_experience_years(&lower),
        job_level: job_level(&lower),
        education_required: required_education(&lower),
        remote_friendly: lower.contains("remote"),
        company_size: company_size(&lower),
        urgent_hire: any_of(URGENT_INDICATORS),
        competitive_position: any_of(COMPETITIVE_INDICATORS),
        industry: detect_industry(&lower),
        complexity_score: complexity_score(&lower),
        stats: TextStats::of(text),
    })
}
