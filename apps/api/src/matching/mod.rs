//! Matcher — pluggable, trait-based scorer comparing a résumé profile against a job profile.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, deterministic, set arithmetic over
//! skills and keywords).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>` so a different backend can be
//! swapped in at startup without touching the handlers.

pub mod components;
pub mod suggestions;

use std::collections::BTreeSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::analysis::{JobProfile, ResumeProfile};
use crate::errors::AppError;
use components::{
    coverage, education_score, experience_score, industry_alignment, round1, top_skill_gaps,
};

pub use suggestions::{generate_suggestions, Suggestion};

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub technical: f64,
    pub soft_skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            technical: 0.40,
            soft_skills: 0.15,
            experience: 0.20,
            education: 0.10,
            keywords: 0.15,
        }
    }
}

/// Component scores, each 0–100 and rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub technical_skills: f64,
    pub soft_skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keywords: f64,
    /// Reported only; not part of the weighted total.
    pub industry_alignment: f64,
    /// Reported only; not part of the weighted total.
    pub ats_formatting: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermComparison {
    pub matched: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

impl TermComparison {
    fn of(present: &BTreeSet<String>, required: &BTreeSet<String>) -> Self {
        TermComparison {
            matched: required.intersection(present).cloned().collect(),
            missing: required.difference(present).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceGap {
    pub resume_years: u32,
    pub required_years: Option<u32>,
    /// Years short of the requirement.
    pub gap: u32,
    /// Years beyond the requirement.
    pub surplus: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrength {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchStrength {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            MatchStrength::Excellent
        } else if score >= 70.0 {
            MatchStrength::Good
        } else if score >= 50.0 {
            MatchStrength::Fair
        } else {
            MatchStrength::Poor
        }
    }
}

/// Full match report returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub overall_score: f64, // 0 – 100, one decimal
    pub match_strength: MatchStrength,
    pub matched_keywords: BTreeSet<String>,
    pub missing_keywords: BTreeSet<String>,
    pub components: ComponentScores,
    pub technical_skills: TermComparison,
    pub soft_skills: TermComparison,
    pub keywords: TermComparison,
    pub experience: ExperienceGap,
    pub top_skill_gaps: Vec<String>,
    pub weights: ScoreWeights,
    pub scorer_backend: String, // for transparency
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the handlers.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    async fn score(&self, resume: &ResumeProfile, job: &JobProfile) -> Result<MatchReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatchScorer
// ────────────────────────────────────────────────────────────────────────────

/// Set-overlap scorer.
///
/// overall = Σ weightᵢ × componentᵢ over technical, soft, experience, education
/// and keyword coverage. Adding a job term to the résumé can only grow a
/// coverage set, so the total never drops when matching keywords are added.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatchScorer {
    pub weights: ScoreWeights,
}

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(&self, resume: &ResumeProfile, job: &JobProfile) -> Result<MatchReport, AppError> {
        Ok(compute_match(resume, job, &self.weights))
    }
}

pub fn compute_match(resume: &ResumeProfile, job: &JobProfile, weights: &ScoreWeights) -> MatchReport {
    let technical_skills =
        TermComparison::of(&resume.skills.technical, &job.required_skills.technical);
    let soft_skills = TermComparison::of(&resume.skills.soft, &job.required_skills.soft);

    let job_keywords: BTreeSet<String> = job.keywords.iter().cloned().collect();
    let keywords = TermComparison::of(&resume.keywords, &job_keywords);

    let technical = coverage(&resume.skills.technical, &job.required_skills.technical, 100.0);
    let soft = coverage(&resume.skills.soft, &job.required_skills.soft, 100.0);
    let keyword = coverage(&resume.keywords, &job_keywords, 0.0);
    let experience = experience_score(resume.experience_years, job.experience_required);
    let education = education_score(resume.education_level, job.education_required);

    let overall = technical * weights.technical
        + soft * weights.soft_skills
        + experience * weights.experience
        + education * weights.education
        + keyword * weights.keywords;
    let overall_score = round1(overall.clamp(0.0, 100.0));

    let required = job.experience_required.unwrap_or(0);
    let experience_gap = ExperienceGap {
        resume_years: resume.experience_years,
        required_years: job.experience_required,
        gap: required.saturating_sub(resume.experience_years),
        surplus: resume.experience_years.saturating_sub(required),
    };

    let matched_keywords: BTreeSet<String> = technical_skills
        .matched
        .iter()
        .chain(&soft_skills.matched)
        .chain(&keywords.matched)
        .cloned()
        .collect();
    // A term can be matched through one list and missed through another; matched wins.
    let missing_keywords = technical_skills
        .missing
        .iter()
        .chain(&soft_skills.missing)
        .chain(&keywords.missing)
        .filter(|term| !matched_keywords.contains(*term))
        .cloned()
        .collect();

    MatchReport {
        overall_score,
        match_strength: MatchStrength::from_score(overall_score),
        matched_keywords,
        missing_keywords,
        components: ComponentScores {
            technical_skills: round1(technical),
            soft_skills: round1(soft),
            experience: round1(experience),
            education: round1(education),
            keywords: round1(keyword),
            industry_alignment: industry_alignment(&resume.detected_industry, &job.industry),
            ats_formatting: round1(resume.ats_compatibility_score),
        },
        top_skill_gaps: top_skill_gaps(&technical_skills.missing),
        technical_skills,
        soft_skills,
        keywords,
        experience: experience_gap,
        weights: *weights,
        scorer_backend: "keyword".to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{SAMPLE_JOB, SAMPLE_RESUME};
    use crate::analysis::{analyze_job, analyze_resume};

    fn sample_report() -> MatchReport {
        let resume = analyze_resume(SAMPLE_RESUME).unwrap();
        let job = analyze_job(SAMPLE_JOB).unwrap();
        compute_match(&resume, &job, &ScoreWeights::default())
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoreWeights::default();
        let sum = w.technical + w.soft_skills + w.experience + w.education + w.keywords;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_match_report() {
        let report = sample_report();

        assert!(report.technical_skills.matched.contains("rust"));
        assert!(report.technical_skills.matched.contains("aws"));
        assert_eq!(
            report.technical_skills.missing.iter().collect::<Vec<_>>(),
            vec!["postgresql"]
        );
        assert!(report.soft_skills.missing.contains("teamwork"));
        assert!(report.matched_keywords.contains("kubernetes"));
        assert!(report.missing_keywords.contains("postgresql"));
        assert_eq!(report.experience.gap, 0);
        assert_eq!(report.experience.surplus, 1);
        assert_eq!(report.components.experience, 100.0);
        assert_eq!(report.components.education, 100.0);
        assert_eq!(report.top_skill_gaps, vec!["postgresql"]);
        assert!(report.overall_score > 0.0 && report.overall_score <= 100.0);
        assert_eq!(report.scorer_backend, "keyword");
    }

    #[test]
    fn test_matched_and_missing_are_disjoint() {
        let report = sample_report();
        assert!(report.matched_keywords.is_disjoint(&report.missing_keywords));
    }

    #[test]
    fn test_adding_missing_keywords_never_lowers_score() {
        let job = analyze_job(SAMPLE_JOB).unwrap();
        let mut text = SAMPLE_RESUME.to_string();
        let mut previous = compute_match(&analyze_resume(&text).unwrap(), &job, &ScoreWeights::default());

        let missing: Vec<String> = previous.missing_keywords.iter().cloned().collect();
        for term in missing {
            text.push_str(&format!("\nFamiliar with {term}"));
            let report = compute_match(&analyze_resume(&text).unwrap(), &job, &ScoreWeights::default());
            assert!(
                report.overall_score >= previous.overall_score,
                "adding '{term}' lowered the score from {} to {}",
                previous.overall_score,
                report.overall_score
            );
            previous = report;
        }
        assert!(previous.missing_keywords.is_empty());
        assert_eq!(previous.components.technical_skills, 100.0);
    }

    #[test]
    fn test_keyword_on_next_line_does_not_become_experience_claim() {
        let job = analyze_job(SAMPLE_JOB).unwrap();
        let base = format!("{SAMPLE_RESUME}\nMentored engineers for 20 years");
        let extended = format!("{base}\nwith PostgreSQL in production");

        let before_resume = analyze_resume(&base).unwrap();
        let after_resume = analyze_resume(&extended).unwrap();
        assert_eq!(after_resume.experience_years, before_resume.experience_years);

        let before = compute_match(&before_resume, &job, &ScoreWeights::default());
        let after = compute_match(&after_resume, &job, &ScoreWeights::default());
        assert!(
            after.overall_score >= before.overall_score,
            "score dropped from {} to {}",
            before.overall_score,
            after.overall_score
        );
        assert_eq!(after.components.experience, before.components.experience);
    }

    #[test]
    fn test_match_strength_thresholds() {
        assert_eq!(MatchStrength::from_score(85.0), MatchStrength::Excellent);
        assert_eq!(MatchStrength::from_score(70.0), MatchStrength::Good);
        assert_eq!(MatchStrength::from_score(50.0), MatchStrength::Fair);
        assert_eq!(MatchStrength::from_score(49.9), MatchStrength::Poor);
    }

    #[tokio::test]
    async fn test_keyword_scorer_trait_object() {
        let scorer: std::sync::Arc<dyn MatchScorer> = std::sync::Arc::new(KeywordMatchScorer::default());
        let resume = analyze_resume(SAMPLE_RESUME).unwrap();
        let job = analyze_job(SAMPLE_JOB).unwrap();
        let report = scorer.score(&resume, &job).await.unwrap();
        assert_eq!(report.scorer_backend, "keyword");
    }
}
