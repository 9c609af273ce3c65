//! Prioritized optimization suggestions derived from a match report.

use serde::{Deserialize, Serialize};

use super::{MatchReport, MatchStrength};
use crate::analysis::{JobProfile, ResumeProfile};

pub const MAX_SUGGESTIONS: usize = 10;
pub const MAX_AI_ACTION_ITEMS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    Critical,
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub priority: SuggestionPriority,
    pub category: String,
    pub message: String,
}

impl Suggestion {
    fn new(priority: SuggestionPriority, category: &str, message: impl Into<String>) -> Self {
        Suggestion {
            priority,
            category: category.to_string(),
            message: message.into(),
        }
    }
}

const BEST_PRACTICES: &[&str] = &[
    "Use specific metrics to demonstrate impact, e.g. 'Reduced processing time by 40%' or 'Managed a $2M budget'.",
    "Start bullet points with strong action verbs such as Architected, Optimized, Spearheaded or Streamlined.",
    "Tailor your professional summary to the job requirements and the company's needs.",
];

const BEST_PRACTICE: &str = "best_practice";

/// Builds at most ten suggestions, most urgent first, ending with general best practices.
pub fn generate_suggestions(
    report: &MatchReport,
    resume: &ResumeProfile,
    job: &JobProfile,
) -> Vec<Suggestion> {
    use SuggestionPriority::*;

    let mut out = Vec::new();
    let components = &report.components;

    if report.overall_score < 40.0 {
        out.push(Suggestion::new(
            Critical,
            "overall",
            "Your résumé needs major restructuring for this role. Rework the summary, skills and experience sections around the job's core requirements.",
        ));
    }

    if !report.top_skill_gaps.is_empty() {
        let gaps = &report.top_skill_gaps;
        let message = if gaps.len() > 3 {
            format!(
                "Add these critical technical skills where you genuinely have them: {}. Consider courses or certifications for the rest.",
                gaps[..3].join(", ")
            )
        } else {
            format!("Include your experience with {} in your résumé.", gaps.join(", "))
        };
        out.push(Suggestion::new(High, "technical_skills", message));
    }

    let gap = report.experience.gap;
    if gap > 2 {
        out.push(Suggestion::new(
            High,
            "experience",
            format!("The role asks for {gap} more years of experience than your résumé shows. Highlight relevant projects, internships and volunteer work."),
        ));
    } else if gap > 0 {
        out.push(Suggestion::new(
            Medium,
            "experience",
            format!("Emphasize transferable skills and relevant projects to offset the {gap}-year experience gap."),
        ));
    }
    if report.experience.surplus > 5 {
        out.push(Suggestion::new(
            Medium,
            "experience",
            "You exceed the experience requirement by a wide margin. Consider senior roles or emphasize leadership and mentoring.",
        ));
    }

    let missing_soft: Vec<&str> = report.soft_skills.missing.iter().map(String::as_str).collect();
    if missing_soft.len() > 2 {
        out.push(Suggestion::new(
            Medium,
            "soft_skills",
            format!(
                "Demonstrate these competencies with concrete examples: {}.",
                missing_soft[..3].join(", ")
            ),
        ));
    }

    if components.ats_formatting < 70.0 {
        out.push(Suggestion::new(
            High,
            "ats_formatting",
            "Improve ATS formatting: use standard section headings (Summary, Experience, Education, Skills), plain characters and no tables or images.",
        ));
    }

    if resume.quality.overall < 70.0 {
        out.push(Suggestion::new(
            Medium,
            "content_quality",
            "Add quantified achievements, e.g. 'Increased efficiency by 25%' or 'Led a team of 8 developers'.",
        ));
    }

    if components.keywords < 60.0 {
        out.push(Suggestion::new(
            Medium,
            "keywords",
            "Work more of the job's own terms into your résumé naturally. Use both acronyms and full forms.",
        ));
    }

    if components.industry_alignment < 70.0
        && job.industry != "general"
        && resume.detected_industry != job.industry
    {
        out.push(Suggestion::new(
            Low,
            "industry",
            format!(
                "Tailor your experience to emphasize {} industry knowledge and terminology.",
                job.industry
            ),
        ));
    }

    if components.education < 80.0 {
        if let Some(required) = job.education_required {
            out.push(Suggestion::new(
                Medium,
                "education",
                format!(
                    "The role requires a {}. Make sure your degree and any relevant coursework are prominent.",
                    required.label()
                ),
            ));
        }
    }

    let strategy = match report.match_strength {
        MatchStrength::Poor => "Restructure around the top missing skills and give specific examples of similar technologies you have used.",
        MatchStrength::Fair => "You are close to a good match. Add the missing technical skills and quantify your achievements.",
        MatchStrength::Good => "Only minor adjustments are needed. Add the missing skills and keep the layout ATS friendly.",
        MatchStrength::Excellent => "Your résumé aligns well with this position. Customize the summary to mention the company's specific needs.",
    };
    out.push(Suggestion::new(Low, "strategy", strategy));

    for practice in BEST_PRACTICES {
        out.push(Suggestion::new(Low, BEST_PRACTICE, *practice));
    }

    dedup(&mut out);
    out.truncate(MAX_SUGGESTIONS);
    out
}

/// Folds AI action items in ahead of the general best practices.
pub fn merge_ai_action_items(suggestions: &mut Vec<Suggestion>, items: &[String]) {
    let insert_at = suggestions
        .iter()
        .position(|s| s.category == BEST_PRACTICE)
        .unwrap_or(suggestions.len());

    let ai_items: Vec<Suggestion> = items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .take(MAX_AI_ACTION_ITEMS)
        .map(|i| Suggestion::new(SuggestionPriority::Medium, "ai_recommendation", i))
        .collect();

    suggestions.splice(insert_at..insert_at, ai_items);
    dedup(suggestions);
    suggestions.truncate(MAX_SUGGESTIONS);
}

fn dedup(suggestions: &mut Vec<Suggestion>) {
    let mut seen = std::collections::HashSet::new();
    suggestions.retain(|s| seen.insert(s.message.to_lowercase()));
}
