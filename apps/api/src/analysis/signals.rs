//! Regex and word-list detectors shared by résumé and job analysis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::skills::{contains_term, INDUSTRY_SKILLS};

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Year figures above this are treated as noise (calendar years, ids).
const MAX_PLAUSIBLE_YEARS: u32 = 50;

static EXPERIENCE_CLAIMS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?[ \t]*(?:years?|yrs?)[ \t]*(?:of[ \t]*)?(?:experience|exp)\b",
        r"experience[: \t]*(\d+)\+?[ \t]*(?:years?|yrs?)",
        r"(\d+)\+?[ \t]*(?:years?|yrs?)[ \t]*(?:in|with|of)\b",
        r"over[ \t]*(\d+)[ \t]*(?:years?|yrs?)",
        r"more than[ \t]*(\d+)[ \t]*(?:years?|yrs?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static EXPERIENCE_REQUIREMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?[ \t]*(?:years?|yrs?)[ \t]*(?:of[ \t]*)?(?:experience|exp)\b",
        r"minimum[ \t]*(?:of[ \t]*)?(\d+)[ \t]*(?:years?|yrs?)",
        r"at least[ \t]*(\d+)[ \t]*(?:years?|yrs?)",
        r"(\d+)\+?[ \t]*(?:to|-)[ \t]*\d+[ \t]*(?:years?|yrs?)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

fn year_figures<'a>(patterns: &'a [Regex], text_lower: &'a str) -> impl Iterator<Item = u32> + 'a {
    patterns
        .iter()
        .flat_map(move |re| re.captures_iter(text_lower))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .filter(|years| *years <= MAX_PLAUSIBLE_YEARS)
}

/// Largest "N years of experience" claim in a résumé.
pub fn claimed_experience_years(text_lower: &str) -> u32 {
    year_figures(&EXPERIENCE_CLAIMS, text_lower).max().unwrap_or(0)
}

/// Smallest year figure a job asks for, if any.
pub fn required_experience_years(text_lower: &str) -> Option<u32> {
    year_figures(&EXPERIENCE_REQUIREMENTS, text_lower).min()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    MidLevel,
    Senior,
}

impl ExperienceLevel {
    pub fn from_years(years: u32) -> Self {
        match years {
            y if y >= 8 => ExperienceLevel::Senior,
            y if y >= 3 => ExperienceLevel::MidLevel,
            y if y >= 1 => ExperienceLevel::Junior,
            _ => ExperienceLevel::Entry,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry-level",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::MidLevel => "mid-level",
            ExperienceLevel::Senior => "senior",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

/// Degree ladder, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Associates,
    Bachelors,
    Masters,
    Phd,
}

impl EducationLevel {
    pub fn rank(&self) -> i32 {
        match self {
            EducationLevel::Associates => 1,
            EducationLevel::Bachelors => 2,
            EducationLevel::Masters => 3,
            EducationLevel::Phd => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::Associates => "associate's degree",
            EducationLevel::Bachelors => "bachelor's degree",
            EducationLevel::Masters => "master's degree",
            EducationLevel::Phd => "PhD",
        }
    }
}

// Highest degree first so detection returns the top one mentioned.
static EDUCATION_LEVELS: Lazy<Vec<(EducationLevel, Regex)>> = Lazy::new(|| {
    [
        (EducationLevel::Phd, r"\b(?:phd|ph\.d|doctorate|doctoral)\b"),
        (EducationLevel::Masters, r"\b(?:masters|master's|master of|mba|msc|m\.sc|m\.s|m\.a)\b"),
        (EducationLevel::Bachelors, r"\b(?:bachelors|bachelor's|bachelor of|bsc|b\.sc|b\.s|b\.a|bs|undergraduate)\b"),
        (EducationLevel::Associates, r"\b(?:associates?|associate's|a\.s|a\.a)\b"),
    ]
    .into_iter()
    .map(|(level, p)| (level, Regex::new(p).unwrap()))
    .collect()
});

static EDUCATION_REQUIREMENTS: Lazy<Vec<(EducationLevel, Regex)>> = Lazy::new(|| {
    [
        (EducationLevel::Phd, r"(?:phd|doctorate).*required"),
        (EducationLevel::Masters, r"(?:master'?s?|mba).*required"),
        (EducationLevel::Bachelors, r"(?:bachelor'?s?|degree).*required"),
    ]
    .into_iter()
    .map(|(level, p)| (level, Regex::new(p).unwrap()))
    .collect()
});

/// Highest degree mentioned anywhere in the text.
pub fn education_level(text_lower: &str) -> Option<EducationLevel> {
    EDUCATION_LEVELS
        .iter()
        .find(|(_, re)| re.is_match(text_lower))
        .map(|(level, _)| *level)
}

/// Degree a job states as required (`… required` on the same line).
pub fn required_education(text_lower: &str) -> Option<EducationLevel> {
    EDUCATION_REQUIREMENTS
        .iter()
        .find(|(_, re)| re.is_match(text_lower))
        .map(|(level, _)| *level)
}

// ────────────────────────────────────────────────────────────────────────────
// Industry
// ────────────────────────────────────────────────────────────────────────────

const TECHNOLOGY_WORDS: &[&str] = &["software", "programming", "development", "engineering"];
const FINANCE_WORDS: &[&str] = &["finance", "banking", "investment", "trading"];
const HEALTHCARE_WORDS: &[&str] = &["healthcare", "medical", "clinical", "patient"];

/// Industry with the most specialised-skill hits, else a broad fallback by vocabulary.
pub fn detect_industry(text_lower: &str) -> String {
    let best = INDUSTRY_SKILLS
        .iter()
        .map(|(industry, skills)| {
            let hits = skills.iter().filter(|s| contains_term(text_lower, s)).count();
            (*industry, hits)
        })
        .fold(None::<(&str, usize)>, |best, (industry, hits)| match best {
            Some((_, top)) if top >= hits => best,
            _ if hits > 0 => Some((industry, hits)),
            _ => best,
        });

    if let Some((industry, _)) = best {
        return industry.to_string();
    }

    let mentions = |words: &[&str]| words.iter().any(|w| contains_term(text_lower, w));
    let fallback = if mentions(TECHNOLOGY_WORDS) {
        "technology"
    } else if mentions(FINANCE_WORDS) {
        "finance"
    } else if mentions(HEALTHCARE_WORDS) {
        "healthcare"
    } else {
        "general"
    };
    fallback.to_string()
}

/// Industries close enough to count as a partial match.
pub fn industries_related(a: &str, b: &str) -> bool {
    let related = |from: &str, to: &str| match from {
        "technology" => matches!(to, "fintech" | "ai_ml" | "iot"),
        "healthcare" | "finance" => to == "fintech",
        _ => false,
    };
    related(a, b) || related(b, a)
}

// ────────────────────────────────────────────────────────────────────────────
// Content quality
// ────────────────────────────────────────────────────────────────────────────

pub const ACTION_VERBS: &[&str] = &[
    "achieved", "improved", "increased", "reduced", "developed", "implemented", "created",
    "designed", "managed", "led", "coordinated", "optimized", "streamlined", "enhanced",
    "delivered", "executed", "launched", "established", "built", "transformed",
];

static QUANTIFIED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£]\s?\d[\d,]*(?:\.\d+)?|\d+(?:\.\d+)?\s?(?:%|k\b|m\b|b\b|bn\b|\$|€|£)").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub quantified_achievements: usize,
    pub action_verbs: usize,
    pub quantification_score: f64,
    pub action_verb_score: f64,
    pub overall: f64,
}

pub fn content_quality(text_lower: &str) -> QualityMetrics {
    let quantified_achievements = QUANTIFIED.find_iter(text_lower).count();
    let action_verbs = ACTION_VERBS
        .iter()
        .filter(|v| contains_term(text_lower, v))
        .count();

    let quantification_score = (quantified_achievements as f64 * 10.0).min(100.0);
    let action_verb_score = (action_verbs as f64 * 5.0).min(100.0);

    QualityMetrics {
        quantified_achievements,
        action_verbs,
        quantification_score,
        action_verb_score,
        overall: quantification_score * 0.6 + action_verb_score * 0.4,
    }
}
