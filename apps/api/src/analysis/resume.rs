//! Résumé profile — every field the matcher and generator read from a résumé.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::keywords::keyword_set;
use super::sections::{
    join_paragraph, parse_education, parse_experience, parse_listed_skills, parse_projects,
    split_sections, strip_bullet, EducationEntry, ExperienceEntry, ProjectEntry, SectionKind,
    Sections,
};
use super::signals::{
    claimed_experience_years, content_quality, detect_industry, education_level,
    EducationLevel, ExperienceLevel, QualityMetrics,
};
use super::skills::{find_soft_skills, find_technical_skills};
use super::{validate_text, MIN_RESUME_CHARS};
use crate::errors::AppError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillSet {
    pub technical: BTreeSet<String>,
    pub soft: BTreeSet<String>,
}

impl SkillSet {
    pub fn total(&self) -> usize {
        self.technical.len() + self.soft.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    pub line_count: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        TextStats {
            word_count: text.split_whitespace().count(),
            character_count: text.chars().count(),
            line_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub personal: PersonalInfo,
    pub summary: Option<String>,
    pub skills: SkillSet,
    /// Items written under a skills heading, kept as the author spelled them.
    pub listed_skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
    pub experience_years: u32,
    pub experience_level: ExperienceLevel,
    pub education_level: Option<EducationLevel>,
    pub keywords: BTreeSet<String>,
    pub detected_industry: String,
    pub quality: QualityMetrics,
    pub ats_compatibility_score: f64,
    pub stats: TextStats,
}

// ────────────────────────────────────────────────────────────────────────────
// Contact details
// ────────────────────────────────────────────────────────────────────────────

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{2,4}\)|\d{2,4})[\s.-]?\d{3,4}[\s.-]?\d{3,4}").unwrap()
});

static LINKEDIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_-]+/?").unwrap()
});

static GITHUB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_-]+/?").unwrap()
});

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+(?:\s[A-Z][a-zA-Z]+)*,\s?(?:[A-Z]{2}|[A-Z][a-z]+))\b").unwrap()
});

const CONTACT_LABELS: &[&str] = &["email", "phone", "mobile", "tel", "linkedin", "github", "address"];

fn extract_personal_info(text: &str, sections: &Sections) -> PersonalInfo {
    let first = |re: &Regex| re.find(text).map(|m| m.as_str().trim().to_string());

    // Name and location come from the block above the first heading, or the
    // first few lines when the résumé has no headings.
    let header: Vec<&str> = if sections.found.is_empty() {
        text.lines().take(5).collect()
    } else {
        sections.header.iter().map(String::as_str).collect()
    };

    let name = header.iter().map(|l| l.trim()).find(|l| !l.is_empty()).and_then(clean_name);

    let location = header.iter().find_map(|line| {
        let stripped = strip_contact_details(line);
        LOCATION
            .captures(&stripped)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    });

    PersonalInfo {
        name,
        email: first(&EMAIL),
        phone: first(&PHONE),
        location,
        linkedin: first(&LINKEDIN),
        github: first(&GITHUB),
    }
}

fn strip_contact_details(line: &str) -> String {
    let mut stripped = line.to_string();
    for re in [&*EMAIL, &*PHONE, &*LINKEDIN, &*GITHUB] {
        stripped = re.replace_all(&stripped, " ").into_owned();
    }
    stripped
}

fn clean_name(line: &str) -> Option<String> {
    let candidate = strip_contact_details(line);
    let words: Vec<&str> = candidate
        .split(|c: char| c.is_whitespace() || c == '|' || c == ',')
        .filter(|w| !w.is_empty())
        .filter(|w| {
            let lower = w.to_lowercase();
            lower != "resume" && lower != "cv" && lower != "curriculum" && lower != "vitae"
        })
        .filter(|w| !CONTACT_LABELS.contains(&w.trim_end_matches(':').to_lowercase().as_str()))
        .collect();

    let name = words.join(" ");
    let plausible = (2..=60).contains(&name.len())
        && words.len() <= 5
        && !name.chars().any(|c| c.is_ascii_digit() || c == '@');
    plausible.then_some(name)
}

// ────────────────────────────────────────────────────────────────────────────
// Certifications
// ────────────────────────────────────────────────────────────────────────────

const KNOWN_CERTIFICATIONS: &[(&str, &str)] = &[
    ("aws certified", "AWS Certified"),
    ("pmp", "PMP"),
    ("scrum master", "Certified Scrum Master"),
    ("cissp", "CISSP"),
    ("comptia", "CompTIA"),
    ("ccna", "CCNA"),
    ("google cloud certified", "Google Cloud Certified"),
    ("azure certified", "Microsoft Azure Certified"),
    ("cka", "Certified Kubernetes Administrator"),
    ("cpa", "CPA"),
    ("cfa", "CFA"),
];

fn extract_certifications(text_lower: &str, sections: &Sections) -> Vec<String> {
    let mut certifications: Vec<String> = sections
        .certifications
        .iter()
        .map(|l| strip_bullet(l).unwrap_or(l.as_str()).trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    for (needle, display) in KNOWN_CERTIFICATIONS {
        let already = certifications
            .iter()
            .any(|c| c.to_lowercase().contains(needle));
        if !already && super::skills::contains_term(text_lower, needle) {
            certifications.push(display.to_string());
        }
    }

    certifications
}

// ────────────────────────────────────────────────────────────────────────────
// ATS formatting
// ────────────────────────────────────────────────────────────────────────────

const STANDARD_SECTIONS: &[SectionKind] = &[
    SectionKind::Experience,
    SectionKind::Education,
    SectionKind::Skills,
    SectionKind::Summary,
];

/// Formatting score: 100, less 10 for non-ASCII characters, less up to 20 for
/// missing standard sections, less 15 under 300 words or 5 over 800.
pub fn ats_formatting_score(text: &str, sections: &Sections) -> f64 {
    let mut score = 100.0;

    if !text.is_ascii() {
        score -= 10.0;
    }

    let present = STANDARD_SECTIONS.iter().filter(|k| sections.has(**k)).count();
    score -= (STANDARD_SECTIONS.len() - present) as f64 * 5.0;

    let words = text.split_whitespace().count();
    if words < 300 {
        score -= 15.0;
    } else if words > 800 {
        score -= 5.0;
    }

    f64::max(score, 0.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Builds the full profile of a résumé.
pub fn analyze_resume(text: &str) -> Result<ResumeProfile, AppError> {
    validate_text("Resume", text, MIN_RESUME_CHARS)?;

    let lower = text.to_lowercase();
    let sections = split_sections(text);

    let summary = Some(join_paragraph(&sections.summary)).filter(|s| !s.is_empty());
    let experience_years = claimed_experience_years(&lower);

    Ok(ResumeProfile {
        personal: extract_personal_info(text, &sections),
        summary,
        skills: SkillSet {
            technical: find_technical_skills(&lower),
            soft: find_soft_skills(&lower),
        },
        listed_skills: parse_listed_skills(&sections.skills),
        experience: parse_experience(&sections.experience),
        education: parse_education(&sections.education),
        projects: parse_projects(&sections.projects),
        certifications: extract_certifications(&lower, &sections),
        experience_years,
        experience_level: ExperienceLevel::from_years(experience_years),
        education_level: education_level(&lower),
        keywords: keyword_set(text),
        detected_industry: detect_industry(&lower),
        quality: content_quality(&lower),
        ats_compatibility_score: ats_formatting_score(text, &sections),
        stats: TextStats::of(text),
    })
}
