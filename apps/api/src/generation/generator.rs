//! Résumé generation — turns an analyzed résumé into template-ready fields.
//!
//! Flow: personal info → headline → skills grouped by category (job skills first)
//!       → experience/projects with job-relevant highlights first → summary
//!       (extracted, or composed from extracted facts) → overrides.
//!
//! Every field comes from the analyzed résumé or the job title. Nothing here
//! creates employers, dates or metrics.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::skills::{category_of, SkillCategory};
use crate::analysis::{
    EducationEntry, ExperienceEntry, JobProfile, ProjectEntry, ResumeProfile,
};
use crate::generation::templates::TemplateId;
use crate::matching::MatchReport;

const SUMMARY_SKILL_COUNT: usize = 4;
const OTHER_SKILLS_LABEL: &str = "Additional Skills";
const SOFT_SKILLS_LABEL: &str = "Professional Skills";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub skills: Vec<String>,
}

/// Every field a template can render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFields {
    pub name: String,
    pub headline: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub summary: Option<String>,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
}

impl ResumeFields {
    /// Contact details in display order, skipping the ones not present.
    pub fn contact_items(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.linkedin,
            &self.github,
        ]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .filter(|v| !v.trim().is_empty())
        .collect()
    }
}

/// User edits. A present field replaces the generated one wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FieldOverrides {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub summary: Option<String>,
    pub skills: Option<Vec<SkillGroup>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub education: Option<Vec<EducationEntry>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub certifications: Option<Vec<String>>,
}

impl FieldOverrides {
    pub fn apply(self, fields: &mut ResumeFields) {
        if let Some(v) = self.name {
            fields.name = v;
        }
        if let Some(v) = self.headline {
            fields.headline = Some(v);
        }
        if let Some(v) = self.email {
            fields.email = Some(v);
        }
        if let Some(v) = self.phone {
            fields.phone = Some(v);
        }
        if let Some(v) = self.location {
            fields.location = Some(v);
        }
        if let Some(v) = self.linkedin {
            fields.linkedin = Some(v);
        }
        if let Some(v) = self.github {
            fields.github = Some(v);
        }
        if let Some(v) = self.summary {
            fields.summary = Some(v);
        }
        if let Some(v) = self.skills {
            fields.skills = v;
        }
        if let Some(v) = self.experience {
            fields.experience = v;
        }
        if let Some(v) = self.education {
            fields.education = v;
        }
        if let Some(v) = self.projects {
            fields.projects = v;
        }
        if let Some(v) = self.certifications {
            fields.certifications = v;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub id: Uuid,
    pub template: TemplateId,
    pub fields: ResumeFields,
    pub generated_at: DateTime<Utc>,
    pub match_score: f64,
    /// What the generator changed relative to the source résumé.
    #[serde(default)]
    pub optimization_notes: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

pub fn generate_resume(
    profile: &ResumeProfile,
    job: &JobProfile,
    report: &MatchReport,
    template: TemplateId,
    overrides: Option<FieldOverrides>,
) -> GeneratedResume {
    let mut notes = Vec::new();

    let relevant: BTreeSet<String> = report
        .matched_keywords
        .iter()
        .chain(&job.required_skills.technical)
        .chain(&job.keywords)
        .cloned()
        .collect();

    let skills = group_skills(profile, job);
    let prioritized = skills
        .iter()
        .flat_map(|g| &g.skills)
        .filter(|s| job.required_skills.technical.contains(&s.to_lowercase()))
        .count();
    if prioritized > 0 {
        notes.push(format!("Listed {prioritized} skills the job asks for first in their groups"));
    }

    let mut experience = profile.experience.clone();
    let mut reordered = 0;
    for entry in &mut experience {
        if prioritize_highlights(&mut entry.highlights, &relevant) {
            reordered += 1;
        }
    }
    let mut projects = profile.projects.clone();
    for project in &mut projects {
        if prioritize_highlights(&mut project.highlights, &relevant) {
            reordered += 1;
        }
    }
    if reordered > 0 {
        notes.push(format!("Moved job-relevant highlights up in {reordered} entries"));
    }

    let summary = match profile.summary.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Some(s.to_string()),
        _ => {
            let composed = compose_summary(profile, &skills);
            if composed.is_some() {
                notes.push("Composed a summary from the résumé's own facts".to_string());
            }
            composed
        }
    };

    let headline = job
        .title
        .clone()
        .or_else(|| profile.experience.first().map(|e| e.title.clone()))
        .filter(|h| !h.trim().is_empty());

    let personal = &profile.personal;
    let mut fields = ResumeFields {
        name: personal
            .name
            .clone()
            .unwrap_or_else(|| "Your Name".to_string()),
        headline,
        email: personal.email.clone(),
        phone: personal.phone.clone(),
        location: personal.location.clone(),
        linkedin: personal.linkedin.clone(),
        github: personal.github.clone(),
        summary,
        skills,
        experience,
        education: profile.education.clone(),
        projects,
        certifications: profile.certifications.clone(),
    };

    if let Some(overrides) = overrides {
        overrides.apply(&mut fields);
        notes.push("Applied user edits".to_string());
    }

    let generated = GeneratedResume {
        id: Uuid::new_v4(),
        template,
        fields,
        generated_at: Utc::now(),
        match_score: report.overall_score,
        optimization_notes: notes,
    };

    info!(
        "Generated {} résumé {} ({} skill groups, {} experience entries)",
        template.as_str(),
        generated.id,
        generated.fields.skills.len(),
        generated.fields.experience.len()
    );
    generated
}

/// Groups technical skills by category in category order. Within a group, skills
/// the job requires come first, then the rest alphabetically. Listed skills the
/// tables do not know go to a trailing group, then soft skills.
fn group_skills(profile: &ResumeProfile, job: &JobProfile) -> Vec<SkillGroup> {
    let mut by_category: Vec<(SkillCategory, Vec<&String>)> = Vec::new();
    for skill in &profile.skills.technical {
        let Some(category) = category_of(skill) else {
            continue;
        };
        match by_category.iter_mut().find(|(c, _)| *c == category) {
            Some((_, list)) => list.push(skill),
            None => by_category.push((category, vec![skill])),
        }
    }
    by_category.sort_by_key(|(c, _)| *c);

    let mut groups: Vec<SkillGroup> = by_category
        .into_iter()
        .map(|(category, mut list)| {
            list.sort_by(|a, b| {
                let required = &job.required_skills.technical;
                (!required.contains(*a), a).cmp(&(!required.contains(*b), b))
            });
            SkillGroup {
                category: category.label().to_string(),
                skills: list
                    .into_iter()
                    .map(|s| display_skill(s, &profile.listed_skills))
                    .collect(),
            }
        })
        .collect();

    let other: Vec<String> = profile
        .listed_skills
        .iter()
        .filter(|item| {
            let lower = item.to_lowercase();
            !profile.skills.technical.contains(&lower) && !profile.skills.soft.contains(&lower)
        })
        .cloned()
        .collect();
    if !other.is_empty() {
        groups.push(SkillGroup {
            category: OTHER_SKILLS_LABEL.to_string(),
            skills: other,
        });
    }

    if !profile.skills.soft.is_empty() {
        let mut soft: Vec<&String> = profile.skills.soft.iter().collect();
        let required = &job.required_skills.soft;
        soft.sort_by(|a, b| (!required.contains(*a), a).cmp(&(!required.contains(*b), b)));
        groups.push(SkillGroup {
            category: SOFT_SKILLS_LABEL.to_string(),
            skills: soft.into_iter().map(|s| capitalize(s)).collect(),
        });
    }

    groups
}

/// The author's own spelling when the skill was listed, else a readable default.
fn display_skill(skill: &str, listed: &[String]) -> String {
    if let Some(item) = listed.iter().find(|i| i.eq_ignore_ascii_case(skill)) {
        return item.clone();
    }
    match skill {
        "aws" | "gcp" | "sql" | "html" | "css" | "php" | "api" | "rest" | "ci/cd" | "nlp" => {
            skill.to_uppercase()
        }
        "javascript" => "JavaScript".to_string(),
        "typescript" => "TypeScript".to_string(),
        "postgresql" => "PostgreSQL".to_string(),
        "mysql" => "MySQL".to_string(),
        "mongodb" => "MongoDB".to_string(),
        "nodejs" | "node.js" => "Node.js".to_string(),
        "github" => "GitHub".to_string(),
        "gitlab" => "GitLab".to_string(),
        _ => capitalize(skill),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Stable-sorts highlights by how many relevant terms they mention.
/// Returns whether the order changed.
fn prioritize_highlights(highlights: &mut [String], relevant: &BTreeSet<String>) -> bool {
    if highlights.len() < 2 {
        return false;
    }
    let before = highlights.to_vec();
    highlights.sort_by_cached_key(|h| {
        let lower = h.to_lowercase();
        std::cmp::Reverse(
            relevant
                .iter()
                .filter(|t| crate::analysis::skills::contains_term(&lower, t))
                .count(),
        )
    });
    before != highlights
}

/// A factual summary built from extracted years, level, skills and education.
fn compose_summary(profile: &ResumeProfile, skills: &[SkillGroup]) -> Option<String> {
    let top_skills: Vec<&str> = skills
        .iter()
        .filter(|g| g.category != SOFT_SKILLS_LABEL)
        .flat_map(|g| g.skills.iter().map(String::as_str))
        .take(SUMMARY_SKILL_COUNT)
        .collect();

    let role = profile
        .experience
        .first()
        .map(|e| e.title.trim())
        .filter(|t| !t.is_empty());

    if top_skills.is_empty() && role.is_none() && profile.experience_years == 0 {
        return None;
    }

    let mut sentence = match (role, profile.experience_years) {
        (Some(role), years) if years > 0 => format!("{role} with {years}+ years of experience"),
        (Some(role), _) => role.to_string(),
        (None, years) if years > 0 => format!(
            "{} professional with {years}+ years of experience",
            profile.experience_level.label()
        ),
        (None, _) => "Professional".to_string(),
    };
    if !top_skills.is_empty() {
        sentence.push_str(&format!(" skilled in {}", join_human(&top_skills)));
    }
    sentence.push('.');

    if let Some(level) = profile.education_level {
        sentence.push_str(&format!(" Holds a {}.", level.label()));
    }
    Some(sentence)
}

fn join_human(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => one.to_string(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
