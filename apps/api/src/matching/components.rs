//! Individual score components. Each returns a value in 0–100.

use std::collections::BTreeSet;

use crate::analysis::signals::industries_related;
use crate::analysis::skills::skill_importance;
use crate::analysis::EducationLevel;

/// Share of `required` covered by `present`, as a percentage.
/// An empty requirement set scores `empty_score`.
pub fn coverage(present: &BTreeSet<String>, required: &BTreeSet<String>, empty_score: f64) -> f64 {
    if required.is_empty() {
        return empty_score;
    }
    let matched = required.intersection(present).count();
    matched as f64 / required.len() as f64 * 100.0
}

/// 100 when the requirement is met up to 1.5x; overqualification costs 5 per
/// year beyond that down to 70; each missing year costs 20.
pub fn experience_score(resume_years: u32, required_years: Option<u32>) -> f64 {
    let required = match required_years {
        None | Some(0) => return 100.0,
        Some(years) => years as f64,
    };
    let actual = resume_years as f64;

    if actual >= required {
        if actual <= required * 1.5 {
            100.0
        } else {
            f64::max(70.0, 100.0 - (actual - required * 1.5) * 5.0)
        }
    } else {
        f64::max(0.0, 100.0 - (required - actual) * 20.0)
    }
}

pub fn education_score(resume: Option<EducationLevel>, required: Option<EducationLevel>) -> f64 {
    let Some(required) = required else {
        return 100.0;
    };
    let have = resume.map(|l| l.rank()).unwrap_or(0);
    match required.rank() - have {
        d if d <= 0 => 100.0,
        1 => 75.0,
        2 => 50.0,
        _ => 25.0,
    }
}

pub fn industry_alignment(resume_industry: &str, job_industry: &str) -> f64 {
    if resume_industry.is_empty() || job_industry.is_empty() {
        return 70.0;
    }
    if resume_industry == job_industry {
        100.0
    } else if industries_related(resume_industry, job_industry) {
        80.0
    } else {
        50.0
    }
}

/// Missing skills ordered by hiring weight, then name. At most five.
pub fn top_skill_gaps(missing: &BTreeSet<String>) -> Vec<String> {
    let mut gaps: Vec<&String> = missing.iter().collect();
    gaps.sort_by(|a, b| skill_importance(b).cmp(&skill_importance(a)).then(a.cmp(b)));
    gaps.into_iter().take(5).cloned().collect()
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_coverage() {
        assert_eq!(coverage(&set(&["rust", "go"]), &set(&["rust", "java"]), 100.0), 50.0);
        assert_eq!(coverage(&set(&["rust"]), &set(&[]), 100.0), 100.0);
        assert_eq!(coverage(&set(&["rust"]), &set(&[]), 0.0), 0.0);
    }

    #[test]
    fn test_experience_score_curve() {
        assert_eq!(experience_score(0, None), 100.0);
        assert_eq!(experience_score(5, Some(5)), 100.0);
        assert_eq!(experience_score(7, Some(5)), 100.0);
        assert_eq!(experience_score(10, Some(5)), 87.5);
        assert_eq!(experience_score(30, Some(5)), 70.0);
        assert_eq!(experience_score(3, Some(5)), 60.0);
        assert_eq!(experience_score(0, Some(8)), 0.0);
    }

    #[test]
    fn test_education_ladder() {
        use EducationLevel::*;
        assert_eq!(education_score(None, None), 100.0);
        assert_eq!(education_score(Some(Phd), Some(Bachelors)), 100.0);
        assert_eq!(education_score(Some(Bachelors), Some(Masters)), 75.0);
        assert_eq!(education_score(Some(Associates), Some(Masters)), 50.0);
        assert_eq!(education_score(None, Some(Bachelors)), 50.0);
        assert_eq!(education_score(None, Some(Phd)), 25.0);
    }

    #[test]
    fn test_industry_alignment() {
        assert_eq!(industry_alignment("fintech", "fintech"), 100.0);
        assert_eq!(industry_alignment("technology", "ai_ml"), 80.0);
        assert_eq!(industry_alignment("gaming", "healthcare"), 50.0);
        assert_eq!(industry_alignment("", "gaming"), 70.0);
    }

    #[test]
    fn test_top_skill_gaps_by_importance() {
        let gaps = top_skill_gaps(&set(&["haskell", "python", "css", "docker", "aws", "elixir", "react"]));
        assert_eq!(gaps, vec!["python", "aws", "react", "docker", "css"]);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666), 66.7);
        assert_eq!(round1(100.0), 100.0);
    }
}
