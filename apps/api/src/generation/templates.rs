//! The three fixed résumé templates and their section order.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    #[default]
    AtsModern,
    TechFocused,
    ClassicProfessional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSection {
    Summary,
    Skills,
    Experience,
    Education,
    Projects,
    Certifications,
}

impl ResumeSection {
    pub fn heading(self) -> &'static str {
        match self {
            ResumeSection::Summary => "Professional Summary",
            ResumeSection::Skills => "Technical Skills",
            ResumeSection::Experience => "Professional Experience",
            ResumeSection::Education => "Education",
            ResumeSection::Projects => "Projects",
            ResumeSection::Certifications => "Certifications",
        }
    }
}

/// Catalog entry returned by the templates endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
    pub recommended_for: &'static str,
    pub features: &'static [&'static str],
    pub sections: &'static [ResumeSection],
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::AtsModern,
        TemplateId::TechFocused,
        TemplateId::ClassicProfessional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::AtsModern => "ats_modern",
            TemplateId::TechFocused => "tech_focused",
            TemplateId::ClassicProfessional => "classic_professional",
        }
    }

    /// Strict lookup used by the JSON API.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let wanted = raw.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown template '{raw}'. Available: ats_modern, tech_focused, classic_professional"
                ))
            })
    }

    /// The other templates, in catalog order.
    pub fn alternates(self) -> impl Iterator<Item = TemplateId> {
        Self::ALL.into_iter().filter(move |t| *t != self)
    }

    /// Section order for this template. `tech_focused` renders the summary as a
    /// short profile line under the header, so it has no summary section.
    pub fn sections(self) -> &'static [ResumeSection] {
        use ResumeSection::*;
        match self {
            TemplateId::AtsModern => &[Summary, Skills, Experience, Education, Projects, Certifications],
            TemplateId::TechFocused => &[Skills, Projects, Experience, Education, Certifications],
            TemplateId::ClassicProfessional => {
                &[Summary, Experience, Education, Skills, Certifications, Projects]
            }
        }
    }

    /// Whether the summary is rendered as a profile line under the contact header.
    pub fn summary_as_profile_line(self) -> bool {
        self == TemplateId::TechFocused
    }

    pub fn features(self) -> &'static [&'static str] {
        match self {
            TemplateId::AtsModern => &["ATS Optimized", "Professional Typography", "Clean Layout"],
            TemplateId::TechFocused => {
                &["Technical Skills Emphasis", "Project Highlighting", "Modern Design"]
            }
            TemplateId::ClassicProfessional => {
                &["Traditional Layout", "Corporate Styling", "Executive Format"]
            }
        }
    }

    pub fn info(self) -> TemplateInfo {
        let (name, description, recommended_for) = match self {
            TemplateId::AtsModern => (
                "Modern ATS",
                "Clean, professional format optimized for applicant tracking systems",
                "General applications, all industries",
            ),
            TemplateId::TechFocused => (
                "Tech Focused",
                "Emphasizes technical skills and projects with modern styling",
                "Software development, data science, engineering",
            ),
            TemplateId::ClassicProfessional => (
                "Classic Professional",
                "Traditional corporate résumé format with a clean structure",
                "Finance, consulting, management, executive roles",
            ),
        };
        TemplateInfo {
            id: self,
            name,
            description,
            recommended_for,
            features: self.features(),
            sections: self.sections(),
        }
    }
}

pub fn catalog() -> Vec<TemplateInfo> {
    TemplateId::ALL.into_iter().map(TemplateId::info).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_and_unknown() {
        assert_eq!(TemplateId::parse("tech_focused").unwrap(), TemplateId::TechFocused);
        assert_eq!(TemplateId::parse(" ATS_MODERN ").unwrap(), TemplateId::AtsModern);
        assert!(matches!(TemplateId::parse("fancy"), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_section_orders() {
        use ResumeSection::*;
        assert_eq!(TemplateId::AtsModern.sections()[0], Summary);
        assert_eq!(TemplateId::TechFocused.sections()[..2], [Skills, Projects]);
        assert!(!TemplateId::TechFocused.sections().contains(&Summary));
        assert_eq!(TemplateId::ClassicProfessional.sections()[1], Experience);
    }

    #[test]
    fn test_alternates_exclude_primary() {
        let alternates: Vec<_> = TemplateId::TechFocused.alternates().collect();
        assert_eq!(alternates, vec![TemplateId::AtsModern, TemplateId::ClassicProfessional]);
    }

    #[test]
    fn test_catalog_serializes_ids() {
        let json = serde_json::to_value(catalog()).unwrap();
        assert_eq!(json[1]["id"], "tech_focused");
        assert_eq!(json[2]["features"][0], "Traditional Layout");
    }
}
