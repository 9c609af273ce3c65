//! Exporter — renders a generated résumé as plain text, HTML or PDF.
//!
//! All formats render from the same block list (`document.rs`). PDF writing is
//! CPU-bound and runs inside `tokio::task::spawn_blocking`.

pub mod document;
pub mod html;
pub mod layout;
pub mod pdf;
pub mod text;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::templates::TemplateId;
use crate::generation::GeneratedResume;
use document::document_blocks;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Html,
    Txt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Pdf, ExportFormat::Html, ExportFormat::Txt];

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Html => "html",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext.to_lowercase())
    }
}

/// A rendered file ready to be stored or sent.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

pub async fn render(resume: &GeneratedResume, format: ExportFormat) -> Result<RenderedFile, AppError> {
    let blocks = document_blocks(resume);

    let bytes = match format {
        ExportFormat::Txt => text::render_text(&blocks).into_bytes(),
        ExportFormat::Html => html::render_html(&blocks, resume.template).into_bytes(),
        ExportFormat::Pdf => {
            let centered = resume.template == TemplateId::ClassicProfessional;
            tokio::task::spawn_blocking(move || pdf::render_pdf(&blocks, centered))
                .await
                .map_err(|e| AppError::Render(format!("PDF task failed: {e}")))?
                .map_err(|e| AppError::Render(e.to_string()))?
        }
    };

    info!(
        "Rendered {} résumé {} as {} ({} bytes)",
        resume.template.as_str(),
        resume.id,
        format.extension(),
        bytes.len()
    );
    Ok(RenderedFile { format, bytes })
}

#[cfg(test)]
pub(crate) mod tests_support {
    use chrono::Utc;
    use uuid::Uuid;

    use crate::analysis::{EducationEntry, ExperienceEntry, ProjectEntry};
    use crate::generation::templates::TemplateId;
    use crate::generation::generator::{GeneratedResume, ResumeFields, SkillGroup};

    /// A résumé with every field populated.
    pub fn sample_generated(template: TemplateId) -> GeneratedResume {
        GeneratedResume {
            id: Uuid::new_v4(),
            template,
            fields: ResumeFields {
                name: "Jane Doe".to_string(),
                headline: Some("Senior Backend Engineer".to_string()),
                email: Some("jane.doe@example.com".to_string()),
                phone: Some("(555) 123-4567".to_string()),
                location: Some("Austin, TX".to_string()),
                linkedin: Some("linkedin.com/in/janedoe".to_string()),
                github: Some("github.com/janedoe".to_string()),
                summary: Some("Backend engineer building Rust and Python services.".to_string()),
                skills: vec![
                    SkillGroup {
                        category: "Programming Languages".to_string(),
                        skills: vec!["Rust".to_string(), "Python".to_string()],
                    },
                    SkillGroup {
                        category: "Cloud & DevOps".to_string(),
                        skills: vec!["Kubernetes".to_string()],
                    },
                ],
                experience: vec![ExperienceEntry {
                    title: "Senior Software Engineer".to_string(),
                    organization: Some("Acme Corp".to_string()),
                    dates: Some("Jan 2020 - Present".to_string()),
                    highlights: vec!["Led migration to Kubernetes, reducing deploy time by 60%".to_string()],
                }],
                education: vec![EducationEntry {
                    institution: Some("State University".to_string()),
                    degree: Some("Bachelor of Science in Computer Science".to_string()),
                    dates: Some("2013 - 2017".to_string()),
                    details: vec!["Dean's List".to_string()],
                }],
                projects: vec![ProjectEntry {
                    name: "Log Shipper".to_string(),
                    highlights: vec!["Streams 2M events per day".to_string()],
                }],
                certifications: vec!["AWS Certified Solutions Architect".to_string()],
            },
            generated_at: Utc::now(),
            match_score: 72.5,
            optimization_notes: Vec::new(),
        }
    }

    /// Every populated field value, flattened.
    pub fn populated_values(resume: &GeneratedResume) -> Vec<String> {
        let f = &resume.fields;
        let mut values = vec![f.name.clone()];
        values.extend(f.headline.clone());
        values.extend(f.contact_items().into_iter().map(str::to_string));
        values.extend(f.summary.clone());
        for group in &f.skills {
            values.push(group.category.clone());
            values.extend(group.skills.iter().cloned());
        }
        for e in &f.experience {
            values.push(e.title.clone());
            values.extend(e.organization.clone());
            values.extend(e.dates.clone());
            values.extend(e.highlights.iter().cloned());
        }
        for e in &f.education {
            values.extend(e.institution.clone());
            values.extend(e.degree.clone());
            values.extend(e.dates.clone());
            values.extend(e.details.iter().cloned());
        }
        for p in &f.projects {
            values.push(p.name.clone());
            values.extend(p.highlights.iter().cloned());
        }
        values.extend(f.certifications.iter().cloned());
        values
    }
}
