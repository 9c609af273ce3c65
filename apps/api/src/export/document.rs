//! Flattens a generated résumé into an ordered list of blocks.
//!
//! All three renderers walk the same blocks, so a field that reaches one
//! format reaches every format.

use crate::generation::templates::ResumeSection;
use crate::generation::GeneratedResume;

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Name(String),
    Headline(String),
    Contact(Vec<String>),
    /// Summary shown directly under the header instead of in its own section.
    ProfileLine(String),
    Heading(&'static str),
    Paragraph(String),
    /// A labelled list, e.g. a skill group.
    LabeledList { label: String, items: Vec<String> },
    /// Bold entry line with an optional right-aligned date range.
    EntryTitle { text: String, dates: Option<String> },
    Subtitle(String),
    Bullet(String),
}

pub fn document_blocks(resume: &GeneratedResume) -> Vec<Block> {
    let fields = &resume.fields;
    let template = resume.template;
    let mut blocks = Vec::new();

    blocks.push(Block::Name(fields.name.trim().to_string()));
    if let Some(headline) = non_empty(&fields.headline) {
        blocks.push(Block::Headline(headline));
    }
    let contact: Vec<String> = fields.contact_items().into_iter().map(str::to_string).collect();
    if !contact.is_empty() {
        blocks.push(Block::Contact(contact));
    }
    if template.summary_as_profile_line() {
        if let Some(summary) = non_empty(&fields.summary) {
            blocks.push(Block::ProfileLine(summary));
        }
    }

    for section in template.sections() {
        let body = section_blocks(*section, resume);
        if !body.is_empty() {
            blocks.push(Block::Heading(section.heading()));
            blocks.extend(body);
        }
    }

    blocks
}

fn section_blocks(section: ResumeSection, resume: &GeneratedResume) -> Vec<Block> {
    let fields = &resume.fields;
    let mut out = Vec::new();

    match section {
        ResumeSection::Summary => {
            if let Some(summary) = non_empty(&fields.summary) {
                out.push(Block::Paragraph(summary));
            }
        }
        ResumeSection::Skills => {
            for group in fields.skills.iter().filter(|g| !g.skills.is_empty()) {
                out.push(Block::LabeledList {
                    label: group.category.clone(),
                    items: group.skills.clone(),
                });
            }
        }
        ResumeSection::Experience => {
            for entry in &fields.experience {
                out.push(Block::EntryTitle {
                    text: entry.title.trim().to_string(),
                    dates: non_empty(&entry.dates),
                });
                if let Some(org) = non_empty(&entry.organization) {
                    out.push(Block::Subtitle(org));
                }
                out.extend(bullets(&entry.highlights));
            }
        }
        ResumeSection::Education => {
            for entry in &fields.education {
                let degree = non_empty(&entry.degree);
                let institution = non_empty(&entry.institution);
                let (title, subtitle) = match (degree, institution) {
                    (Some(d), inst) => (d, inst),
                    (None, Some(i)) => (i, None),
                    (None, None) => continue,
                };
                out.push(Block::EntryTitle {
                    text: title,
                    dates: non_empty(&entry.dates),
                });
                if let Some(sub) = subtitle {
                    out.push(Block::Subtitle(sub));
                }
                out.extend(bullets(&entry.details));
            }
        }
        ResumeSection::Projects => {
            for project in &fields.projects {
                out.push(Block::EntryTitle {
                    text: project.name.trim().to_string(),
                    dates: None,
                });
                out.extend(bullets(&project.highlights));
            }
        }
        ResumeSection::Certifications => {
            out.extend(bullets(&fields.certifications));
        }
    }

    out
}

fn bullets(items: &[String]) -> impl Iterator<Item = Block> + '_ {
    items
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(|i| Block::Bullet(i.to_string()))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
