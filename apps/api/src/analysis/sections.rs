//! Section parser — splits résumé text at standard headings and builds ordered
//! experience, education and project entries from the lines under each heading.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Entry models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub organization: Option<String>,
    pub dates: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub dates: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Heading detection
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    /// A recognised heading whose content is not used (awards, interests, ...).
    Other,
}

const HEADINGS: &[(&str, SectionKind)] = &[
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("career summary", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("professional profile", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("career objective", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("overview", SectionKind::Summary),
    ("experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("relevant experience", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("career history", SectionKind::Experience),
    ("education", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("academics", SectionKind::Education),
    ("education and training", SectionKind::Education),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("key skills", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("technologies", SectionKind::Skills),
    ("skills and tools", SectionKind::Skills),
    ("projects", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("key projects", SectionKind::Projects),
    ("selected projects", SectionKind::Projects),
    ("certifications", SectionKind::Certifications),
    ("certificates", SectionKind::Certifications),
    ("licenses and certifications", SectionKind::Certifications),
    ("awards", SectionKind::Other),
    ("honors", SectionKind::Other),
    ("achievements", SectionKind::Other),
    ("publications", SectionKind::Other),
    ("languages", SectionKind::Other),
    ("interests", SectionKind::Other),
    ("hobbies", SectionKind::Other),
    ("volunteer", SectionKind::Other),
    ("volunteer experience", SectionKind::Other),
    ("references", SectionKind::Other),
];

const MAX_HEADING_LEN: usize = 40;

fn normalize_heading(line: &str) -> String {
    let lowered = line.to_lowercase().replace('&', " and ");
    let trimmed = lowered.trim_matches(|c: char| !c.is_alphanumeric());
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classifies a line as a heading. A heading may carry inline content after a
/// colon (`Skills: Rust, Go`), which is returned alongside the kind.
pub fn detect_heading(line: &str) -> Option<(SectionKind, Option<String>)> {
    let line = line.trim();
    if line.is_empty() || line.len() > 120 {
        return None;
    }

    let (head, rest) = match line.split_once(':') {
        Some((head, rest)) => (head, Some(rest.trim())),
        None => (line, None),
    };
    if head.len() > MAX_HEADING_LEN {
        return None;
    }

    let normalized = normalize_heading(head);
    HEADINGS
        .iter()
        .find(|(name, _)| *name == normalized)
        .and_then(|(_, kind)| {
            let inline = rest.filter(|r| !r.is_empty()).map(str::to_string);
            // "Languages: Rust, Go" inside a skills block is content, not a heading
            if inline.is_some() && *kind == SectionKind::Other {
                return None;
            }
            Some((*kind, inline))
        })
}

// ────────────────────────────────────────────────────────────────────────────
// Section splitting
// ────────────────────────────────────────────────────────────────────────────

/// Lines of a résumé grouped by section. Blank lines are kept inside sections
/// because they delimit entries.
#[derive(Debug, Clone, Default)]
pub struct Sections {
    /// Lines before the first recognised heading (name and contact block).
    pub header: Vec<String>,
    pub summary: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    pub certifications: Vec<String>,
    /// Kinds of the headings found, in document order.
    pub found: Vec<SectionKind>,
}

impl Sections {
    fn lines_mut(&mut self, kind: Option<SectionKind>) -> Option<&mut Vec<String>> {
        match kind {
            None => Some(&mut self.header),
            Some(SectionKind::Summary) => Some(&mut self.summary),
            Some(SectionKind::Experience) => Some(&mut self.experience),
            Some(SectionKind::Education) => Some(&mut self.education),
            Some(SectionKind::Skills) => Some(&mut self.skills),
            Some(SectionKind::Projects) => Some(&mut self.projects),
            Some(SectionKind::Certifications) => Some(&mut self.certifications),
            Some(SectionKind::Other) => None,
        }
    }

    pub fn has(&self, kind: SectionKind) -> bool {
        self.found.contains(&kind)
    }
}

pub fn split_sections(text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<SectionKind> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if let Some((kind, inline)) = detect_heading(line) {
            current = Some(kind);
            if !sections.found.contains(&kind) {
                sections.found.push(kind);
            }
            if let (Some(content), Some(lines)) = (inline, sections.lines_mut(current)) {
                lines.push(content);
            }
            continue;
        }
        if let Some(lines) = sections.lines_mut(current) {
            lines.push(line.to_string());
        }
    }

    sections
}

// ────────────────────────────────────────────────────────────────────────────
// Line helpers
// ────────────────────────────────────────────────────────────────────────────

const BULLET_MARKERS: &[char] = &['•', '●', '▪', '◦', '‣', '■', '○', '·', '-', '*', '–'];

/// Returns the bullet text without its marker, or `None` for a plain line.
pub fn strip_bullet(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    if !BULLET_MARKERS.contains(&first) {
        return None;
    }
    let rest = chars.as_str();
    // "-2020" or "*args" are not bullets
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) && first != '•' {
        return None;
    }
    Some(rest.trim())
}

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let month = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?";
    let date = format!(r"(?:(?:{month}\s+)?(?:19|20)\d{{2}}|\d{{1,2}}/(?:19|20)\d{{2}})");
    Regex::new(&format!(
        r"(?i)\b{date}(?:\s*(?:-|–|—|to)\s*(?:{date}|present|current|now))?\b"
    ))
    .unwrap()
});

/// Pulls the first date or date range out of a line, returning it and the rest of the line.
pub fn take_dates(line: &str) -> (Option<String>, String) {
    match DATE_RANGE.find(line) {
        Some(m) => {
            let rest = format!("{} {}", &line[..m.start()], &line[m.end()..]);
            (Some(m.as_str().trim().to_string()), tidy_remainder(&rest))
        }
        None => (None, line.trim().to_string()),
    }
}

fn tidy_remainder(s: &str) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| c.is_whitespace() || "|,-–—()".contains(c))
        .replace("( )", "")
        .replace("| |", "|")
        .trim()
        .to_string()
}

const TITLE_SEPARATORS: &[&str] = &[" | ", " — ", " – ", " - ", " at ", " @ "];

fn split_title_line(line: &str) -> (String, Option<String>) {
    for sep in TITLE_SEPARATORS {
        if let Some((left, right)) = line.split_once(sep) {
            let (left, right) = (left.trim(), right.trim());
            if !left.is_empty() && !right.is_empty() {
                return (left.to_string(), Some(right.to_string()));
            }
        }
    }
    (line.to_string(), None)
}

// ────────────────────────────────────────────────────────────────────────────
// Entry builders
// ────────────────────────────────────────────────────────────────────────────

/// Builds experience entries. A blank line closes an entry; a bullet adds a
/// highlight; a plain line after highlights starts the next entry. Within an entry
/// the first plain line is the title, the second the organization.
pub fn parse_experience(lines: &[String]) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceEntry> = None;
    let mut header_lines = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            header_lines = 0;
            continue;
        }

        if let Some(bullet) = strip_bullet(line) {
            if bullet.is_empty() {
                continue;
            }
            current
                .get_or_insert_with(ExperienceEntry::default)
                .highlights
                .push(bullet.to_string());
            continue;
        }

        let (dates, rest) = take_dates(line);

        let starts_new = current
            .as_ref()
            .is_some_and(|e| !e.highlights.is_empty() || (header_lines >= 2 && !rest.is_empty()));
        if starts_new {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            header_lines = 0;
        }

        let entry = current.get_or_insert_with(ExperienceEntry::default);
        if entry.dates.is_none() {
            entry.dates = dates;
        }
        if rest.is_empty() {
            continue;
        }

        match header_lines {
            0 => {
                let (title, organization) = split_title_line(&rest);
                entry.title = title;
                entry.organization = organization;
            }
            _ if entry.organization.is_none() => entry.organization = Some(rest),
            _ => entry.highlights.push(rest),
        }
        header_lines += 1;
    }

    if let Some(entry) = current {
        entries.push(entry);
    }

    entries
        .into_iter()
        .filter(|e| !e.title.is_empty() || !e.highlights.is_empty())
        .collect()
}

static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:ph\.?\s?d|doctor(?:ate)?|master(?:'?s)?|mba|m\.?sc|m\.?tech|m\.?eng|bachelor(?:'?s)?|b\.?sc|b\.?tech|b\.?eng|associate(?:'?s)?|diploma|b\.?s|m\.?s|b\.?a|m\.?a)\b",
    )
    .unwrap()
});

const INSTITUTION_WORDS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "polytechnic",
];

fn looks_like_institution(line: &str) -> bool {
    let lower = line.to_lowercase();
    INSTITUTION_WORDS.iter().any(|w| lower.contains(w))
}

/// Builds education entries. Lines are classified as degree or institution; a
/// second line of the same kind, or a blank line, starts a new entry.
pub fn parse_education(lines: &[String]) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut current = EducationEntry::default();

    let flush = |entry: &mut EducationEntry, entries: &mut Vec<EducationEntry>| {
        let taken = std::mem::take(entry);
        if taken.institution.is_some() || taken.degree.is_some() {
            entries.push(taken);
        }
    };

    for line in lines {
        if line.trim().is_empty() {
            flush(&mut current, &mut entries);
            continue;
        }

        if let Some(bullet) = strip_bullet(line) {
            if !bullet.is_empty() {
                current.details.push(bullet.to_string());
            }
            continue;
        }

        let (dates, rest) = take_dates(line);

        let is_degree = DEGREE.is_match(&rest);
        let is_institution = looks_like_institution(&rest);

        let slot_taken = if is_degree && !is_institution {
            current.degree.is_some()
        } else if is_institution {
            current.institution.is_some()
        } else {
            current.institution.is_some() && current.degree.is_some()
        };
        if slot_taken {
            flush(&mut current, &mut entries);
        }

        if current.dates.is_none() {
            current.dates = dates;
        }
        if rest.is_empty() {
            continue;
        }

        if is_degree && !is_institution {
            current.degree = Some(rest);
        } else if is_institution && is_degree && current.degree.is_none() {
            // "B.S. Computer Science, State University" on one line
            let (degree, institution) = split_title_line(&rest);
            match institution {
                Some(institution) if looks_like_institution(&institution) => {
                    current.degree = Some(degree);
                    current.institution = Some(institution);
                }
                _ => current.institution = Some(rest),
            }
        } else if is_institution || current.institution.is_none() {
            current.institution = Some(rest);
        } else if current.degree.is_none() {
            current.degree = Some(rest);
        } else {
            current.details.push(rest);
        }
    }
    flush(&mut current, &mut entries);

    entries
}

/// Builds project entries: a plain line names a project, bullets describe it.
pub fn parse_projects(lines: &[String]) -> Vec<ProjectEntry> {
    let mut entries: Vec<ProjectEntry> = Vec::new();
    let mut open = false;

    for line in lines {
        if line.trim().is_empty() {
            open = false;
            continue;
        }
        match strip_bullet(line) {
            Some(bullet) if !bullet.is_empty() => match entries.last_mut() {
                Some(entry) if open => entry.highlights.push(bullet.to_string()),
                _ => {
                    entries.push(ProjectEntry {
                        name: bullet.to_string(),
                        highlights: Vec::new(),
                    });
                    open = true;
                }
            },
            Some(_) => {}
            None => {
                let has_highlights = entries.last().is_some_and(|e| !e.highlights.is_empty());
                match entries.last_mut() {
                    Some(entry) if open && !has_highlights => {
                        entry.highlights.push(line.trim().to_string())
                    }
                    _ => {
                        entries.push(ProjectEntry {
                            name: line.trim().to_string(),
                            highlights: Vec::new(),
                        });
                        open = true;
                    }
                }
            }
        }
    }

    entries
}

/// Individual items listed under a skills heading, e.g. `Languages: Rust, Go`.
pub fn parse_listed_skills(lines: &[String]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();

    for line in lines {
        let line = strip_bullet(line).unwrap_or(line.as_str());
        let content = match line.split_once(':') {
            Some((_, rest)) => rest,
            None => line,
        };
        for item in content.split([',', ';', '|', '•']) {
            let item = item.trim().trim_end_matches('.');
            if item.is_empty() || item.len() > 40 {
                continue;
            }
            if !items.iter().any(|i| i.eq_ignore_ascii_case(item)) {
                items.push(item.to_string());
            }
        }
    }

    items
}

/// Plain prose of a section, bullets included, joined into one paragraph.
pub fn join_paragraph(lines: &[String]) -> String {
    lines
        .iter()
        .map(|l| strip_bullet(l).unwrap_or(l.as_str()).trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
