//! Field analyzer — regex and word-list extraction of skills, experience, education
//! and keywords from résumé and job description text.

pub mod job;
pub mod keywords;
pub mod resume;
pub mod sections;
pub mod signals;
pub mod skills;

pub use job::{analyze_job, JobProfile};
pub use resume::{analyze_resume, ResumeProfile};
pub use sections::{EducationEntry, ExperienceEntry, ProjectEntry};
pub use signals::EducationLevel;

use crate::errors::AppError;

pub const MIN_RESUME_CHARS: usize = 100;
pub const MIN_JOB_CHARS: usize = 50;

/// Rejects input too short to analyze meaningfully.
pub fn validate_text(label: &str, text: &str, min_chars: usize) -> Result<(), AppError> {
    let length = text.trim().chars().count();
    if length < min_chars {
        return Err(AppError::Validation(format!(
            "{label} text is too short ({length} characters); at least {min_chars} are required"
        )));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const SAMPLE_RESUME: &str = "Jane Doe
jane.doe@example.com | (555) 123-4567 | Austin, TX
linkedin.com/in/janedoe | github.com/janedoe

Summary
Backend engineer with 6 years of experience building Rust and Python services.

Experience
Senior Software Engineer
Acme Corp
Jan 2020 - Present
• Led migration to Kubernetes, reducing deploy time by 60%
• Built a Rust ingestion service handling 2M events per day

Software Engineer at Initech 2017 - 2019
• Developed REST API endpoints in Python and Django

Education
State University
Bachelor of Science in Computer Science, 2013 - 2017

Skills
Languages: Rust, Python, SQL
Tools: Docker, Kubernetes, Git

Certifications
AWS Certified Solutions Architect";

    pub const SAMPLE_JOB: &str = "Senior Backend Engineer
We are a fast-paced startup hiring a senior backend engineer to build our payments platform.
Requirements: 5+ years of experience with Python, Rust and PostgreSQL.
Experience with Docker, Kubernetes and AWS is essential.
Strong communication and teamwork skills.
Bachelor's degree in computer science required.
This is a remote-friendly role.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text_counts_trimmed_characters() {
        assert!(validate_text("Job", "   short   ", MIN_JOB_CHARS).is_err());
        assert!(validate_text("Job", &"x".repeat(MIN_JOB_CHARS), MIN_JOB_CHARS).is_ok());
    }
}
