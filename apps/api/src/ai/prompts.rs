// Prompt templates for the AI client. Placeholders are filled with `str::replace`.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

pub const JOB_POSTING_SYSTEM: &str = "You are an expert job market analyst and content extractor. \
    Extract clean, accurate job posting information while filtering out promotional content \
    and website noise.";

pub const JOB_POSTING_PROMPT: &str = r#"Analyze the job posting at this URL and extract its details.

URL: {url}

Focus only on the posting itself. Ignore navigation menus, advertisements, banners,
footers, related-job suggestions and company marketing unrelated to this role.

Return this exact JSON shape:
{
    "job_title": "...",
    "company_name": "...",
    "location": "...",
    "employment_type": "Full-time | Part-time | Contract | ...",
    "experience_required": "...",
    "education_requirements": "...",
    "technical_skills": ["..."],
    "soft_skills": ["..."],
    "responsibilities": ["..."],
    "salary_range": "...",
    "benefits": ["..."],
    "company_description": "...",
    "clean_job_description": "full posting text without promotional content",
    "analysis_quality": "high | medium | low"
}
Use null for anything the posting does not state."#;

pub const ENHANCE_SYSTEM: &str = "You are a career counselor and résumé optimization expert \
    with deep knowledge of applicant tracking systems and hiring practices. \
    Base every observation on the résumé text you are given; never invent experience.";

pub const ENHANCE_PROMPT: &str = r#"Analyze this résumé against the job description and give actionable optimization advice.

RESUME:
{resume}

JOB DESCRIPTION:
{job}

Return this exact JSON shape:
{
    "overall_assessment": "...",
    "strengths": ["..."],
    "improvement_areas": ["..."],
    "missing_keywords": ["..."],
    "suggested_additions": ["..."],
    "formatting_improvements": ["..."],
    "ats_optimization_tips": ["..."],
    "industry_specific_advice": ["..."],
    "experience_gap_analysis": "...",
    "skill_gap_analysis": "...",
    "recommended_action_items": ["..."]
}
Focus on ATS compatibility, keyword coverage, quantifiable achievements, skill gaps
and how to close them, and section structure."#;
