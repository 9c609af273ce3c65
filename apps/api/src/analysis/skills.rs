//! Static skill databases and whole-term matching.
//!
//! All entries are lower-case. Matching runs against lower-cased text and treats
//! `+` and `#` as part of a term so `c++` and `c#` match without matching `c`.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Category a technical skill is grouped under on a generated résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    ProgrammingLanguages,
    FrameworksLibraries,
    Databases,
    CloudDevops,
    ToolsTechnologies,
    Methodologies,
    Domain,
}

impl SkillCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "Programming Languages",
            SkillCategory::FrameworksLibraries => "Frameworks & Libraries",
            SkillCategory::Databases => "Databases",
            SkillCategory::CloudDevops => "Cloud & DevOps",
            SkillCategory::ToolsTechnologies => "Tools & Technologies",
            SkillCategory::Methodologies => "Methodologies & Practices",
            SkillCategory::Domain => "Domain Expertise",
        }
    }
}

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go", "rust",
    "swift", "kotlin", "scala", "r", "matlab", "perl", "shell", "bash", "powershell", "sql",
    "html", "css", "sass", "less", "dart", "elixir", "haskell", "clojure", "f#", "vb.net",
    "cobol", "fortran", "assembly", "lua", "groovy",
];

const FRAMEWORKS_LIBRARIES: &[&str] = &[
    "react", "angular", "vue", "svelte", "ember", "backbone", "jquery", "nodejs", "express",
    "koa", "fastify", "django", "flask", "fastapi", "pyramid", "tornado", "spring",
    "spring boot", "hibernate", "struts", "laravel", "symfony", "codeigniter", "rails",
    "sinatra", "asp.net", "mvc", "blazor", "xamarin", "unity", "unreal", "tensorflow",
    "pytorch", "keras", "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "plotly",
    "opencv", "nltk", "spacy", "hugging face", "transformers",
];

const DATABASES: &[&str] = &[
    "mysql", "postgresql", "sqlite", "oracle", "sql server", "mongodb", "cassandra", "redis",
    "elasticsearch", "solr", "neo4j", "dynamodb", "couchdb", "influxdb", "firebase",
    "mariadb", "cockroachdb", "amazon rds", "azure sql", "google cloud sql",
];

const CLOUD_DEVOPS: &[&str] = &[
    "aws", "azure", "gcp", "google cloud platform", "digital ocean", "linode", "docker",
    "kubernetes", "openshift", "helm", "istio", "jenkins", "github actions", "gitlab ci",
    "circle ci", "travis ci", "azure devops", "terraform", "ansible", "chef", "puppet",
    "vagrant", "packer", "consul", "vault", "nomad", "prometheus", "grafana", "elk stack",
    "datadog", "new relic", "splunk", "nagios", "zabbix",
];

const TOOLS_TECHNOLOGIES: &[&str] = &[
    "git", "github", "gitlab", "bitbucket", "svn", "mercurial", "jira", "confluence", "slack",
    "microsoft teams", "zoom", "figma", "sketch", "adobe xd", "photoshop", "illustrator",
    "after effects", "premiere pro", "blender", "autocad", "solidworks", "excel", "powerbi",
    "power bi", "tableau", "qlik", "looker", "apache spark", "spark", "hadoop", "kafka",
    "rabbitmq", "celery", "airflow", "luigi", "prefect", "dbt",
];

const METHODOLOGIES: &[&str] = &[
    "agile", "scrum", "kanban", "lean", "six sigma", "devops", "ci/cd", "tdd", "bdd",
    "pair programming", "code review", "microservices", "monolith", "serverless",
    "event-driven architecture", "domain-driven design", "clean architecture",
    "solid principles", "design patterns", "rest api", "graphql", "grpc", "oauth", "jwt",
    "saml", "ldap", "sso", "encryption", "ssl/tls", "penetration testing",
    "vulnerability assessment", "compliance", "gdpr", "hipaa", "sox", "pci dss",
];

/// Industry-specific skills. The industry name doubles as the detected industry label.
pub const INDUSTRY_SKILLS: &[(&str, &[&str])] = &[
    (
        "fintech",
        &["blockchain", "cryptocurrency", "defi", "trading algorithms", "risk management", "compliance", "kyc", "aml"],
    ),
    (
        "healthcare",
        &["hipaa", "hl7", "fhir", "medical devices", "clinical trials", "telemedicine", "ehr", "emr"],
    ),
    (
        "ecommerce",
        &["payment processing", "inventory management", "supply chain", "logistics", "crm", "shopify", "magento", "woocommerce"],
    ),
    (
        "gaming",
        &["game engines", "unity", "unreal engine", "c#", "c++", "graphics programming", "shader programming", "multiplayer networking"],
    ),
    (
        "iot",
        &["embedded systems", "sensors", "actuators", "edge computing", "mqtt", "lorawan", "zigbee", "bluetooth"],
    ),
    (
        "ai_ml",
        &["machine learning", "deep learning", "neural networks", "computer vision", "nlp", "reinforcement learning", "mlops", "model deployment"],
    ),
];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "collaboration", "problem solving",
    "analytical thinking", "critical thinking", "creative thinking", "innovation",
    "adaptability", "flexibility", "resilience", "time management", "organization",
    "project management", "stakeholder management", "client relations", "customer service",
    "presentation skills", "public speaking", "negotiation", "conflict resolution", "mentoring",
    "coaching", "training", "strategic planning", "decision making", "attention to detail",
    "quality assurance", "continuous improvement", "agile mindset", "emotional intelligence",
    "cultural awareness", "remote work", "cross-functional collaboration",
];

/// Every technical skill with its category, deduplicated, in database order.
/// A skill listed in several tables keeps the first category it appears under.
pub static TECHNICAL_SKILLS: Lazy<Vec<(&'static str, SkillCategory)>> = Lazy::new(|| {
    let tables: [(&[&'static str], SkillCategory); 6] = [
        (PROGRAMMING_LANGUAGES, SkillCategory::ProgrammingLanguages),
        (FRAMEWORKS_LIBRARIES, SkillCategory::FrameworksLibraries),
        (DATABASES, SkillCategory::Databases),
        (CLOUD_DEVOPS, SkillCategory::CloudDevops),
        (TOOLS_TECHNOLOGIES, SkillCategory::ToolsTechnologies),
        (METHODOLOGIES, SkillCategory::Methodologies),
    ];

    let mut seen = BTreeSet::new();
    let mut skills = Vec::new();
    for (table, category) in tables {
        for &skill in table {
            if seen.insert(skill) {
                skills.push((skill, category));
            }
        }
    }
    for (_, industry_skills) in INDUSTRY_SKILLS {
        for &skill in industry_skills.iter() {
            if seen.insert(skill) {
                skills.push((skill, SkillCategory::Domain));
            }
        }
    }
    skills
});

/// Returns the category of a known technical skill.
pub fn category_of(skill: &str) -> Option<SkillCategory> {
    let lower = skill.to_lowercase();
    TECHNICAL_SKILLS
        .iter()
        .find(|(s, _)| *s == lower)
        .map(|(_, c)| *c)
}

/// Technical skills present in `text_lower`.
pub fn find_technical_skills(text_lower: &str) -> BTreeSet<String> {
    TECHNICAL_SKILLS
        .iter()
        .filter(|(skill, _)| contains_term(text_lower, skill))
        .map(|(skill, _)| skill.to_string())
        .collect()
}

/// Soft skills present in `text_lower`.
pub fn find_soft_skills(text_lower: &str) -> BTreeSet<String> {
    SOFT_SKILLS
        .iter()
        .filter(|skill| contains_term(text_lower, skill))
        .map(|skill| skill.to_string())
        .collect()
}

/// Hiring-demand weight used to rank missing skills. Unlisted skills weigh 3.
pub fn skill_importance(skill: &str) -> u8 {
    match skill {
        "python" | "java" | "javascript" => 10,
        "react" | "aws" | "sql" => 9,
        "git" | "docker" | "kubernetes" | "nodejs" => 8,
        "angular" | "vue" | "django" | "flask" | "spring" => 7,
        "html" | "css" => 5,
        _ => 3,
    }
}

/// Whole-term containment. `term` must already be lower-case.
pub fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + term.len()..].chars().next();
        !before.is_some_and(is_term_char) && !after.is_some_and(is_term_char)
    })
}

fn is_term_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}
