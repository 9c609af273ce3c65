// Résumé generation: template catalog, field population from an analyzed
// résumé, and the HTTP handlers for generate/export/download.

pub mod generator;
pub mod handlers;
pub mod templates;

pub use generator::{generate_resume, GeneratedResume};
pub use templates::TemplateId;
