use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::export::ExportFormat;
use crate::generation::TemplateId;
use crate::state::AppState;

/// GET /health
/// Returns service status, version and enabled features.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let templates: Vec<&str> = TemplateId::ALL.iter().map(|t| t.as_str()).collect();
    let formats: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.extension()).collect();

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "ats-optimizer-api",
        "features": {
            "ai_enabled": state.ai.is_some(),
            "templates": templates,
            "export_formats": formats
        }
    }))
}
