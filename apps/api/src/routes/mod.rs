pub mod analysis;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/resumes/upload", post(analysis::handle_resume_upload))
        .route("/api/v1/jobs/analyze", post(analysis::handle_job_analyze))
        .route("/api/v1/jobs/fetch", post(analysis::handle_job_fetch))
        .route("/api/v1/jobs/posting", post(analysis::handle_job_posting))
        .route("/api/v1/analysis", post(analysis::handle_analysis))
        .route(
            "/api/v1/analysis/upload",
            post(analysis::handle_analysis_upload),
        )
        // Generation / export API
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        .route("/api/v1/resumes/generate", post(handlers::handle_generate))
        .route("/api/v1/resumes/export", post(handlers::handle_export))
        .route(
            "/api/v1/downloads/:filename",
            get(handlers::handle_download),
        )
        .route("/api/v1/previews/:filename", get(handlers::handle_preview))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::stub;
    use crate::analysis::fixtures::{SAMPLE_JOB, SAMPLE_RESUME};
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "ats-test-boundary";

    fn app(dir: &std::path::Path) -> Router {
        app_with(Config {
            export_dir: dir.to_path_buf(),
            ..Config::default()
        })
    }

    fn app_with(config: Config) -> Router {
        build_router(AppState::new(config).unwrap())
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// Builds a multipart body with one text file part and any extra text fields.
    fn multipart_request(uri: &str, file_text: &str, fields: &[(&str, &str)]) -> Request<Body> {
        multipart_file_request(uri, "resume.txt", "text/plain", file_text, fields)
    }

    fn multipart_file_request(
        uri: &str,
        file_name: &str,
        content_type: &str,
        file_text: &str,
        fields: &[(&str, &str)],
    ) -> Request<Body> {
        let mut body = String::new();
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n{file_text}\r\n"
        ));
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_features() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path()).oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-optimizer-api");
        assert_eq!(body["features"]["ai_enabled"], false);
        assert_eq!(body["features"]["templates"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_templates_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path())
            .oneshot(get_request("/api/v1/templates"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let ids: Vec<&str> = body["templates"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["id"].as_str())
            .collect();
        assert_eq!(ids, ["ats_modern", "tech_focused", "classic_professional"]);
        assert_eq!(body["formats"], json!(["pdf", "html", "txt"]));
    }

    #[tokio::test]
    async fn test_analysis_returns_report() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request(
            "/api/v1/analysis",
            json!({ "resume_text": SAMPLE_RESUME, "job_text": SAMPLE_JOB }),
        );
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["analysis_method"], "local");
        let score = body["report"]["overall_score"].as_f64().unwrap();
        assert!((0.0..=100.0).contains(&score));
        assert!(body.get("ai_insights").is_none());
    }

    #[tokio::test]
    async fn test_short_resume_is_a_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request(
            "/api/v1/analysis",
            json!({ "resume_text": "too short", "job_text": SAMPLE_JOB }),
        );
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_job_analyze() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request("/api/v1/jobs/analyze", json!({ "text": SAMPLE_JOB }));
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Senior Backend Engineer");
    }

    #[tokio::test]
    async fn test_job_fetch_rejects_non_http_url() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request("/api/v1/jobs/fetch", json!({ "url": "ftp://example.com/job" }));
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_template() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request(
            "/api/v1/resumes/generate",
            json!({ "resume_text": SAMPLE_RESUME, "job_text": SAMPLE_JOB, "template": "fancy" }),
        );
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_then_export_txt() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(dir.path());

        let request = json_request(
            "/api/v1/resumes/generate",
            json!({
                "resume_text": SAMPLE_RESUME,
                "job_text": SAMPLE_JOB,
                "template": "ats_modern",
                "overrides": { "name": "J. Doe" }
            }),
        );
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["resume"]["fields"]["name"], "J. Doe");
        assert_eq!(body["template"]["id"], "ats_modern");

        let export = json_request(
            "/api/v1/resumes/export",
            json!({ "resume": body["resume"], "format": "txt" }),
        );
        let response = router.oneshot(export).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment;"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("J. DOE"));
    }

    #[tokio::test]
    async fn test_download_rejects_traversal_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(dir.path());

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/downloads/..%2Fsecret.pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router
            .oneshot(get_request("/api/v1/downloads/ats_modern_resume_missing.pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_resume_upload_extracts_profile() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("/api/v1/resumes/upload", SAMPLE_RESUME, &[]);
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["extracted"]["source"], "plain_text");
        assert_eq!(body["profile"]["personal"]["email"], "jane.doe@example.com");
    }

    #[tokio::test]
    async fn test_analysis_upload_falls_back_to_default_template() {
        let dir = tempfile::tempdir().unwrap();
        let router = app(dir.path());
        let request = multipart_request(
            "/api/v1/analysis/upload",
            SAMPLE_RESUME,
            &[("job_description", SAMPLE_JOB), ("template", "unknown")],
        );
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["primary"]["resume"]["template"], "ats_modern");
        assert_eq!(body["alternates"].as_array().unwrap().len(), 2);

        let url = body["primary"]["files"][0]["download_url"].as_str().unwrap();
        let response = router.oneshot(get_request(url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analysis_upload_requires_job_description() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("/api/v1/analysis/upload", SAMPLE_RESUME, &[]);
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_resume_upload_rejects_word_documents() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_file_request(
            "/api/v1/resumes/upload",
            "resume.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "PK not really a docx",
            &[],
        );
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
        assert!(body["error"]["message"].as_str().unwrap().contains("resume.docx"));
    }

    #[tokio::test]
    async fn test_upload_over_limit_is_413() {
        let dir = tempfile::tempdir().unwrap();
        let router = app_with(Config {
            export_dir: dir.path().to_path_buf(),
            max_upload_bytes: 64,
            ..Config::default()
        });
        let request = multipart_request("/api/v1/resumes/upload", SAMPLE_RESUME, &[]);
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_preview_serves_stored_file_inline() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ats_modern_resume_sample.html"), "<h1>Jane</h1>").unwrap();
        let router = app(dir.path());

        let response = router
            .clone()
            .oneshot(get_request("/api/v1/previews/ats_modern_resume_sample.html"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("inline;"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"<h1>Jane</h1>");

        let response = router
            .oneshot(get_request("/api/v1/previews/..%2Fsecret.pdf"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_job_posting_requires_ai() {
        let dir = tempfile::tempdir().unwrap();
        let request = json_request("/api/v1/jobs/posting", json!({ "url": "https://jobs.example.com/1" }));
        let response = app(dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "AI_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_job_posting_with_ai() {
        let dir = tempfile::tempdir().unwrap();
        let posting = json!({ "job_title": "Data Engineer", "technical_skills": ["spark", "airflow"] });
        let (url, _) = stub::serve(vec![(StatusCode::OK, stub::completion(&posting.to_string()))]).await;
        let router = app_with(Config {
            export_dir: dir.path().to_path_buf(),
            ai_api_key: Some("test-key".to_string()),
            ai_api_url: url,
            ..Config::default()
        });

        let request = json_request("/api/v1/jobs/posting", json!({ "url": "https://jobs.example.com/1" }));
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["job_title"], "Data Engineer");
        assert_eq!(body["technical_skills"], json!(["spark", "airflow"]));
    }

    #[tokio::test]
    async fn test_job_posting_ai_failure_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let (url, _) = stub::serve(vec![(StatusCode::UNAUTHORIZED, json!({"error": {"message": "bad key"}}))]).await;
        let router = app_with(Config {
            export_dir: dir.path().to_path_buf(),
            ai_api_key: Some("test-key".to_string()),
            ai_api_url: url,
            ..Config::default()
        });

        let request = json_request("/api/v1/jobs/posting", json!({ "url": "https://jobs.example.com/1" }));
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "AI_ERROR");
    }
}
