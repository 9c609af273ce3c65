//! Job description fetcher — turns a posting URL into description text.
//!
//! With an AI client configured the model reads the posting first; otherwise,
//! or when that fails, the page is downloaded and converted to text locally.

pub mod html;

use std::time::Duration;

use reqwest::{header::USER_AGENT, Client, Url};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::ai::{client::AiClient, JobPosting};
use html::html_to_text;

pub const MIN_CONTENT_CHARS: usize = 50;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Request timed out; the website took too long to respond")]
    Timeout,

    #[error("Unable to reach the website: {0}")]
    Http(#[source] reqwest::Error),

    #[error("The website responded with status {0}")]
    Status(u16),

    #[error("Only {0} characters of job content were found")]
    TooLittleContent(usize),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Http(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMethod {
    Ai,
    Direct,
}

/// A fetched job description.
#[derive(Debug, Clone, Serialize)]
pub struct FetchedJob {
    pub url: String,
    pub source_host: String,
    pub method: FetchMethod,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: String,
    /// Structured fields when the AI path succeeded.
    pub posting: Option<JobPosting>,
}

/// Accepts only absolute http(s) URLs with a host.
pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| FetchError::InvalidUrl(trimmed.to_string()))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(FetchError::InvalidUrl(trimmed.to_string())),
    }
}

pub async fn fetch_job_description(
    http: &Client,
    ai: Option<&AiClient>,
    raw_url: &str,
    timeout: Duration,
) -> Result<FetchedJob, FetchError> {
    let url = validate_url(raw_url)?;
    let host = url
        .host_str()
        .map(|h| h.trim_start_matches("www.").to_string())
        .unwrap_or_default();

    if let Some(ai) = ai {
        match ai.analyze_job_posting(url.as_str()).await {
            Ok(posting) => {
                let description = posting.description_text();
                let chars = description.chars().count();
                if chars >= MIN_CONTENT_CHARS {
                    info!("AI extracted {} characters from {}", chars, host);
                    return Ok(FetchedJob {
                        url: url.to_string(),
                        source_host: host,
                        method: FetchMethod::Ai,
                        title: posting.job_title.clone(),
                        company: posting.company_name.clone(),
                        location: posting.location.clone(),
                        description,
                        posting: Some(posting),
                    });
                }
                warn!("AI returned only {} characters for {}, fetching directly", chars, host);
            }
            Err(e) => warn!("AI job posting analysis failed, fetching directly: {e}"),
        }
    }

    info!("Fetching job description from {}", url);
    let response = http
        .get(url.clone())
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .timeout(timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    let page = html_to_text(&body);
    let chars = page.content.chars().count();
    if chars < MIN_CONTENT_CHARS {
        return Err(FetchError::TooLittleContent(chars));
    }

    info!("Fetched {} characters from {}", chars, host);
    Ok(FetchedJob {
        url: url.to_string(),
        source_host: host,
        method: FetchMethod::Direct,
        title: page.title,
        company: None,
        location: None,
        description: page.content,
        posting: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{response::Html, routing::get, Router};

    async fn serve(page: &'static str) -> String {
        let app = Router::new()
            .route("/job", get(move || async move { Html(page) }))
            .route(
                "/missing",
                get(|| async { (axum::http::StatusCode::NOT_FOUND, "gone") }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://jobs.example.com/123").is_ok());
        assert!(validate_url("  http://example.com  ").is_ok());
        assert!(matches!(validate_url("ftp://example.com/job"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(validate_url("not a url"), Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_direct_fetch_extracts_description() {
        let base = serve(
            "<html><body><article><h1>Platform Engineer</h1>\
             <p>We are hiring a platform engineer with Terraform, AWS and Kubernetes experience.</p>\
             </article></body></html>",
        )
        .await;

        let job = fetch_job_description(&Client::new(), None, &format!("{base}/job"), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(job.method, FetchMethod::Direct);
        assert_eq!(job.title.as_deref(), Some("Platform Engineer"));
        assert!(job.description.contains("Terraform, AWS and Kubernetes"));
        assert!(job.posting.is_none());
    }

    #[tokio::test]
    async fn test_short_page_is_rejected() {
        let base = serve("<html><body><p>Apply now</p></body></html>").await;
        let err = fetch_job_description(&Client::new(), None, &format!("{base}/job"), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::TooLittleContent(9)));
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let base = serve("<html></html>").await;
        let err = fetch_job_description(&Client::new(), None, &format!("{base}/missing"), Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
    }
}
