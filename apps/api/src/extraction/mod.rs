//! Text extraction — turns an uploaded résumé (PDF or plain text) into cleaned text.
//!
//! PDF parsing is delegated to `pdf-extract`. It is CPU-bound and can panic on
//! malformed input, so it runs inside `tokio::task::spawn_blocking` and a panic is
//! reported as an unreadable document.

use bytes::Bytes;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Could not read PDF: {0}")]
    UnreadablePdf(String),

    #[error("No readable text found in document")]
    NoReadableText,

    #[error("Unsupported file type '{0}'; only PDF and plain text are accepted")]
    UnsupportedType(String),
}

/// The kinds of upload the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Pdf,
    PlainText,
}

impl SourceKind {
    /// Detects the source kind from the file extension, falling back to content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Result<Self, ExtractionError> {
        if let Some(name) = file_name {
            let lower = name.to_lowercase();
            if lower.ends_with(".pdf") {
                return Ok(SourceKind::Pdf);
            }
            if lower.ends_with(".txt") {
                return Ok(SourceKind::PlainText);
            }
        }

        match content_type.map(|c| c.to_lowercase()) {
            Some(ct) if ct.starts_with("application/pdf") => Ok(SourceKind::Pdf),
            Some(ct) if ct.starts_with("text/plain") => Ok(SourceKind::PlainText),
            other => Err(ExtractionError::UnsupportedType(
                file_name
                    .map(str::to_string)
                    .or(other)
                    .unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

/// A raw uploaded file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Cleaned text plus where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedText {
    pub source: SourceKind,
    pub text: String,
    pub character_count: usize,
}

/// Extracts and cleans text from an upload.
pub async fn extract_text(upload: Upload) -> Result<ExtractedText, ExtractionError> {
    let source = SourceKind::detect(upload.file_name.as_deref(), upload.content_type.as_deref())?;

    let raw = match source {
        SourceKind::Pdf => {
            let bytes = upload.bytes.clone();
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ExtractionError::UnreadablePdf(format!("parser aborted: {e}")))?
                .map_err(|e| ExtractionError::UnreadablePdf(e.to_string()))?
        }
        SourceKind::PlainText => String::from_utf8_lossy(&upload.bytes).into_owned(),
    };

    let text = clean_text(&raw);
    if text.is_empty() {
        return Err(ExtractionError::NoReadableText);
    }

    info!("Extracted {} characters from {:?} upload", text.len(), source);

    Ok(ExtractedText {
        source,
        character_count: text.chars().count(),
        text,
    })
}

static INLINE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t\x0B\x0C\u{A0}]+").unwrap());

/// Normalizes extracted text: unified line endings, single spaces, trimmed lines and
/// no blank-line runs longer than one.
pub fn clean_text(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = true;

    for line in normalized.lines() {
        let line = INLINE_WHITESPACE.replace_all(line, " ");
        let line = line.trim();
        if line.is_empty() {
            if !previous_blank {
                lines.push(String::new());
            }
            previous_blank = true;
        } else {
            lines.push(line.to_string());
            previous_blank = false;
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
