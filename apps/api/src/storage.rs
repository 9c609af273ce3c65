//! Export store — rendered résumés on local disk, served back by file name.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{ExportFormat, RenderedFile};
use crate::generation::templates::TemplateId;

#[derive(Debug, Clone)]
pub struct ExportStore {
    root: PathBuf,
}

/// A file written to the store.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub filename: String,
    pub format: ExportFormat,
    pub size_bytes: usize,
    pub download_url: String,
}

impl ExportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ExportStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Storage(format!("create {}: {e}", self.root.display())))
    }

    /// `{template}_resume_{timestamp}_{short-id}.{ext}`
    pub fn unique_name(template: TemplateId, format: ExportFormat) -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!(
            "{}_resume_{}_{}.{}",
            template.as_str(),
            Utc::now().format("%Y%m%d_%H%M%S"),
            &id[..8],
            format.extension()
        )
    }

    pub async fn save(&self, template: TemplateId, file: &RenderedFile) -> Result<StoredFile, AppError> {
        self.ensure_dir().await?;
        let filename = Self::unique_name(template, file.format);
        let path = self.root.join(&filename);

        tokio::fs::write(&path, &file.bytes)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {e}", path.display())))?;

        info!("Stored {} ({} bytes)", filename, file.bytes.len());
        Ok(StoredFile {
            download_url: format!("/api/v1/downloads/{filename}"),
            filename,
            format: file.format,
            size_bytes: file.bytes.len(),
        })
    }

    /// Reads a stored file. Names with path separators or `..` are rejected.
    pub async fn load(&self, filename: &str) -> Result<(ExportFormat, Vec<u8>), AppError> {
        validate_name(filename)?;
        let format = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| AppError::NotFound(format!("File '{filename}' not found")))?;

        match tokio::fs::read(self.root.join(filename)).await {
            Ok(bytes) => Ok((format, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File '{filename}' not found")))
            }
            Err(e) => Err(AppError::Storage(format!("read {filename}: {e}"))),
        }
    }
}

fn validate_name(filename: &str) -> Result<(), AppError> {
    let bad = filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
        || filename.contains('\0');
    if bad {
        return Err(AppError::Validation(format!("Invalid file name '{filename}'")));
    }
    Ok(())
}
