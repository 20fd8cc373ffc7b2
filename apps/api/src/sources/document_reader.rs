//! Resume reading — turns a resume document (on disk or uploaded) into plain text.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DocumentReadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Resume is not valid UTF-8 text")]
    Encoding,

    #[error("Resume contains no extractable text")]
    NoText,

    #[error("Unsupported resume format: {0}")]
    Unsupported(String),

    #[error("Resume extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Where a resume comes from.
#[derive(Debug, Clone)]
pub enum ResumeSource {
    Path(PathBuf),
    Blob {
        file_name: Option<String>,
        bytes: Bytes,
    },
}

impl ResumeSource {
    /// Name used for format detection and log lines.
    pub fn display_name(&self) -> String {
        match self {
            ResumeSource::Path(path) => path.display().to_string(),
            ResumeSource::Blob { file_name, .. } => {
                file_name.clone().unwrap_or_else(|| "<upload>".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Pdf,
    PlainText,
}

/// The document-reading capability consumed by the pipeline.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn read(&self, source: &ResumeSource) -> Result<String, DocumentReadError>;
}

/// Reads PDF (via `pdf-extract`) and plain-text / Markdown resumes.
#[derive(Debug, Clone, Default)]
pub struct FileDocumentReader;

#[async_trait]
impl DocumentReader for FileDocumentReader {
    async fn read(&self, source: &ResumeSource) -> Result<String, DocumentReadError> {
        let name = source.display_name();
        let bytes = match source {
            ResumeSource::Path(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| DocumentReadError::Io {
                        path: path.clone(),
                        source,
                    })?
            }
            ResumeSource::Blob { bytes, .. } => bytes.to_vec(),
        };

        let format = detect_format(&name, &bytes)?;
        let text = match format {
            DocumentFormat::Pdf => {
                tokio::task::spawn_blocking(move || {
                    pdf_extract::extract_text_from_mem(&bytes)
                        .map_err(|e| DocumentReadError::Pdf(e.to_string()))
                })
                .await??
            }
            DocumentFormat::PlainText => {
                String::from_utf8(bytes).map_err(|_| DocumentReadError::Encoding)?
            }
        };

        info!("Read resume {} ({:?}, {} chars)", name, format, text.len());
        Ok(text)
    }
}

/// PDF is recognised by its `%PDF` header regardless of name; otherwise the
/// extension decides.
fn detect_format(name: &str, bytes: &[u8]) -> Result<DocumentFormat, DocumentReadError> {
    if bytes.starts_with(b"%PDF") {
        return Ok(DocumentFormat::Pdf);
    }

    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => Ok(DocumentFormat::Pdf),
        Some("txt" | "md" | "markdown") => Ok(DocumentFormat::PlainText),
        Some(other) => Err(DocumentReadError::Unsupported(format!(".{other}"))),
        None => Err(DocumentReadError::Unsupported(name.to_string())),
    }
}
