//! Error types for DOCX rendering

use thiserror::Error;
use trifold_compose::RenderError;

/// Errors that can occur while writing a document
#[derive(Error, Debug)]
pub enum DocxError {
    /// Error writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocxError {
    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Archive(_) => "DOCX001",
            Self::Io(_) => "DOCX002",
        }
    }
}

impl From<DocxError> for RenderError {
    fn from(err: DocxError) -> Self {
        RenderError::backend("docx", err)
    }
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;
