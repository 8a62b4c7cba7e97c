//! Error types for PDF generation

use thiserror::Error;
use trifold_compose::RenderError;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during PDF generation
#[derive(Error, Debug)]
pub enum PdfError {
    /// Typst compilation or PDF export failed
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// A font file could not be read
    #[error("Font error: {path}: {source}")]
    Font {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PdfError {
    pub fn font(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Font {
            path: path.into(),
            source,
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Compilation(_) => "PDF001",
            Self::Font { .. } => "PDF002",
        }
    }
}

impl From<PdfError> for RenderError {
    fn from(err: PdfError) -> Self {
        RenderError::backend("pdf", err)
    }
}
