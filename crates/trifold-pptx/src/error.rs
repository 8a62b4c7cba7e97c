//! Error types for PPTX rendering.

use thiserror::Error;
use trifold_compose::{RenderError, Size};

/// Result type for PPTX operations
pub type Result<T> = std::result::Result<T, PptxError>;

/// Errors that can occur while writing a presentation
#[derive(Error, Debug)]
pub enum PptxError {
    /// Canvas handed over before it was finalized
    #[error("Canvas {index} is not finalized")]
    UnfinalizedCanvas { index: usize },

    /// A presentation has a single slide size
    #[error("Canvas {index} is {width} x {height} in, deck is {expected_width} x {expected_height} in")]
    InconsistentSize {
        index: usize,
        width: f64,
        height: f64,
        expected_width: f64,
        expected_height: f64,
    },

    /// ZIP archive error
    #[error("Archive error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PptxError {
    /// Create an unfinalized canvas error
    pub fn unfinalized(index: usize) -> Self {
        Self::UnfinalizedCanvas { index }
    }

    /// Create a size mismatch error
    pub fn inconsistent_size(index: usize, size: Size, expected: Size) -> Self {
        Self::InconsistentSize {
            index,
            width: size.width,
            height: size.height,
            expected_width: expected.width,
            expected_height: expected.height,
        }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnfinalizedCanvas { .. } => "PPTX001",
            Self::InconsistentSize { .. } => "PPTX002",
            Self::ZipError(_) => "PPTX003",
            Self::IoError(_) => "PPTX004",
        }
    }
}

impl From<PptxError> for RenderError {
    fn from(err: PptxError) -> Self {
        RenderError::backend("pptx", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PptxError::unfinalized(4);
        assert_eq!(err.code(), "PPTX001");
        assert!(err.to_string().contains('4'));

        let err = PptxError::inconsistent_size(2, Size::STANDARD, Size::WIDESCREEN);
        assert_eq!(err.code(), "PPTX002");
        assert!(err.to_string().contains("Canvas 2"));
    }

    #[test]
    fn test_into_render_error() {
        let err: RenderError = PptxError::unfinalized(1).into();
        match err {
            RenderError::Backend { artifact, source } => {
                assert_eq!(artifact, "pptx");
                assert!(source.to_string().contains("not finalized"));
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }
}
