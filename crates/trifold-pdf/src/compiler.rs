//! Typst to PDF compiler
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib.

use std::path::PathBuf;

use tracing::{debug, warn};
use typst_as_lib::TypstEngine;

use crate::error::{PdfError, Result};

/// Compiler for converting Typst markup to PDF
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    /// Font files handed to the engine
    fonts: Vec<PathBuf>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a font file
    pub fn with_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.fonts.push(path.into());
        self
    }

    pub fn fonts(&self) -> &[PathBuf] {
        &self.fonts
    }

    /// Compile Typst markup to PDF bytes
    pub fn compile(&self, markup: &str) -> Result<Vec<u8>> {
        let mut builder = TypstEngine::builder().main_file(markup.to_string());

        for font_path in &self.fonts {
            let font_bytes = std::fs::read(font_path)
                .map_err(|e| PdfError::font(font_path.display().to_string(), e))?;
            builder = builder.fonts([font_bytes]);
        }

        let engine = builder.build();

        // Warned<Result<Document, Error>>
        let compiled = engine.compile();
        for warning in &compiled.warnings {
            warn!(message = %warning.message, "typst warning");
        }

        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        debug!(bytes = pdf_bytes.len(), fonts = self.fonts.len(), "compiled pdf");
        Ok(pdf_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_simple() {
        let markup = "= Hello World\n\nThis is a test document.";
        let result = Compiler::new().compile(markup);

        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
        assert!(result.unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_font() {
        let err = Compiler::new()
            .with_font("/nonexistent/font.ttf")
            .compile("text")
            .unwrap_err();
        assert_eq!(err.code(), "PDF002");
    }
}
