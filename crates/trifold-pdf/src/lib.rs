//! trifold-pdf - paginated PDF generation via Typst
//!
//! # Architecture
//!
//! The PDF generation pipeline consists of two stages:
//!
//! 1. **Transpiler** - Converts a [`PageFlow`] to Typst markup, styled by
//!    the flow's ruleset and with its break policies applied
//! 2. **Compiler** - Compiles Typst markup to PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use trifold_core::{paginate, parse, StyleRuleset};
//! use trifold_pdf::{Compiler, Transpiler};
//!
//! let flow = paginate(&parse("# Roadmap\n"), &StyleRuleset::default());
//! let typst_markup = Transpiler::transpile(&flow);
//! let pdf_bytes = Compiler::new().compile(&typst_markup)?;
//! ```

mod compiler;
mod error;
mod transpiler;

use tracing::debug;
use trifold_compose::{RenderError, Renderer, Theme};
use trifold_core::PageFlow;

pub use compiler::Compiler;
pub use error::{PdfError, Result};
pub use transpiler::Transpiler;

/// Render a page flow to PDF bytes
pub fn render_pdf(flow: &PageFlow) -> Result<Vec<u8>> {
    Compiler::new().compile(&Transpiler::transpile(flow))
}

/// Paginated PDF renderer
///
/// Styling comes from the flow's ruleset; the slide theme is not used.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    compiler: Compiler,
}

impl PdfRenderer {
    pub fn new(compiler: Compiler) -> Self {
        Self { compiler }
    }
}

impl Renderer for PdfRenderer {
    type Input = PageFlow;

    fn artifact(&self) -> &'static str {
        "pdf"
    }

    fn render(
        &self,
        flow: &PageFlow,
        _theme: &Theme,
    ) -> std::result::Result<Vec<u8>, RenderError> {
        let markup = Transpiler::transpile(flow);
        debug!(blocks = flow.blocks.len(), markup = markup.len(), "transpiled flow");
        Ok(self.compiler.compile(&markup)?)
    }
}
