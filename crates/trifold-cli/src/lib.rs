//! trifold CLI - Command-line interface library
//!
//! This library provides the CLI functionality for trifold:
//! - Deck: compose a TOML deck description into a PPTX presentation
//! - Doc: render a markdown file to DOCX
//! - Pdf: render a markdown file to a paginated PDF
//! - Layout: print the composed canvases of a deck as JSON
//!
//! # Binary Usage
//!
//! ```bash
//! # Presentation next to the deck file
//! trifold deck strategy.toml
//!
//! # Word document with cover page and table of contents
//! trifold doc strategy.md --cover --toc -o out/strategy.docx
//!
//! # PDF with a custom footer label
//! trifold pdf roadmap.md --label Confidential
//! ```

pub mod app;

// Re-export main entry point and commands
pub use app::{deck_command, doc_command, layout_command, layout_json, pdf_command, run_cli};
