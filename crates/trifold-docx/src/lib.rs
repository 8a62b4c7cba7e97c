//! # trifold-docx
//!
//! Word (DOCX) rendering of parsed markdown documents.
//!
//! Styles come from the theme's fonts and accent color. Level-1 sections
//! start on a new page; a cover page and a table of contents can be put in
//! front of the body with [`DocxOptions`].
//!
//! ## Example
//!
//! ```rust
//! use trifold_ast::{Block, Document, Inline, Paragraph};
//! use trifold_compose::{Renderer, Theme};
//! use trifold_docx::{DocxOptions, DocxRenderer};
//!
//! let mut doc = Document::with_title("Notes");
//! doc.push(Block::Paragraph(Paragraph {
//!     inlines: vec![Inline::text("Hello")],
//! }));
//!
//! let bytes = DocxRenderer::new(DocxOptions::default()).render(&doc, &Theme::default())?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod styles;
pub mod writer;

// Re-exports
pub use error::{DocxError, Result};
pub use writer::{bookmark_name, bookmark_names, Cover, DocxOptions, DocxRenderer, DocxWriter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DOCX-related constants
pub mod constants {
    /// A4 page width in twips
    pub const A4_WIDTH_TWIPS: i64 = 11_906;

    /// A4 page height in twips
    pub const A4_HEIGHT_TWIPS: i64 = 16_838;

    /// One-inch page margin in twips
    pub const PAGE_MARGIN_TWIPS: i64 = 1_440;

    /// Text width between margins on A4, in twips
    pub const TEXT_WIDTH_TWIPS: i64 = 9_026;

    /// First relationship id used for external hyperlinks
    ///
    /// rId1 and rId2 are the styles and numbering parts.
    pub const FIRST_LINK_REL_ID: usize = 3;

    /// WordprocessingML namespace
    pub const NS_WORDPROCESSING: &str =
        "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// Relationships namespace
    pub const NS_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Package relationships namespace
    pub const NS_PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Content Types namespace
    pub const NS_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// Main document relationship type
    pub const REL_TYPE_OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

    pub const REL_TYPE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

    pub const REL_TYPE_NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

    pub const REL_TYPE_HYPERLINK: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_text_width() {
        assert_eq!(
            constants::TEXT_WIDTH_TWIPS,
            constants::A4_WIDTH_TWIPS - 2 * constants::PAGE_MARGIN_TWIPS
        );
    }
}
