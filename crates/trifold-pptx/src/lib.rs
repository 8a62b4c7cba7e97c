//! # trifold-pptx
//!
//! PowerPoint (PPTX) rendering of composed trifold canvases.
//!
//! Each finalized [`Canvas`](trifold_compose::Canvas) becomes one slide.
//! Shapes map to DrawingML preset geometries, text boxes to `txBox` shapes
//! and tables to `a:tbl` graphic frames. Inches are converted to EMU by
//! rounding.
//!
//! ## Example
//!
//! ```rust
//! use trifold_compose::{Canvas, Renderer, Role, Size, Theme};
//! use trifold_pptx::PptxRenderer;
//!
//! let theme = Theme::default();
//! let mut canvas = Canvas::new(1, 1, Size::WIDESCREEN, theme.resolve(Role::Background));
//! canvas.close_with_number(&theme)?;
//!
//! let bytes = PptxRenderer::default().render(&[canvas], &theme)?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod drawing;
pub mod error;
pub mod writer;

// Re-exports
pub use error::{PptxError, Result};
pub use writer::{slide_xml, PptxRenderer, PptxWriter};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// PPTX-related constants
pub mod constants {
    /// Widescreen 16:9 slide width in EMU (13.333" width)
    pub const WIDESCREEN_SLIDE_WIDTH_EMU: i64 = 12_192_000;

    /// Widescreen 16:9 slide height in EMU (7.5" height)
    pub const WIDESCREEN_SLIDE_HEIGHT_EMU: i64 = 6_858_000;

    /// EMU per inch
    pub const EMU_PER_INCH: i64 = 914_400;

    /// EMU per point
    pub const EMU_PER_POINT: i64 = 12_700;

    /// PresentationML namespace
    pub const NS_PRESENTATION: &str =
        "http://schemas.openxmlformats.org/presentationml/2006/main";

    /// DrawingML namespace
    pub const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

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

    /// Slide relationship type
    pub const REL_TYPE_SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

    /// Slide layout relationship type
    pub const REL_TYPE_SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

    /// Slide master relationship type
    pub const REL_TYPE_SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";

    /// Theme relationship type
    pub const REL_TYPE_THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
}
