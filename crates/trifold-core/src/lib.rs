//! trifold-core - Markdown in, paginated flow out
//!
//! Parses markdown sources into the trifold document model and tags the
//! blocks with the page-break policies of a [`StyleRuleset`].
//!
//! # Example
//!
//! ```
//! use trifold_core::{paginate, parse, StyleRuleset};
//!
//! let doc = parse("# Roadmap\n\n| Phase | Goal |\n|---|---|\n| 1 | Pilot |\n");
//! assert_eq!(doc.metadata.title.as_deref(), Some("Roadmap"));
//!
//! let flow = paginate(&doc, &StyleRuleset::default());
//! assert!(flow.keeps_with_next(0));
//! assert!(flow.is_unbreakable(1));
//! ```

pub mod error;
pub mod pagination;
pub mod parser;
pub mod source;
pub mod style;

// Re-export main types and functions
pub use error::{CoreError, Result};
pub use pagination::{paginate, BreakAfter, BreakInside, FlowBlock, PageFlow};
pub use parser::{parse, parse_inlines, slugify};
pub use source::load_source;
pub use style::{
    CodeRule, FooterPart, FooterRule, FooterTemplate, HeadingRule, LineRule, PageRule, QuoteRule,
    StyleRuleset, TableRule, TextRule, DEFAULT_FOOTER_LABEL, RULESET_VERSION,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
