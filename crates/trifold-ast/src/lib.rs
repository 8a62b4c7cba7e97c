//! trifold-ast - Document model
//!
//! This crate provides the block and inline types produced by the markdown
//! parser and consumed by the document and PDF renderers.

pub mod block;
pub mod document;
pub mod inline;

pub use block::{
    Alignment, Block, ColumnSpec, Heading, List, ListItem, ListType, LiteralBlock, Paragraph,
    Quote, Table, TableCell, TableRow,
};
pub use document::{Document, DocumentMeta};
pub use inline::{plain_text, FormatType, Inline, Link};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
