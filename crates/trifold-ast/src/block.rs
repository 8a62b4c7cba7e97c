//! Block-level elements for document structure
//!
//! This module defines block-level elements that form the document structure:
//! headings, paragraphs, lists, tables, fenced code, quotes and rules.

use serde::{Deserialize, Serialize};

use crate::inline::Inline;

/// Block-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// A paragraph of text
    Paragraph(Paragraph),
    /// A section heading
    Heading(Heading),
    /// An ordered or unordered list
    List(List),
    /// A table
    Table(Table),
    /// A fenced code block
    Literal(LiteralBlock),
    /// A block quote
    Quote(Quote),
    /// A horizontal rule
    ThematicBreak,
}

impl Block {
    /// Short lowercase name of the block kind, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Heading(_) => "heading",
            Self::List(_) => "list",
            Self::Table(_) => "table",
            Self::Literal(_) => "code",
            Self::Quote(_) => "quote",
            Self::ThematicBreak => "rule",
        }
    }
}

/// A paragraph block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content within the paragraph
    pub inlines: Vec<Inline>,
}

/// A section heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-4, where 1 is the highest)
    pub level: u8,
    /// Heading text content
    pub text: Vec<Inline>,
    /// Anchor derived from the heading text
    pub anchor: Option<String>,
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Type of list
    pub list_type: ListType,
    /// List items, in source order; nesting is carried by `ListItem::level`
    pub items: Vec<ListItem>,
}

/// List type variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListType {
    /// Unordered/bullet list
    Unordered,
    /// Ordered/numbered list
    Ordered,
}

/// A single list item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Item text
    pub inlines: Vec<Inline>,
    /// Nesting level (0-based)
    pub level: u8,
}

/// A table
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table rows, header row first when present
    pub rows: Vec<TableRow>,
    /// Column specifications
    pub columns: Vec<ColumnSpec>,
}

impl Table {
    /// Number of columns, taken from the widest row
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.cells.len())
            .max()
            .unwrap_or(0)
            .max(self.columns.len())
    }

    /// Number of body (non-header) rows
    pub fn body_row_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.is_header).count()
    }
}

/// A table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in this row
    pub cells: Vec<TableCell>,
    /// Whether this is a header row
    pub is_header: bool,
}

/// A table cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content
    pub inlines: Vec<Inline>,
}

/// Column specification
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Alignment from the delimiter row
    pub align: Option<Alignment>,
}

/// Text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// A fenced code block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralBlock {
    /// The literal content, without the fences
    pub content: String,
    /// Info string language, if any
    pub language: Option<String>,
}

/// A block quote
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    /// Quoted blocks
    pub blocks: Vec<Block>,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            level: 1,
            text: Vec::new(),
            anchor: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_default() {
        let para = Paragraph::default();
        assert!(para.inlines.is_empty());
    }

    #[test]
    fn test_table_counts() {
        let row = |header: bool, n: usize| TableRow {
            cells: vec![TableCell::default(); n],
            is_header: header,
        };
        let table = Table {
            rows: vec![row(true, 2), row(false, 2), row(false, 2), row(false, 2)],
            columns: vec![ColumnSpec::default(); 2],
        };
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.body_row_count(), 3);
    }

    #[test]
    fn test_block_kind() {
        assert_eq!(Block::ThematicBreak.kind(), "rule");
        let code = Block::Literal(LiteralBlock {
            content: "fn main() {}".to_string(),
            language: Some("rust".to_string()),
        });
        assert_eq!(code.kind(), "code");
    }
}
