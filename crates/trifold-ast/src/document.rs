//! Document root and front matter

use serde::{Deserialize, Serialize};

use crate::block::Block;

/// A complete document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub metadata: DocumentMeta,
    /// Content blocks, in source order
    pub blocks: Vec<Block>,
}

/// What a document says about itself: its title and the cover page fields
///
/// Deserializes from a front matter table; missing keys stay unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMeta {
    /// Front matter title, or else the first level-1 heading
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub author: Option<String>,
    /// Small lines near the bottom of the cover
    pub details: Vec<String>,
    /// Last, faintest cover line, e.g. date and classification
    pub footnote: Option<String>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with a title
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            metadata: DocumentMeta {
                title: Some(title.into()),
                ..Default::default()
            },
            blocks: Vec::new(),
        }
    }

    /// Append a block to the document
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Heading anchors in source order, including headings inside quotes
    pub fn anchors(&self) -> Vec<&str> {
        let mut anchors = Vec::new();
        collect_anchors(&self.blocks, &mut anchors);
        anchors
    }
}

fn collect_anchors<'a>(blocks: &'a [Block], anchors: &mut Vec<&'a str>) {
    for block in blocks {
        match block {
            Block::Heading(heading) => anchors.extend(heading.anchor.as_deref()),
            Block::Quote(quote) => collect_anchors(&quote.blocks, anchors),
            _ => {}
        }
    }
}

impl DocumentMeta {
    /// Any cover field besides the title is set
    pub fn has_cover_fields(&self) -> bool {
        self.subtitle.is_some()
            || self.tagline.is_some()
            || !self.details.is_empty()
            || self.footnote.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Heading, Paragraph, Quote};
    use crate::inline::Inline;

    fn heading(anchor: Option<&str>) -> Block {
        Block::Heading(Heading {
            level: 2,
            text: vec![Inline::text("Risks")],
            anchor: anchor.map(str::to_string),
        })
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert!(!doc.metadata.has_cover_fields());
    }

    #[test]
    fn test_document_with_title() {
        let doc = Document::with_title("Roadmap");
        assert_eq!(doc.metadata.title, Some("Roadmap".to_string()));
        assert!(!doc.metadata.has_cover_fields());
    }

    #[test]
    fn test_anchors_include_quoted_headings() {
        let mut doc = Document::new();
        doc.push(heading(Some("summary")));
        doc.push(Block::Paragraph(Paragraph {
            inlines: vec![Inline::text("Hello")],
        }));
        doc.push(heading(None));
        doc.push(Block::Quote(Quote {
            blocks: vec![heading(Some("risks"))],
        }));
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.anchors(), vec!["summary", "risks"]);
    }

    #[test]
    fn test_meta_from_partial_table() {
        let meta: DocumentMeta =
            serde_json::from_str(r#"{"subtitle": "RWA Looping", "details": ["Aave | Morpho"]}"#)
                .unwrap();
        assert_eq!(meta.title, None);
        assert_eq!(meta.subtitle.as_deref(), Some("RWA Looping"));
        assert_eq!(meta.details, vec!["Aave | Morpho".to_string()]);
        assert!(meta.has_cover_fields());
    }
}
