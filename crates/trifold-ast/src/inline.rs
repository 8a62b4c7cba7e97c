//! Inline elements for document content
//!
//! This module defines inline-level elements that appear within blocks,
//! such as text, emphasis, code spans and links.

use serde::{Deserialize, Serialize};

/// Inline-level content element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain text content
    Text(String),
    /// Formatted content (bold, italic, code)
    Format(FormatType, Box<Inline>),
    /// A span containing multiple inline elements
    Span(Vec<Inline>),
    /// A hyperlink
    Link(Link),
    /// A hard line break
    Break,
}

/// Text formatting types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatType {
    /// Bold text (`**strong**`)
    Bold,
    /// Italic text (`*em*` or `_em_`)
    Italic,
    /// Monospace/code text
    Monospace,
}

/// A hyperlink element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The URL target
    pub url: String,
    /// The link text
    pub text: Vec<Inline>,
}

impl Inline {
    /// Shorthand for a plain text inline
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Shorthand for a formatted text inline
    pub fn formatted(format: FormatType, text: impl Into<String>) -> Self {
        Self::Format(format, Box::new(Self::Text(text.into())))
    }
}

/// Flatten inline content to its plain text
pub fn plain_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        push_plain(inline, &mut out);
    }
    out
}

fn push_plain(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::Format(_, inner) => push_plain(inner, out),
        Inline::Span(inlines) => {
            for inline in inlines {
                push_plain(inline, out);
            }
        }
        Inline::Link(link) => {
            for inline in &link.text {
                push_plain(inline, out);
            }
        }
        Inline::Break => out.push('\n'),
    }
}
