//! Markdown Parser
//!
//! This module parses markdown text into a `trifold_ast::Document`.
//!
//! # Supported Syntax
//!
//! - Headings: `#` through `####` (deeper levels are folded into level 4)
//! - Paragraphs: text separated by blank lines, hard breaks on trailing `  ` or `\`
//! - Fenced code: ```` ```lang ```` or `~~~`
//! - Pipe tables with a delimiter row (`| --- | :---: |`)
//! - Thematic breaks: `---`, `***`, `___`
//! - Lists: `-`, `*`, `+` and `1.` items, nested by indentation
//! - Block quotes: `>`
//! - Inlines: `**bold**`, `*italic*`, `_italic_`, `` `code` ``, `[text](url)`
//!
//! The first level-1 heading also becomes the document title. A document
//! may open with TOML front matter between `+++` lines that sets the title
//! and the cover fields:
//!
//! ```text
//! +++
//! subtitle = "Institutional RWA Looping Infrastructure"
//! details = ["Built on Aave V3 | Morpho"]
//! footnote = "February 2026 | Confidential"
//! +++
//! ```
//!
//! Repeated heading anchors get a `-1`, `-2`, ... suffix so every anchor is
//! unique within the document.
//!
//! # Example
//!
//! ```
//! use trifold_core::parser;
//!
//! let doc = parser::parse("# Roadmap\n\nHello **world**.\n");
//! assert_eq!(doc.metadata.title, Some("Roadmap".to_string()));
//! assert_eq!(doc.len(), 2);
//! ```

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::{debug, warn};
use trifold_ast::{
    plain_text, Alignment, Block, ColumnSpec, Document, DocumentMeta, FormatType, Heading, Inline,
    Link, List, ListItem, ListType, LiteralBlock, Paragraph, Quote, Table, TableCell, TableRow,
};

/// Parser state for tracking what kind of block we're currently building
#[derive(Debug, Clone, PartialEq)]
enum ParserState {
    /// At the root level, not in any block
    Root,
    /// Building a paragraph with accumulated lines
    Paragraph(Vec<String>),
    /// Building a list with accumulated items
    List(ListType, Vec<ListItem>),
    /// Inside a fenced code block
    Code {
        fence: String,
        language: Option<String>,
        lines: Vec<String>,
    },
    /// Building a table after its delimiter row
    Table {
        columns: Vec<ColumnSpec>,
        rows: Vec<TableRow>,
    },
    /// Collecting quoted lines, markers stripped
    Quote(Vec<String>),
}

/// Markdown parser using a state machine approach
struct Parser {
    metadata: DocumentMeta,
    blocks: Vec<Block>,
    state: ParserState,
    /// Quote bodies are parsed by a nested parser that never sets the title
    nested: bool,
}

impl Parser {
    fn new() -> Self {
        Self {
            metadata: DocumentMeta::default(),
            blocks: Vec::new(),
            state: ParserState::Root,
            nested: false,
        }
    }

    fn nested() -> Self {
        Self {
            nested: true,
            ..Self::new()
        }
    }

    /// Parse the entire document
    fn parse(mut self, text: &str) -> Document {
        let text = text.replace("\r\n", "\n");

        for line in text.lines() {
            self.process_line(line);
        }
        self.flush_state();

        Document {
            metadata: self.metadata,
            blocks: self.blocks,
        }
    }

    /// Process a single line
    fn process_line(&mut self, line: &str) {
        // Code blocks swallow everything up to the closing fence
        if let ParserState::Code { fence, lines, .. } = &mut self.state {
            if is_closing_fence(line, fence) {
                self.flush_state();
            } else {
                lines.push(line.to_string());
            }
            return;
        }

        if line.trim().is_empty() {
            self.flush_state();
            return;
        }

        if let Some(quoted) = strip_quote_marker(line) {
            match &mut self.state {
                ParserState::Quote(lines) => lines.push(quoted.to_string()),
                _ => {
                    self.flush_state();
                    self.state = ParserState::Quote(vec![quoted.to_string()]);
                }
            }
            return;
        }
        if matches!(self.state, ParserState::Quote(_)) {
            self.flush_state();
        }

        if let Some((fence, language)) = try_parse_fence(line) {
            self.flush_state();
            self.state = ParserState::Code {
                fence,
                language,
                lines: Vec::new(),
            };
            return;
        }

        if let Some(heading) = self.try_parse_heading(line) {
            self.flush_state();
            self.blocks.push(Block::Heading(heading));
            return;
        }

        if is_thematic_break(line) {
            self.flush_state();
            self.blocks.push(Block::ThematicBreak);
            return;
        }

        if let ParserState::Table { columns, rows } = &mut self.state {
            if line.contains('|') {
                rows.push(table_row(line, columns.len(), false));
                return;
            }
        }
        if matches!(self.state, ParserState::Table { .. }) {
            self.flush_state();
        }

        if let Some(columns) = try_parse_delimiter_row(line) {
            if self.try_start_table(columns) {
                return;
            }
        }

        if let Some((level, list_type, content)) = try_parse_list_item(line) {
            self.handle_list_item(list_type, level, content);
            return;
        }

        // Lazy continuation of the last list item
        if let ParserState::List(_, items) = &mut self.state {
            if let Some(item) = items.last_mut() {
                item.inlines.push(Inline::Text(" ".to_string()));
                item.inlines.extend(parse_inlines(line.trim()));
                item.inlines = merge_text(std::mem::take(&mut item.inlines));
                return;
            }
        }

        self.handle_paragraph_line(line);
    }

    /// Try to parse a heading line
    fn try_parse_heading(&mut self, line: &str) -> Option<Heading> {
        let caps = heading_re().captures(line)?;
        let level = caps[1].len().min(4) as u8;
        let inlines = parse_inlines(caps[2].trim());
        let title = plain_text(&inlines);

        if level == 1 && !self.nested && self.metadata.title.is_none() {
            self.metadata.title = Some(title.clone());
        }

        Some(Heading {
            level,
            text: inlines,
            anchor: Some(slugify(&title)).filter(|slug| !slug.is_empty()),
        })
    }

    /// Turn a single pending paragraph line into a table header
    fn try_start_table(&mut self, columns: Vec<ColumnSpec>) -> bool {
        let header = match &self.state {
            ParserState::Paragraph(lines) if lines.len() == 1 && lines[0].contains('|') => {
                split_cells(&lines[0])
            }
            _ => return false,
        };
        if header.len() != columns.len() {
            return false;
        }
        let header = TableRow {
            cells: header
                .iter()
                .map(|text| TableCell {
                    inlines: parse_inlines(text),
                })
                .collect(),
            is_header: true,
        };
        self.state = ParserState::Table {
            columns,
            rows: vec![header],
        };
        true
    }

    /// Handle a list item
    fn handle_list_item(&mut self, list_type: ListType, level: u8, content: &str) {
        let item = ListItem {
            inlines: parse_inlines(content),
            level,
        };

        match &mut self.state {
            // Nested items join the open list whatever their marker
            ParserState::List(current_type, items) if *current_type == list_type || level > 0 => {
                items.push(item);
            }
            _ => {
                self.flush_state();
                self.state = ParserState::List(list_type, vec![item]);
            }
        }
    }

    /// Handle a paragraph line
    fn handle_paragraph_line(&mut self, line: &str) {
        match &mut self.state {
            ParserState::Paragraph(lines) => {
                lines.push(line.to_string());
            }
            _ => {
                self.flush_state();
                self.state = ParserState::Paragraph(vec![line.to_string()]);
            }
        }
    }

    /// Flush the current state to blocks
    fn flush_state(&mut self) {
        let state = std::mem::replace(&mut self.state, ParserState::Root);

        match state {
            ParserState::Root => {}
            ParserState::Paragraph(lines) => {
                if !lines.is_empty() {
                    self.blocks.push(Block::Paragraph(Paragraph {
                        inlines: paragraph_inlines(&lines),
                    }));
                }
            }
            ParserState::List(list_type, items) => {
                if !items.is_empty() {
                    self.blocks.push(Block::List(List { list_type, items }));
                }
            }
            ParserState::Code {
                language, lines, ..
            } => {
                self.blocks.push(Block::Literal(LiteralBlock {
                    content: lines.join("\n"),
                    language,
                }));
            }
            ParserState::Table { columns, rows } => {
                self.blocks.push(Block::Table(Table { rows, columns }));
            }
            ParserState::Quote(lines) => {
                let inner = Parser::nested().parse(&lines.join("\n"));
                self.blocks.push(Block::Quote(Quote {
                    blocks: inner.blocks,
                }));
            }
        }
    }
}

fn heading_re() -> &'static Regex {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    HEADING_RE.get_or_init(|| Regex::new(r"^ {0,3}(#{1,6})\s+(.*?)(?:\s+#+)?\s*$").unwrap())
}

fn is_thematic_break(line: &str) -> bool {
    static RULE_RE: OnceLock<Regex> = OnceLock::new();
    RULE_RE
        .get_or_init(|| {
            Regex::new(r"^ {0,3}(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$").unwrap()
        })
        .is_match(line)
}

/// Opening fence and its info-string language
fn try_parse_fence(line: &str) -> Option<(String, Option<String>)> {
    static FENCE_RE: OnceLock<Regex> = OnceLock::new();
    let caps = FENCE_RE
        .get_or_init(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})\s*([^`\s]*)").unwrap())
        .captures(line)?;
    let language = Some(caps[2].to_string()).filter(|l| !l.is_empty());
    Some((caps[1].to_string(), language))
}

fn is_closing_fence(line: &str, fence: &str) -> bool {
    let trimmed = line.trim();
    let marker = fence.chars().next().unwrap_or('`');
    trimmed.len() >= fence.len() && trimmed.chars().all(|c| c == marker)
}

fn strip_quote_marker(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('>')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// List item as `(nesting level, type, content)`
fn try_parse_list_item(line: &str) -> Option<(u8, ListType, &str)> {
    static ITEM_RE: OnceLock<Regex> = OnceLock::new();
    let caps = ITEM_RE
        .get_or_init(|| Regex::new(r"^([ \t]*)([-*+]|\d{1,9}[.)])[ \t]+(.*)$").unwrap())
        .captures(line)?;

    let indent: usize = caps[1]
        .chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum();
    let list_type = if caps[2].starts_with(|c: char| c.is_ascii_digit()) {
        ListType::Ordered
    } else {
        ListType::Unordered
    };
    let content = caps.get(3).map_or("", |m| m.as_str());
    Some(((indent / 2).min(8) as u8, list_type, content.trim()))
}

/// Delimiter row such as `|---|:---:|--:|`
fn try_parse_delimiter_row(line: &str) -> Option<Vec<ColumnSpec>> {
    static DELIM_RE: OnceLock<Regex> = OnceLock::new();
    let cell_re = DELIM_RE.get_or_init(|| Regex::new(r"^(:?)-+(:?)$").unwrap());

    if !line.contains('-') {
        return None;
    }
    let cells = split_cells(line);
    if cells.is_empty() {
        return None;
    }
    cells
        .iter()
        .map(|cell| {
            let caps = cell_re.captures(cell)?;
            let align = match (!caps[1].is_empty(), !caps[2].is_empty()) {
                (true, true) => Some(Alignment::Center),
                (true, false) => Some(Alignment::Left),
                (false, true) => Some(Alignment::Right),
                (false, false) => None,
            };
            Some(ColumnSpec { align })
        })
        .collect()
}

/// Split a pipe row into trimmed cell texts
fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(c),
        }
    }
    cells.push(current.trim().to_string());
    cells
}

/// Body row padded or truncated to the column count
fn table_row(line: &str, columns: usize, is_header: bool) -> TableRow {
    let mut texts = split_cells(line);
    texts.resize(columns, String::new());
    TableRow {
        cells: texts
            .iter()
            .map(|text| TableCell {
                inlines: parse_inlines(text),
            })
            .collect(),
        is_header,
    }
}

fn paragraph_inlines(lines: &[String]) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let hard_break = line.ends_with("  ") || line.ends_with('\\');
        let content = line.trim();
        let content = content.strip_suffix('\\').unwrap_or(content);
        inlines.extend(parse_inlines(content));
        if i + 1 < lines.len() {
            inlines.push(if hard_break {
                Inline::Break
            } else {
                Inline::Text(" ".to_string())
            });
        }
    }
    merge_text(inlines)
}

/// Join adjacent text nodes
fn merge_text(inlines: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines {
        match (out.last_mut(), inline) {
            (Some(Inline::Text(prev)), Inline::Text(text)) => prev.push_str(&text),
            (_, inline) => out.push(inline),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum InlineKind {
    Code,
    Link,
    Bold,
    Italic,
}

fn inline_patterns() -> &'static [(InlineKind, Regex); 4] {
    static PATTERNS: OnceLock<[(InlineKind, Regex); 4]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (InlineKind::Code, Regex::new(r"`([^`]+)`").unwrap()),
            (
                InlineKind::Link,
                Regex::new(r"\[([^\]]+)\]\(([^)\s]+)\)").unwrap(),
            ),
            (
                InlineKind::Bold,
                Regex::new(r"\*\*(.+?)\*\*|__(.+?)__").unwrap(),
            ),
            (
                InlineKind::Italic,
                Regex::new(r"\*([^*\s][^*]*?)\*|\b_([^_]+)_\b").unwrap(),
            ),
        ]
    })
}

fn group<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map_or("", |m| m.as_str())
}

fn wrap(format: FormatType, mut inner: Vec<Inline>) -> Inline {
    let inner = if inner.len() == 1 {
        inner.remove(0)
    } else {
        Inline::Span(inner)
    };
    Inline::Format(format, Box::new(inner))
}

/// Parse inline formatting in text
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut result = Vec::new();
    let mut remaining = text;

    while !remaining.is_empty() {
        // Earliest match wins; on a tie the pattern order decides
        let earliest = inline_patterns()
            .iter()
            .filter_map(|(kind, re)| re.captures(remaining).map(|caps| (*kind, caps)))
            .min_by_key(|(kind, caps)| (caps.get(0).map_or(usize::MAX, |m| m.start()), *kind));

        let Some((kind, caps)) = earliest else {
            result.push(Inline::Text(remaining.to_string()));
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };

        if whole.start() > 0 {
            result.push(Inline::Text(remaining[..whole.start()].to_string()));
        }
        let inline = match kind {
            InlineKind::Code => Inline::formatted(FormatType::Monospace, group(&caps)),
            InlineKind::Link => Inline::Link(Link {
                url: caps[2].to_string(),
                text: parse_inlines(&caps[1]),
            }),
            InlineKind::Bold => wrap(FormatType::Bold, parse_inlines(group(&caps))),
            InlineKind::Italic => wrap(FormatType::Italic, parse_inlines(group(&caps))),
        };
        result.push(inline);
        remaining = &remaining[whole.end()..];
    }

    result
}

/// Anchor id from heading text: lowercase, alphanumerics joined by `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if (c.is_whitespace() || c == '-' || c == '_') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// TOML front matter between `+++` lines at the very start, and the rest
fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text.strip_prefix("+++\n") else {
        return (None, text);
    };
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "+++" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, text)
}

/// Repeated anchors get `-1`, `-2`, ... in source order
fn dedupe_anchors(blocks: &mut [Block], used: &mut HashSet<String>) {
    for block in blocks {
        match block {
            Block::Heading(heading) => {
                if let Some(anchor) = &mut heading.anchor {
                    let mut candidate = anchor.clone();
                    let mut n = 0;
                    while used.contains(&candidate) {
                        n += 1;
                        candidate = format!("{}-{}", anchor, n);
                    }
                    used.insert(candidate.clone());
                    *anchor = candidate;
                }
            }
            Block::Quote(quote) => dedupe_anchors(&mut quote.blocks, used),
            _ => {}
        }
    }
}

/// Parse markdown text into an AST Document.
///
/// The parser is lenient: unknown constructs become paragraph text and an
/// unclosed code fence runs to the end of the input.
pub fn parse(text: &str) -> Document {
    let text = text.replace("\r\n", "\n");
    let (front_matter, body) = split_front_matter(&text);

    let mut parser = Parser::new();
    if let Some(front_matter) = front_matter {
        match toml::from_str::<DocumentMeta>(front_matter) {
            Ok(metadata) => parser.metadata = metadata,
            Err(e) => warn!(error = %e, "ignoring invalid front matter"),
        }
    }
    let mut doc = parser.parse(body);
    dedupe_anchors(&mut doc.blocks, &mut HashSet::new());
    debug!(
        blocks = doc.blocks.len(),
        title = doc.metadata.title.as_deref().unwrap_or(""),
        "parsed markdown"
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inlines_simple() {
        let inlines = parse_inlines("Hello world");
        assert_eq!(inlines, vec![Inline::Text("Hello world".to_string())]);
    }

    #[test]
    fn test_parse_inlines_bold_and_italic() {
        let inlines = parse_inlines("a **b** and *c* or _d_");
        assert_eq!(inlines.len(), 6);
        assert!(matches!(inlines[1], Inline::Format(FormatType::Bold, _)));
        assert!(matches!(inlines[3], Inline::Format(FormatType::Italic, _)));
        assert!(matches!(inlines[5], Inline::Format(FormatType::Italic, _)));
    }

    #[test]
    fn test_parse_inlines_code_is_literal() {
        let inlines = parse_inlines("run `cargo **build**` now");
        assert_eq!(
            inlines[1],
            Inline::formatted(FormatType::Monospace, "cargo **build**")
        );
    }

    #[test]
    fn test_parse_inlines_link() {
        let inlines = parse_inlines("see [the **docs**](https://example.com).");
        let Inline::Link(link) = &inlines[1] else {
            panic!("expected link, got {:?}", inlines[1]);
        };
        assert_eq!(link.url, "https://example.com");
        assert_eq!(plain_text(&link.text), "the docs");
    }

    #[test]
    fn test_snake_case_is_not_italic() {
        let inlines = parse_inlines("call max_ltv_ratio here");
        assert_eq!(inlines, vec![Inline::text("call max_ltv_ratio here")]);
    }

    #[test]
    fn test_nested_bold_italic() {
        let inlines = parse_inlines("**very *nice* result**");
        let Inline::Format(FormatType::Bold, inner) = &inlines[0] else {
            panic!("expected bold");
        };
        assert!(matches!(**inner, Inline::Span(_)));
    }

    #[test]
    fn test_heading_levels() {
        let doc = parse("# One\n## Two\n#### Four\n###### Six\n");
        let levels: Vec<u8> = doc
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some(h.level),
                _ => None,
            })
            .collect();
        assert_eq!(levels, vec![1, 2, 4, 4]);
        assert_eq!(doc.metadata.title, Some("One".to_string()));
    }

    #[test]
    fn test_title_is_first_h1_only() {
        let doc = parse("## Intro\n\n# Main\n\n# Second\n");
        assert_eq!(doc.metadata.title, Some("Main".to_string()));
    }

    #[test]
    fn test_paragraph_joins_lines() {
        let doc = parse("first line\nsecond line\n\nnext");
        assert_eq!(doc.len(), 2);
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.inlines, vec![Inline::text("first line second line")]);
    }

    #[test]
    fn test_hard_break() {
        let doc = parse("line one  \nline two");
        let Block::Paragraph(p) = &doc.blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(p.inlines[1], Inline::Break);
    }

    #[test]
    fn test_fenced_code() {
        let doc = parse("```solidity\nfunction operate() external;\n\n# not a heading\n```\n");
        assert_eq!(doc.len(), 1);
        let Block::Literal(code) = &doc.blocks[0] else {
            panic!("expected code");
        };
        assert_eq!(code.language.as_deref(), Some("solidity"));
        assert_eq!(code.content, "function operate() external;\n\n# not a heading");
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let doc = parse("~~~\nraw\n");
        assert!(matches!(&doc.blocks[0], Block::Literal(c) if c.content == "raw"));
    }

    #[test]
    fn test_table_with_alignment() {
        let doc = parse("| Asset | APY | Notes |\n|:--|--:|:-:|\n| USTB | 4.5% | T-bills |\n| JTRSY | 4.3% |\n");
        let Block::Table(table) = &doc.blocks[0] else {
            panic!("expected table, got {:?}", doc.blocks[0]);
        };
        assert_eq!(table.rows.len(), 3);
        assert!(table.rows[0].is_header);
        assert_eq!(
            table.columns.iter().map(|c| c.align).collect::<Vec<_>>(),
            vec![
                Some(Alignment::Left),
                Some(Alignment::Right),
                Some(Alignment::Center)
            ]
        );
        // short rows are padded
        assert_eq!(table.rows[2].cells.len(), 3);
    }

    #[test]
    fn test_pipe_line_without_delimiter_is_paragraph() {
        let doc = parse("a | b\nc | d\n");
        assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_nested_list() {
        let doc = parse("- one\n  - nested\n- two\n\n1. first\n2. second\n");
        assert_eq!(doc.len(), 2);
        let Block::List(list) = &doc.blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(list.list_type, ListType::Unordered);
        assert_eq!(
            list.items.iter().map(|i| i.level).collect::<Vec<_>>(),
            vec![0, 1, 0]
        );
        assert!(matches!(&doc.blocks[1], Block::List(l) if l.list_type == ListType::Ordered));
    }

    #[test]
    fn test_rules_and_quotes() {
        let doc = parse("---\n\n> **Note:** quoted\n> still quoted\n\nafter\n");
        assert!(matches!(doc.blocks[0], Block::ThematicBreak));
        let Block::Quote(quote) = &doc.blocks[1] else {
            panic!("expected quote");
        };
        assert_eq!(quote.blocks.len(), 1);
        assert!(matches!(doc.blocks[2], Block::Paragraph(_)));
    }

    #[test]
    fn test_bold_line_is_not_list_or_rule() {
        let doc = parse("**Bold start** of a paragraph");
        assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_repeated_anchors_get_suffix() {
        let doc = parse("# Plan\n\n## Risks\n\n## Risks 1\n\n## Risks\n\n> ## Risks\n\n## !!!\n");
        let anchors: Vec<&str> = doc.anchors();
        assert_eq!(anchors, vec!["plan", "risks", "risks-1", "risks-2", "risks-3"]);
        let Block::Heading(symbols) = &doc.blocks[5] else {
            panic!("expected heading");
        };
        assert_eq!(symbols.anchor, None);
    }

    #[test]
    fn test_front_matter_sets_cover_fields() {
        let doc = parse(
            "+++\r\ntitle = \"SUPERLOOP\"\r\nsubtitle = \"RWA Looping\"\r\ndetails = [\"Aave | Morpho\"]\r\nfootnote = \"Confidential\"\r\n+++\r\n# Strategy\r\n\r\nBody\r\n",
        );
        assert_eq!(doc.metadata.title.as_deref(), Some("SUPERLOOP"));
        assert_eq!(doc.metadata.subtitle.as_deref(), Some("RWA Looping"));
        assert_eq!(doc.metadata.details, vec!["Aave | Morpho".to_string()]);
        assert_eq!(doc.metadata.footnote.as_deref(), Some("Confidential"));
        assert!(matches!(doc.blocks[0], Block::Heading(_)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_invalid_or_unclosed_front_matter() {
        let doc = parse("+++\nsubtitle = \n+++\nBody\n");
        assert!(!doc.metadata.has_cover_fields());
        assert_eq!(doc.len(), 1);

        // Without a closing line the opener is plain text
        let doc = parse("+++\nsubtitle = \"x\"\n");
        assert_eq!(doc.metadata.subtitle, None);
        assert!(matches!(doc.blocks[0], Block::Paragraph(_)));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("2.1 Manual Looping"), "21-manual-looping");
        assert_eq!(slugify("Yield -- Economics!"), "yield-economics");
    }
}
