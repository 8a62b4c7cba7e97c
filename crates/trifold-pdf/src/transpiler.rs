//! Paginated flow to Typst markup transpiler
//!
//! The preamble turns the style ruleset into `set` and `show` rules. Each
//! flow block then becomes markup; a block that must stay with the next one
//! is wrapped in a sticky block, and a block that must not be split in an
//! unbreakable one. Typst does the page breaking.
//!
//! Typst rejects links to missing labels and labels that occur twice, so a
//! heading label is written once and only links to written labels stay
//! links.

use std::collections::HashSet;

use trifold_ast::{plain_text, Alignment, Block, FormatType, Inline, List, ListType, Table};
use trifold_compose::{Align, Color};
use trifold_core::{FooterPart, FooterTemplate, HeadingRule, LineRule, PageFlow, StyleRuleset};

/// Transpiler for converting a page flow to Typst markup
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    /// Heading labels that internal links may point at
    labels: HashSet<String>,
    /// Labels already attached to a heading
    written: HashSet<String>,
}

impl Transpiler {
    /// Transpiler whose internal links may point at `labels`
    pub fn with_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            written: HashSet::new(),
        }
    }

    /// Transpile a page flow to a complete Typst document
    pub fn transpile(flow: &PageFlow) -> String {
        let mut transpiler = Self::with_labels(flow_labels(flow));
        let mut output = Self::preamble(&flow.ruleset, flow.title.as_deref());

        for (index, flow_block) in flow.blocks.iter().enumerate() {
            let markup = match &flow_block.block {
                Block::Heading(heading) if flow_block.is_title => {
                    transpiler.title_block(&heading.text, &flow.ruleset.title)
                }
                block => transpiler.transpile_block(block, &flow.ruleset),
            };
            output.push_str(&Self::wrap(
                &markup,
                flow.keeps_with_next(index),
                flow.is_unbreakable(index),
            ));
            output.push('\n');
        }

        output
    }

    /// Page setup, footer and styling rules
    pub fn preamble(ruleset: &StyleRuleset, title: Option<&str>) -> String {
        let mut output = String::new();

        if let Some(title) = title {
            output.push_str(&format!(
                "#set document(title: \"{}\")\n",
                escape_string(title)
            ));
        }

        let page = &ruleset.page;
        let footer = &ruleset.footer;
        output.push_str(&format!(
            "#set page(\n  width: {}mm,\n  height: {}mm,\n  margin: (x: {}cm, y: {}cm),\n  footer: context align(center, text(size: {}pt, fill: {})[{}]),\n)\n",
            num(page.width_mm),
            num(page.height_mm),
            num(page.margin_horizontal_cm),
            num(page.margin_vertical_cm),
            num(footer.size_pt),
            rgb(footer.color),
            Self::footer_markup(&footer.template, &footer.label)
        ));

        let body = &ruleset.body;
        output.push_str(&format!(
            "#set text(font: \"{}\", size: {}pt, fill: {})\n",
            escape_string(&body.font_family),
            num(body.size_pt),
            rgb(body.color)
        ));
        output.push_str(&format!(
            "#set par(leading: {}em)\n",
            num(body.line_height - 1.0)
        ));
        output.push_str(&format!(
            "#show strong: set text(fill: {})\n",
            rgb(ruleset.strong_color)
        ));
        output.push_str(&format!(
            "#show link: set text(fill: {})\n",
            rgb(ruleset.link_color)
        ));

        // Breaking around headings is driven by the flow, not by Typst's defaults
        output.push_str("#show heading: set block(sticky: false)\n");
        for (index, rule) in ruleset.headings.iter().enumerate() {
            output.push_str(&format!(
                "#show heading.where(level: {}): it => {}\n",
                index + 1,
                heading_block(rule, "it.body")
            ));
        }

        let code = &ruleset.code;
        output.push_str(&format!(
            "#show raw: set text(font: \"{}\")\n",
            escape_string(&body.mono_family)
        ));
        output.push_str(&format!(
            "#show raw.where(block: false): it => box(fill: {}, inset: (x: 3pt), outset: (y: 3pt), radius: 2pt, text(size: {}pt, fill: {}, it))\n",
            rgb(code.inline_fill),
            num(code.inline_size_pt),
            rgb(code.inline_color)
        ));
        output.push_str(&format!(
            "#show raw.where(block: true): it => block(width: 100%, fill: {}, inset: 10pt, radius: 4pt, text(size: {}pt, fill: {}, it))\n",
            rgb(code.fill),
            num(code.size_pt),
            rgb(code.color)
        ));

        output.push('\n');
        output
    }

    /// Footer template with the label expanded and the page counters in place
    pub fn footer_markup(template: &FooterTemplate, label: &str) -> String {
        template
            .parts()
            .into_iter()
            .map(|part| match part {
                FooterPart::Text(text) => escape_markup(text),
                FooterPart::Label => escape_markup(label),
                FooterPart::Page => "#counter(page).display()".to_string(),
                FooterPart::Total => "#counter(page).final().first()".to_string(),
            })
            .collect()
    }

    fn wrap(markup: &str, sticky: bool, unbreakable: bool) -> String {
        if !sticky && !unbreakable {
            return markup.to_string();
        }
        let mut args = vec!["width: 100%"];
        if sticky {
            args.push("sticky: true");
        }
        if unbreakable {
            args.push("breakable: false");
        }
        format!("#block({})[\n{}]\n", args.join(", "), markup)
    }

    /// The document title, styled with the title rule instead of a heading
    fn title_block(&self, text: &[Inline], rule: &HeadingRule) -> String {
        let body = format!("[{}]", self.transpile_inlines(text));
        format!("#{}\n", heading_block(rule, &body))
    }

    /// Transpile a single block
    pub fn transpile_block(&mut self, block: &Block, ruleset: &StyleRuleset) -> String {
        match block {
            Block::Heading(h) => {
                let prefix = "=".repeat(usize::from(h.level.clamp(1, 4)));
                let text = self.transpile_inlines(&h.text);
                match h.anchor.as_deref().filter(|anchor| self.claim_label(anchor)) {
                    Some(anchor) => format!("{} {} <{}>\n", prefix, text, anchor),
                    None => format!("{} {}\n", prefix, text),
                }
            }

            Block::Paragraph(p) => {
                let text = self.transpile_inlines(&p.inlines);
                format!("{}\n", text)
            }

            Block::List(list) => self.transpile_list(list),

            Block::Literal(code) => {
                let lang = code.language.as_deref().unwrap_or("");
                let fence = code_fence(&code.content);
                format!("{}{}\n{}\n{}\n", fence, lang, code.content, fence)
            }

            Block::Table(table) => self.transpile_table(table, ruleset),

            Block::Quote(quote) => {
                let mut inner = String::new();
                for block in &quote.blocks {
                    inner.push_str(&self.transpile_block(block, ruleset));
                    inner.push('\n');
                }
                format!(
                    "#block(width: 100%, fill: {}, inset: (left: 12pt, rest: 8pt), stroke: (left: {}))[\n#set text(fill: {})\n{}\n]\n",
                    rgb(ruleset.quote.fill),
                    stroke(&ruleset.quote.border),
                    rgb(ruleset.quote.color),
                    inner.trim_end()
                )
            }

            Block::ThematicBreak => {
                format!("#line(length: 100%, stroke: {})\n", stroke(&ruleset.rule))
            }
        }
    }

    /// Nested items are indented two spaces per level
    fn transpile_list(&mut self, list: &List) -> String {
        let marker = match list.list_type {
            ListType::Ordered => "+",
            ListType::Unordered => "-",
        };
        let mut output = String::new();
        for item in &list.items {
            let indent = "  ".repeat(usize::from(item.level));
            output.push_str(&format!(
                "{}{} {}\n",
                indent,
                marker,
                self.transpile_inlines(&item.inlines).trim()
            ));
        }
        output
    }

    fn transpile_table(&mut self, table: &Table, ruleset: &StyleRuleset) -> String {
        let rule = &ruleset.table;
        let col_count = table.column_count().max(1);
        let has_header = table.rows.first().is_some_and(|r| r.is_header);

        let align: Vec<&str> = (0..col_count)
            .map(|i| match table.columns.get(i).and_then(|c| c.align) {
                Some(Alignment::Center) => "center",
                Some(Alignment::Right) => "right",
                Some(Alignment::Left) | None => "left",
            })
            .collect();

        // Body rows are striped from the second one on
        let fill = if has_header {
            format!(
                "(_, y) => if y == 0 {{ {} }} else if calc.even(y) {{ {} }} else {{ none }}",
                rgb(rule.header_fill),
                rgb(rule.stripe_fill)
            )
        } else {
            format!(
                "(_, y) => if calc.odd(y) {{ {} }} else {{ none }}",
                rgb(rule.stripe_fill)
            )
        };

        let mut output = String::new();
        output.push_str("#[\n");
        output.push_str(&format!("#set text(size: {}pt)\n", num(rule.size_pt)));
        output.push_str(&format!(
            "#table(\n  columns: {},\n  align: ({},),\n  fill: {},\n  stroke: 0.5pt + {},\n",
            col_count,
            align.join(", "),
            fill,
            rgb(rule.border_color)
        ));

        for row in &table.rows {
            let mut cells: Vec<String> = row
                .cells
                .iter()
                .map(|cell| self.transpile_inlines(&cell.inlines))
                .collect();
            cells.resize(col_count, String::new());

            if row.is_header {
                let header: Vec<String> = cells
                    .iter()
                    .map(|c| {
                        format!(
                            "text(fill: {}, weight: \"bold\")[{}]",
                            rgb(rule.header_color),
                            c
                        )
                    })
                    .collect();
                output.push_str(&format!("  table.header({}),\n", header.join(", ")));
            } else {
                for cell in cells {
                    output.push_str(&format!("  [{}],\n", cell));
                }
            }
        }

        output.push_str(")\n]\n");
        output
    }

    /// First heading with a known label gets to carry it
    fn claim_label(&mut self, anchor: &str) -> bool {
        self.labels.contains(anchor) && self.written.insert(anchor.to_string())
    }

    /// Transpile inline elements
    pub fn transpile_inlines(&self, inlines: &[Inline]) -> String {
        let mut output = String::new();
        self.push_inlines(&mut output, inlines);
        output
    }

    /// Returns whether the output ends with an embedded `#` expression
    fn push_inlines(&self, output: &mut String, inlines: &[Inline]) -> bool {
        let mut embedded = false;
        for inline in inlines {
            let start = output.len();
            let ends_embedded = self.push_inline(output, inline);
            if output.len() == start {
                continue;
            }
            // Keep the text from continuing the previous expression
            if embedded && output[start..].starts_with(['.', '(', ';']) {
                output.insert(start, ';');
            }
            embedded = ends_embedded;
        }
        embedded
    }

    fn push_call(&self, output: &mut String, function: &str, content: &Inline) -> bool {
        output.push_str(&format!("#{}[", function));
        self.push_inline(output, content);
        output.push(']');
        true
    }

    fn push_inline(&self, output: &mut String, inline: &Inline) -> bool {
        match inline {
            Inline::Text(text) => {
                output.push_str(&escape_markup(text));
                false
            }

            Inline::Format(format_type, content) => match format_type {
                // Function calls parse inside words where `*` and `_` do not
                FormatType::Bold => self.push_call(output, "strong", content),
                FormatType::Italic => self.push_call(output, "emph", content),
                FormatType::Monospace => {
                    let code = plain_text(std::slice::from_ref(content.as_ref()));
                    if code.contains('`') {
                        output.push_str(&format!("#raw(\"{}\")", escape_string(&code)));
                        true
                    } else {
                        output.push_str(&format!("`{}`", code));
                        false
                    }
                }
            },

            Inline::Span(inlines) => self.push_inlines(output, inlines),

            Inline::Link(link) => {
                let target = match link.url.strip_prefix('#') {
                    Some(label) if self.labels.contains(label) => format!("<{}>", label),
                    Some(_) => return self.push_inlines(output, &link.text),
                    None => format!("\"{}\"", escape_string(&link.url)),
                };
                output.push_str(&format!("#link({})[", target));
                self.push_inlines(output, &link.text);
                output.push(']');
                true
            }

            Inline::Break => {
                output.push_str(" \\\n");
                false
            }
        }
    }
}

/// Labels of the headings written as Typst headings; the title is not one
fn flow_labels(flow: &PageFlow) -> Vec<String> {
    let mut labels = Vec::new();
    let mut pending: Vec<&Block> = flow
        .blocks
        .iter()
        .filter(|b| !b.is_title)
        .map(|b| &b.block)
        .collect();
    while let Some(block) = pending.pop() {
        match block {
            Block::Heading(heading) => labels.extend(heading.anchor.clone()),
            Block::Quote(quote) => pending.extend(&quote.blocks),
            _ => {}
        }
    }
    labels
}

/// Styled heading block around `body`, a code expression
fn heading_block(rule: &HeadingRule, body: &str) -> String {
    let underline = match &rule.underline {
        Some(line) => format!("(bottom: {})", stroke(line)),
        None => "none".to_string(),
    };
    format!(
        "block(width: 100%, above: {}pt, below: 0.8em, inset: (bottom: 6pt), stroke: {}, align({}, text(size: {}pt, weight: \"bold\", fill: {}, {})))",
        num(rule.space_before_pt),
        underline,
        align(rule.align),
        num(rule.size_pt),
        rgb(rule.color),
        body
    )
}

fn align(align: Align) -> &'static str {
    match align {
        Align::Left => "left",
        Align::Center => "center",
        Align::Right => "right",
    }
}

fn rgb(color: Color) -> String {
    format!("rgb(\"{}\")", color)
}

fn stroke(line: &LineRule) -> String {
    format!("{}pt + {}", num(line.width_pt), rgb(line.color))
}

/// Two decimals at most, no trailing zeros
fn num(value: f64) -> String {
    format!("{}", (value * 100.0).round() / 100.0)
}

/// A backtick fence longer than any run inside the code
fn code_fence(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

/// Escape special characters in strings for Typst
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape characters with meaning in Typst markup
fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '/' | '#' | '*' | '_' | '`' | '$' | '<' | '>' | '@' | '[' | ']' | '~' | '='
                | '-' | '+'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
