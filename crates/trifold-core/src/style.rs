//! Page style ruleset for the paginated PDF.
//!
//! The ruleset is a fixed, versioned table of page-level rules. The core
//! only supplies it; measuring text and breaking pages is left to the PDF
//! renderer.

use serde::{Deserialize, Serialize};
use trifold_compose::{Align, Color};

use crate::pagination::{BreakAfter, BreakInside};

/// Version of [`StyleRuleset::default`]
pub const RULESET_VERSION: u32 = 1;

/// Default footer label
pub const DEFAULT_FOOTER_LABEL: &str = "Internal";

/// Footer text with `{label}`, `{n}` and `{total}` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FooterTemplate(pub String);

/// Piece of a footer template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterPart<'a> {
    Text(&'a str),
    Label,
    Page,
    Total,
}

const PLACEHOLDERS: [(&str, FooterPart<'static>); 3] = [
    ("{label}", FooterPart::Label),
    ("{n}", FooterPart::Page),
    ("{total}", FooterPart::Total),
];

impl FooterTemplate {
    /// Literal text and placeholders in template order
    ///
    /// Substituted values are never scanned again, so a label may itself
    /// contain `{n}`.
    pub fn parts(&self) -> Vec<FooterPart<'_>> {
        let mut parts = Vec::new();
        let mut rest = self.0.as_str();
        while let Some(open) = rest.find('{') {
            let placeholder = PLACEHOLDERS
                .iter()
                .find(|(token, _)| rest[open..].starts_with(token));
            match placeholder {
                Some((token, part)) => {
                    if open > 0 {
                        parts.push(FooterPart::Text(&rest[..open]));
                    }
                    parts.push(*part);
                    rest = &rest[open + token.len()..];
                }
                None => {
                    parts.push(FooterPart::Text(&rest[..=open]));
                    rest = &rest[open + 1..];
                }
            }
        }
        if !rest.is_empty() {
            parts.push(FooterPart::Text(rest));
        }
        parts
    }

    /// Expand the placeholders
    pub fn render(&self, label: &str, n: usize, total: usize) -> String {
        self.parts()
            .into_iter()
            .map(|part| match part {
                FooterPart::Text(text) => text.to_string(),
                FooterPart::Label => label.to_string(),
                FooterPart::Page => n.to_string(),
                FooterPart::Total => total.to_string(),
            })
            .collect()
    }
}

impl Default for FooterTemplate {
    fn default() -> Self {
        Self("{label} — Page {n} of {total}".to_string())
    }
}

/// Page size and margin box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRule {
    /// Paper name as the renderer knows it
    pub paper: String,
    pub width_mm: f64,
    pub height_mm: f64,
    /// Top and bottom margin
    pub margin_vertical_cm: f64,
    /// Left and right margin
    pub margin_horizontal_cm: f64,
}

impl Default for PageRule {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            width_mm: 210.0,
            height_mm: 297.0,
            margin_vertical_cm: 2.0,
            margin_horizontal_cm: 2.5,
        }
    }
}

/// Running footer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterRule {
    pub template: FooterTemplate,
    pub label: String,
    pub size_pt: f64,
    pub color: Color,
}

impl FooterRule {
    /// Footer text for page `n` of `total`
    pub fn render(&self, n: usize, total: usize) -> String {
        self.template.render(&self.label, n, total)
    }
}

/// Solid line under a heading, on the left of a quote, or as a rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineRule {
    pub width_pt: f64,
    pub color: Color,
}

/// Body text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRule {
    pub font_family: String,
    pub mono_family: String,
    pub size_pt: f64,
    /// Line height as a multiple of the font size
    pub line_height: f64,
    pub color: Color,
}

/// One heading level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRule {
    pub size_pt: f64,
    pub color: Color,
    pub align: Align,
    pub underline: Option<LineRule>,
    pub space_before_pt: f64,
    pub break_after: BreakAfter,
}

/// Tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRule {
    pub size_pt: f64,
    pub header_fill: Color,
    pub header_color: Color,
    /// Fill of every second body row
    pub stripe_fill: Color,
    pub border_color: Color,
    pub break_inside: BreakInside,
}

/// Code blocks and inline code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeRule {
    pub size_pt: f64,
    pub fill: Color,
    pub color: Color,
    pub inline_size_pt: f64,
    pub inline_fill: Color,
    pub inline_color: Color,
    pub break_inside: BreakInside,
}

/// Block quotes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRule {
    pub border: LineRule,
    pub fill: Color,
    pub color: Color,
}

/// Complete page styling table handed to the PDF renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRuleset {
    pub version: u32,
    pub page: PageRule,
    pub footer: FooterRule,
    pub body: TextRule,
    /// First level-1 heading of the document
    pub title: HeadingRule,
    /// Levels 1 to 4
    pub headings: [HeadingRule; 4],
    pub table: TableRule,
    pub code: CodeRule,
    pub quote: QuoteRule,
    /// Thematic break
    pub rule: LineRule,
    pub strong_color: Color,
    pub link_color: Color,
}

const NAVY: Color = Color::rgb(0x0F, 0x34, 0x60);

fn heading(size_pt: f64, color: Color, underline: Option<LineRule>, space_before_pt: f64) -> HeadingRule {
    HeadingRule {
        size_pt,
        color,
        align: Align::Left,
        underline,
        space_before_pt,
        break_after: BreakAfter::Avoid,
    }
}

impl Default for StyleRuleset {
    fn default() -> Self {
        Self {
            version: RULESET_VERSION,
            page: PageRule::default(),
            footer: FooterRule {
                template: FooterTemplate::default(),
                label: DEFAULT_FOOTER_LABEL.to_string(),
                size_pt: 9.0,
                color: Color::rgb(0x88, 0x88, 0x88),
            },
            body: TextRule {
                font_family: "Liberation Sans".to_string(),
                mono_family: "Liberation Mono".to_string(),
                size_pt: 11.0,
                line_height: 1.6,
                color: Color::rgb(0x1A, 0x1A, 0x2E),
            },
            title: HeadingRule {
                align: Align::Center,
                ..heading(
                    28.0,
                    NAVY,
                    Some(LineRule {
                        width_pt: 4.0,
                        color: NAVY,
                    }),
                    40.0,
                )
            },
            headings: [
                heading(
                    24.0,
                    NAVY,
                    Some(LineRule {
                        width_pt: 3.0,
                        color: NAVY,
                    }),
                    30.0,
                ),
                heading(
                    18.0,
                    Color::rgb(0x16, 0x21, 0x3E),
                    Some(LineRule {
                        width_pt: 1.0,
                        color: Color::rgb(0xCC, 0xCC, 0xCC),
                    }),
                    25.0,
                ),
                heading(14.0, Color::rgb(0x1A, 0x1A, 0x2E), None, 18.0),
                heading(12.0, Color::rgb(0x33, 0x33, 0x33), None, 14.0),
            ],
            table: TableRule {
                size_pt: 10.0,
                header_fill: NAVY,
                header_color: Color::WHITE,
                stripe_fill: Color::rgb(0xF8, 0xF9, 0xFA),
                border_color: Color::rgb(0xDD, 0xDD, 0xDD),
                break_inside: BreakInside::Avoid,
            },
            code: CodeRule {
                size_pt: 8.5,
                fill: Color::rgb(0x2B, 0x2B, 0x3B),
                color: Color::rgb(0xE0, 0xE0, 0xE0),
                inline_size_pt: 9.5,
                inline_fill: Color::rgb(0xF0, 0xF0, 0xF5),
                inline_color: Color::rgb(0xC7, 0x25, 0x4E),
                break_inside: BreakInside::Avoid,
            },
            quote: QuoteRule {
                border: LineRule {
                    width_pt: 4.0,
                    color: NAVY,
                },
                fill: Color::rgb(0xF0, 0xF4, 0xFF),
                color: Color::rgb(0x33, 0x33, 0x33),
            },
            rule: LineRule {
                width_pt: 2.0,
                color: NAVY,
            },
            strong_color: NAVY,
            link_color: NAVY,
        }
    }
}

impl StyleRuleset {
    /// Default ruleset with a different footer label
    pub fn with_label(label: impl Into<String>) -> Self {
        let mut ruleset = Self::default();
        ruleset.footer.label = label.into();
        ruleset
    }

    /// Rule for a heading level, levels past 4 use the level-4 rule
    pub fn heading(&self, level: u8) -> &HeadingRule {
        let index = usize::from(level.clamp(1, 4)) - 1;
        &self.headings[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_template() {
        let template = FooterTemplate::default();
        assert_eq!(template.render("Internal", 3, 12), "Internal — Page 3 of 12");
    }

    #[test]
    fn test_footer_label_is_not_expanded() {
        let template = FooterTemplate::default();
        assert_eq!(
            template.render("Draft {n} of {total}", 3, 12),
            "Draft {n} of {total} — Page 3 of 12"
        );
        let braces = FooterTemplate("{n}{x} {".to_string());
        assert_eq!(braces.render("L", 1, 2), "1{x} {");
        assert_eq!(
            braces.parts(),
            vec![
                FooterPart::Page,
                FooterPart::Text("{"),
                FooterPart::Text("x} {"),
            ]
        );
    }

    #[test]
    fn test_default_ruleset() {
        let ruleset = StyleRuleset::default();
        assert_eq!(ruleset.version, 1);
        assert_eq!(ruleset.page.paper, "a4");
        assert_eq!(ruleset.footer.label, "Internal");
        assert_eq!(ruleset.body.size_pt, 11.0);
        assert_eq!(ruleset.table.break_inside, BreakInside::Avoid);
        assert_eq!(ruleset.code.break_inside, BreakInside::Avoid);
        assert!(ruleset
            .headings
            .iter()
            .all(|h| h.break_after == BreakAfter::Avoid));
        assert_eq!(ruleset.title.align, Align::Center);
    }

    #[test]
    fn test_heading_clamps() {
        let ruleset = StyleRuleset::default();
        assert_eq!(ruleset.heading(1).size_pt, 24.0);
        assert_eq!(ruleset.heading(6).size_pt, 12.0);
    }

    #[test]
    fn test_with_label() {
        let ruleset = StyleRuleset::with_label("Superloop");
        assert_eq!(ruleset.footer.render(1, 2), "Superloop — Page 1 of 2");
    }
}
