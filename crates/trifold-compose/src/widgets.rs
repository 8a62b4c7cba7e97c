//! Composite widget layer.
//!
//! Every visual pattern of a slide is one [`Widget`] variant. A widget is
//! plain content plus an anchor rectangle; [`Compose::compose`] turns it into
//! primitives using fixed offsets from that anchor. Shape-layer errors pass
//! through unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};
use crate::geometry::{Geometry, Size};
use crate::grid::Grid;
use crate::shapes::{
    self, Align, Border, CellOverride, Primitive, StyledText, TableStyle, TextOptions,
};
use crate::theme::{Color, ColorRef, Role, Theme};

/// Turns content into primitives against a theme
pub trait Compose {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>>;
}

/// Closed set of slide widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    Text(TextWidget),
    Lines(LinesWidget),
    Bar(BarWidget),
    MetricCard(MetricCard),
    FeatureCard(FeatureCard),
    RiskCard(RiskCard),
    Panel(Panel),
    StepSequence(StepSequence),
    LayerStack(LayerStack),
    RankedTable(RankedTable),
    SlideNumber(SlideNumber),
    Grid(CardGrid),
}

impl Widget {
    /// Kind name as written in deck descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Lines(_) => "lines",
            Self::Bar(_) => "bar",
            Self::MetricCard(_) => "metric_card",
            Self::FeatureCard(_) => "feature_card",
            Self::RiskCard(_) => "risk_card",
            Self::Panel(_) => "panel",
            Self::StepSequence(_) => "step_sequence",
            Self::LayerStack(_) => "layer_stack",
            Self::RankedTable(_) => "ranked_table",
            Self::SlideNumber(_) => "slide_number",
            Self::Grid(_) => "grid",
        }
    }

    /// Move the widget by `(dx, dy)`
    pub fn translate(&mut self, dx: f64, dy: f64) {
        let at = match self {
            Self::Text(w) => &mut w.at,
            Self::Lines(w) => &mut w.at,
            Self::Bar(w) => &mut w.at,
            Self::MetricCard(w) => &mut w.at,
            Self::FeatureCard(w) => &mut w.at,
            Self::RiskCard(w) => &mut w.at,
            Self::Panel(w) => &mut w.at,
            Self::StepSequence(w) => &mut w.at,
            Self::LayerStack(w) => &mut w.at,
            Self::RankedTable(w) => &mut w.at,
            Self::SlideNumber(w) => &mut w.at,
            Self::Grid(w) => {
                w.grid.left += dx;
                w.grid.top += dy;
                return;
            }
        };
        *at = at.offset(dx, dy);
    }
}

impl Compose for Widget {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        match self {
            Self::Text(w) => w.compose(theme),
            Self::Lines(w) => w.compose(theme),
            Self::Bar(w) => w.compose(theme),
            Self::MetricCard(w) => w.compose(theme),
            Self::FeatureCard(w) => w.compose(theme),
            Self::RiskCard(w) => w.compose(theme),
            Self::Panel(w) => w.compose(theme),
            Self::StepSequence(w) => w.compose(theme),
            Self::LayerStack(w) => w.compose(theme),
            Self::RankedTable(w) => w.compose(theme),
            Self::SlideNumber(w) => w.compose(theme),
            Self::Grid(w) => w.compose(theme),
        }
    }
}

// Shared builders

fn label(
    at: Geometry,
    text: impl Into<String>,
    size: f64,
    color: Color,
    bold: bool,
    align: Align,
) -> Result<Primitive> {
    let line = StyledText::new(text, size, color).bold(bold).aligned(align);
    shapes::text_box(at, vec![line], TextOptions::default())
}

fn card(at: Geometry, theme: &Theme, border: Color) -> Result<Primitive> {
    shapes::rounded_rectangle(
        at,
        theme.resolve(Role::CardBackground),
        Some(Border::new(border)),
    )
}

fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}

/// Line of a multi-line text box, plain or with its own color/weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Line {
    Plain(String),
    Styled {
        text: String,
        #[serde(default)]
        color: Option<ColorRef>,
        #[serde(default)]
        bold: Option<bool>,
    },
}

impl Line {
    fn styled(&self, theme: &Theme, size: f64, color: Color, bold: bool) -> Result<StyledText> {
        Ok(match self {
            Self::Plain(text) => StyledText::new(text.as_str(), size, color).bold(bold),
            Self::Styled {
                text,
                color: line_color,
                bold: line_bold,
            } => {
                let color = match line_color {
                    Some(c) => theme.resolve_ref(c)?,
                    None => color,
                };
                StyledText::new(text.as_str(), size, color).bold(line_bold.unwrap_or(bold))
            }
        })
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

fn default_text_size() -> f64 {
    18.0
}

fn default_lines_size() -> f64 {
    16.0
}

fn default_small_size() -> f64 {
    12.0
}

fn default_spacing() -> f64 {
    1.2
}

fn default_true() -> bool {
    true
}

fn text_primary() -> ColorRef {
    ColorRef::role(Role::TextPrimary)
}

fn accent() -> ColorRef {
    ColorRef::role(Role::Accent)
}

/// Single styled text box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextWidget {
    #[serde(flatten)]
    pub at: Geometry,
    pub text: String,
    #[serde(default = "default_text_size")]
    pub size: f64,
    #[serde(default = "text_primary")]
    pub color: ColorRef,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub align: Align,
}

impl TextWidget {
    pub fn new(at: Geometry, text: impl Into<String>) -> Self {
        Self {
            at,
            text: text.into(),
            size: default_text_size(),
            color: text_primary(),
            bold: false,
            align: Align::Left,
        }
    }
}

impl Compose for TextWidget {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let color = theme.resolve_ref(&self.color)?;
        Ok(vec![label(
            self.at,
            self.text.as_str(),
            self.size,
            color,
            self.bold,
            self.align,
        )?])
    }
}

/// Multi-line text box, optionally bulleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinesWidget {
    #[serde(flatten)]
    pub at: Geometry,
    pub lines: Vec<Line>,
    #[serde(default = "default_lines_size")]
    pub size: f64,
    #[serde(default = "text_primary")]
    pub color: ColorRef,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub bullet: bool,
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

impl Compose for LinesWidget {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let color = theme.resolve_ref(&self.color)?;
        let lines = self
            .lines
            .iter()
            .map(|line| line.styled(theme, self.size, color, self.bold))
            .collect::<Result<Vec<_>>>()?;
        let options = TextOptions {
            word_wrap: true,
            line_spacing: self.spacing,
            bullet: self.bullet,
        };
        Ok(vec![shapes::text_box(self.at, lines, options)?])
    }
}

/// Solid bar, used for header rules and dividers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarWidget {
    #[serde(flatten)]
    pub at: Geometry,
    #[serde(default = "accent")]
    pub color: ColorRef,
}

impl Compose for BarWidget {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let fill = theme.resolve_ref(&self.color)?;
        Ok(vec![shapes::rectangle(self.at, fill, None)?])
    }
}

/// KPI card: muted title, large accent value, optional subtitle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCard {
    #[serde(flatten)]
    pub at: Geometry,
    pub title: String,
    pub value: String,
    #[serde(default)]
    pub subtitle: Option<String>,
}

impl Compose for MetricCard {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let accent = theme.resolve(Role::Accent);
        let muted = theme.resolve(Role::TextMuted);
        let inner = non_negative(self.at.width - 0.4);

        let mut out = vec![
            card(self.at, theme, accent)?,
            label(
                self.at.child(0.2, 0.15, inner, 0.3),
                self.title.as_str(),
                11.0,
                muted,
                false,
                Align::Left,
            )?,
            label(
                self.at.child(0.2, 0.45, inner, 0.5),
                self.value.as_str(),
                28.0,
                accent,
                true,
                Align::Left,
            )?,
        ];
        if let Some(subtitle) = self.subtitle.as_deref().filter(|s| !s.is_empty()) {
            out.push(label(
                self.at.child(0.2, 0.95, inner, 0.3),
                subtitle,
                10.0,
                muted,
                false,
                Align::Left,
            )?);
        }
        Ok(out)
    }
}

/// Card with a bold title and a muted body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCard {
    #[serde(flatten)]
    pub at: Geometry,
    pub title: String,
    pub body: String,
    #[serde(default = "accent")]
    pub title_color: ColorRef,
    #[serde(default = "accent")]
    pub border: ColorRef,
    #[serde(default = "FeatureCard::default_title_size")]
    pub title_size: f64,
    #[serde(default = "FeatureCard::default_body_size")]
    pub body_size: f64,
    #[serde(default = "FeatureCard::default_inset")]
    pub inset: f64,
    #[serde(default = "FeatureCard::default_title_offset")]
    pub title_offset: f64,
    #[serde(default = "FeatureCard::default_body_offset")]
    pub body_offset: f64,
}

impl FeatureCard {
    fn default_title_size() -> f64 {
        18.0
    }
    fn default_body_size() -> f64 {
        13.0
    }
    fn default_inset() -> f64 {
        0.25
    }
    fn default_title_offset() -> f64 {
        0.15
    }
    fn default_body_offset() -> f64 {
        0.65
    }

    pub fn new(at: Geometry, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            at,
            title: title.into(),
            body: body.into(),
            title_color: accent(),
            border: accent(),
            title_size: Self::default_title_size(),
            body_size: Self::default_body_size(),
            inset: Self::default_inset(),
            title_offset: Self::default_title_offset(),
            body_offset: Self::default_body_offset(),
        }
    }
}

impl Compose for FeatureCard {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let border = theme.resolve_ref(&self.border)?;
        let title_color = theme.resolve_ref(&self.title_color)?;
        let inner = non_negative(self.at.width - 2.0 * self.inset);
        let body_height = non_negative(self.at.height - self.body_offset - 0.15);

        Ok(vec![
            card(self.at, theme, border)?,
            label(
                self.at.child(self.inset, self.title_offset, inner, 0.5),
                self.title.as_str(),
                self.title_size,
                title_color,
                true,
                Align::Left,
            )?,
            label(
                self.at.child(self.inset, self.body_offset, inner, body_height),
                self.body.as_str(),
                self.body_size,
                theme.resolve(Role::TextMuted),
                false,
                Align::Left,
            )?,
        ])
    }
}

/// Risk severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn role(&self) -> Role {
        match self {
            Self::Low => Role::AccentSecondary,
            Self::Medium => Role::Highlight,
            Self::High => Role::Danger,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Risk card bordered in its severity color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCard {
    #[serde(flatten)]
    pub at: Geometry,
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Compose for RiskCard {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let severity = theme.resolve(self.severity.role());
        let width = self.at.width;

        Ok(vec![
            card(self.at, theme, severity)?,
            label(
                self.at.child(0.2, 0.1, non_negative(width - 1.7), 0.3),
                self.title.as_str(),
                14.0,
                theme.resolve(Role::TextPrimary),
                true,
                Align::Left,
            )?,
            label(
                self.at.child(non_negative(width - 1.5), 0.1, 1.2, 0.3),
                self.severity.label(),
                12.0,
                severity,
                true,
                Align::Right,
            )?,
            label(
                self.at
                    .child(0.2, 0.5, non_negative(width - 0.4), non_negative(self.at.height - 0.6)),
                self.body.as_str(),
                11.0,
                theme.resolve(Role::TextMuted),
                false,
                Align::Left,
            )?,
        ])
    }
}

/// Bordered panel with a heading over a list of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    #[serde(flatten)]
    pub at: Geometry,
    pub heading: String,
    #[serde(default = "accent")]
    pub heading_color: ColorRef,
    #[serde(default = "accent")]
    pub border: ColorRef,
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default = "default_small_size")]
    pub size: f64,
    #[serde(default = "default_true")]
    pub bullet: bool,
}

impl Compose for Panel {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let border = theme.resolve_ref(&self.border)?;
        let heading_color = theme.resolve_ref(&self.heading_color)?;
        let muted = theme.resolve(Role::TextMuted);
        let inner = non_negative(self.at.width - 0.4);
        let lines = self
            .lines
            .iter()
            .map(|line| line.styled(theme, self.size, muted, false))
            .collect::<Result<Vec<_>>>()?;

        Ok(vec![
            card(self.at, theme, border)?,
            label(
                self.at.child(0.2, 0.1, inner, 0.35),
                self.heading.as_str(),
                16.0,
                heading_color,
                true,
                Align::Left,
            )?,
            shapes::text_box(
                self.at
                    .child(0.2, 0.5, inner, non_negative(self.at.height - 0.6)),
                lines,
                TextOptions {
                    word_wrap: true,
                    line_spacing: default_spacing(),
                    bullet: self.bullet,
                },
            )?,
        ])
    }
}

/// One step of a step sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub title: String,
    pub body: String,
}

/// Numbered steps across the anchor width, joined by arrows
///
/// The anchor's left edge is the origin and its width the available width.
/// Each of the `N` slots is `width / N` wide; the card fills the slot minus
/// a 0.2 gap that holds the arrow to the next step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSequence {
    #[serde(flatten)]
    pub at: Geometry,
    pub steps: Vec<Step>,
}

impl StepSequence {
    pub const GAP: f64 = 0.2;
    pub const CIRCLE: f64 = 0.5;
    /// Card top, below the numbered circle
    pub const CARD_OFFSET: f64 = 0.7;

    /// Width of each slot
    pub fn slot_width(&self) -> f64 {
        self.at.width / self.steps.len() as f64
    }

    /// Left edge of slot `index`
    pub fn slot_left(&self, index: usize) -> f64 {
        self.at.left + index as f64 * self.slot_width()
    }
}

impl Compose for StepSequence {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        if self.steps.is_empty() {
            return Err(ComposeError::invalid_widget(
                "step_sequence",
                "at least one step is required",
            ));
        }
        let accent = theme.resolve(Role::Accent);
        let primary = theme.resolve(Role::TextPrimary);
        let muted = theme.resolve(Role::TextMuted);
        let subtle = theme.resolve(Role::TextSubtle);

        let slot = self.slot_width();
        let card_width = non_negative(slot - Self::GAP);
        let arrow_width = slot - card_width;
        // Circles shrink to the slot and never start left of it
        let circle = Self::CIRCLE.min(slot);
        let circle_offset = non_negative((card_width - circle) / 2.0);
        let card_top = self.at.top + Self::CARD_OFFSET;
        let card_height = non_negative(self.at.height - Self::CARD_OFFSET);
        let text_width = non_negative(card_width - 0.2);
        let last = self.steps.len() - 1;

        let mut out = Vec::with_capacity(self.steps.len() * 5);
        for (i, step) in self.steps.iter().enumerate() {
            let left = self.slot_left(i);
            let number = StyledText::new((i + 1).to_string(), 18.0, primary)
                .bold(true)
                .aligned(Align::Center);
            out.push(shapes::oval(
                Geometry::new(left + circle_offset, self.at.top, circle, circle),
                accent,
                None,
                Some(number),
            )?);

            let card_at = Geometry::new(left, card_top, card_width, card_height);
            out.push(card(card_at, theme, subtle)?);
            out.push(label(
                card_at.child(0.1, 0.1, text_width, 0.35),
                step.title.as_str(),
                13.0,
                accent,
                true,
                Align::Center,
            )?);
            out.push(label(
                card_at.child(0.1, 0.55, text_width, non_negative(card_height - 0.7)),
                step.body.as_str(),
                11.0,
                muted,
                false,
                Align::Center,
            )?);

            if i < last {
                out.push(shapes::arrow(
                    Geometry::new(left + card_width, card_top + 0.8, arrow_width, 0.25),
                    accent,
                    None,
                )?);
            }
        }
        Ok(out)
    }
}

/// One band of a layer stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub label: String,
    pub description: String,
    #[serde(default = "accent")]
    pub color: ColorRef,
}

/// Horizontal bands stacked top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerStack {
    #[serde(flatten)]
    pub at: Geometry,
    pub bands: Vec<Band>,
    #[serde(default = "LayerStack::default_band_height")]
    pub band_height: f64,
    #[serde(default = "LayerStack::default_gap")]
    pub gap: f64,
}

impl LayerStack {
    fn default_band_height() -> f64 {
        0.9
    }
    fn default_gap() -> f64 {
        0.2
    }

    /// Top edge of band `index`
    pub fn band_top(&self, index: usize) -> f64 {
        self.at.top + index as f64 * (self.band_height + self.gap)
    }
}

impl Compose for LayerStack {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let muted = theme.resolve(Role::TextMuted);
        let inner = non_negative(self.at.width - 0.6);
        let mut out = Vec::with_capacity(self.bands.len() * 3);
        for (i, band) in self.bands.iter().enumerate() {
            let key = theme.resolve_ref(&band.color)?;
            let at = Geometry::new(self.at.left, self.band_top(i), self.at.width, self.band_height);
            out.push(card(at, theme, key)?);
            out.push(label(
                at.child(0.3, 0.05, inner, 0.35),
                band.label.as_str(),
                14.0,
                key,
                true,
                Align::Left,
            )?);
            out.push(label(
                at.child(0.3, 0.4, inner, non_negative(self.band_height - 0.5)),
                band.description.as_str(),
                12.0,
                muted,
                false,
                Align::Left,
            )?);
        }
        Ok(out)
    }
}

/// Comparison table with accent header and striped rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTable {
    #[serde(flatten)]
    pub at: Geometry,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[serde(default)]
    pub column_widths: Option<Vec<f64>>,
    #[serde(default = "default_small_size")]
    pub size: f64,
    #[serde(default)]
    pub align: Align,
    /// Cell values drawn in the highlight color
    #[serde(default)]
    pub emphasize: Vec<String>,
    #[serde(default)]
    pub overrides: Vec<CellOverride>,
}

impl RankedTable {
    pub fn new(at: Geometry, header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            at,
            header,
            rows,
            column_widths: None,
            size: default_small_size(),
            align: Align::Left,
            emphasize: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Table style derived from the theme
    pub fn style(&self, theme: &Theme) -> TableStyle {
        TableStyle {
            header_fill: theme.resolve(Role::Accent),
            header_color: theme.resolve(Role::TextPrimary),
            header_bold: true,
            body_color: theme.resolve(Role::TextPrimary),
            row_fills: [
                theme.resolve(Role::CardBackground),
                theme.resolve(Role::CardBackgroundAlt),
            ],
            size: self.size,
            align: self.align,
            overrides: self.overrides.clone(),
            emphasize: self.emphasize.clone(),
            emphasis_color: theme.resolve(Role::Highlight),
        }
    }
}

impl Compose for RankedTable {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        Ok(vec![shapes::table(
            self.at,
            self.header.clone(),
            self.rows.clone(),
            &self.style(theme),
            self.column_widths.clone(),
        )?])
    }
}

/// "N / total" in the bottom-right corner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideNumber {
    #[serde(flatten)]
    pub at: Geometry,
    pub index: usize,
    pub total: usize,
}

impl SlideNumber {
    /// Placed 1.2 in from the right and 0.45 in from the bottom
    pub fn for_canvas(index: usize, total: usize, size: Size) -> Self {
        Self {
            at: Geometry::new(size.width - 1.2, size.height - 0.45, 1.0, 0.35),
            index,
            total,
        }
    }
}

impl Compose for SlideNumber {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        Ok(vec![label(
            self.at,
            format!("{} / {}", self.index, self.total),
            9.0,
            theme.resolve(Role::TextSubtle),
            false,
            Align::Right,
        )?])
    }
}

/// Widgets placed on a grid; each item's own left/top is an offset within its cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardGrid {
    #[serde(flatten)]
    pub grid: Grid,
    pub items: Vec<Widget>,
}

impl Compose for CardGrid {
    fn compose(&self, theme: &Theme) -> Result<Vec<Primitive>> {
        let mut out = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            let (left, top) = self.grid.cell(i)?;
            let mut placed = item.clone();
            placed.translate(left, top);
            out.extend(placed.compose(theme)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(prims: &[Primitive]) -> Vec<Vec<String>> {
        prims
            .iter()
            .filter_map(|p| match p {
                Primitive::TextBox(tb) => Some(tb.lines.iter().map(|l| l.text.clone()).collect()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_metric_card_offsets() {
        let theme = Theme::default();
        let card = MetricCard {
            at: Geometry::new(0.8, 1.3, 2.8, 1.3),
            title: "Target APR".to_string(),
            value: "9-13%".to_string(),
            subtitle: Some("3x leverage".to_string()),
        };
        let prims = card.compose(&theme).unwrap();
        assert_eq!(prims.len(), 4);
        let tops: Vec<f64> = prims[1..].iter().map(|p| p.geometry().top - 1.3).collect();
        for (got, want) in tops.iter().zip([0.15, 0.45, 0.95]) {
            assert!((got - want).abs() < 1e-9);
        }
        match &prims[2] {
            Primitive::TextBox(tb) => {
                assert_eq!(tb.lines[0].size, 28.0);
                assert!(tb.lines[0].bold);
                assert_eq!(tb.lines[0].color, theme.resolve(Role::Accent));
            }
            other => panic!("expected text box, got {}", other.kind()),
        }
    }

    #[test]
    fn test_metric_card_without_subtitle() {
        let card = MetricCard {
            at: Geometry::new(0.0, 0.0, 2.8, 1.3),
            title: "TVL".to_string(),
            value: "$35B".to_string(),
            subtitle: Some(String::new()),
        };
        assert_eq!(card.compose(&Theme::default()).unwrap().len(), 3);
    }

    #[test]
    fn test_risk_card_severity_colors() {
        let theme = Theme::default();
        for (severity, role) in [
            (Severity::Low, Role::AccentSecondary),
            (Severity::Medium, Role::Highlight),
            (Severity::High, Role::Danger),
        ] {
            let card = RiskCard {
                at: Geometry::new(0.8, 1.1, 5.7, 1.6),
                title: "Oracle staleness".to_string(),
                body: "Bounded NAV updates.".to_string(),
                severity,
            };
            let prims = card.compose(&theme).unwrap();
            match &prims[0] {
                Primitive::RoundedRectangle(shape) => {
                    assert_eq!(shape.border.unwrap().color, theme.resolve(role))
                }
                other => panic!("expected card, got {}", other.kind()),
            }
            assert!((prims[2].geometry().left - (0.8 + 5.7 - 1.5)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_layer_stack_band_tops() {
        let stack = LayerStack {
            at: Geometry::new(0.8, 1.2, 11.5, 0.0),
            bands: (0..5)
                .map(|i| Band {
                    label: format!("Layer {i}"),
                    description: "modules".to_string(),
                    color: ColorRef::role(Role::Violet),
                })
                .collect(),
            band_height: 0.9,
            gap: 0.2,
        };
        let prims = stack.compose(&Theme::default()).unwrap();
        assert_eq!(prims.len(), 15);
        for i in 0..5 {
            let top = prims[i * 3].geometry().top;
            assert!((top - (1.2 + i as f64 * 1.1)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lines_per_line_style() {
        let theme = Theme::default();
        let widget = LinesWidget {
            at: Geometry::new(0.8, 5.1, 11.0, 1.5),
            lines: vec![
                Line::Styled {
                    text: "Conservative target".to_string(),
                    color: Some(ColorRef::role(Role::AccentSecondary)),
                    bold: Some(true),
                },
                Line::from("Flash loan source"),
            ],
            size: 14.0,
            color: ColorRef::role(Role::TextMuted),
            bold: false,
            bullet: true,
            spacing: 1.2,
        };
        let prims = widget.compose(&theme).unwrap();
        let Primitive::TextBox(tb) = &prims[0] else {
            panic!("expected text box");
        };
        assert!(tb.bullet);
        assert_eq!(tb.lines[0].color, theme.resolve(Role::AccentSecondary));
        assert!(tb.lines[0].bold);
        assert_eq!(tb.lines[1].color, theme.resolve(Role::TextMuted));
    }

    #[test]
    fn test_unknown_role_propagates() {
        let mut widget = TextWidget::new(Geometry::new(0.0, 0.0, 1.0, 1.0), "x");
        widget.color = ColorRef::from("chartreuse");
        let err = widget.compose(&Theme::default()).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownRole { .. }));
    }

    #[test]
    fn test_slide_number_text() {
        let number = SlideNumber::for_canvas(5, 20, Size::WIDESCREEN);
        let prims = number.compose(&Theme::default()).unwrap();
        assert_eq!(texts(&prims), vec![vec!["5 / 20".to_string()]]);
        assert!((prims[0].geometry().left - (40.0 / 3.0 - 1.2)).abs() < 1e-9);
    }

    #[test]
    fn test_widget_from_toml() {
        let widget: Widget = toml::from_str(
            r#"
            kind = "metric_card"
            left = 0.8
            top = 1.3
            width = 2.8
            height = 1.3
            title = "Target APR"
            value = "9-13%"
            "#,
        )
        .unwrap();
        assert_eq!(widget.name(), "metric_card");
        assert_eq!(widget.compose(&Theme::default()).unwrap().len(), 3);
    }
}
