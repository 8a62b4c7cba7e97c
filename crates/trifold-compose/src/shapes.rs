//! Primitive shape layer.
//!
//! Primitives are the only values a renderer consumes. Each constructor
//! validates its input and takes geometry and content by value, so an
//! emitted primitive never shares state with the caller.

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};
use crate::geometry::Geometry;
use crate::theme::Color;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One run of styled text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    /// Font size in points
    pub size: f64,
    pub color: Color,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub align: Align,
}

impl StyledText {
    pub fn new(text: impl Into<String>, size: f64, color: Color) -> Self {
        Self {
            text: text.into(),
            size,
            color,
            bold: false,
            align: Align::Left,
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn aligned(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(ComposeError::InvalidFontSize { size: self.size });
        }
        Ok(())
    }
}

/// Shape outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: Color,
    /// Line width in points
    pub width: f64,
}

impl Border {
    /// 1pt border
    pub fn new(color: Color) -> Self {
        Self { color, width: 1.0 }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }
}

/// Filled shape with optional outline and centered label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub geometry: Geometry,
    pub fill: Color,
    pub border: Option<Border>,
    pub label: Option<StyledText>,
}

impl Shape {
    fn new(geometry: Geometry, fill: Color, border: Option<Border>) -> Result<Self> {
        geometry.validate()?;
        if let Some(border) = &border {
            if !(border.width.is_finite() && border.width >= 0.0) {
                return Err(ComposeError::invalid_widget(
                    "border",
                    format!("line width {} must be non-negative", border.width),
                ));
            }
        }
        Ok(Self {
            geometry,
            fill,
            border,
            label: None,
        })
    }

    /// Attach text drawn centered inside the shape
    pub fn with_label(mut self, label: StyledText) -> Result<Self> {
        label.validate()?;
        self.label = Some(label);
        Ok(self)
    }
}

/// Options for a text box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextOptions {
    pub word_wrap: bool,
    /// Line spacing multiplier, 1.0 is single spacing
    pub line_spacing: f64,
    /// Indent each line as a bullet
    pub bullet: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            word_wrap: true,
            line_spacing: 1.0,
            bullet: false,
        }
    }
}

/// Unfilled box of text lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    pub geometry: Geometry,
    pub lines: Vec<StyledText>,
    pub word_wrap: bool,
    pub line_spacing: f64,
    pub bullet: bool,
}

impl TextBox {
    /// Space after each paragraph in points
    ///
    /// A multiplier of 1.2 on 16pt text leaves 6.4pt between lines.
    pub fn space_after(&self, line: &StyledText) -> f64 {
        (line.size * (self.line_spacing - 1.0) * 2.0).max(0.0)
    }
}

/// Style applied to one table cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub fill: Color,
    pub color: Color,
    pub bold: bool,
    pub align: Align,
    /// Font size in points
    pub size: f64,
}

/// One table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    pub style: CellStyle,
}

/// Table with a header row and styled data rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub geometry: Geometry,
    /// Column widths in inches, left to right
    pub column_widths: Vec<f64>,
    pub header: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Header plus data rows
    pub fn row_count(&self) -> usize {
        self.rows.len() + 1
    }
}

/// Per-cell change applied on top of the table style
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CellOverride {
    /// Data row index, 0-based, header excluded
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub align: Option<Align>,
}

/// Default look of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    pub header_fill: Color,
    pub header_color: Color,
    pub header_bold: bool,
    pub body_color: Color,
    /// Data row `i` is filled with `row_fills[i % 2]`
    pub row_fills: [Color; 2],
    pub size: f64,
    pub align: Align,
    pub overrides: Vec<CellOverride>,
    /// Cells whose text equals one of these values use `emphasis_color`
    pub emphasize: Vec<String>,
    pub emphasis_color: Color,
}

impl TableStyle {
    fn header_style(&self) -> CellStyle {
        CellStyle {
            fill: self.header_fill,
            color: self.header_color,
            bold: self.header_bold,
            align: self.align,
            size: self.size,
        }
    }

    fn body_style(&self, row: usize, col: usize, text: &str) -> CellStyle {
        let mut style = CellStyle {
            fill: self.row_fills[row % 2],
            color: self.body_color,
            bold: false,
            align: self.align,
            size: self.size,
        };
        if self.emphasize.iter().any(|value| value == text) {
            style.color = self.emphasis_color;
        }
        for over in self.overrides.iter().filter(|o| o.row == row && o.col == col) {
            if let Some(color) = over.color {
                style.color = color;
            }
            if let Some(bold) = over.bold {
                style.bold = bold;
            }
            if let Some(align) = over.align {
                style.align = align;
            }
        }
        style
    }
}

/// Positioned drawable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Rectangle(Shape),
    RoundedRectangle(Shape),
    Oval(Shape),
    Arrow(Shape),
    TextBox(TextBox),
    Table(Table),
}

impl Primitive {
    pub fn geometry(&self) -> &Geometry {
        match self {
            Self::Rectangle(s) | Self::RoundedRectangle(s) | Self::Oval(s) | Self::Arrow(s) => {
                &s.geometry
            }
            Self::TextBox(t) => &t.geometry,
            Self::Table(t) => &t.geometry,
        }
    }

    /// Short lowercase name of the primitive kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "rectangle",
            Self::RoundedRectangle(_) => "rounded_rectangle",
            Self::Oval(_) => "oval",
            Self::Arrow(_) => "arrow",
            Self::TextBox(_) => "text_box",
            Self::Table(_) => "table",
        }
    }
}

/// Solid rectangle
pub fn rectangle(geometry: Geometry, fill: Color, border: Option<Border>) -> Result<Primitive> {
    Ok(Primitive::Rectangle(Shape::new(geometry, fill, border)?))
}

/// Rectangle with rounded corners
pub fn rounded_rectangle(
    geometry: Geometry,
    fill: Color,
    border: Option<Border>,
) -> Result<Primitive> {
    Ok(Primitive::RoundedRectangle(Shape::new(geometry, fill, border)?))
}

/// Oval, with an optional centered label
pub fn oval(
    geometry: Geometry,
    fill: Color,
    border: Option<Border>,
    label: Option<StyledText>,
) -> Result<Primitive> {
    let mut shape = Shape::new(geometry, fill, border)?;
    if let Some(label) = label {
        shape = shape.with_label(label)?;
    }
    Ok(Primitive::Oval(shape))
}

/// Right-pointing block arrow
pub fn arrow(geometry: Geometry, fill: Color, border: Option<Border>) -> Result<Primitive> {
    Ok(Primitive::Arrow(Shape::new(geometry, fill, border)?))
}

/// Text box with one paragraph per line
pub fn text_box(geometry: Geometry, lines: Vec<StyledText>, options: TextOptions) -> Result<Primitive> {
    geometry.validate()?;
    for line in &lines {
        line.validate()?;
    }
    if !(options.line_spacing.is_finite() && options.line_spacing > 0.0) {
        return Err(ComposeError::invalid_widget(
            "text_box",
            format!("line spacing {} must be positive", options.line_spacing),
        ));
    }
    Ok(Primitive::TextBox(TextBox {
        geometry,
        lines,
        word_wrap: options.word_wrap,
        line_spacing: options.line_spacing,
        bullet: options.bullet,
    }))
}

/// Table primitive
///
/// Without `column_widths` the table width is split equally.
pub fn table(
    geometry: Geometry,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    style: &TableStyle,
    column_widths: Option<Vec<f64>>,
) -> Result<Primitive> {
    geometry.validate()?;
    if header.is_empty() {
        return Err(ComposeError::malformed_table("header row is empty"));
    }
    let columns = header.len();
    if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
        return Err(ComposeError::malformed_table(format!(
            "row {} has {} cells, header has {}",
            index + 1,
            row.len(),
            columns
        )));
    }
    if !(style.size.is_finite() && style.size > 0.0) {
        return Err(ComposeError::InvalidFontSize { size: style.size });
    }

    let column_widths = match column_widths {
        Some(widths) => {
            if widths.len() != columns {
                return Err(ComposeError::malformed_table(format!(
                    "{} column widths given for {} columns",
                    widths.len(),
                    columns
                )));
            }
            if widths.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
                return Err(ComposeError::malformed_table(
                    "column widths must be non-negative",
                ));
            }
            widths
        }
        None => vec![geometry.width / columns as f64; columns],
    };

    let header_style = style.header_style();
    let header = header
        .into_iter()
        .map(|text| TableCell {
            text,
            style: header_style,
        })
        .collect();
    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(r, row)| {
            row.into_iter()
                .enumerate()
                .map(|(c, text)| {
                    let style = style.body_style(r, c, &text);
                    TableCell { text, style }
                })
                .collect()
        })
        .collect();

    Ok(Primitive::Table(Table {
        geometry,
        column_widths,
        header,
        rows,
    }))
}
