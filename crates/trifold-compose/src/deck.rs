//! Deck descriptions and the deck composer.
//!
//! A deck is described in TOML, one `[[slides]]` table per slide:
//!
//! ```toml
//! title = "Superloop"
//!
//! [theme]
//! accent = "#007AFF"
//!
//! [[slides]]
//! header_bar = true
//!
//! [[slides.widgets]]
//! kind = "text"
//! left = 0.8
//! top = 0.4
//! width = 6.0
//! height = 0.6
//! text = "THE PROBLEM"
//! size = 32
//! color = "accent"
//! bold = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::error::Result;
use crate::geometry::{Geometry, Size};
use crate::theme::{ColorRef, Role, Theme, ThemeOverrides};
use crate::widgets::{BarWidget, Widget};

/// Height of the accent bar across the top of content slides
pub const HEADER_BAR_HEIGHT: f64 = 0.06;

/// Height of the accent bars framing a title slide
pub const FRAME_BAR_HEIGHT: f64 = 0.08;

/// Whole deck as read from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckDescription {
    #[serde(default)]
    pub title: String,

    /// Written to the package's core properties
    #[serde(default)]
    pub author: Option<String>,

    /// Slide size in inches, 16:9 by default
    #[serde(default)]
    pub size: Size,

    /// Palette overrides
    #[serde(default)]
    pub theme: ThemeOverrides,

    #[serde(default)]
    pub slides: Vec<SlideDescription>,
}

/// One slide
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideDescription {
    /// Background color, a role or `#RRGGBB`
    #[serde(default = "default_background")]
    pub background: ColorRef,

    /// Thin accent bar along the top edge
    #[serde(default)]
    pub header_bar: bool,

    /// Accent bars along the top and bottom edges (title slides)
    #[serde(default)]
    pub frame_bars: bool,

    /// Draw the "N / total" marker
    #[serde(default = "default_numbered")]
    pub numbered: bool,

    #[serde(default)]
    pub widgets: Vec<Widget>,
}

fn default_background() -> ColorRef {
    ColorRef::role(Role::Background)
}

fn default_numbered() -> bool {
    true
}

impl Default for SlideDescription {
    fn default() -> Self {
        Self {
            background: default_background(),
            header_bar: false,
            frame_bars: false,
            numbered: default_numbered(),
            widgets: Vec::new(),
        }
    }
}

impl DeckDescription {
    /// Parse a deck description from a TOML string
    pub fn from_toml_str(toml_content: &str) -> Result<Self> {
        let deck: DeckDescription = toml::from_str(toml_content)?;
        Ok(deck)
    }

    /// Load a deck description from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Base theme with this deck's overrides applied
    pub fn theme(&self, base: &Theme) -> Result<Theme> {
        if self.theme.is_empty() {
            return Ok(base.clone());
        }
        base.with_overrides(&self.theme)
    }
}

/// Builds finalized canvases from a deck description
pub struct DeckComposer<'a> {
    theme: &'a Theme,
}

impl<'a> DeckComposer<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Compose every slide, numbered `1..=total`
    pub fn compose(&self, deck: &DeckDescription) -> Result<Vec<Canvas>> {
        let total = deck.slides.len();
        let canvases = deck
            .slides
            .iter()
            .enumerate()
            .map(|(i, slide)| self.compose_slide(slide, i + 1, total, deck.size))
            .collect::<Result<Vec<_>>>()?;
        info!(title = %deck.title, slides = total, "composed deck");
        Ok(canvases)
    }

    /// Compose one slide into a finalized canvas
    pub fn compose_slide(
        &self,
        slide: &SlideDescription,
        index: usize,
        total: usize,
        size: Size,
    ) -> Result<Canvas> {
        let background = self.theme.resolve_ref(&slide.background)?;
        let mut canvas = Canvas::new(index, total, size, background);

        for bar in self.bars(slide, size) {
            canvas.compose(&bar, self.theme)?;
        }
        for widget in &slide.widgets {
            canvas.compose(widget, self.theme)?;
        }

        if slide.numbered {
            canvas.close_with_number(self.theme)?;
        } else {
            canvas.finalize()?;
        }
        debug!(
            slide = index,
            primitives = canvas.primitives().len(),
            "composed slide"
        );
        Ok(canvas)
    }

    fn bars(&self, slide: &SlideDescription, size: Size) -> Vec<Widget> {
        let bar = |top: f64, height: f64| {
            Widget::Bar(BarWidget {
                at: Geometry::new(0.0, top, size.width, height),
                color: ColorRef::role(Role::Accent),
            })
        };
        let mut bars = Vec::new();
        if slide.frame_bars {
            bars.push(bar(0.0, FRAME_BAR_HEIGHT));
            bars.push(bar(size.height - FRAME_BAR_HEIGHT, FRAME_BAR_HEIGHT));
        } else if slide.header_bar {
            bars.push(bar(0.0, HEADER_BAR_HEIGHT));
        }
        bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComposeError;
    use crate::shapes::Primitive;

    const DECK: &str = r##"
title = "Test deck"

[theme]
highlight = "#FFD700"

[[slides]]
frame_bars = true
numbered = false

[[slides.widgets]]
kind = "text"
left = 1.0
top = 1.5
width = 11.0
height = 1.0
text = "SUPERLOOP"
size = 54
color = "accent"
bold = true

[[slides]]
header_bar = true
background = "#000000"

[[slides.widgets]]
kind = "bar"
left = 1.0
top = 4.3
width = 4.0
height = 0.03
"##;

    #[test]
    fn test_parse_deck() {
        let deck = DeckDescription::from_toml_str(DECK).unwrap();
        assert_eq!(deck.title, "Test deck");
        assert_eq!(deck.slides.len(), 2);
        assert!(deck.slides[0].frame_bars);
        assert_eq!(deck.size, Size::WIDESCREEN);
    }

    #[test]
    fn test_compose_deck() {
        let deck = DeckDescription::from_toml_str(DECK).unwrap();
        let theme = deck.theme(&Theme::default()).unwrap();
        assert_eq!(theme.resolve(Role::Highlight).hex(), "FFD700");

        let canvases = DeckComposer::new(&theme).compose(&deck).unwrap();
        assert_eq!(canvases.len(), 2);
        assert!(canvases.iter().all(|c| c.is_finalized()));

        // two frame bars + title, no number
        assert_eq!(canvases[0].primitives().len(), 3);
        // header bar + bar + number
        assert_eq!(canvases[1].primitives().len(), 3);
        assert_eq!(canvases[1].background().hex(), "000000");
        match canvases[1].primitives().last() {
            Some(Primitive::TextBox(tb)) => assert_eq!(tb.lines[0].text, "2 / 2"),
            other => panic!("expected slide number, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_background_role() {
        let deck = DeckDescription::from_toml_str(
            r#"
[[slides]]
background = "midnight"
"#,
        )
        .unwrap();
        let theme = Theme::default();
        let err = DeckComposer::new(&theme).compose(&deck).unwrap_err();
        assert!(matches!(err, ComposeError::UnknownRole { .. }));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_bad_toml() {
        let err = DeckDescription::from_toml_str("slides = 3").unwrap_err();
        assert_eq!(err.code(), "CMP008");
    }
}
