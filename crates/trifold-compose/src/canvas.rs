//! Canvas lifecycle: `Empty -> Composing -> Finalized`.

use serde::Serialize;
use tracing::debug;

use crate::error::{ComposeError, Result};
use crate::geometry::Size;
use crate::shapes::Primitive;
use crate::theme::{Color, Theme};
use crate::widgets::{Compose, SlideNumber, Widget};

/// Lifecycle state of a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasState {
    Empty,
    Composing,
    Finalized,
}

/// One slide or page: primitives in paint order
///
/// Later primitives draw on top of earlier ones. Once finalized a canvas
/// rejects every further change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    index: usize,
    total: usize,
    size: Size,
    background: Color,
    state: CanvasState,
    primitives: Vec<Primitive>,
}

impl Canvas {
    /// Create canvas `index` (1-based) of `total`
    pub fn new(index: usize, total: usize, size: Size, background: Color) -> Self {
        Self {
            index,
            total,
            size,
            background,
            state: CanvasState::Empty,
            primitives: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn state(&self) -> CanvasState {
        self.state
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_finalized(&self) -> bool {
        self.state == CanvasState::Finalized
    }

    /// Append a batch of primitives after everything already on the canvas
    pub fn append(&mut self, batch: Vec<Primitive>) -> Result<()> {
        if self.is_finalized() {
            return Err(ComposeError::canvas_closed(self.index, "append"));
        }
        self.primitives.extend(batch);
        self.state = CanvasState::Composing;
        Ok(())
    }

    /// Compose a widget and append its primitives
    ///
    /// A widget error leaves the canvas untouched.
    pub fn compose(&mut self, widget: &Widget, theme: &Theme) -> Result<()> {
        if self.is_finalized() {
            return Err(ComposeError::canvas_closed(self.index, "compose"));
        }
        let batch = widget.compose(theme)?;
        debug!(
            canvas = self.index,
            widget = widget.name(),
            primitives = batch.len(),
            "composed widget"
        );
        self.append(batch)
    }

    /// Close the canvas
    pub fn finalize(&mut self) -> Result<()> {
        if self.is_finalized() {
            return Err(ComposeError::canvas_closed(self.index, "finalize"));
        }
        self.state = CanvasState::Finalized;
        debug!(
            canvas = self.index,
            primitives = self.primitives.len(),
            "finalized canvas"
        );
        Ok(())
    }

    /// Add the "N / total" marker, then close the canvas
    pub fn close_with_number(&mut self, theme: &Theme) -> Result<()> {
        let number = Widget::SlideNumber(SlideNumber::for_canvas(self.index, self.total, self.size));
        self.compose(&number, theme)?;
        self.finalize()
    }
}
