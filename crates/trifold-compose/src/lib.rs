//! # trifold-compose
//!
//! Format-independent composition engine for trifold.
//!
//! Content is described as [`Widget`]s, composed against a [`Theme`] into
//! positioned [`Primitive`]s and collected on a [`Canvas`] in paint order.
//! Finalized canvases are handed to a [`Renderer`] backend, and
//! [`write_artifact`] writes the result atomically.
//!
//! ## Example
//!
//! ```rust
//! use trifold_compose::{Canvas, Geometry, Size, Theme, Role, Widget};
//! use trifold_compose::widgets::MetricCard;
//!
//! let theme = Theme::default();
//! let mut canvas = Canvas::new(1, 1, Size::WIDESCREEN, theme.resolve(Role::Background));
//! let card = Widget::MetricCard(MetricCard {
//!     at: Geometry::new(0.8, 1.3, 2.8, 1.3),
//!     title: "Target APR".into(),
//!     value: "9-13%".into(),
//!     subtitle: None,
//! });
//! canvas.compose(&card, &theme)?;
//! canvas.close_with_number(&theme)?;
//! assert!(canvas.is_finalized());
//! # Ok::<(), trifold_compose::ComposeError>(())
//! ```

pub mod canvas;
pub mod deck;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod output;
pub mod shapes;
pub mod theme;
pub mod widgets;

pub use canvas::{Canvas, CanvasState};
pub use deck::{DeckComposer, DeckDescription, SlideDescription};
pub use error::{ComposeError, RenderError, Result};
pub use geometry::{Geometry, Size};
pub use grid::Grid;
pub use output::{write_artifact, Renderer};
pub use shapes::{
    Align, Border, CellOverride, CellStyle, Primitive, Shape, StyledText, Table, TableCell,
    TableStyle, TextBox, TextOptions,
};
pub use theme::{Color, ColorRef, Role, Theme, ThemeOverrides};
pub use widgets::{Compose, Widget};
