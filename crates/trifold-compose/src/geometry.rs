//! Positions and sizes in document units (inches).

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};

/// Rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Same size, moved by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    /// Child rectangle at `(dx, dy)` from this one's corner
    pub fn child(&self, dx: f64, dy: f64, width: f64, height: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, width, height)
    }

    /// Check the rectangle can be emitted in a primitive
    pub fn validate(&self) -> Result<()> {
        let values = [self.left, self.top, self.width, self.height];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(self.invalid("values must be finite"));
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(self.invalid("width and height must be non-negative"));
        }
        if self.left < 0.0 || self.top < 0.0 {
            return Err(self.invalid("left and top must be non-negative"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> ComposeError {
        ComposeError::InvalidGeometry {
            left: self.left,
            top: self.top,
            width: self.width,
            height: self.height,
            reason: reason.to_string(),
        }
    }
}

/// Canvas dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// 16:9 slide, 13.333 x 7.5 in
    pub const WIDESCREEN: Size = Size {
        width: 40.0 / 3.0,
        height: 7.5,
    };

    /// 4:3 slide, 10 x 7.5 in
    pub const STANDARD: Size = Size {
        width: 10.0,
        height: 7.5,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Rectangle covering the whole canvas
    pub fn bounds(&self) -> Geometry {
        Geometry::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}
