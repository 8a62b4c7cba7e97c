//! Layout grid for repeated cards.

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};

/// Regular grid of cells, filled row by row
///
/// Cell `i` sits at `(left + (i % columns) * col_step, top + (i / columns) * row_step)`.
/// Without `columns` every cell lands on the first row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub left: f64,
    pub top: f64,
    pub col_step: f64,
    #[serde(default)]
    pub row_step: f64,
    #[serde(default)]
    pub columns: Option<usize>,
}

impl Grid {
    /// Single row of cells
    pub fn row(left: f64, top: f64, col_step: f64) -> Self {
        Self {
            left,
            top,
            col_step,
            row_step: 0.0,
            columns: None,
        }
    }

    /// Cells wrapping after `columns`
    pub fn new(left: f64, top: f64, col_step: f64, row_step: f64, columns: usize) -> Self {
        Self {
            left,
            top,
            col_step,
            row_step,
            columns: Some(columns),
        }
    }

    /// Top-left corner of cell `index`
    pub fn cell(&self, index: usize) -> Result<(f64, f64)> {
        let (col, row) = match self.columns {
            Some(0) => {
                return Err(ComposeError::invalid_widget(
                    "grid",
                    "columns must be at least 1",
                ))
            }
            Some(columns) => (index % columns, index / columns),
            None => (index, 0),
        };
        Ok((
            self.left + col as f64 * self.col_step,
            self.top + row as f64 * self.row_step,
        ))
    }
}
