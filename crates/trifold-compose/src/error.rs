//! Error types for composition and rendering.

use thiserror::Error;

/// Result type for composition operations
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors raised while building primitives, widgets and canvases
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Color role name is not one of the fixed theme roles
    #[error("Unknown theme role '{role}'")]
    UnknownRole { role: String },

    /// Table shape is inconsistent
    #[error("Malformed table: {reason}")]
    MalformedTable { reason: String },

    /// Geometry is negative or not finite
    #[error("Invalid geometry ({left}, {top}, {width} x {height}): {reason}")]
    InvalidGeometry {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        reason: String,
    },

    /// Font size must be strictly positive
    #[error("Invalid font size {size}: must be greater than zero")]
    InvalidFontSize { size: f64 },

    /// Widget content cannot be laid out
    #[error("Invalid {widget} widget: {reason}")]
    InvalidWidget { widget: String, reason: String },

    /// Color literal is not `#RRGGBB`
    #[error("Invalid color '{value}': expected #RRGGBB")]
    InvalidColor { value: String },

    /// Canvas was already finalized
    #[error("Canvas {index} is closed: cannot {operation} after finalize")]
    CanvasClosed {
        index: usize,
        operation: &'static str,
    },

    /// Deck description could not be parsed
    #[error("Deck description error: {0}")]
    Deck(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    /// Create an unknown role error
    pub fn unknown_role(role: impl Into<String>) -> Self {
        Self::UnknownRole { role: role.into() }
    }

    /// Create a malformed table error
    pub fn malformed_table(reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            reason: reason.into(),
        }
    }

    /// Create an invalid widget error
    pub fn invalid_widget(widget: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidWidget {
            widget: widget.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid color error
    pub fn invalid_color(value: impl Into<String>) -> Self {
        Self::InvalidColor {
            value: value.into(),
        }
    }

    /// Create a canvas closed error
    pub fn canvas_closed(index: usize, operation: &'static str) -> Self {
        Self::CanvasClosed { index, operation }
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownRole { .. } => "CMP001",
            Self::MalformedTable { .. } => "CMP002",
            Self::InvalidGeometry { .. } => "CMP003",
            Self::InvalidFontSize { .. } => "CMP004",
            Self::InvalidWidget { .. } => "CMP005",
            Self::InvalidColor { .. } => "CMP006",
            Self::CanvasClosed { .. } => "CMP007",
            Self::Deck(_) => "CMP008",
            Self::Io(_) => "CMP009",
        }
    }

    /// Whether the error comes from malformed content rather than
    /// misuse of the canvas lifecycle or the filesystem
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Self::CanvasClosed { .. } | Self::Io(_))
    }
}

/// Error surfaced by a renderer collaborator
#[derive(Error, Debug)]
pub enum RenderError {
    /// The backend failed to produce the artifact
    #[error("{artifact} renderer failed: {source}")]
    Backend {
        artifact: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Writing the artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Wrap a backend error for the given artifact kind
    pub fn backend(
        artifact: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Backend {
            artifact,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ComposeError::unknown_role("chartreuse");
        assert_eq!(err.code(), "CMP001");
        assert!(err.to_string().contains("chartreuse"));

        let err = ComposeError::canvas_closed(3, "append");
        assert_eq!(err.code(), "CMP007");
        assert!(err.to_string().contains("append"));
    }

    #[test]
    fn test_configuration_errors() {
        assert!(ComposeError::malformed_table("row 2 has 3 cells").is_configuration_error());
        assert!(ComposeError::InvalidFontSize { size: 0.0 }.is_configuration_error());
        assert!(!ComposeError::canvas_closed(1, "finalize").is_configuration_error());
    }

    #[test]
    fn test_render_error_keeps_cause() {
        let err = RenderError::backend("pptx", "zip writer failed");
        assert!(err.to_string().contains("pptx"));
        assert!(err.to_string().contains("zip writer failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
