//! Theme palette, color roles and color values.
//!
//! A [`Theme`] is built once per run and passed by reference into every
//! widget and canvas call. Widgets never name raw colors; they ask the theme
//! for a [`Role`] or resolve a [`ColorRef`] taken from a deck description.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ComposeError, Result};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    /// Create a color from its components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB`
    pub fn parse(value: &str) -> Result<Self> {
        let hex = value.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ComposeError::invalid_color(value));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ComposeError::invalid_color(value))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Uppercase hex without the leading `#`, as OOXML expects it
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

impl FromStr for Color {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ComposeError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Semantic color roles of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Background,
    Accent,
    AccentSecondary,
    CardBackground,
    CardBackgroundAlt,
    TextPrimary,
    TextMuted,
    TextSubtle,
    Highlight,
    Danger,
    Violet,
}

impl Role {
    /// Every role, in palette order
    pub const ALL: [Role; 11] = [
        Role::Background,
        Role::Accent,
        Role::AccentSecondary,
        Role::CardBackground,
        Role::CardBackgroundAlt,
        Role::TextPrimary,
        Role::TextMuted,
        Role::TextSubtle,
        Role::Highlight,
        Role::Danger,
        Role::Violet,
    ];

    /// Kebab-case role name as written in deck descriptions
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Accent => "accent",
            Self::AccentSecondary => "accent-secondary",
            Self::CardBackground => "card-background",
            Self::CardBackgroundAlt => "card-background-alt",
            Self::TextPrimary => "text-primary",
            Self::TextMuted => "text-muted",
            Self::TextSubtle => "text-subtle",
            Self::Highlight => "highlight",
            Self::Danger => "danger",
            Self::Violet => "violet",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ComposeError;

    /// Accepts kebab-case and snake_case spellings
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.name() == normalized)
            .ok_or_else(|| ComposeError::unknown_role(s))
    }
}

/// A color given either by role name or as a literal hex value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorRef {
    /// Role name, resolved against the theme
    Named(String),
    /// Literal color, used as-is
    Literal(Color),
}

impl ColorRef {
    /// Shorthand for a role reference
    pub fn role(role: Role) -> Self {
        Self::Named(role.name().to_string())
    }
}

impl From<Role> for ColorRef {
    fn from(role: Role) -> Self {
        Self::role(role)
    }
}

impl From<Color> for ColorRef {
    fn from(color: Color) -> Self {
        Self::Literal(color)
    }
}

impl From<String> for ColorRef {
    fn from(value: String) -> Self {
        let is_literal = value.starts_with('#')
            || (value.len() == 6 && value.chars().all(|c| c.is_ascii_hexdigit()));
        match Color::parse(&value) {
            Ok(color) if is_literal => Self::Literal(color),
            // A malformed literal stays named so resolution reports it
            _ => Self::Named(value),
        }
    }
}

impl From<&str> for ColorRef {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<ColorRef> for String {
    fn from(value: ColorRef) -> Self {
        match value {
            ColorRef::Named(name) => name,
            ColorRef::Literal(color) => color.to_string(),
        }
    }
}

/// Immutable palette plus typography defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    colors: [Color; 11],
    /// Default font family
    pub font_family: String,
    /// Monospace font family
    pub mono_family: String,
    /// Base spacing unit in inches
    pub spacing: f64,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: [
                Color::rgb(0x0F, 0x11, 0x1A), // background
                Color::rgb(0x00, 0x7A, 0xFF), // accent
                Color::rgb(0x00, 0xC2, 0x8E), // accent-secondary
                Color::rgb(0x1A, 0x1D, 0x2E), // card-background
                Color::rgb(0x15, 0x17, 0x25), // card-background-alt
                Color::rgb(0xFF, 0xFF, 0xFF), // text-primary
                Color::rgb(0xA0, 0xA0, 0xA8), // text-muted
                Color::rgb(0x60, 0x60, 0x68), // text-subtle
                Color::rgb(0xFF, 0xC1, 0x07), // highlight
                Color::rgb(0xFF, 0x60, 0x60), // danger
                Color::rgb(0xE0, 0x60, 0xFF), // violet
            ],
            font_family: "Calibri".to_string(),
            mono_family: "Consolas".to_string(),
            spacing: 0.2,
        }
    }
}

impl Theme {
    /// Color assigned to a role
    pub fn resolve(&self, role: Role) -> Color {
        self.colors[role.index()]
    }

    /// Color assigned to a role given by name
    pub fn resolve_named(&self, name: &str) -> Result<Color> {
        Ok(self.resolve(name.parse()?))
    }

    /// Resolve a role reference or pass a literal through
    pub fn resolve_ref(&self, color: &ColorRef) -> Result<Color> {
        match color {
            ColorRef::Named(name) => {
                // Looks like a hex literal but failed to parse as one
                if name.starts_with('#') {
                    return Err(ComposeError::invalid_color(name.as_str()));
                }
                self.resolve_named(name)
            }
            ColorRef::Literal(color) => Ok(*color),
        }
    }

    /// Build a new theme with the given overrides applied
    pub fn with_overrides(&self, overrides: &ThemeOverrides) -> Result<Theme> {
        let mut theme = self.clone();
        for (name, value) in &overrides.colors {
            let role: Role = name.parse()?;
            theme.colors[role.index()] = Color::parse(value)?;
        }
        if let Some(font) = &overrides.font_family {
            theme.font_family = font.clone();
        }
        if let Some(mono) = &overrides.mono_family {
            theme.mono_family = mono.clone();
        }
        if let Some(spacing) = overrides.spacing {
            theme.spacing = spacing;
        }
        Ok(theme)
    }
}

/// Partial theme read from the `[theme]` table of a deck description
///
/// ```toml
/// [theme]
/// font_family = "Inter"
/// accent = "#FF5500"
/// card-background = "#202030"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeOverrides {
    #[serde(default)]
    pub font_family: Option<String>,

    #[serde(default)]
    pub mono_family: Option<String>,

    #[serde(default)]
    pub spacing: Option<f64>,

    /// Role name to `#RRGGBB`
    #[serde(flatten)]
    pub colors: BTreeMap<String, String>,
}

impl ThemeOverrides {
    pub fn is_empty(&self) -> bool {
        self.font_family.is_none()
            && self.mono_family.is_none()
            && self.spacing.is_none()
            && self.colors.is_empty()
    }
}
