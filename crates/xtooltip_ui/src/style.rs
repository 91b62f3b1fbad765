//! Style definitions for tooltip bubbles and ripple overlays.
//!
//! Styles are plain data and can be loaded from JSON so hosts can theme
//! tooltips without recompiling.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use xtooltip_core::models::animation::duration_ms;
use xtooltip_core::TooltipError;

use crate::layout::{defaults, sizes};

/// An 8-bit ARGB color, written as `#RRGGBB` or `#AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn from_hex(hex: &str) -> Result<Self, TooltipError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| TooltipError::style(format!("Invalid color '{hex}'"), Some("Use #RRGGBB or #AARRGGBB")))?;
        match digits.len() {
            6 => Ok(Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)),
            8 => Ok(Self::argb((value >> 24) as u8, (value >> 16) as u8, (value >> 8) as u8, value as u8)),
            _ => Err(TooltipError::style(
                format!("Invalid color '{hex}'"),
                Some("Use #RRGGBB or #AARRGGBB"),
            )),
        }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl TryFrom<String> for Color {
    type Error = TooltipError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        format!("#{:02X}{:02X}{:02X}{:02X}", c.a, c.r, c.g, c.b)
    }
}

/// Ripple overlay styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Ripple color
    pub color: Color,
    /// Peak opacity of both circles, `0.0..=1.0`
    pub alpha: f64,
    /// Number of pulses per play
    pub repeat_count: u32,
    /// Duration of one pulse
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x89, 0xB4, 0xFA),
            alpha: 0.5,
            repeat_count: defaults::RIPPLE_REPEAT_COUNT,
            duration: defaults::RIPPLE_DURATION,
        }
    }
}

/// Bubble styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    /// Style identifier.
    pub name: String,
    /// Padding around the text; half of it hosts the arrow
    pub padding: i32,
    /// Bubble corner radius
    pub corner_radius: f64,
    /// Outline stroke width
    pub stroke_weight: f64,
    /// Fill color, no fill when absent
    pub background_color: Option<Color>,
    /// Outline color, no outline when absent
    pub stroke_color: Option<Color>,
    /// Text color handed to the host
    pub text_color: Color,
    /// `padding / arrow_ratio` is the half-width of the arrow
    pub arrow_ratio: f64,
    /// Font family resolved by the host
    pub font: Option<String>,
    /// Named text appearance resolved by the host
    pub text_style: Option<String>,
    /// Ripple overlay styling
    pub overlay: OverlayStyle,
}

impl TooltipStyle {
    /// Dark bubble, based on the Catppuccin Mocha palette.
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            // #313244 - Mocha Surface0
            background_color: Some(Color::rgb(0x31, 0x32, 0x44)),
            // #45475a - Mocha Surface1
            stroke_color: Some(Color::rgb(0x45, 0x47, 0x5A)),
            // #cdd6f4 - Mocha Text
            text_color: Color::rgb(0xCD, 0xD6, 0xF4),
            ..Self::base()
        }
    }

    /// Light bubble, based on the Catppuccin Latte palette.
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            // #e6e9ef - Latte Surface0
            background_color: Some(Color::rgb(0xE6, 0xE9, 0xEF)),
            // #dce0e8 - Latte Surface1
            stroke_color: Some(Color::rgb(0xDC, 0xE0, 0xE8)),
            // #4c4f69 - Latte Text
            text_color: Color::rgb(0x4C, 0x4F, 0x69),
            overlay: OverlayStyle {
                // #1e66f5 - Latte Blue
                color: Color::rgb(0x1E, 0x66, 0xF5),
                ..OverlayStyle::default()
            },
            ..Self::base()
        }
    }

    fn base() -> Self {
        Self {
            name: String::new(),
            padding: sizes::PADDING,
            corner_radius: sizes::CORNER_RADIUS,
            stroke_weight: sizes::STROKE_WEIGHT,
            background_color: None,
            stroke_color: None,
            text_color: Color::rgb(0, 0, 0),
            arrow_ratio: defaults::ARROW_RATIO,
            font: None,
            text_style: None,
            overlay: OverlayStyle::default(),
        }
    }

    /// Parse a style from JSON. Missing fields take the dark defaults.
    pub fn from_json(json: &str) -> Result<Self, TooltipError> {
        let style: TooltipStyle = serde_json::from_str(json)?;
        style.validate()?;
        Ok(style)
    }

    /// Load a style from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TooltipError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let style = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), name = %style.name, "Loaded tooltip style");
        Ok(style)
    }

    fn validate(&self) -> Result<(), TooltipError> {
        if self.arrow_ratio <= 0.0 {
            return Err(TooltipError::style(
                format!("arrow_ratio must be positive, got {}", self.arrow_ratio),
                None,
            ));
        }
        if self.padding < 0 || self.corner_radius < 0.0 {
            return Err(TooltipError::style("padding and corner_radius must not be negative", None));
        }
        Ok(())
    }
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self::dark()
    }
}
