use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DashboardError, DashboardResult};

/// Opaque sRGB color, serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);

    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parses `#rrggbb` (leading `#` optional, case-insensitive).
    pub fn from_hex(input: &str) -> DashboardResult<Self> {
        let digits = input.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DashboardError::InvalidData(format!(
                "color `{input}` must be a #rrggbb hex string"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| DashboardError::InvalidData(format!("color `{input}`: {e}")))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Outline drawn around markers or pie slices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Color,
    pub width: f64,
}

impl Outline {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }

    pub fn validate(self) -> DashboardResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(DashboardError::InvalidData(
                "outline width must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Font size, fill and row height for one region of a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    pub fill: Color,
    pub font_size: f64,
    pub height: f64,
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl CellStyle {
    pub fn validate(self) -> DashboardResult<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(DashboardError::InvalidData(
                "cell font size must be finite and > 0".to_owned(),
            ));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(DashboardError::InvalidData(
                "cell height must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
