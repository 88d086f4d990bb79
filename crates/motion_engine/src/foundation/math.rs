//! Math utilities and types
//!
//! Provides the small set of math types the simulation needs: a 2D vector,
//! an RGBA color with hex parsing, and interval helpers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;
}

/// Math utility functions
pub mod utils {
    /// Clamp a value into `[min, max]`, or the midpoint when `min > max`
    pub fn clamp_span(value: f32, min: f32, max: f32) -> f32 {
        if min > max {
            (min + max) * 0.5
        } else {
            value.clamp(min, max)
        }
    }
}

/// Error produced when a color string is not a `#RRGGBB` hex triplet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// String did not start with `#` or had the wrong length
    #[error("expected #RRGGBB, got {0:?}")]
    Format(String),

    /// A channel was not valid hexadecimal
    #[error("invalid hex digits in {0:?}")]
    Digits(String),
}

/// Straight (non-premultiplied) RGBA color with 8-bit channels and a float alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha in `[0, 1]`
    pub a: f32,
}

impl Rgba {
    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a `#RRGGBB` string into an opaque color
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ColorParseError::Format(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::Digits(hex.to_string()))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Same color with a different alpha (clamped to `[0, 1]`)
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS-style `rgba(r, g, b, a)` string
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_hex_parsing() {
        let color = Rgba::from_hex("#3b82f6").unwrap();
        assert_eq!((color.r, color.g, color.b), (0x3b, 0x82, 0xf6));
        assert_relative_eq!(color.a, 1.0);
    }

    #[test]
    fn test_hex_parsing_rejects_garbage() {
        assert!(matches!(Rgba::from_hex("fff"), Err(ColorParseError::Format(_))));
        assert!(matches!(Rgba::from_hex("#12345"), Err(ColorParseError::Format(_))));
        assert!(matches!(Rgba::from_hex("#zz0000"), Err(ColorParseError::Digits(_))));
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_relative_eq!(Rgba::WHITE.with_alpha(1.7).a, 1.0);
        assert_relative_eq!(Rgba::WHITE.with_alpha(-0.2).a, 0.0);
        assert_eq!(Rgba::rgb(1, 2, 3).with_alpha(0.5).to_css(), "rgba(1, 2, 3, 0.5)");
    }

    #[test]
    fn test_clamp_span() {
        assert_relative_eq!(utils::clamp_span(5.0, 1.0, 3.0), 3.0);
        assert_relative_eq!(utils::clamp_span(-5.0, 1.0, 3.0), 1.0);
        // Empty interval collapses to its midpoint
        assert_relative_eq!(utils::clamp_span(10.0, 60.0, 40.0), 50.0);
    }
}
