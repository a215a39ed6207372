//! RGBA colors, CSS-style parsing, and pheromone colorizers.
//!
//! Team colors arrive as strings in the snapshot (`"#ff8800"`, `"red"`);
//! pheromone levels are mapped to node fill colors through a [`Colorizer`]
//! selected in [`DisplayOptions`](crate::options::DisplayOptions).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::options::{ColorizerMode, DisplayOptions};

/// Linear RGBA color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Fill used for food stock discs.
    pub const FOOD: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Fill used for water nodes (`#2bfafa`).
    pub const WATER: Color = Color::rgb(43.0 / 255.0, 250.0 / 255.0, 250.0 / 255.0);

    /// Opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse a CSS-style color: `#rgb`, `#rrggbb`, `#rrggbbaa`, or one of
    /// a small set of named colors.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let named = match text.to_ascii_lowercase().as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(1.0, 0.0, 0.0),
            "green" => Self::rgb(0.0, 128.0 / 255.0, 0.0),
            "lime" => Self::rgb(0.0, 1.0, 0.0),
            "blue" => Self::rgb(0.0, 0.0, 1.0),
            "yellow" => Self::rgb(1.0, 1.0, 0.0),
            "cyan" | "aqua" => Self::rgb(0.0, 1.0, 1.0),
            "magenta" | "fuchsia" => Self::rgb(1.0, 0.0, 1.0),
            "orange" => Self::rgb(1.0, 165.0 / 255.0, 0.0),
            "purple" => Self::rgb(128.0 / 255.0, 0.0, 128.0 / 255.0),
            "gray" | "grey" => Self::rgb(0.5, 0.5, 0.5),
            _ => return None,
        };
        Some(named)
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        let unit = |v: u8| f32::from(v) / 255.0;
        match hex.len() {
            3 => {
                let mut out = [0.0; 3];
                for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                    let v = ch.to_digit(16)? as u8;
                    *slot = unit(v * 17);
                }
                Some(Self::rgb(out[0], out[1], out[2]))
            }
            6 | 8 => {
                let r = channel(hex.get(0..2)?)?;
                let g = channel(hex.get(2..4)?)?;
                let b = channel(hex.get(4..6)?)?;
                let a = match hex.get(6..8) {
                    Some(a) => channel(a)?,
                    None => 255,
                };
                Some(Self {
                    r: unit(r),
                    g: unit(g),
                    b: unit(b),
                    a: unit(a),
                })
            }
            _ => None,
        }
    }

    /// Parse, falling back to white for unrecognized input.
    #[must_use]
    pub fn parse_or_white(text: &str) -> Self {
        Self::parse(text).unwrap_or(Self::WHITE)
    }

    /// Component-wise interpolation; `t` is clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Maps a node's pheromone scalar to its fill color.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Colorizer {
    /// Every node is filled black.
    #[default]
    Black,
    /// Pheromone is an 8-bit `RRRGGGBB` packed color.
    EightBit,
    /// Explicit lookup table keyed by the pheromone value's decimal form.
    Palette(BTreeMap<String, Color>),
}

impl Colorizer {
    /// Build the colorizer selected by the display options.
    ///
    /// Palette entries that fail to parse are dropped with a warning.
    #[must_use]
    pub fn from_options(display: &DisplayOptions) -> Self {
        match display.colorizer {
            ColorizerMode::None => Self::Black,
            ColorizerMode::EightBit => Self::EightBit,
            ColorizerMode::Palette => {
                let mut table = BTreeMap::new();
                for (key, value) in &display.palette {
                    match Color::parse(value) {
                        Some(color) => {
                            let _ = table.insert(key.clone(), color);
                        }
                        None => log::warn!(
                            "ignoring palette entry {key}: unparseable color '{value}'"
                        ),
                    }
                }
                Self::Palette(table)
            }
        }
    }

    /// Fill color for a pheromone value.
    #[must_use]
    pub fn colorize(&self, pheromone: f32) -> Color {
        match self {
            Self::Black => Color::BLACK,
            Self::EightBit => {
                let v = pheromone.clamp(0.0, 255.0) as u8;
                Color::rgb(
                    f32::from(v >> 5) / 7.0,
                    f32::from((v >> 2) & 0x07) / 7.0,
                    f32::from(v & 0x03) / 3.0,
                )
            }
            Self::Palette(table) => table
                .get(&format!("{pheromone}"))
                .copied()
                .unwrap_or(Color::BLACK),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#ffffff"), Some(Color::WHITE));
        assert_eq!(Color::parse("#000"), Some(Color::BLACK));
        let c = Color::parse("#2bfafa80").unwrap();
        assert!((c.g - Color::WATER.g).abs() < 1e-6);
        assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("#zzzzzz"), None);
    }

    #[test]
    fn parses_named_colors() {
        assert_eq!(Color::parse(" Red "), Some(Color::rgb(1.0, 0.0, 0.0)));
        assert_eq!(Color::parse("chartreuse"), None);
        assert_eq!(Color::parse_or_white("chartreuse"), Color::WHITE);
    }

    #[test]
    fn lerp_endpoints_are_exact() {
        let grey = Color::BLACK.lerp(Color::WHITE, 0.5);
        assert!((grey.r - 0.5).abs() < 1e-6);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 0.0), Color::BLACK);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 1.0), Color::WHITE);
        assert_eq!(Color::BLACK.lerp(Color::WHITE, 3.0), Color::WHITE);
    }

    #[test]
    fn eight_bit_unpacks_channels() {
        let c = Colorizer::EightBit.colorize(255.0);
        assert_eq!(c, Color::WHITE);
        let red = Colorizer::EightBit.colorize(f32::from(0b1110_0000u8));
        assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
        assert_eq!(Colorizer::EightBit.colorize(-4.0), Color::BLACK);
    }

    #[test]
    fn palette_looks_up_decimal_keys() {
        let mut display = DisplayOptions {
            colorizer: ColorizerMode::Palette,
            ..DisplayOptions::default()
        };
        let _ = display.palette.insert("3".to_owned(), "#00ff00".to_owned());
        let _ = display.palette.insert("0.5".to_owned(), "blue".to_owned());
        let _ = display.palette.insert("7".to_owned(), "nope".to_owned());
        let colorizer = Colorizer::from_options(&display);

        assert_eq!(colorizer.colorize(3.0), Color::rgb(0.0, 1.0, 0.0));
        assert_eq!(colorizer.colorize(0.5), Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(colorizer.colorize(7.0), Color::BLACK);
        assert_eq!(colorizer.colorize(9.0), Color::BLACK);
    }

    #[test]
    fn default_colorizer_is_black() {
        let colorizer = Colorizer::from_options(&DisplayOptions::default());
        assert_eq!(colorizer, Colorizer::Black);
        assert_eq!(colorizer.colorize(42.0), Color::BLACK);
    }
}
