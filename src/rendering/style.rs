//! Computed style values carried by layout nodes
//!
//! These are already cascaded and resolved by the layout stage; the painter
//! only reads them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Straight (non-premultiplied) 8-bit RGBA color
///
/// Serialized as a hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    fn named(name: &str) -> Option<Self> {
        let c = match name {
            "black" => Rgba::BLACK,
            "white" => Rgba::WHITE,
            "transparent" => Rgba::TRANSPARENT,
            "red" => Rgba::rgb(255, 0, 0),
            "green" => Rgba::rgb(0, 128, 0),
            "blue" => Rgba::rgb(0, 0, 255),
            "gray" | "grey" => Rgba::rgb(128, 128, 128),
            "silver" => Rgba::rgb(192, 192, 192),
            "navy" => Rgba::rgb(0, 0, 128),
            "purple" => Rgba::rgb(128, 0, 128),
            _ => return None,
        };
        Some(c)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if let Some(c) = Rgba::named(&lower) {
            return Ok(c);
        }

        let hex = lower
            .strip_prefix('#')
            .ok_or_else(|| Error::ParseError(format!("unknown color '{}'", s)))?;
        let bad = || Error::ParseError(format!("invalid hex color '{}'", s));
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|v| v * 17)
                .map_err(|_| bad())
        };
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());

        if !hex.is_ascii() {
            return Err(bad());
        }
        match hex.len() {
            3 => Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Ok(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Computed `line-height`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum LineHeight {
    /// UA default, 1.2 × font size
    #[default]
    Normal,
    /// Unitless multiplier of the font size
    Number(f32),
    /// Absolute length in pixels
    Px(f32),
    /// Percentage of the font size
    Percent(f32),
}

impl LineHeight {
    pub const NORMAL_FACTOR: f32 = 1.2;

    /// Resolve the line height in pixels for the given font size.
    pub fn apply(&self, font_size: f32) -> f32 {
        match *self {
            LineHeight::Normal => font_size * Self::NORMAL_FACTOR,
            LineHeight::Number(n) => font_size * n,
            LineHeight::Px(px) => px,
            LineHeight::Percent(p) => font_size * p / 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Overline,
    LineThrough,
}

/// Family and weight; size and color live on the style itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDescriptor {
    pub family: String,
    pub weight: u16,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            weight: 400,
        }
    }
}

/// A fully resolved font: everything the backend needs to draw a run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f32,
    pub weight: u16,
    pub color: Rgba,
}

/// Post-cascade style of one layout node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputedStyle {
    pub color: Rgba,
    pub font: FontDescriptor,
    pub font_size: f32,
    pub line_height: LineHeight,
    pub text_decoration: TextDecoration,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            font: FontDescriptor::default(),
            font_size: 16.0,
            line_height: LineHeight::Normal,
            text_decoration: TextDecoration::None,
        }
    }
}

impl ComputedStyle {
    /// The font this node would hand to its text children.
    pub fn resolved_font(&self) -> Font {
        Font {
            family: self.font.family.clone(),
            size: self.font_size,
            weight: self.font.weight,
            color: self.color,
        }
    }

    /// `line-height` resolved against this style's font size.
    pub fn line_height_px(&self) -> f32 {
        self.line_height.apply(self.font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::WHITE);
        assert_eq!("#0000ff".parse::<Rgba>().unwrap(), Rgba::rgb(0, 0, 255));
        assert_eq!("#11223380".parse::<Rgba>().unwrap(), Rgba::new(0x11, 0x22, 0x33, 0x80));
        assert_eq!(" Red ".parse::<Rgba>().unwrap(), Rgba::rgb(255, 0, 0));
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("#gggggg".parse::<Rgba>().is_err());
        assert!("chartreuse-ish".parse::<Rgba>().is_err());
    }

    #[test]
    fn color_serializes_as_hex() {
        let js = serde_json::to_string(&Rgba::rgb(255, 0, 16)).unwrap();
        assert_eq!(js, "\"#ff0010\"");
        let back: Rgba = serde_json::from_str("\"#ff001080\"").unwrap();
        assert_eq!(back, Rgba::new(255, 0, 16, 128));
    }

    #[test]
    fn line_height_variants() {
        assert_eq!(LineHeight::Normal.apply(10.0), 12.0);
        assert_eq!(LineHeight::Number(1.5).apply(10.0), 15.0);
        assert_eq!(LineHeight::Px(22.0).apply(10.0), 22.0);
        assert_eq!(LineHeight::Percent(200.0).apply(10.0), 20.0);
    }

    #[test]
    fn resolved_font_bundles_style() {
        let style = ComputedStyle {
            color: Rgba::rgb(1, 2, 3),
            font_size: 13.0,
            font: FontDescriptor { family: "Serif".into(), weight: 700 },
            ..Default::default()
        };
        let f = style.resolved_font();
        assert_eq!(f.family, "Serif");
        assert_eq!(f.size, 13.0);
        assert_eq!(f.weight, 700);
        assert_eq!(f.color, Rgba::rgb(1, 2, 3));
    }

    #[test]
    fn style_json_defaults() {
        let s: ComputedStyle = serde_json::from_str(r#"{"text_decoration":"underline"}"#).unwrap();
        assert_eq!(s.text_decoration, TextDecoration::Underline);
        assert_eq!(s.font_size, 16.0);
        assert_eq!(s.line_height, LineHeight::Normal);
    }
}
