//! Icon colors

use anyhow::{anyhow, Result};
use image::Rgb;
use std::str::FromStr;

pub const DEFAULT_BACKGROUND: &str = "#4A90E2";
pub const DEFAULT_FOREGROUND: &str = "#FFFFFF";
pub const DEFAULT_ACCENT: &str = "#2C5AA0";

/// The three colors every icon is drawn with
///
/// The background fills the canvas and is reused for the label, the
/// foreground fills the rounded rectangle and the accent outlines it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub accent: Rgb<u8>,
}

impl Palette {
    pub fn from_css(background: &str, foreground: &str, accent: &str) -> Result<Self> {
        Ok(Self {
            background: parse_color(background)?,
            foreground: parse_color(foreground)?,
            accent: parse_color(accent)?,
        })
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb([0x4A, 0x90, 0xE2]),
            foreground: Rgb([0xFF, 0xFF, 0xFF]),
            accent: Rgb([0x2C, 0x5A, 0xA0]),
        }
    }
}

/// Parse a CSS color string such as `#fff` into an opaque pixel
pub fn parse_color(color: &str) -> Result<Rgb<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow!("Invalid color: {}", color))?;

    Ok(Rgb([
        channel(srgb.red),
        channel(srgb.green),
        channel(srgb.blue),
    ]))
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
