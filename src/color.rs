//! Color types and CSS color conversions.
//!
//! Provides the RGBA representation shared by colormaps and the string
//! encodings (`rgb(...)`, `rgba(...)`, hex) understood by the charting schema.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// The conventional mid gray (`gray` in CSS).
    pub const GRAY: Self = Self::new(128, 128, 128, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Create from unit-interval fractions; channels are clamped then rounded.
    #[must_use]
    pub fn from_fractions(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Channels as unit-interval fractions.
    #[must_use]
    pub fn to_fractions(self) -> [f64; 4] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            f64::from(self.a) / 255.0,
        ]
    }

    /// Alpha as a unit-interval fraction.
    #[must_use]
    pub fn alpha_fraction(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `rgb(r,g,b)` string, dropping alpha.
    #[must_use]
    pub fn to_css_rgb(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// `rgba(r,g,b,a)` string with alpha as a fraction.
    #[must_use]
    pub fn to_css_rgba(self) -> String {
        css_rgba(self.r, self.g, self.b, self.alpha_fraction())
    }

    /// `#rrggbb` string, dropping alpha.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Format a number the way the charting schema expects in color strings:
/// integral values lose their trailing `.0`.
#[must_use]
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// `rgba(r,g,b,a)` with integer channels and a fractional alpha.
#[must_use]
pub fn css_rgba(r: u8, g: u8, b: u8, alpha: f64) -> String {
    format!("rgba({r},{g},{b},{})", format_number(alpha))
}

/// Whether a string is an 8-digit hex color (`#rrggbbaa`).
#[must_use]
pub fn is_rgba_hex(color: &str) -> bool {
    color.len() == 9
        && color.starts_with('#')
        && color.bytes().skip(1).all(|b| b.is_ascii_hexdigit())
}

/// Strip the alpha pair from an 8-digit hex color; other strings pass through.
#[must_use]
pub fn strip_hex_alpha(color: &str) -> &str {
    if is_rgba_hex(color) {
        &color[..7]
    } else {
        color
    }
}

const NAMED: &[(&str, Rgba)] = &[
    ("black", Rgba::BLACK),
    ("white", Rgba::WHITE),
    ("red", Rgba::RED),
    ("green", Rgba::rgb(0, 128, 0)),
    ("lime", Rgba::GREEN),
    ("blue", Rgba::BLUE),
    ("gray", Rgba::GRAY),
    ("grey", Rgba::GRAY),
    ("silver", Rgba::rgb(192, 192, 192)),
    ("yellow", Rgba::rgb(255, 255, 0)),
    ("orange", Rgba::rgb(255, 165, 0)),
    ("purple", Rgba::rgb(128, 0, 128)),
    ("cyan", Rgba::rgb(0, 255, 255)),
    ("magenta", Rgba::rgb(255, 0, 255)),
    ("brown", Rgba::rgb(165, 42, 42)),
    ("pink", Rgba::rgb(255, 192, 203)),
    ("navy", Rgba::rgb(0, 0, 128)),
    ("teal", Rgba::rgb(0, 128, 128)),
    ("transparent", Rgba::TRANSPARENT),
];

fn hex_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

/// `r,g,b[,a]` with 0-255 channels and a fractional alpha.
fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part.parse::<u8>().ok()?;
    }
    let alpha = match parts.get(3) {
        Some(a) => a.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a))?,
        None => 1.0,
    };
    Some(Rgba::new(rgb[0], rgb[1], rgb[2], channel(alpha)))
}

impl FromStr for Rgba {
    type Err = Error;

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)`, `rgba(r,g,b,a)`,
    /// a CSS color name, or a gray-level string such as `"0.35"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            return match hex.len() {
                3 => {
                    let mut rgb = [0u8; 3];
                    for (slot, c) in rgb.iter_mut().zip(hex.chars()) {
                        let v = c.to_digit(16).ok_or_else(invalid)? as u8;
                        *slot = v * 17;
                    }
                    Ok(Rgba::rgb(rgb[0], rgb[1], rgb[2]))
                }
                6 | 8 => {
                    let r = hex_pair(&hex[0..2]).ok_or_else(invalid)?;
                    let g = hex_pair(&hex[2..4]).ok_or_else(invalid)?;
                    let b = hex_pair(&hex[4..6]).ok_or_else(invalid)?;
                    let a = if hex.len() == 8 {
                        hex_pair(&hex[6..8]).ok_or_else(invalid)?
                    } else {
                        255
                    };
                    Ok(Rgba::new(r, g, b, a))
                }
                _ => Err(invalid()),
            };
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args).ok_or_else(invalid);
        }
        if let Some((_, color)) = NAMED.iter().find(|(name, _)| *name == lower) {
            return Ok(*color);
        }

        // Gray levels are given as a float in [0, 1].
        match s.parse::<f64>() {
            Ok(level) if (0.0..=1.0).contains(&level) => {
                Ok(Rgba::from_fractions(level, level, level, 1.0))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}", self.to_css_rgba())
        }
    }
}
