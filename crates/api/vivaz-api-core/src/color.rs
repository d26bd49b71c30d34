//! RGBA colors with 0..255 channels.
//!
//! A color always carries a [`ColorMode`] marker. Text formats that have no
//! type tags (the schema export, shorthand JSON) recognise colors by the
//! presence of that `mode` field.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CHANNEL_MAX: f64 = 255.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Rgb,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Rgb => "rgb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rgb" => Some(ColorMode::Rgb),
            _ => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("invalid hex color '{0}'")]
    Hex(String),
    #[error("invalid css color '{0}'")]
    Css(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub mode: ColorMode,
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Opaque color from red/green/blue channels.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, CHANNEL_MAX)
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            mode: ColorMode::Rgb,
            r,
            g,
            b,
            a,
        }
    }

    #[inline]
    pub fn red(&self) -> f64 {
        self.r
    }

    #[inline]
    pub fn green(&self) -> f64 {
        self.g
    }

    #[inline]
    pub fn blue(&self) -> f64 {
        self.b
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.a
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.a = alpha;
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.set_alpha(alpha);
        self
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError::Hex(s.to_string());
        let digits = s.strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(f64::from)
                .map_err(|_| err())
        };
        match digits.len() {
            3 => {
                let mut out = [0.0f64; 3];
                for (i, slot) in out.iter_mut().enumerate() {
                    // "#abc" expands each nibble: a -> aa
                    *slot = channel(i..i + 1)? * 17.0;
                }
                Ok(Color::rgb(out[0], out[1], out[2]))
            }
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(err()),
        }
    }

    /// Parse a CSS-style color: hex, `rgb(r,g,b)` or `rgba(r,g,b,a)` where `a`
    /// is in [0,1].
    pub fn from_css(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        let err = || ColorParseError::Css(s.to_string());
        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(err());
        };
        let body = body.strip_suffix(')').ok_or_else(err)?;
        let parts = body
            .split(',')
            .map(|p| p.trim().parse::<f64>().map_err(|_| err()))
            .collect::<Result<Vec<_>, _>>()?;
        match (parts.as_slice(), has_alpha) {
            ([r, g, b], false) => Ok(Color::rgb(*r, *g, *b)),
            ([r, g, b, a], true) => Ok(Color::rgba(*r, *g, *b, a * CHANNEL_MAX)),
            _ => Err(err()),
        }
    }
}
