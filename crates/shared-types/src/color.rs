//! sRGB colors as used by the globe plugins

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GaiaError;

/// 8-bit sRGB triple. Serializes to and from CSS strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("red", Rgb::new(255, 0, 0)),
    ("orange", Rgb::new(255, 165, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("green", Rgb::new(0, 128, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("steelblue", Rgb::new(70, 130, 180)),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolate channel-wise in RGB space.
    ///
    /// `t` is not clamped, so values outside `[0, 1]` extrapolate; each
    /// channel is rounded and then clamped to `[0, 255]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| {
            let a = a as f64;
            let v = (a + (b as f64 - a) * t).round();
            v.clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = GaiaError;

    /// Accepts `#rgb`, `#rrggbb` and a handful of CSS color names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GaiaError::InvalidConfig {
            message: format!("Unrecognized color: {s:?}"),
            field: None,
        };

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let parse = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let mut channels = [0u8; 3];
                    for (i, c) in hex.chars().enumerate() {
                        channels[i] = parse(&format!("{c}{c}"))?;
                    }
                    Ok(Rgb::new(channels[0], channels[1], channels[2]))
                }
                6 => Ok(Rgb::new(
                    parse(&hex[0..2])?,
                    parse(&hex[2..4])?,
                    parse(&hex[4..6])?,
                )),
                _ => Err(invalid()),
            };
        }

        let lower = s.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Rgb {
    type Error = GaiaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}
