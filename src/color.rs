use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// A color as written in the configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Ansi256(u8),
    Hex { r: u8, g: u8, b: u8 },
}

/// How many colors the output terminal can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorDepth {
    #[default]
    TrueColor,
    Color256,
    Color16,
}

#[derive(Debug, Error)]
#[error("invalid color value for field \"{field}\": \"{value}\"")]
pub struct ColorParseError {
    pub field: String,
    pub value: String,
}

impl Color {
    /// Parse a color string, naming `field` in the error.
    ///
    /// Accepts `"0"` through `"255"` (leading zeros allowed) as an ANSI-256
    /// index, and `"#RRGGBB"` or `"#RGB"` as a hex color.
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the string is not a valid color.
    pub fn parse(s: &str, field: &str) -> Result<Self, ColorParseError> {
        let make_err = || ColorParseError {
            field: field.to_owned(),
            value: s.to_owned(),
        };

        let Some(hex) = s.strip_prefix('#') else {
            let n: u16 = s.trim().parse().map_err(|_| make_err())?;
            return u8::try_from(n).map(Color::Ansi256).map_err(|_| make_err());
        };

        if !hex.is_ascii() {
            return Err(make_err());
        }
        let digit = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| make_err())
        };
        match hex.len() {
            6 => Ok(Color::Hex {
                r: digit(0..2)?,
                g: digit(2..4)?,
                b: digit(4..6)?,
            }),
            3 => Ok(Color::Hex {
                r: digit(0..1)? * 17,
                g: digit(1..2)? * 17,
                b: digit(2..3)? * 17,
            }),
            _ => Err(make_err()),
        }
    }

    /// Convert to a `crossterm` color at the given depth.
    ///
    /// ANSI indices 0–15 become crossterm's named variants so the terminal
    /// draws them from its own 16-color palette (SGR 30–37 / 90–97).
    pub fn to_crossterm_color(self, depth: ColorDepth) -> crossterm::style::Color {
        match (depth, self) {
            (ColorDepth::TrueColor, Color::Hex { r, g, b }) => {
                crossterm::style::Color::Rgb { r, g, b }
            }
            (ColorDepth::Color256, Color::Hex { r, g, b }) => {
                crossterm::style::Color::AnsiValue(approximate_ansi256(r, g, b))
            }
            (ColorDepth::TrueColor | ColorDepth::Color256, Color::Ansi256(n)) => {
                ansi_to_crossterm(n)
            }
            (ColorDepth::Color16, Color::Ansi256(n)) if n < 16 => ansi_to_crossterm(n),
            (ColorDepth::Color16, _) => {
                let (r, g, b) = self.to_rgb();
                ansi_to_crossterm(approximate_ansi16(r, g, b))
            }
        }
    }

    fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Hex { r, g, b } => (r, g, b),
            Color::Ansi256(n) => ansi256_to_rgb(n),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Ansi256(n) => write!(f, "{n}"),
            Color::Hex { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s, "<unknown>")
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s, "<theme>").map_err(serde::de::Error::custom)
    }
}

impl ColorDepth {
    /// Detect the color depth from `COLORTERM` and `TERM`.
    pub fn detect() -> Self {
        if let Ok(ct) = std::env::var("COLORTERM")
            && (ct == "truecolor" || ct == "24bit")
        {
            return ColorDepth::TrueColor;
        }
        if let Ok(term) = std::env::var("TERM")
            && term.contains("256color")
        {
            return ColorDepth::Color256;
        }
        ColorDepth::Color16
    }
}

fn ansi_to_crossterm(n: u8) -> crossterm::style::Color {
    use crossterm::style::Color;
    match n {
        0 => Color::Black,
        1 => Color::DarkRed,
        2 => Color::DarkGreen,
        3 => Color::DarkYellow,
        4 => Color::DarkBlue,
        5 => Color::DarkMagenta,
        6 => Color::DarkCyan,
        7 => Color::Grey,
        8 => Color::DarkGrey,
        9 => Color::Red,
        10 => Color::Green,
        11 => Color::Yellow,
        12 => Color::Blue,
        13 => Color::Magenta,
        14 => Color::Cyan,
        15 => Color::White,
        _ => Color::AnsiValue(n),
    }
}

fn ansi256_to_rgb(n: u8) -> (u8, u8, u8) {
    const BASE16: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (128, 0, 0),
        (0, 128, 0),
        (128, 128, 0),
        (0, 0, 128),
        (128, 0, 128),
        (0, 128, 128),
        (192, 192, 192),
        (128, 128, 128),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (0, 0, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    match n {
        0..=15 => BASE16[usize::from(n)],
        // 6x6x6 cube.
        16..=231 => {
            let idx = n - 16;
            let level = |i: u8| if i == 0 { 0 } else { 55 + 40 * i };
            (level(idx / 36), level((idx / 6) % 6), level(idx % 6))
        }
        // Grayscale ramp.
        232..=255 => {
            let v = 8 + 10 * (n - 232);
            (v, v, v)
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn approximate_ansi256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((u16::from(r) - 8) / 10).min(23) as u8;
    }

    let to_idx = |v: u8| -> u8 {
        if v < 48 {
            0
        } else if v < 115 {
            1
        } else {
            ((u16::from(v) - 35) / 40).min(5) as u8
        }
    };
    16 + 36 * to_idx(r) + 6 * to_idx(g) + to_idx(b)
}

fn approximate_ansi16(r: u8, g: u8, b: u8) -> u8 {
    let brightness = (u16::from(r) + u16::from(g) + u16::from(b)) / 3;
    let base = u8::from(r > 128) | (u8::from(g > 128) << 1) | (u8::from(b > 128) << 2);
    if brightness > 128 { base + 8 } else { base }
}
