//! Opaque RGB colors parsed from hex strings.

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// An RGB color with implicit full opacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Color as an RGBA pixel with alpha 255.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Parse `"#RRGGBB"` or `"RRGGBB"`, hex digits in either case.
    ///
    /// Anything else (short forms, alpha, whitespace, non-hex) is rejected
    /// with [`FilterError::InvalidColor`].
    pub fn from_hex(s: &str) -> Result<Self, FilterError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FilterError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| FilterError::InvalidColor(s.to_string()))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!("#FF0000".parse::<Color>().unwrap(), Color::rgb(255, 0, 0));
        assert_eq!("00ff7f".parse::<Color>().unwrap(), Color::rgb(0, 255, 127));
        assert_eq!("#000000".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!(Color::from_hex("#1a2B3c").unwrap(), Color::rgb(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#FFF", "#FF00000", "FF00", "#GG0000", " #FF0000", "#FF0000 ", "##FF0000", "#+F0000", "#ÿÿÿ"] {
            let err = bad.parse::<Color>().unwrap_err();
            assert_eq!(err, FilterError::InvalidColor(bad.to_string()), "{bad:?}");
        }
    }

    #[test]
    fn test_display_roundtrip() {
        let c = Color::rgb(18, 52, 171);
        assert_eq!(c.to_string(), "#1234AB");
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
        assert_eq!(c.to_rgba(), [18, 52, 171, 255]);
    }
}
