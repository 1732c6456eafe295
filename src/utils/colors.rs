use std::fmt;

use thiserror::Error;

/// An RGBA color with components in the `0.0..=1.0` range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Creates an RGBA color from a hex value and alpha component.
pub fn rgb_a(hex: u32, a: f32) -> Rgba {
    let [_, r, g, b] = hex.to_be_bytes().map(|b| (b as f32) / 255.0);
    Rgba { r, g, b, a }
}

/// Failure to parse a hex color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("color string must start with '#'")]
    MissingHash,
    #[error("expected 3, 6, or 8 hex digits, got {0}")]
    InvalidLength(usize),
    #[error("color string contains a non-hex digit")]
    InvalidDigit,
}

impl Rgba {
    /// Parses `#rgb`, `#rrggbb`, and `#rrggbbaa` color strings.
    pub fn parse(value: &str) -> Result<Self, ParseColorError> {
        let hex = value
            .strip_prefix('#')
            .ok_or(ParseColorError::MissingHash)?;
        let digits = u32::from_str_radix(hex, 16).map_err(|_| ParseColorError::InvalidDigit)?;

        match hex.len() {
            3 => {
                // Each nibble doubles: #2af is #22aaff.
                let r = (digits >> 8) & 0xF;
                let g = (digits >> 4) & 0xF;
                let b = digits & 0xF;
                Ok(rgb_a((r * 0x11) << 16 | (g * 0x11) << 8 | b * 0x11, 1.0))
            }
            6 => Ok(rgb_a(digits, 1.0)),
            8 => {
                let [r, g, b, a] = digits.to_be_bytes().map(|b| (b as f32) / 255.0);
                Ok(Rgba { r, g, b, a })
            }
            len => Err(ParseColorError::InvalidLength(len)),
        }
    }

    /// Returns a new color with the specified alpha value.
    pub fn alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }
}

impl std::str::FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            byte(self.r),
            byte(self.g),
            byte(self.b)
        )?;
        if self.a < 1.0 {
            write!(f, "{:02x}", byte(self.a))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit_hex() {
        let color = Rgba::parse("#2563eb").unwrap();
        assert_eq!(color, rgb_a(0x2563eb, 1.0));
        assert_eq!(color.to_string(), "#2563eb");
    }

    #[test]
    fn test_parse_short_hex_expands_nibbles() {
        assert_eq!(Rgba::parse("#2af").unwrap(), Rgba::parse("#22aaff").unwrap());
    }

    #[test]
    fn test_parse_eight_digit_hex_carries_alpha() {
        let color = Rgba::parse("#ffffff80").unwrap();
        assert!((color.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_rejects_malformed_strings() {
        assert_eq!(Rgba::parse("2563eb"), Err(ParseColorError::MissingHash));
        assert_eq!(Rgba::parse("#2563e"), Err(ParseColorError::InvalidLength(5)));
        assert_eq!(Rgba::parse("#2563zz"), Err(ParseColorError::InvalidDigit));
    }

    #[test]
    fn test_alpha_replaces_component() {
        let color = rgb_a(0x1d4ed8, 1.0).alpha(0.5);
        assert_eq!(color.a, 0.5);
        assert_eq!(color.r, rgb_a(0x1d4ed8, 1.0).r);
    }
}
