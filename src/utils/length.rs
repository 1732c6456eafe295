use std::fmt;

use thiserror::Error;

/// A CSS length in absolute pixels or root-relative rems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f32),
    Rems(f32),
}

/// Failure to parse a CSS length string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected a number or a number ending with 'rem' or 'px', got \"{0}\"")]
pub struct ParseLengthError(pub String);

impl std::str::FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if let Some(rems) = value.strip_suffix("rem")
            && let Ok(rems) = rems.trim_end().parse::<f32>()
        {
            return Ok(Length::Rems(rems));
        }

        if let Some(pixels) = value.strip_suffix("px")
            && let Ok(pixels) = pixels.trim_end().parse::<f32>()
        {
            return Ok(Length::Px(pixels));
        }

        // A bare number reads as pixels.
        if let Ok(pixels) = value.parse::<f32>() {
            return Ok(Length::Px(pixels));
        }

        Err(ParseLengthError(value.to_owned()))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(pixels) => write!(f, "{pixels}px"),
            Length::Rems(rems) => write!(f, "{rems}rem"),
        }
    }
}
