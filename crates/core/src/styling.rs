//! Caption styling options from the "advanced settings" part of the form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::choices::AnimationStyle;
use crate::error::CoreError;
use crate::video::{BRAND_BLUE, BRAND_WHITE};

/// Smallest accepted caption font size.
pub const MIN_FONT_SIZE: u32 = 20;

/// Largest accepted caption font size.
pub const MAX_FONT_SIZE: u32 = 60;

/// Caption font size used when the form omits one.
pub const DEFAULT_FONT_SIZE: u32 = 40;

static HEX_COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid regex"));

/// Styling applied to the caption banner.
///
/// `animation` is accepted and reported back but has no visual effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StylingOptions {
    /// Caption text color, `#RRGGBB`.
    #[validate(custom(function = "validate_hex_color"))]
    pub text_color: String,
    /// Caption banner background color, `#RRGGBB`.
    #[validate(custom(function = "validate_hex_color"))]
    pub bg_color: String,
    #[validate(range(min = 20, max = 60))]
    pub font_size: u32,
    pub animation: AnimationStyle,
}

impl Default for StylingOptions {
    fn default() -> Self {
        Self {
            text_color: BRAND_WHITE.to_string(),
            bg_color: BRAND_BLUE.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            animation: AnimationStyle::default(),
        }
    }
}

impl StylingOptions {
    /// Run the derived validation and fold the result into a [`CoreError`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(format!("Invalid styling: {e}")))
    }
}

fn validate_hex_color(value: &str) -> Result<(), ValidationError> {
    if HEX_COLOR_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("hex_color"))
    }
}

/// Convert `#RRGGBB` into the `0xRRGGBB` form ffmpeg filters accept.
pub fn ffmpeg_color(hex: &str) -> String {
    format!("0x{}", hex.trim_start_matches('#').to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(StylingOptions::default().check().is_ok());
    }

    #[test]
    fn defaults_use_brand_colors() {
        let styling = StylingOptions::default();
        assert_eq!(styling.text_color, "#FFFFFF");
        assert_eq!(styling.bg_color, "#0056b3");
        assert_eq!(styling.font_size, 40);
    }

    #[test]
    fn font_size_bounds_are_inclusive() {
        for size in [MIN_FONT_SIZE, MAX_FONT_SIZE] {
            let styling = StylingOptions {
                font_size: size,
                ..Default::default()
            };
            assert!(styling.check().is_ok(), "size {size} should be accepted");
        }
    }

    #[test]
    fn font_size_out_of_range_rejected() {
        let styling = StylingOptions {
            font_size: 61,
            ..Default::default()
        };
        assert_matches!(styling.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn malformed_color_rejected() {
        let styling = StylingOptions {
            text_color: "white".into(),
            ..Default::default()
        };
        assert_matches!(styling.check(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn short_hex_color_rejected() {
        let styling = StylingOptions {
            bg_color: "#fff".into(),
            ..Default::default()
        };
        assert!(styling.check().is_err());
    }

    #[test]
    fn ffmpeg_color_strips_hash() {
        assert_eq!(ffmpeg_color("#0056b3"), "0x0056B3");
    }
}
