//! Fixed output format and brand constants for promo videos.
//!
//! Every generated video is a 9:16 vertical clip sized for Instagram and
//! WhatsApp reels. None of these values depend on the uploaded mascot.

/* --------------------------------------------------------------------------
Output format
-------------------------------------------------------------------------- */

/// Output duration in seconds.
pub const VIDEO_DURATION_SECS: f64 = 15.0;

/// Output frame rate.
pub const FPS: u32 = 24;

/// Output frame width in pixels.
pub const FRAME_WIDTH: u32 = 1080;

/// Output frame height in pixels.
pub const FRAME_HEIGHT: u32 = 1920;

/// Video codec passed to ffmpeg.
pub const VIDEO_CODEC: &str = "libx264";

/// Audio codec passed to ffmpeg.
pub const AUDIO_CODEC: &str = "aac";

/// Pixel format; yuv420p keeps H.264 output playable on phones.
pub const PIXEL_FORMAT: &str = "yuv420p";

/// Allowed drift between the probed output duration and [`VIDEO_DURATION_SECS`].
pub const DURATION_TOLERANCE_SECS: f64 = 0.5;

/* --------------------------------------------------------------------------
Layout
-------------------------------------------------------------------------- */

/// Fraction of the frame width taken by the mascot layer.
pub const MASCOT_WIDTH_RATIO: f64 = 0.6;

/// Header banner text.
pub const HEADER_TEXT: &str = "City Pathology Laboratory";

/// Header banner font size.
pub const HEADER_FONT_SIZE: u32 = 45;

/// Distance from the top of the frame to the header banner.
pub const HEADER_TOP: u32 = 50;

/// Total horizontal margin around the header banner.
pub const HEADER_HORIZONTAL_MARGIN: u32 = 40;

/// Total horizontal margin around the caption banner.
pub const CAPTION_HORIZONTAL_MARGIN: u32 = 60;

/// Caption banner height.
pub const CAPTION_HEIGHT: u32 = 200;

/// Distance from the bottom of the frame to the top of the caption banner.
pub const CAPTION_BOTTOM_OFFSET: u32 = 300;

/* --------------------------------------------------------------------------
Brand colors
-------------------------------------------------------------------------- */

/// Brand blue (`#0056b3`).
pub const BRAND_BLUE: &str = "#0056b3";

/// Brand white, also the canvas background.
pub const BRAND_WHITE: &str = "#FFFFFF";

/// Width in pixels of the mascot layer for the fixed frame width.
pub fn mascot_target_width() -> u32 {
    (f64::from(FRAME_WIDTH) * MASCOT_WIDTH_RATIO).round() as u32
}

/// How long the caption and the speech track last for a given speech length.
///
/// The video itself always runs [`VIDEO_DURATION_SECS`]; longer speech is
/// truncated, shorter speech simply ends early.
pub fn caption_duration(audio_duration_secs: f64) -> f64 {
    if audio_duration_secs.is_nan() || audio_duration_secs <= 0.0 {
        return 0.0;
    }
    audio_duration_secs.min(VIDEO_DURATION_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mascot_width_is_sixty_percent_of_frame() {
        assert_eq!(mascot_target_width(), 648);
    }

    #[test]
    fn caption_duration_truncates_long_audio() {
        assert!((caption_duration(22.7) - VIDEO_DURATION_SECS).abs() < f64::EPSILON);
    }

    #[test]
    fn caption_duration_keeps_short_audio() {
        assert!((caption_duration(3.25) - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    fn caption_duration_handles_degenerate_values() {
        assert_eq!(caption_duration(0.0), 0.0);
        assert_eq!(caption_duration(-1.0), 0.0);
        assert_eq!(caption_duration(f64::NAN), 0.0);
    }
}
