//! Layout of a promo video: which layers exist, where they sit, and how long
//! each one lasts.
//!
//! A [`CompositionPlan`] is pure data. The media toolkit turns it into an
//! ffmpeg invocation (see [`crate::ffmpeg::encode_args`]).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::styling::StylingOptions;
use crate::video::{
    caption_duration, AUDIO_CODEC, BRAND_BLUE, BRAND_WHITE, CAPTION_BOTTOM_OFFSET,
    CAPTION_HEIGHT, CAPTION_HORIZONTAL_MARGIN, FPS, FRAME_HEIGHT, FRAME_WIDTH, HEADER_FONT_SIZE,
    HEADER_HORIZONTAL_MARGIN, HEADER_TEXT, HEADER_TOP, PIXEL_FORMAT, VIDEO_CODEC,
    VIDEO_DURATION_SECS,
};

/* --------------------------------------------------------------------------
Scratch file names
-------------------------------------------------------------------------- */

pub const MASCOT_FILE: &str = "mascot.png";
pub const SPEECH_STEM: &str = "speech";
pub const HEADER_TEXT_FILE: &str = "header.txt";
pub const CAPTION_TEXT_FILE: &str = "caption.txt";
pub const OUTPUT_FILE: &str = "promo_video.mp4";

/// Scratch file name for speech audio with the given container extension.
pub fn speech_file_name(extension: &str) -> String {
    format!("{SPEECH_STEM}.{extension}")
}

/// Average glyph width as a fraction of the font size, used to estimate how
/// many characters fit on one caption line.
const AVG_GLYPH_WIDTH_RATIO: f64 = 0.55;

/// Horizontal padding inside a text banner.
const BANNER_PADDING: u32 = 20;

/// Extra space between wrapped caption lines.
pub const LINE_SPACING: u32 = 8;

/// Font used by a text layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FontSource {
    /// Explicit font file handed to drawtext via `fontfile`.
    File(PathBuf),
    /// Fontconfig pattern handed to drawtext via `font`.
    Family(String),
}

/// Fonts for the two text layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSet {
    pub header: FontSource,
    pub caption: FontSource,
}

impl Default for FontSet {
    fn default() -> Self {
        Self {
            header: FontSource::Family("Arial:style=Bold".into()),
            caption: FontSource::Family("Arial".into()),
        }
    }
}

/// Solid background filling the whole frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_secs: f64,
    pub color: String,
}

/// The mascot bitmap, already resized, placed at `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageLayer {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
}

/// A filled rectangle with centered text on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBanner {
    /// Text after line wrapping.
    pub text: String,
    /// Where the text is written for drawtext's `textfile` option.
    pub text_file: PathBuf,
    pub font: FontSource,
    pub font_size: u32,
    pub text_color: String,
    pub background_color: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// End of the visibility window in seconds; `None` means the whole video.
    pub visible_until: Option<f64>,
}

/// Speech track trimmed to `duration_secs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioTrack {
    pub path: PathBuf,
    pub duration_secs: f64,
}

/// Complete description of one promo render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionPlan {
    pub canvas: Canvas,
    pub mascot: ImageLayer,
    pub header: TextBanner,
    pub caption: TextBanner,
    pub audio: AudioTrack,
    pub output: PathBuf,
    pub video_codec: &'static str,
    pub audio_codec: &'static str,
    pub pixel_format: &'static str,
}

/// Inputs the plan is derived from.
#[derive(Debug, Clone)]
pub struct PlanInputs<'a> {
    pub scratch_dir: &'a Path,
    /// Size of the already resized mascot layer.
    pub mascot_size: (u32, u32),
    pub speech_duration_secs: f64,
    /// Container extension of the synthesized speech, e.g. `mp3`.
    pub speech_extension: &'a str,
    pub script: &'a str,
    pub styling: &'a StylingOptions,
    pub fonts: &'a FontSet,
}

impl CompositionPlan {
    /// Lay out a promo: white canvas, centered mascot, header banner near the
    /// top, caption banner near the bottom lasting as long as the (truncated)
    /// speech.
    pub fn build(inputs: PlanInputs<'_>) -> Self {
        let dir = inputs.scratch_dir;
        let shown_for = caption_duration(inputs.speech_duration_secs);
        let (mascot_w, mascot_h) = inputs.mascot_size;

        let header_width = FRAME_WIDTH - HEADER_HORIZONTAL_MARGIN;
        let header = TextBanner {
            text: HEADER_TEXT.to_string(),
            text_file: dir.join(HEADER_TEXT_FILE),
            font: inputs.fonts.header.clone(),
            font_size: HEADER_FONT_SIZE,
            text_color: BRAND_WHITE.to_string(),
            background_color: BRAND_BLUE.to_string(),
            x: HEADER_HORIZONTAL_MARGIN / 2,
            y: HEADER_TOP,
            width: header_width,
            height: HEADER_FONT_SIZE * 2,
            visible_until: None,
        };

        let caption_width = FRAME_WIDTH - CAPTION_HORIZONTAL_MARGIN;
        let font_size = inputs.styling.font_size;
        let caption = TextBanner {
            text: wrap_text(inputs.script.trim(), chars_per_line(caption_width, font_size)),
            text_file: dir.join(CAPTION_TEXT_FILE),
            font: inputs.fonts.caption.clone(),
            font_size,
            text_color: inputs.styling.text_color.clone(),
            background_color: inputs.styling.bg_color.clone(),
            x: CAPTION_HORIZONTAL_MARGIN / 2,
            y: FRAME_HEIGHT - CAPTION_BOTTOM_OFFSET,
            width: caption_width,
            height: CAPTION_HEIGHT,
            visible_until: Some(shown_for),
        };

        Self {
            canvas: Canvas {
                width: FRAME_WIDTH,
                height: FRAME_HEIGHT,
                fps: FPS,
                duration_secs: VIDEO_DURATION_SECS,
                color: BRAND_WHITE.to_string(),
            },
            mascot: ImageLayer {
                path: dir.join(MASCOT_FILE),
                width: mascot_w,
                height: mascot_h,
                x: centered(FRAME_WIDTH, mascot_w),
                y: centered(FRAME_HEIGHT, mascot_h),
            },
            header,
            caption,
            audio: AudioTrack {
                path: dir.join(speech_file_name(inputs.speech_extension)),
                duration_secs: shown_for,
            },
            output: dir.join(OUTPUT_FILE),
            video_codec: VIDEO_CODEC,
            audio_codec: AUDIO_CODEC,
            pixel_format: PIXEL_FORMAT,
        }
    }
}

/// Offset that centers a `size`-wide item in a `frame`-wide span. Negative
/// when the item is larger than the frame.
fn centered(frame: u32, size: u32) -> i64 {
    (i64::from(frame) - i64::from(size)) / 2
}

/// Estimated characters per line for a banner of `width` pixels.
pub fn chars_per_line(width: u32, font_size: u32) -> usize {
    let usable = f64::from(width.saturating_sub(2 * BANNER_PADDING));
    let glyph = f64::from(font_size.max(1)) * AVG_GLYPH_WIDTH_RATIO;
    ((usable / glyph).floor() as usize).max(1)
}

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Whitespace runs (including newlines) collapse to single spaces. Words
/// longer than a line are split.
pub fn wrap_text(text: &str, max_chars: usize) -> String {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();

        while chars.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = chars.split_off(max_chars);
            lines.push(chars.into_iter().collect());
            chars = rest;
        }

        let word_len = chars.len();
        if word_len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + word_len > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines.join("\n")
}
