//! Handler for the form choices.

use axum::Json;
use promo_core::choices::{AnimationStyle, AudioMood, Choice, Language, TestType};
use promo_core::request::{DEFAULT_SCRIPT, SCRIPT_SOFT_LIMIT};
use promo_core::styling::{StylingOptions, MAX_FONT_SIZE, MIN_FONT_SIZE};
use promo_core::video::{FPS, FRAME_HEIGHT, FRAME_WIDTH, HEADER_TEXT, VIDEO_DURATION_SECS};
use serde::Serialize;

use crate::response::DataResponse;

/// Every choice the form offers, with defaults.
#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub test_types: Vec<&'static str>,
    pub languages: Vec<&'static str>,
    pub audio_moods: Vec<&'static str>,
    pub animations: Vec<&'static str>,
    pub font_size: FontSizeRange,
    pub script_soft_limit: usize,
    pub defaults: FormDefaults,
    pub video: VideoFormat,
}

#[derive(Debug, Serialize)]
pub struct FontSizeRange {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Serialize)]
pub struct FormDefaults {
    pub test_type: &'static str,
    pub language: &'static str,
    pub audio_mood: &'static str,
    pub script: &'static str,
    pub styling: StylingOptions,
}

#[derive(Debug, Serialize)]
pub struct VideoFormat {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_secs: f64,
    pub header: &'static str,
}

/// GET /api/v1/options
pub async fn get_options() -> Json<DataResponse<FormOptions>> {
    Json(DataResponse {
        data: FormOptions {
            test_types: TestType::labels(),
            languages: Language::labels(),
            audio_moods: AudioMood::labels(),
            animations: AnimationStyle::labels(),
            font_size: FontSizeRange {
                min: MIN_FONT_SIZE,
                max: MAX_FONT_SIZE,
            },
            script_soft_limit: SCRIPT_SOFT_LIMIT,
            defaults: FormDefaults {
                test_type: TestType::ALL[0].label(),
                language: Language::default().label(),
                audio_mood: AudioMood::default().label(),
                script: DEFAULT_SCRIPT,
                styling: StylingOptions::default(),
            },
            video: VideoFormat {
                width: FRAME_WIDTH,
                height: FRAME_HEIGHT,
                fps: FPS,
                duration_secs: VIDEO_DURATION_SECS,
                header: HEADER_TEXT,
            },
        },
    })
}
