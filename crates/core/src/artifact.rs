//! The generated promo video and its verified metadata.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::choices::{AnimationStyle, AudioMood, Language, TestType};
use crate::error::CoreError;
use crate::video::{DURATION_TOLERANCE_SECS, FPS, FRAME_HEIGHT, FRAME_WIDTH, VIDEO_DURATION_SECS};

/// Stream properties read back from an encoded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub duration_secs: f64,
    pub video_codec: String,
    pub audio_codec: Option<String>,
}

impl OutputMetadata {
    /// Confirm the file matches the fixed promo format: 1080x1920, 24 fps,
    /// 15 seconds (within [`DURATION_TOLERANCE_SECS`]).
    pub fn check_promo_format(&self) -> Result<(), CoreError> {
        if (self.width, self.height) != (FRAME_WIDTH, FRAME_HEIGHT) {
            return Err(CoreError::Validation(format!(
                "Output resolution is {}x{}, expected {FRAME_WIDTH}x{FRAME_HEIGHT}",
                self.width, self.height
            )));
        }
        if (self.fps - f64::from(FPS)).abs() > 0.01 {
            return Err(CoreError::Validation(format!(
                "Output frame rate is {:.3}, expected {FPS}",
                self.fps
            )));
        }
        if (self.duration_secs - VIDEO_DURATION_SECS).abs() > DURATION_TOLERANCE_SECS {
            return Err(CoreError::Validation(format!(
                "Output duration is {:.2}s, expected {VIDEO_DURATION_SECS}s",
                self.duration_secs
            )));
        }
        Ok(())
    }
}

/// A finished promo video, held in memory until superseded or its session
/// ends.
#[derive(Debug, Clone)]
pub struct PromoArtifact {
    /// Encoded MP4 bytes. Cheap to clone for each download.
    pub bytes: Bytes,
    pub file_name: String,
    pub test_type: TestType,
    pub language: Language,
    pub audio_mood: AudioMood,
    pub animation: AnimationStyle,
    /// Length of the synthesized speech before truncation.
    pub speech_duration_secs: f64,
    pub metadata: OutputMetadata,
    pub created_at: DateTime<Utc>,
}

/// Serializable summary of a [`PromoArtifact`] (everything except the bytes).
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactDetails {
    pub file_name: String,
    pub size_bytes: usize,
    pub test_type: TestType,
    pub language: Language,
    pub audio_mood: AudioMood,
    pub animation: AnimationStyle,
    pub speech_duration_secs: f64,
    pub metadata: OutputMetadata,
    pub created_at: DateTime<Utc>,
}

impl PromoArtifact {
    pub fn details(&self) -> ArtifactDetails {
        ArtifactDetails {
            file_name: self.file_name.clone(),
            size_bytes: self.bytes.len(),
            test_type: self.test_type,
            language: self.language,
            audio_mood: self.audio_mood,
            animation: self.animation,
            speech_duration_secs: self.speech_duration_secs,
            metadata: self.metadata.clone(),
            created_at: self.created_at,
        }
    }
}
