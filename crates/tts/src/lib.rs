//! Text-to-speech collaborators for promo generation.
//!
//! [`SpeechSynthesizer`] is the seam the generator depends on. Two
//! implementations ship here: [`GoogleTranslateTts`], an HTTP client for the
//! Google Translate speech endpoint, and [`DisabledSynthesizer`], which
//! refuses every request so deployments without TTS fail cleanly.

pub mod chunk;
pub mod disabled;
pub mod google;

use async_trait::async_trait;
use bytes::Bytes;
use promo_core::choices::Language;

pub use disabled::DisabledSynthesizer;
pub use google::GoogleTranslateTts;

/// Container of the audio a synthesizer returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
}

impl AudioFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }
}

/// Synthesized speech for one script.
#[derive(Debug, Clone)]
pub struct SynthesizedSpeech {
    pub audio: Bytes,
    pub format: AudioFormat,
}

/// Errors from the speech synthesis layer.
#[derive(Debug, thiserror::Error)]
pub enum TtsError {
    /// Synthesis is switched off or has no backend.
    #[error("speech synthesis is not available: {0}")]
    Unavailable(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The TTS service returned a non-2xx status code.
    #[error("TTS API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// Nothing but whitespace was submitted.
    #[error("nothing to synthesize")]
    EmptyText,

    /// The service answered with an empty body.
    #[error("TTS service returned no audio")]
    EmptyAudio,
}

impl TtsError {
    /// Whether this failure means the capability itself is missing or
    /// unreachable, as opposed to a bad response for this request.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::Unavailable(_) => true,
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

/// A text-to-speech capability.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Synthesize `text` spoken in `language`.
    async fn synthesize(&self, text: &str, language: Language) -> Result<SynthesizedSpeech, TtsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_classified() {
        assert!(TtsError::Unavailable("disabled".into()).is_unavailable());
    }

    #[test]
    fn api_error_is_not_unavailable() {
        let err = TtsError::ApiError {
            status: 400,
            body: "bad".into(),
        };
        assert!(!err.is_unavailable());
        assert!(!TtsError::EmptyAudio.is_unavailable());
    }

    #[test]
    fn mp3_extension() {
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
    }
}
