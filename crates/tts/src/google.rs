//! HTTP client for the Google Translate speech endpoint.
//!
//! Wraps `GET /translate_tts` (the endpoint gTTS talks to) using
//! [`reqwest`]. Each chunk of the script is fetched in order and the MP3
//! responses are concatenated into a single track.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use promo_core::choices::Language;

use crate::chunk::{split_for_tts, MAX_CHUNK_CHARS};
use crate::{AudioFormat, SpeechSynthesizer, SynthesizedSpeech, TtsError};

/// Default public endpoint host.
pub const DEFAULT_BASE_URL: &str = "https://translate.google.com";

/// Client for one Google Translate TTS base URL.
#[derive(Debug, Clone)]
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateTts {
    /// Create a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TtsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("city-path-promo/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        lang: &str,
        idx: usize,
        total: usize,
    ) -> Result<Bytes, TtsError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(format!("{}/translate_tts", self.base_url))
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("q", chunk),
                ("ttsspeed", "1"),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TtsError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }
        Ok(audio)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    fn name(&self) -> &'static str {
        "google-translate"
    }

    async fn synthesize(&self, text: &str, language: Language) -> Result<SynthesizedSpeech, TtsError> {
        let chunks = split_for_tts(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(TtsError::EmptyText);
        }

        let lang = language.code();
        tracing::debug!(lang, chunks = chunks.len(), "Requesting speech synthesis");

        let mut audio = BytesMut::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let part = self.fetch_chunk(chunk, lang, idx, chunks.len()).await?;
            audio.extend_from_slice(&part);
        }

        tracing::debug!(lang, bytes = audio.len(), "Speech synthesized");
        Ok(SynthesizedSpeech {
            audio: audio.freeze(),
            format: AudioFormat::Mp3,
        })
    }
}
