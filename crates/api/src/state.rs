use std::sync::Arc;
use std::time::Duration;

use promo_pipeline::{FfmpegToolkit, PromoGenerator};
use promo_tts::{DisabledSynthesizer, GoogleTranslateTts, SpeechSynthesizer, TtsError};

use crate::config::{ServerConfig, TtsProvider};
use crate::session::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Live operator sessions and their artifacts.
    pub sessions: Arc<SessionStore>,
    /// Promo video pipeline.
    pub generator: Arc<PromoGenerator>,
}

impl AppState {
    pub fn new(config: ServerConfig, generator: PromoGenerator) -> Self {
        let sessions = SessionStore::new(Duration::from_secs(config.session.ttl_secs));
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            generator: Arc::new(generator),
        }
    }
}

/// Wire the production generator from configuration: the configured speech
/// synthesizer plus ffmpeg child processes.
pub fn build_generator(config: &ServerConfig) -> Result<PromoGenerator, TtsError> {
    let synthesizer: Arc<dyn SpeechSynthesizer> = match config.tts.provider {
        TtsProvider::Google => Arc::new(GoogleTranslateTts::new(
            config.tts.base_url.clone(),
            Duration::from_secs(config.tts.timeout_secs),
        )?),
        TtsProvider::Disabled => Arc::new(DisabledSynthesizer),
    };
    let toolkit = Arc::new(FfmpegToolkit::new(config.media.ffmpeg_settings()));
    Ok(PromoGenerator::new(
        synthesizer,
        toolkit,
        config.media.font_set(),
    ))
}
