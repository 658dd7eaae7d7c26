use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use promo_core::composition::{FontSet, FontSource};
use promo_pipeline::FfmpegSettings;
use promo_tts::google::DEFAULT_BASE_URL;

/// Which speech synthesis backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtsProvider {
    /// Google Translate speech endpoint.
    Google,
    /// No synthesis; every generation fails with "synthesis unavailable".
    Disabled,
}

impl FromStr for TtsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "disabled" | "none" | "off" => Ok(Self::Disabled),
            other => Err(format!("unknown TTS provider '{other}' (expected google or disabled)")),
        }
    }
}

/// Speech synthesis configuration.
#[derive(Debug, Clone)]
pub struct TtsConfig {
    pub provider: TtsProvider,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// ffmpeg and font configuration.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    pub ffmpeg_timeout_secs: u64,
    /// Caption font file; falls back to the fontconfig family `Arial`.
    pub font_file: Option<PathBuf>,
    /// Header font file; falls back to `font_file`, then `Arial:style=Bold`.
    pub header_font_file: Option<PathBuf>,
}

impl MediaConfig {
    pub fn ffmpeg_settings(&self) -> FfmpegSettings {
        FfmpegSettings {
            ffmpeg_path: self.ffmpeg_path.clone(),
            ffprobe_path: self.ffprobe_path.clone(),
            render_timeout: Duration::from_secs(self.ffmpeg_timeout_secs),
        }
    }

    pub fn font_set(&self) -> FontSet {
        let defaults = FontSet::default();
        let caption = self
            .font_file
            .clone()
            .map(FontSource::File)
            .unwrap_or(defaults.caption);
        let header = self
            .header_font_file
            .clone()
            .or_else(|| self.font_file.clone())
            .map(FontSource::File)
            .unwrap_or(defaults.header);
        FontSet { header, caption }
    }
}

/// Session lifetime configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Idle time after which a session and its video are dropped.
    pub ttl_secs: u64,
    /// How often idle sessions are swept.
    pub sweep_interval_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds. Generation runs inside the request,
    /// so this must exceed the ffmpeg timeout.
    pub request_timeout_secs: u64,
    /// Maximum request body size (mascot upload plus form fields).
    pub max_upload_bytes: usize,
    pub session: SessionConfig,
    pub tts: TtsConfig,
    pub media: MediaConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                        |
    /// |-------------------------------|--------------------------------|
    /// | `HOST`                        | `0.0.0.0`                      |
    /// | `PORT`                        | `3000`                         |
    /// | `CORS_ORIGINS`                | `http://localhost:3000`        |
    /// | `REQUEST_TIMEOUT_SECS`        | `180`                          |
    /// | `MAX_UPLOAD_BYTES`            | `10485760` (10 MiB)            |
    /// | `SESSION_TTL_SECS`            | `3600`                         |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `60` (must be non-zero)        |
    /// | `TTS_PROVIDER`                | `google`                       |
    /// | `TTS_BASE_URL`                | `https://translate.google.com` |
    /// | `TTS_TIMEOUT_SECS`            | `20`                           |
    /// | `FFMPEG_PATH`                 | `ffmpeg`                       |
    /// | `FFPROBE_PATH`                | `ffprobe`                      |
    /// | `FFMPEG_TIMEOUT_SECS`         | `120`                          |
    /// | `FONT_FILE`                   | unset                          |
    /// | `HEADER_FONT_FILE`            | unset                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_parse("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let session = SessionConfig {
            ttl_secs: env_parse("SESSION_TTL_SECS", 3600),
            sweep_interval_secs: env_parse_nonzero("SESSION_SWEEP_INTERVAL_SECS", 60),
        };

        let tts = TtsConfig {
            provider: env_parse("TTS_PROVIDER", TtsProvider::Google),
            base_url: std::env::var("TTS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout_secs: env_parse("TTS_TIMEOUT_SECS", 20),
        };

        let media = MediaConfig {
            ffmpeg_path: std::env::var("FFMPEG_PATH")
                .unwrap_or_else(|_| "ffmpeg".into())
                .into(),
            ffprobe_path: std::env::var("FFPROBE_PATH")
                .unwrap_or_else(|_| "ffprobe".into())
                .into(),
            ffmpeg_timeout_secs: env_parse("FFMPEG_TIMEOUT_SECS", 120),
            font_file: optional_path("FONT_FILE"),
            header_font_file: optional_path("HEADER_FONT_FILE"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", 180),
            max_upload_bytes: env_parse("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
            session,
            tts,
            media,
        }
    }
}

/// Parse an env var, using `default` when unset.
///
/// Panics on a present but unparsable value; misconfiguration should fail
/// at startup.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value '{raw}': {e}")),
        Err(_) => default,
    }
}

/// Like [`env_parse`], but zero is rejected at startup.
fn env_parse_nonzero(key: &str, default: u64) -> u64 {
    require_nonzero(key, env_parse(key, default))
}

fn require_nonzero(key: &str, value: u64) -> u64 {
    if value == 0 {
        panic!("{key} must be greater than zero");
    }
    value
}

fn optional_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
