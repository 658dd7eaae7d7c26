//! Media tooling used by the generator: probing and rendering.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use promo_core::artifact::OutputMetadata;
use promo_core::composition::CompositionPlan;
use promo_core::ffmpeg::{self, FfmpegError};

/// Probing and rendering operations the generator needs.
#[async_trait]
pub trait MediaToolkit: Send + Sync {
    /// Duration in seconds of an audio or video file.
    async fn probe_duration(&self, path: &Path) -> Result<f64, FfmpegError>;

    /// Render `plan` to `plan.output`. All input files referenced by the plan
    /// exist when this is called.
    async fn render(&self, plan: &CompositionPlan) -> Result<(), FfmpegError>;

    /// Read back the stream properties of a rendered file.
    async fn inspect(&self, path: &Path) -> Result<OutputMetadata, FfmpegError>;
}

/// Locations and limits for the ffmpeg binaries.
#[derive(Debug, Clone)]
pub struct FfmpegSettings {
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
    /// Upper bound for a single render.
    pub render_timeout: Duration,
}

impl Default for FfmpegSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            render_timeout: Duration::from_secs(120),
        }
    }
}

/// [`MediaToolkit`] backed by `ffmpeg`/`ffprobe` child processes.
#[derive(Debug, Clone, Default)]
pub struct FfmpegToolkit {
    settings: FfmpegSettings,
}

impl FfmpegToolkit {
    pub fn new(settings: FfmpegSettings) -> Self {
        Self { settings }
    }

    fn ffprobe(&self) -> std::borrow::Cow<'_, str> {
        self.settings.ffprobe_path.to_string_lossy()
    }
}

#[async_trait]
impl MediaToolkit for FfmpegToolkit {
    async fn probe_duration(&self, path: &Path) -> Result<f64, FfmpegError> {
        let probe = ffmpeg::probe_media(&self.ffprobe(), path).await?;
        Ok(ffmpeg::parse_duration(&probe))
    }

    async fn render(&self, plan: &CompositionPlan) -> Result<(), FfmpegError> {
        let args = ffmpeg::encode_args(plan);
        tracing::debug!(args = ?args, "Running ffmpeg");
        ffmpeg::run_ffmpeg(
            &self.settings.ffmpeg_path.to_string_lossy(),
            &args,
            self.settings.render_timeout,
        )
        .await
    }

    async fn inspect(&self, path: &Path) -> Result<OutputMetadata, FfmpegError> {
        let probe = ffmpeg::probe_media(&self.ffprobe(), path).await?;
        Ok(ffmpeg::output_metadata(&probe))
    }
}
