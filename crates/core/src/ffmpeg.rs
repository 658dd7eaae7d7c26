//! FFmpeg/FFprobe command utilities.
//!
//! Probing (`ffprobe -print_format json`), promo encode argument building
//! from a [`CompositionPlan`], and a child-process runner with a timeout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

use crate::artifact::OutputMetadata;
use crate::composition::{CompositionPlan, FontSource, TextBanner, LINE_SPACING};
use crate::styling::ffmpeg_color;

/// Maximum stderr kept in an [`FfmpegError::ExecutionFailed`] (8 KiB, tail).
const MAX_STDERR_BYTES: usize = 8 * 1024;

/// Error type for FFmpeg/FFprobe operations.
#[derive(Debug, thiserror::Error)]
pub enum FfmpegError {
    #[error("ffprobe/ffmpeg binary not found: {0}")]
    NotFound(std::io::Error),

    #[error("ffprobe/ffmpeg execution failed (exit code {exit_code:?}): {stderr}")]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("ffmpeg timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to parse ffprobe output: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("media file not found: {0}")]
    MediaNotFound(String),
}

// ---------------------------------------------------------------------------
// ffprobe JSON output structures
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_format -show_streams`).
#[derive(Debug, Deserialize)]
pub struct FfprobeOutput {
    #[serde(default)]
    pub streams: Vec<FfprobeStream>,
    pub format: FfprobeFormat,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
pub struct FfprobeStream {
    pub index: i32,
    pub codec_name: Option<String>,
    pub codec_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    /// e.g. "24/1" or "24000/1001"
    pub r_frame_rate: Option<String>,
    pub duration: Option<String>,
}

/// Format-level metadata from ffprobe.
#[derive(Debug, Deserialize)]
pub struct FfprobeFormat {
    pub duration: Option<String>,
    pub format_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Running
// ---------------------------------------------------------------------------

/// Run `ffprobe` on a media file and return the parsed JSON output.
pub async fn probe_media(ffprobe: &str, path: &Path) -> Result<FfprobeOutput, FfmpegError> {
    if !path.exists() {
        return Err(FfmpegError::MediaNotFound(path.to_string_lossy().to_string()));
    }

    let output = Command::new(ffprobe)
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(FfmpegError::NotFound)?;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: stderr_tail(&output.stderr),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str::<FfprobeOutput>(&stdout)
        .map_err(|e| FfmpegError::ParseError(format!("{e}: {stdout}")))
}

/// Run `ffmpeg` with `args`, killing it if it outlives `timeout`.
pub async fn run_ffmpeg(ffmpeg: &str, args: &[String], timeout: Duration) -> Result<(), FfmpegError> {
    let child = Command::new(ffmpeg)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(FfmpegError::NotFound)?;

    // Dropping the future on timeout drops the child, which kills it.
    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| FfmpegError::Timeout(timeout))??;

    if !output.status.success() {
        return Err(FfmpegError::ExecutionFailed {
            exit_code: output.status.code(),
            stderr: stderr_tail(&output.stderr),
        });
    }
    Ok(())
}

/// Keep the end of stderr, where ffmpeg prints the actual failure.
fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(MAX_STDERR_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}

// ---------------------------------------------------------------------------
// Encode arguments
// ---------------------------------------------------------------------------

/// Build the full ffmpeg argument list for a promo render.
///
/// Inputs: `0` a lavfi color source (the canvas), `1` the looped mascot PNG,
/// `2` the speech track. Banners are drawn with `drawbox` + `drawtext`; the
/// caption pair is gated by an `enable` window. The output is cut at the
/// canvas duration, so short speech never shortens the video.
pub fn encode_args(plan: &CompositionPlan) -> Vec<String> {
    let canvas = &plan.canvas;
    let duration = format!("{:.3}", canvas.duration_secs);

    let mut video_chain = vec![
        format!("[0:v][mascot]overlay=x={}:y={}:format=auto", plan.mascot.x, plan.mascot.y),
    ];
    video_chain.extend(banner_filters(&plan.header));
    video_chain.extend(banner_filters(&plan.caption));
    video_chain.push(format!("format={}[v]", plan.pixel_format));

    let filter_complex = format!(
        "[1:v]format=rgba[mascot];{};[2:a]atrim=end={:.3},asetpts=PTS-STARTPTS[a]",
        video_chain.join(","),
        plan.audio.duration_secs
    );

    let mut args: Vec<String> = vec!["-y".into(), "-hide_banner".into()];
    args.extend(["-f", "lavfi", "-i"].map(String::from));
    args.push(format!(
        "color=c={}:s={}x{}:r={}:d={duration}",
        ffmpeg_color(&canvas.color),
        canvas.width,
        canvas.height,
        canvas.fps
    ));
    args.extend(["-loop", "1", "-framerate"].map(String::from));
    args.push(canvas.fps.to_string());
    args.extend(["-t".to_string(), duration.clone(), "-i".to_string()]);
    args.push(plan.mascot.path.to_string_lossy().to_string());
    args.push("-i".into());
    args.push(plan.audio.path.to_string_lossy().to_string());
    args.extend(["-filter_complex".to_string(), filter_complex]);
    args.extend(["-map", "[v]", "-map", "[a]", "-c:v"].map(String::from));
    args.push(plan.video_codec.to_string());
    args.push("-pix_fmt".into());
    args.push(plan.pixel_format.to_string());
    args.push("-r".into());
    args.push(canvas.fps.to_string());
    args.push("-c:a".into());
    args.push(plan.audio_codec.to_string());
    args.extend(["-t".to_string(), duration]);
    args.extend(["-movflags", "+faststart"].map(String::from));
    args.push(plan.output.to_string_lossy().to_string());
    args
}

/// `drawbox` + `drawtext` for one banner, text centered in the box.
fn banner_filters(banner: &TextBanner) -> [String; 2] {
    let enable = banner
        .visible_until
        .map(|end| format!(":enable='between(t,0,{end:.3})'"))
        .unwrap_or_default();

    let font = match &banner.font {
        FontSource::File(path) => format!("fontfile={}", filter_option_value(&path.to_string_lossy())),
        FontSource::Family(family) => format!("font={}", filter_option_value(family)),
    };

    let drawbox = format!(
        "drawbox=x={}:y={}:w={}:h={}:color={}:t=fill{enable}",
        banner.x,
        banner.y,
        banner.width,
        banner.height,
        ffmpeg_color(&banner.background_color)
    );
    let drawtext = format!(
        "drawtext={font}:textfile={}:expansion=none:fontsize={}:fontcolor={}:line_spacing={LINE_SPACING}:x={}+({}-text_w)/2:y={}+({}-text_h)/2{enable}",
        filter_option_value(&banner.text_file.to_string_lossy()),
        banner.font_size,
        ffmpeg_color(&banner.text_color),
        banner.x,
        banner.width,
        banner.y,
        banner.height,
    );
    [drawbox, drawtext]
}

/// Backslash-escape characters that end or alter a filter option value.
pub fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | ':') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Encode a filter option value for use inside `-filter_complex`.
///
/// The graph parser unescapes once before the filter splits its options,
/// so the option-level escape is wrapped in graph-level single quotes.
/// A quote inside the value is written as `'\''`.
pub fn filter_option_value(value: &str) -> String {
    format!("'{}'", escape_filter_value(value).replace('\'', "'\\''"))
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn first_stream<'a>(probe: &'a FfprobeOutput, codec_type: &str) -> Option<&'a FfprobeStream> {
    probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some(codec_type))
}

/// Parse the media duration in seconds from ffprobe output.
///
/// Prefers the format-level duration, then the first video stream, then the
/// first audio stream.
pub fn parse_duration(probe: &FfprobeOutput) -> f64 {
    let from_format = probe.format.duration.as_deref();
    let from_video = first_stream(probe, "video").and_then(|s| s.duration.as_deref());
    let from_audio = first_stream(probe, "audio").and_then(|s| s.duration.as_deref());

    [from_format, from_video, from_audio]
        .into_iter()
        .flatten()
        .find_map(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse the video framerate from ffprobe output.
///
/// The `r_frame_rate` field is a fraction like `"24/1"` or `"24000/1001"`.
pub fn parse_framerate(probe: &FfprobeOutput) -> f64 {
    first_stream(probe, "video")
        .and_then(|s| s.r_frame_rate.as_deref())
        .map(parse_fraction)
        .unwrap_or(0.0)
}

/// Parse a fraction string like `"30/1"` into a float.
fn parse_fraction(s: &str) -> f64 {
    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 2 {
        let num = parts[0].parse::<f64>().unwrap_or(0.0);
        let den = parts[1].parse::<f64>().unwrap_or(1.0);
        if den > 0.0 {
            return num / den;
        }
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// Find the first video stream's resolution.
pub fn parse_resolution(probe: &FfprobeOutput) -> (u32, u32) {
    first_stream(probe, "video")
        .map(|s| {
            (
                s.width.unwrap_or(0).max(0) as u32,
                s.height.unwrap_or(0).max(0) as u32,
            )
        })
        .unwrap_or((0, 0))
}

/// Summarize an encoded file's probe as [`OutputMetadata`].
pub fn output_metadata(probe: &FfprobeOutput) -> OutputMetadata {
    let (width, height) = parse_resolution(probe);
    OutputMetadata {
        width,
        height,
        fps: parse_framerate(probe),
        duration_secs: parse_duration(probe),
        video_codec: first_stream(probe, "video")
            .and_then(|s| s.codec_name.clone())
            .unwrap_or_default(),
        audio_codec: first_stream(probe, "audio").and_then(|s| s.codec_name.clone()),
    }
}
