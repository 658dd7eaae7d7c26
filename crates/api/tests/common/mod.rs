#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use promo_core::artifact::OutputMetadata;
use promo_core::choices::Language;
use promo_core::composition::{CompositionPlan, FontSet};
use promo_core::ffmpeg::FfmpegError;
use promo_pipeline::{MediaToolkit, PromoGenerator};
use promo_tts::{AudioFormat, SpeechSynthesizer, SynthesizedSpeech, TtsError};
use tower::ServiceExt;

use promo_api::config::{MediaConfig, ServerConfig, SessionConfig, TtsConfig, TtsProvider};
use promo_api::router::build_app_router;
use promo_api::state::AppState;

pub const MULTIPART_BOUNDARY: &str = "promo-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin and a 30-second request
/// timeout. Speech synthesis is disabled; tests inject fakes instead.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 2 * 1024 * 1024,
        session: SessionConfig {
            ttl_secs: 3600,
            sweep_interval_secs: 60,
        },
        tts: TtsConfig {
            provider: TtsProvider::Disabled,
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
        media: MediaConfig {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            ffmpeg_timeout_secs: 10,
            font_file: None,
            header_font_file: None,
        },
    }
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Synthesizer that returns a stub MP3 and counts calls.
#[derive(Default)]
pub struct FakeSynth {
    pub calls: AtomicUsize,
    pub languages: std::sync::Mutex<Vec<Language>>,
}

#[async_trait]
impl SpeechSynthesizer for FakeSynth {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn synthesize(
        &self,
        _text: &str,
        language: Language,
    ) -> Result<SynthesizedSpeech, TtsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.languages.lock().unwrap().push(language);
        Ok(SynthesizedSpeech {
            audio: Bytes::from_static(b"ID3fake"),
            format: AudioFormat::Mp3,
        })
    }
}

/// Stands in for ffmpeg. Each render writes a file whose contents count the
/// renders, so tests can tell successive videos apart.
pub struct FakeToolkit {
    pub speech_secs: f64,
    pub fail_render: bool,
    pub renders: AtomicUsize,
}

impl FakeToolkit {
    pub fn new(speech_secs: f64) -> Self {
        Self {
            speech_secs,
            fail_render: false,
            renders: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_render: true,
            ..Self::new(4.0)
        }
    }
}

#[async_trait]
impl MediaToolkit for FakeToolkit {
    async fn probe_duration(&self, _path: &Path) -> Result<f64, FfmpegError> {
        Ok(self.speech_secs)
    }

    async fn render(&self, plan: &CompositionPlan) -> Result<(), FfmpegError> {
        let n = self.renders.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_render {
            return Err(FfmpegError::ExecutionFailed {
                exit_code: Some(1),
                stderr: "Unknown encoder 'libx264'".into(),
            });
        }
        std::fs::write(&plan.output, format!("fake-mp4-{n}"))?;
        Ok(())
    }

    async fn inspect(&self, _path: &Path) -> Result<OutputMetadata, FfmpegError> {
        Ok(OutputMetadata {
            width: 1080,
            height: 1920,
            fps: 24.0,
            duration_secs: 15.0,
            video_codec: "h264".into(),
            audio_codec: Some("aac".into()),
        })
    }
}

/// Handles to the fakes behind a test app.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub synth: Arc<FakeSynth>,
    pub toolkit: Arc<FakeToolkit>,
}

/// Build the full application router with all middleware layers around the
/// given synthesizer and toolkit.
///
/// Goes through [`build_app_router`] so integration tests exercise the same
/// middleware stack (CORS, request ID, timeout, tracing, panic recovery,
/// body limit) that production uses.
pub fn build_app_with(
    synth: Arc<dyn SpeechSynthesizer>,
    toolkit: Arc<dyn MediaToolkit>,
) -> (Router, AppState) {
    let config = test_config();
    let generator = PromoGenerator::new(synth, toolkit, FontSet::default());
    let state = AppState::new(config.clone(), generator);
    (build_app_router(state.clone(), &config), state)
}

/// Test app with a working fake synthesizer and a 4-second speech track.
pub fn build_test_app() -> TestApp {
    build_test_app_with_toolkit(FakeToolkit::new(4.0))
}

pub fn build_test_app_with_toolkit(toolkit: FakeToolkit) -> TestApp {
    let synth = Arc::new(FakeSynth::default());
    let toolkit = Arc::new(toolkit);
    let (router, state) = build_app_with(synth.clone(), toolkit.clone());
    TestApp {
        router,
        state,
        synth,
        toolkit,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    tokio::time::timeout(Duration::from_secs(10), app.oneshot(request))
        .await
        .expect("request timed out")
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(form.finish()))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// Create a session through the API and return its id.
pub async fn create_session(app: Router) -> String {
    let json = body_json(post_empty(app, "/api/v1/sessions").await).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// Minimal `multipart/form-data` body builder.
#[derive(Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Attach a small PNG as the mascot.
    pub fn mascot_png(self, width: u32, height: u32) -> Self {
        self.file("mascot", "mascot.png", "image/png", &png(width, height))
    }

    fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        self.body
    }
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 200, 0, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}
