//! The promo video assembly pipeline.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use promo_core::artifact::PromoArtifact;
use promo_core::composition::{
    speech_file_name, CompositionPlan, FontSet, PlanInputs, MASCOT_FILE,
};
use promo_core::generation::GenerationError;
use promo_core::mascot::MascotImage;
use promo_core::naming::promo_filename;
use promo_core::request::PromoRequest;
use promo_core::video::mascot_target_width;
use promo_tts::{SpeechSynthesizer, TtsError};

use crate::toolkit::MediaToolkit;

/// Turns a validated [`PromoRequest`] into a 15-second vertical MP4.
///
/// Cheap to clone; collaborators are shared behind `Arc`.
#[derive(Clone)]
pub struct PromoGenerator {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    toolkit: Arc<dyn MediaToolkit>,
    fonts: FontSet,
}

impl PromoGenerator {
    pub fn new(
        synthesizer: Arc<dyn SpeechSynthesizer>,
        toolkit: Arc<dyn MediaToolkit>,
        fonts: FontSet,
    ) -> Self {
        Self {
            synthesizer,
            toolkit,
            fonts,
        }
    }

    /// Name of the configured speech synthesizer.
    pub fn synthesizer_name(&self) -> &'static str {
        self.synthesizer.name()
    }

    /// Run the whole pipeline.
    ///
    /// Intermediate files live in a scratch directory that is removed on
    /// every exit path; the finished video is returned as in-memory bytes.
    /// Preconditions are re-checked here, so nothing is synthesized or
    /// encoded for a request without a mascot or script.
    pub async fn generate(
        &self,
        request: &PromoRequest,
        mascot: MascotImage,
    ) -> Result<PromoArtifact, GenerationError> {
        request.check_preconditions()?;

        let started = Instant::now();
        tracing::info!(
            test_type = ?request.test_type,
            language = ?request.language,
            script_chars = request.script.chars().count(),
            "Generating promo video"
        );

        let scratch = tempfile::Builder::new()
            .prefix("promo-")
            .tempdir()
            .map_err(GenerationError::assembly)?;
        let dir = scratch.path();

        // Step 1: mascot layer.
        let layer_path = dir.join(MASCOT_FILE);
        let mascot_size = tokio::task::spawn_blocking(move || {
            mascot.write_layer(&layer_path, mascot_target_width())
        })
        .await
        .map_err(GenerationError::assembly)?
        .map_err(GenerationError::assembly)?;

        // Step 2: speech.
        let speech = self
            .synthesizer
            .synthesize(&request.script, request.language)
            .await
            .map_err(synthesis_error)?;
        let speech_extension = speech.format.extension();
        let speech_path = dir.join(speech_file_name(speech_extension));
        tokio::fs::write(&speech_path, &speech.audio)
            .await
            .map_err(GenerationError::assembly)?;

        let speech_duration_secs = self
            .toolkit
            .probe_duration(&speech_path)
            .await
            .map_err(GenerationError::assembly)?;
        if speech_duration_secs <= 0.0 {
            return Err(GenerationError::AssemblyFailed(
                "synthesized speech has no duration".into(),
            ));
        }

        // Step 3: layout.
        let plan = CompositionPlan::build(PlanInputs {
            scratch_dir: dir,
            mascot_size,
            speech_duration_secs,
            speech_extension,
            script: &request.script,
            styling: &request.styling,
            fonts: &self.fonts,
        });
        write_text(&plan.header.text_file, &plan.header.text).await?;
        write_text(&plan.caption.text_file, &plan.caption.text).await?;

        // Step 4: encode and verify.
        self.toolkit
            .render(&plan)
            .await
            .map_err(GenerationError::assembly)?;

        let metadata = self
            .toolkit
            .inspect(&plan.output)
            .await
            .map_err(GenerationError::assembly)?;
        metadata
            .check_promo_format()
            .map_err(GenerationError::assembly)?;

        let bytes = tokio::fs::read(&plan.output)
            .await
            .map_err(GenerationError::assembly)?;

        tracing::info!(
            size_bytes = bytes.len(),
            speech_duration_secs,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Promo video generated"
        );

        Ok(PromoArtifact {
            bytes: Bytes::from(bytes),
            file_name: promo_filename(request.test_type),
            test_type: request.test_type,
            language: request.language,
            audio_mood: request.audio_mood,
            animation: request.styling.animation,
            speech_duration_secs,
            metadata,
            created_at: chrono::Utc::now(),
        })
    }
}

fn synthesis_error(err: TtsError) -> GenerationError {
    if err.is_unavailable() {
        tracing::warn!(error = %err, "Speech synthesis unavailable");
        GenerationError::SynthesisUnavailable(err.to_string())
    } else {
        GenerationError::assembly(err)
    }
}

async fn write_text(path: &Path, text: &str) -> Result<(), GenerationError> {
    tokio::fs::write(path, text)
        .await
        .map_err(GenerationError::assembly)
}
