//! Handler for promo generation.
//!
//! `POST /api/v1/sessions/{id}/generate` takes the whole operator form as
//! `multipart/form-data` and runs the pipeline inline.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use promo_core::artifact::ArtifactDetails;
use promo_core::choices::{parse_choice, AnimationStyle, AudioMood, Choice, Language, TestType};
use promo_core::generation::GenerationError;
use promo_core::mascot::decode_mascot;
use promo_core::request::{
    InputWarning, MascotUpload, MissingInput, PromoRequest, DEFAULT_SCRIPT,
};
use promo_core::styling::StylingOptions;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Outcome of a successful generation.
#[derive(Debug, Serialize)]
pub struct GenerationResult {
    pub session_id: Uuid,
    /// Relative URL the video can be downloaded from.
    pub download_url: String,
    pub details: ArtifactDetails,
    pub warnings: Vec<InputWarning>,
}

/// Raw text fields as submitted. Absent fields take the form defaults.
#[derive(Debug, Default)]
struct PromoForm {
    test_type: Option<String>,
    language: Option<String>,
    script: Option<String>,
    audio_mood: Option<String>,
    text_color: Option<String>,
    bg_color: Option<String>,
    font_size: Option<String>,
    animation: Option<String>,
    mascot: Option<MascotUpload>,
}

impl PromoForm {
    async fn read(multipart: &mut Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "mascot" {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.mascot = Some(MascotUpload { file_name, bytes });
                continue;
            }

            let slot = match name.as_str() {
                "test_type" => &mut form.test_type,
                "language" => &mut form.language,
                "script" => &mut form.script,
                "audio_mood" => &mut form.audio_mood,
                "text_color" => &mut form.text_color,
                "bg_color" => &mut form.bg_color,
                "font_size" => &mut form.font_size,
                "animation" => &mut form.animation,
                _ => continue, // ignore unknown fields
            };
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            *slot = Some(text);
        }

        Ok(form)
    }

    /// Resolve labels and defaults into a [`PromoRequest`].
    ///
    /// Unknown test types, moods and animations are rejected. An unknown
    /// language falls back to English.
    fn into_request(self) -> AppResult<PromoRequest> {
        let test_type = match self.test_type.as_deref() {
            Some(label) => parse_choice::<TestType>(label)?,
            None => TestType::ALL[0],
        };

        let language = match self.language.as_deref() {
            Some(label) => {
                let language = Language::resolve(label);
                if Language::from_label(label).is_none() {
                    tracing::warn!(
                        label,
                        fallback = language.label(),
                        "Unknown language, using fallback"
                    );
                }
                language
            }
            None => Language::default(),
        };

        let audio_mood = match self.audio_mood.as_deref() {
            Some(label) => parse_choice::<AudioMood>(label)?,
            None => AudioMood::default(),
        };

        let defaults = StylingOptions::default();
        let font_size = match self.font_size.as_deref().map(str::trim) {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("Invalid font_size '{raw}'")))?,
            None => defaults.font_size,
        };
        let styling = StylingOptions {
            text_color: self
                .text_color
                .map(|c| c.trim().to_string())
                .unwrap_or(defaults.text_color),
            bg_color: self
                .bg_color
                .map(|c| c.trim().to_string())
                .unwrap_or(defaults.bg_color),
            font_size,
            animation: match self.animation.as_deref() {
                Some(label) => parse_choice::<AnimationStyle>(label)?,
                None => defaults.animation,
            },
        };

        Ok(PromoRequest {
            test_type,
            language,
            script: self.script.unwrap_or_else(|| DEFAULT_SCRIPT.to_string()),
            audio_mood,
            mascot: self.mascot,
            styling,
        })
    }
}

/// POST /api/v1/sessions/{id}/generate
///
/// Accepts a multipart form with fields `test_type`, `language`, `script`,
/// `audio_mood`, `mascot` (file), `text_color`, `bg_color`, `font_size` and
/// `animation`. On success the session holds the new video and the response
/// carries its details plus any non-blocking warnings.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<GenerationResult>>> {
    let handle = state.sessions.get(id).await?;

    let request = PromoForm::read(&mut multipart).await?.into_request()?;
    request.check_preconditions().map_err(GenerationError::from)?;
    request.styling.check()?;

    let Some(upload) = request.mascot.clone() else {
        return Err(GenerationError::from(MissingInput::MascotImage).into());
    };
    let mascot = tokio::task::spawn_blocking(move || decode_mascot(&upload))
        .await
        .map_err(|e| AppError::InternalError(format!("Mascot decoding task failed: {e}")))?
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let warnings = request.warnings();
    for warning in &warnings {
        tracing::warn!(session_id = %id, code = warning.code, "{}", warning.message);
    }

    let mut session = handle.lock().await;
    session.touch();
    if session.clear_artifact() {
        tracing::debug!(session_id = %id, "Dropped previous promo video");
    }

    let artifact = state.generator.generate(&request, mascot).await?;
    let details = artifact.details();
    session.store_artifact(artifact);
    session.touch();

    Ok(Json(DataResponse {
        data: GenerationResult {
            session_id: id,
            download_url: format!("/api/v1/sessions/{id}/video"),
            details,
            warnings,
        },
    }))
}
