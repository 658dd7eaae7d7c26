//! The operator's input set for one generation request, plus the blocking
//! and non-blocking checks run before any assembly work starts.

use bytes::Bytes;
use serde::Serialize;

use crate::choices::{AudioMood, Language, TestType};
use crate::styling::StylingOptions;

/// Script length (in characters) that still fits a 15-second video.
/// Longer scripts are allowed but produce a warning.
pub const SCRIPT_SOFT_LIMIT: usize = 200;

/// Script pre-filled on the form.
pub const DEFAULT_SCRIPT: &str = "Get your tests done today!";

/// Raw mascot upload as received from the form.
#[derive(Debug, Clone)]
pub struct MascotUpload {
    /// Client-side filename, when the browser sent one.
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Everything the operator submitted for a single generation.
#[derive(Debug, Clone)]
pub struct PromoRequest {
    pub test_type: TestType,
    pub language: Language,
    pub script: String,
    /// Echoed in generation details only.
    pub audio_mood: AudioMood,
    pub mascot: Option<MascotUpload>,
    pub styling: StylingOptions,
}

/// A blocking precondition failure. Generation is refused before any
/// synthesis or encoding happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum MissingInput {
    #[error("Please upload a mascot image first")]
    MascotImage,
    #[error("Please enter a script")]
    Script,
}

/// A non-blocking notice attached to a successful (or attempted) generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputWarning {
    pub code: &'static str,
    pub message: String,
}

impl InputWarning {
    fn script_too_long(length: usize) -> Self {
        Self {
            code: "SCRIPT_TOO_LONG",
            message: format!(
                "Script is {length} characters long. Please keep it under \
                 {SCRIPT_SOFT_LIMIT} characters for a 15-second video."
            ),
        }
    }
}

impl PromoRequest {
    /// Check the blocking preconditions: a non-empty mascot upload and a
    /// script with at least one non-whitespace character.
    ///
    /// The mascot is checked first, matching the order the form shows errors.
    pub fn check_preconditions(&self) -> Result<(), MissingInput> {
        match &self.mascot {
            Some(upload) if !upload.bytes.is_empty() => {}
            _ => return Err(MissingInput::MascotImage),
        }
        if self.script.trim().is_empty() {
            return Err(MissingInput::Script);
        }
        Ok(())
    }

    /// Non-blocking warnings for this request.
    pub fn warnings(&self) -> Vec<InputWarning> {
        let length = self.script.chars().count();
        if length > SCRIPT_SOFT_LIMIT {
            vec![InputWarning::script_too_long(length)]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(script: &str, mascot: Option<&'static [u8]>) -> PromoRequest {
        PromoRequest {
            test_type: TestType::Thyroid,
            language: Language::English,
            script: script.to_string(),
            audio_mood: AudioMood::Energetic,
            mascot: mascot.map(|b| MascotUpload {
                file_name: Some("mascot.png".into()),
                bytes: Bytes::from_static(b),
            }),
            styling: StylingOptions::default(),
        }
    }

    #[test]
    fn missing_mascot_is_refused() {
        let req = request(DEFAULT_SCRIPT, None);
        assert_eq!(req.check_preconditions(), Err(MissingInput::MascotImage));
    }

    #[test]
    fn empty_mascot_upload_counts_as_missing() {
        let req = request(DEFAULT_SCRIPT, Some(b""));
        assert_eq!(req.check_preconditions(), Err(MissingInput::MascotImage));
    }

    #[test]
    fn blank_script_is_refused() {
        let req = request(" \n\t ", Some(b"png"));
        assert_eq!(req.check_preconditions(), Err(MissingInput::Script));
    }

    #[test]
    fn mascot_is_reported_before_script() {
        let req = request("", None);
        assert_eq!(req.check_preconditions(), Err(MissingInput::MascotImage));
    }

    #[test]
    fn complete_request_passes() {
        let req = request(DEFAULT_SCRIPT, Some(b"png"));
        assert!(req.check_preconditions().is_ok());
        assert!(req.warnings().is_empty());
    }

    #[test]
    fn long_script_warns_without_blocking() {
        let script = "a".repeat(SCRIPT_SOFT_LIMIT + 1);
        let req = request(&script, Some(b"png"));
        assert!(req.check_preconditions().is_ok());

        let warnings = req.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, "SCRIPT_TOO_LONG");
    }

    #[test]
    fn script_at_limit_does_not_warn() {
        let script = "a".repeat(SCRIPT_SOFT_LIMIT);
        assert!(request(&script, Some(b"png")).warnings().is_empty());
    }

    #[test]
    fn script_length_counts_characters_not_bytes() {
        // 150 Gujarati characters are well over 200 bytes.
        let script = "ક".repeat(150);
        assert!(script.len() > SCRIPT_SOFT_LIMIT);
        assert!(request(&script, Some(b"png")).warnings().is_empty());
    }
}
