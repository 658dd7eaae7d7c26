//! Enumerated form choices: test type, language, audio mood and mascot
//! animation.
//!
//! Every choice has a display label (the string the form submits) and an
//! `ALL` list used to publish the options to clients.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Shared behaviour for the fixed-label enums on the form.
pub trait Choice: Copy + Sized + 'static {
    /// Every variant in display order.
    const ALL: &'static [Self];

    /// Form field name, used in validation messages.
    const FIELD: &'static str;

    /// The label shown to (and submitted by) the operator.
    fn label(self) -> &'static str;

    /// Case-insensitive lookup by label. Surrounding whitespace is ignored.
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.label().eq_ignore_ascii_case(label))
    }

    /// All labels in display order.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|choice| choice.label()).collect()
    }
}

/// Parse a submitted label, rejecting anything not in `T::ALL`.
pub fn parse_choice<T: Choice>(label: &str) -> Result<T, CoreError> {
    T::from_label(label).ok_or_else(|| {
        CoreError::Validation(format!(
            "Unknown {} '{}'. Valid values: {}",
            T::FIELD,
            label.trim(),
            T::labels().join(", ")
        ))
    })
}

/* --------------------------------------------------------------------------
Test type
-------------------------------------------------------------------------- */

/// Laboratory test the promo advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    Thyroid,
    #[serde(rename = "FNAC")]
    Fnac,
    #[serde(rename = "CBC")]
    Cbc,
    #[serde(rename = "Lipid Profile")]
    LipidProfile,
    #[serde(rename = "COVID-19")]
    Covid19,
    Other,
}

impl Choice for TestType {
    const ALL: &'static [Self] = &[
        Self::Thyroid,
        Self::Fnac,
        Self::Cbc,
        Self::LipidProfile,
        Self::Covid19,
        Self::Other,
    ];
    const FIELD: &'static str = "test type";

    fn label(self) -> &'static str {
        match self {
            Self::Thyroid => "Thyroid",
            Self::Fnac => "FNAC",
            Self::Cbc => "CBC",
            Self::LipidProfile => "Lipid Profile",
            Self::Covid19 => "COVID-19",
            Self::Other => "Other",
        }
    }
}

/* --------------------------------------------------------------------------
Language
-------------------------------------------------------------------------- */

/// Spoken language of the script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Gujarati,
    Hindi,
}

impl Language {
    /// Speech synthesis language code.
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Gujarati => "gu",
            Self::Hindi => "hi",
        }
    }

    /// Resolve a submitted label, falling back to English for anything
    /// unrecognized.
    pub fn resolve(label: &str) -> Self {
        Self::from_label(label).unwrap_or_default()
    }
}

impl Choice for Language {
    const ALL: &'static [Self] = &[Self::English, Self::Gujarati, Self::Hindi];
    const FIELD: &'static str = "language";

    fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Gujarati => "Gujarati",
            Self::Hindi => "Hindi",
        }
    }
}

/* --------------------------------------------------------------------------
Audio mood
-------------------------------------------------------------------------- */

/// Background music mood.
///
/// Collected and echoed back in generation details; it does not change the
/// audio track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioMood {
    #[default]
    Energetic,
    Calm,
}

impl Choice for AudioMood {
    const ALL: &'static [Self] = &[Self::Energetic, Self::Calm];
    const FIELD: &'static str = "audio mood";

    fn label(self) -> &'static str {
        match self {
            Self::Energetic => "Energetic",
            Self::Calm => "Calm",
        }
    }
}

/* --------------------------------------------------------------------------
Mascot animation
-------------------------------------------------------------------------- */

/// Requested mascot animation. Accepted but not applied to the composition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationStyle {
    #[default]
    #[serde(rename = "Zoom In")]
    ZoomIn,
    #[serde(rename = "Slide In")]
    SlideIn,
    Pulse,
    Bounce,
}

impl Choice for AnimationStyle {
    const ALL: &'static [Self] = &[Self::ZoomIn, Self::SlideIn, Self::Pulse, Self::Bounce];
    const FIELD: &'static str = "animation";

    fn label(self) -> &'static str {
        match self {
            Self::ZoomIn => "Zoom In",
            Self::SlideIn => "Slide In",
            Self::Pulse => "Pulse",
            Self::Bounce => "Bounce",
        }
    }
}
