//! Typed outcome of a generation attempt.

use crate::request::MissingInput;

/// Why a generation produced no artifact.
///
/// Callers can branch on the variant instead of matching message text.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A blocking precondition failed; nothing was synthesized or encoded.
    #[error(transparent)]
    MissingInput(#[from] MissingInput),

    /// The speech synthesis capability is disabled or unreachable.
    #[error("Speech synthesis unavailable: {0}")]
    SynthesisUnavailable(String),

    /// Any failure in the compose/encode pipeline. Carries the underlying
    /// error text; which step failed is not distinguished.
    #[error("Error creating video: {0}")]
    AssemblyFailed(String),
}

impl GenerationError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingInput(_) => "MISSING_INPUT",
            Self::SynthesisUnavailable(_) => "SYNTHESIS_UNAVAILABLE",
            Self::AssemblyFailed(_) => "ASSEMBLY_FAILED",
        }
    }

    /// Wrap any displayable error as an assembly failure.
    pub fn assembly(err: impl std::fmt::Display) -> Self {
        Self::AssemblyFailed(err.to_string())
    }
}
