use async_trait::async_trait;
use promo_core::choices::Language;

use crate::{SpeechSynthesizer, SynthesizedSpeech, TtsError};

/// Synthesizer used when TTS is switched off. Every call fails with
/// [`TtsError::Unavailable`]; no placeholder audio is produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSynthesizer;

#[async_trait]
impl SpeechSynthesizer for DisabledSynthesizer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn synthesize(&self, _text: &str, _language: Language) -> Result<SynthesizedSpeech, TtsError> {
        Err(TtsError::Unavailable(
            "text-to-speech is disabled (set TTS_PROVIDER=google)".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn always_unavailable() {
        let result = DisabledSynthesizer.synthesize("hello", Language::Hindi).await;
        assert_matches!(result, Err(TtsError::Unavailable(_)));
    }
}
