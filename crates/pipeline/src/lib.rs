//! Promo video assembly.
//!
//! [`PromoGenerator`] runs the single linear pipeline: persist the mascot
//! layer, synthesize speech, lay out the composition, encode, verify. The
//! external tools it drives sit behind [`MediaToolkit`] and
//! [`promo_tts::SpeechSynthesizer`].

pub mod generator;
pub mod toolkit;

pub use generator::PromoGenerator;
pub use toolkit::{FfmpegSettings, FfmpegToolkit, MediaToolkit};
