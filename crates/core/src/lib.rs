pub mod artifact;
pub mod choices;
pub mod composition;
pub mod error;
pub mod ffmpeg;
pub mod generation;
pub mod lip_sync;
pub mod mascot;
pub mod naming;
pub mod request;
pub mod styling;
pub mod video;
