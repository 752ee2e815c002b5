//! ttsprep - preprocessing glue for text-to-speech pipelines
//!
//! Wraps an external grapheme-to-phoneme engine (espeak-ng) with
//! per-language cleanup rules, and provides sanity checks for audio
//! produced by downstream TTS backbone/codec model pairs.

pub mod audio;
pub mod engine;
pub mod error;
pub mod model;
pub mod phonemizer;
pub mod rules;

pub use error::{Result, TtsPrepError};
pub use phonemizer::Phonemizer;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "ttsprep";
