//! TTS model boundary
//!
//! Model loading, inference, and streaming synthesis live in external
//! model repositories; this crate only sees them through the narrow
//! [`TtsModel`] trait plus the metadata needed to pick the right
//! phonemizer for a backbone.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Sample rate of codec model output, in Hz
pub const SAMPLE_RATE: u32 = 24_000;

/// Backbone/codec pair selection and device placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub backbone_repo: String,
    pub backbone_device: String,
    pub codec_repo: String,
    pub codec_device: String,
}

/// Reference audio prompt: codec token ids plus their transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub codes: Vec<i64>,
    pub text: String,
}

impl Reference {
    /// Load a reference prompt from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Lazy, finite, non-restartable sequence of audio chunks
pub type AudioStream = Box<dyn Iterator<Item = Result<Vec<f32>>>>;

/// Loaded backbone/codec pair
pub trait TtsModel {
    /// Synthesize audio for `text`, conditioned on the reference prompt
    fn infer(&self, text: &str, reference: &Reference) -> Result<Vec<f32>>;

    /// Streaming variant of [`TtsModel::infer`]
    fn infer_stream(&self, text: &str, reference: &Reference) -> Result<AudioStream>;
}

/// Phonemizer language for each supported backbone repo
///
/// Built once, read-only afterwards.
pub static BACKBONE_LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("neuphonic/neutts-air", "en-us");
    m.insert("neuphonic/neutts-air-q4-gguf", "en-us");
    m.insert("neuphonic/neutts-air-q8-gguf", "en-us");
    m
});

/// Language code for a backbone repo, when it is a known one
pub fn language_for_backbone(backbone_repo: &str) -> Option<&'static str> {
    BACKBONE_LANGUAGE_MAP.get(backbone_repo).copied()
}
