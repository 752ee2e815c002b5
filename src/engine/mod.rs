//! Grapheme-to-phoneme engine boundary
//!
//! The phonemizer layer only depends on this narrow contract: a batch
//! `phonemize_batch` call and an optional version query. The production
//! implementation drives the espeak-ng command-line program.

pub mod espeak;

pub use espeak::EspeakEngine;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::Result;

/// Semantic version reported by the G2P engine
///
/// Used to gate cleanup rules that patch known defects of specific
/// engine releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl EngineVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the first `major.minor[.patch]` triple from a version banner
    ///
    /// espeak-ng prints something like
    /// `eSpeak NG text-to-speech: 1.51  Data at: /usr/lib/...`;
    /// the patch component is absent in most releases and defaults to 0.
    pub fn parse(banner: &str) -> Option<Self> {
        static VERSION_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").unwrap());

        let caps = VERSION_RE.captures(banner)?;
        let major = caps[1].parse().ok()?;
        let minor = caps[2].parse().ok()?;
        let patch = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// How to react when the engine emits a different word count than the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordsMismatch {
    /// Accept the engine output as-is
    Ignore,
    /// Accept it, but log a warning
    Warn,
}

/// How to handle language-switch flags the engine embeds in its output
///
/// When espeak-ng detects a mid-text language change it annotates the
/// output with flags like `(en)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSwitch {
    /// Strip the flags from the output
    RemoveFlags,
    /// Leave the flags in place
    Keep,
}

/// Configuration bundle passed to the engine at construction
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Carry punctuation through to the phoneme output
    pub preserve_punctuation: bool,
    /// Keep IPA stress annotations in the output
    pub with_stress: bool,
    pub words_mismatch: WordsMismatch,
    pub language_switch: LanguageSwitch,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            preserve_punctuation: true,
            with_stress: true,
            words_mismatch: WordsMismatch::Ignore,
            language_switch: LanguageSwitch::RemoveFlags,
        }
    }
}

/// Grapheme-to-phoneme engine contract
///
/// Implementations must return exactly one phoneme string per input
/// string, in input order.
pub trait G2p: Send {
    /// Phonemize a batch of texts
    fn phonemize_batch(&self, texts: &[String]) -> Result<Vec<String>>;

    /// Engine version, when the backend can report one
    fn version(&self) -> Option<EngineVersion> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_component_banner() {
        let v = EngineVersion::parse("eSpeak NG text-to-speech: 1.51  Data at: /usr/lib").unwrap();
        assert_eq!(v, EngineVersion::new(1, 51, 0));
    }

    #[test]
    fn test_parse_three_component_banner() {
        let v = EngineVersion::parse("eSpeak NG text-to-speech: 1.50.1").unwrap();
        assert_eq!(v, EngineVersion::new(1, 50, 1));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(EngineVersion::parse("no version here").is_none());
    }

    #[test]
    fn test_version_ordering() {
        assert!(EngineVersion::new(1, 50, 0) < EngineVersion::new(1, 52, 0));
        assert!(EngineVersion::new(1, 51, 9) < EngineVersion::new(1, 52, 0));
        assert!(EngineVersion::new(2, 0, 0) > EngineVersion::new(1, 52, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(EngineVersion::new(1, 51, 0).to_string(), "1.51.0");
    }
}
