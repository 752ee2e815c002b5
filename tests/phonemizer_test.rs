//! Integration tests for the phonemizer adapter
//!
//! These use an in-process fake engine so they run without espeak-ng
//! installed; the engine contract itself is exercised separately.

use ttsprep::engine::{EngineVersion, G2p};
use ttsprep::rules::{rules_for, LanguageRules};
use ttsprep::{Phonemizer, Result, TtsPrepError};

/// Fake engine that tags each input so ordering is observable
struct TaggingEngine;

impl G2p for TaggingEngine {
    fn phonemize_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        Ok(texts.iter().map(|t| format!("ph:{}", t)).collect())
    }
}

/// Fake engine that echoes its input and reports a fixed version
struct EchoEngine {
    version: Option<EngineVersion>,
}

impl G2p for EchoEngine {
    fn phonemize_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        Ok(texts.to_vec())
    }

    fn version(&self) -> Option<EngineVersion> {
        self.version
    }
}

/// Fake engine that violates the batch cardinality contract
struct DroppingEngine;

impl G2p for DroppingEngine {
    fn phonemize_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        Ok(texts.iter().skip(1).cloned().collect())
    }
}

fn tagging_phonemizer(code: &str) -> Phonemizer {
    Phonemizer::with_engine(code, rules_for(code), Box::new(TaggingEngine)).unwrap()
}

#[test]
fn test_batch_preserves_order_and_cardinality() {
    let phonemizer = tagging_phonemizer("en-us");

    for n in [0usize, 1, 2, 7] {
        let texts: Vec<String> = (0..n).map(|i| format!("text {}", i)).collect();
        let out = phonemizer.phonemize_batch(&texts).unwrap();
        assert_eq!(out.len(), n);
        for (i, phonemes) in out.iter().enumerate() {
            assert_eq!(phonemes, &format!("ph:text {}", i));
        }
    }
}

#[test]
fn test_scalar_batch_symmetry() {
    let phonemizer = tagging_phonemizer("en-us");

    let scalar = phonemizer.phonemize("x").unwrap();
    let batch = phonemizer.phonemize_batch(&["x".to_string()]).unwrap();
    assert_eq!(scalar, batch[0]);
}

#[test]
fn test_empty_language_code_is_config_error() {
    let result = Phonemizer::with_engine("", LanguageRules::Default, Box::new(TaggingEngine));
    assert!(matches!(result, Err(TtsPrepError::Config(_))));
}

#[test]
fn test_cardinality_violation_is_engine_error() {
    let phonemizer =
        Phonemizer::with_engine("en-us", LanguageRules::Default, Box::new(DroppingEngine)).unwrap();
    let texts = vec!["a".to_string(), "b".to_string()];
    assert!(matches!(
        phonemizer.phonemize_batch(&texts),
        Err(TtsPrepError::Engine(_))
    ));
}

#[test]
fn test_registry_selects_french_rules() {
    let phonemizer = tagging_phonemizer("fr-fr");
    assert_eq!(phonemizer.rules(), LanguageRules::French);
    assert_eq!(phonemizer.code(), "fr-fr");

    // Unregistered codes fall back to the base adapter behavior
    let fallback = tagging_phonemizer("en-us");
    assert_eq!(fallback.rules(), LanguageRules::Default);
}

#[test]
fn test_french_cleanup_applies_after_engine() {
    let engine = Box::new(EchoEngine { version: None });
    let phonemizer = Phonemizer::with_engine("fr-fr", rules_for("fr-fr"), engine).unwrap();

    let out = phonemizer.phonemize("bɔ̃-ʒuʁ").unwrap();
    assert!(!out.contains('-'));
    assert_eq!(out, "bɔ̃ʒuʁ");
}

#[test]
fn test_german_cleanup_uses_engine_version() {
    let buggy = Box::new(EchoEngine {
        version: Some(EngineVersion::new(1, 51, 0)),
    });
    let phonemizer = Phonemizer::with_engine("de", rules_for("de"), buggy).unwrap();
    assert_eq!(phonemizer.phonemize("i???").unwrap(), "iɐʊɐ");

    let fixed = Box::new(EchoEngine {
        version: Some(EngineVersion::new(1, 52, 0)),
    });
    let phonemizer = Phonemizer::with_engine("de", rules_for("de"), fixed).unwrap();
    assert_eq!(phonemizer.phonemize("i???").unwrap(), "i???");
}
