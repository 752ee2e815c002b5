//! Phonemizer adapter
//!
//! Ties a language code, a G2P engine, and that language's cleanup
//! rules together behind scalar and batch phonemize calls.

use log::debug;

use crate::engine::{EngineConfig, EspeakEngine, G2p};
use crate::rules::{rules_for, LanguageRules};
use crate::{Result, TtsPrepError};

/// Phonemizer for one language
///
/// Immutable after construction; create one per language code and
/// reuse it for every call.
pub struct Phonemizer {
    code: String,
    rules: LanguageRules,
    engine: Box<dyn G2p>,
}

impl Phonemizer {
    /// Build a phonemizer backed by a local espeak-ng engine
    ///
    /// The engine is configured with punctuation preservation, stress
    /// annotations, word-mismatch tolerance, and language-switch flag
    /// removal. Cleanup rules come from the language registry, falling
    /// back to no cleanup for unregistered codes.
    pub fn new(code: &str) -> Result<Self> {
        let engine = EspeakEngine::new(code, EngineConfig::default())?;
        Self::with_engine(code, rules_for(code), Box::new(engine))
    }

    /// Build a phonemizer over an explicit engine and rule set
    ///
    /// Lets callers (and tests) supply their own [`G2p`] implementation.
    pub fn with_engine(code: &str, rules: LanguageRules, engine: Box<dyn G2p>) -> Result<Self> {
        if code.is_empty() {
            return Err(TtsPrepError::Config(
                "a language code must be provided".to_string(),
            ));
        }
        debug!("Phonemizer ready for {:?} with {:?} rules", code, rules);
        Ok(Self {
            code: code.to_string(),
            rules,
            engine,
        })
    }

    /// Language code this phonemizer was built for
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Cleanup rules in effect
    pub fn rules(&self) -> LanguageRules {
        self.rules
    }

    /// Phonemize a single text
    ///
    /// Equivalent to a one-element batch call.
    pub fn phonemize(&self, text: &str) -> Result<String> {
        let batch = self.phonemize_batch(&[text.to_string()])?;
        batch
            .into_iter()
            .next()
            .ok_or_else(|| TtsPrepError::Engine("engine returned no output".to_string()))
    }

    /// Phonemize an ordered batch of texts
    ///
    /// Returns one cleaned phoneme string per input, in input order.
    /// The engine is invoked once for the whole batch.
    pub fn phonemize_batch(&self, texts: &[String]) -> Result<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let preprocessed: Vec<String> = texts.iter().map(|t| self.rules.preprocess(t)).collect();

        let raw = self.engine.phonemize_batch(&preprocessed)?;
        if raw.len() != texts.len() {
            return Err(TtsPrepError::Engine(format!(
                "engine returned {} results for {} inputs",
                raw.len(),
                texts.len()
            )));
        }

        let version = self.engine.version();
        Ok(raw
            .iter()
            .map(|p| self.rules.clean(p, version))
            .collect())
    }
}
