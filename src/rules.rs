//! Per-language phoneme cleanup rules
//!
//! A closed set of language variants, each pairing a preprocess hook
//! (applied to text before the engine call) with a clean hook (applied
//! to the engine's phoneme output). Variants are selected through the
//! read-only [`CUSTOM_RULES`] registry; languages without an entry use
//! [`LanguageRules::Default`].

use std::collections::HashMap;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::EngineVersion;

/// Cleanup rules for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageRules {
    /// No preprocessing, no cleanup
    Default,
    /// Strip syllable hyphens from the engine's French output
    French,
    /// Patch the German vowel defect of espeak-ng 1.50 and 1.51
    German,
}

impl LanguageRules {
    /// Language-specific text preprocessing
    ///
    /// Identity for every current variant; the hook exists so a variant
    /// can rewrite text before it reaches the engine.
    pub fn preprocess(&self, text: &str) -> String {
        text.to_string()
    }

    /// Language-specific phoneme cleanup
    pub fn clean(&self, phonemes: &str, version: Option<EngineVersion>) -> String {
        match self {
            LanguageRules::Default => phonemes.to_string(),
            LanguageRules::French => clean_french(phonemes),
            LanguageRules::German => clean_german(phonemes, version),
        }
    }
}

/// Registry of languages with specialized cleanup
///
/// Built once, never mutated afterwards. A missing code is not an
/// error; callers fall back to [`LanguageRules::Default`].
pub static CUSTOM_RULES: Lazy<HashMap<&'static str, LanguageRules>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("fr-fr", LanguageRules::French);
    m.insert("de", LanguageRules::German);
    m
});

/// Cleanup rules for a language code
pub fn rules_for(code: &str) -> LanguageRules {
    CUSTOM_RULES
        .get(code)
        .copied()
        .unwrap_or(LanguageRules::Default)
}

/// Remove syllable hyphens from French phoneme output
///
/// espeak-ng marks French syllable boundaries with '-'; downstream
/// models do not want them.
pub fn clean_french(phonemes: &str) -> String {
    phonemes.replace('-', "")
}

/// First espeak-ng release with the German vowel defect
const GERMAN_DEFECT_FROM: EngineVersion = EngineVersion::new(1, 50, 0);
/// First release with the defect fixed
const GERMAN_DEFECT_UNTIL: EngineVersion = EngineVersion::new(1, 52, 0);

/// Matches 'yː' (correct output, kept) or a bare 'y' (defect, patched)
static BARE_Y_RE: Lazy<Regex> = Lazy::new(|| Regex::new("yː|y").unwrap());

fn version_has_german_defect(version: EngineVersion) -> bool {
    version >= GERMAN_DEFECT_FROM && version < GERMAN_DEFECT_UNTIL
}

/// Patch the German vowel defect of espeak-ng [1.50.0, 1.52.0)
///
/// Affected releases emit literal '?' placeholders for certain German
/// vowel sequences and drop the rounding on bare 'y'. The substitution
/// order is deliberate: the longest placeholder patterns go first so
/// later rules never re-match already-patched text. Outside the
/// affected range the input is returned unchanged.
pub fn clean_german(phonemes: &str, version: Option<EngineVersion>) -> String {
    let Some(v) = version else {
        return phonemes.to_string();
    };
    if !version_has_german_defect(v) {
        return phonemes.to_string();
    }

    debug!("espeak-ng {} emits corrupted German vowels, patching output", v);

    let patched = BARE_Y_RE.replace_all(phonemes, |caps: &regex::Captures| {
        if &caps[0] == "yː" {
            "yː"
        } else {
            "ʏ"
        }
    });
    let patched = patched
        .replace("i???", "iɐʊɐ")
        .replace("??", "ʊɐ")
        .replace("i?", "iɐ");

    if patched != phonemes {
        debug!("Patched German phonemes: {:?} -> {:?}", phonemes, patched);
    }
    if patched.contains('?') {
        warn!(
            "Unpatched '?' remains in German phonemes: {:?}",
            patched
        );
    }

    patched
}
