//! Named policy rules applied on top of the NLP service's raw answers.

use crate::config::{Config, DEFAULT_SWAHILI_CONFIDENCE_CAP, DEFAULT_SWAHILI_KEYWORDS};
use crate::language::LanguageTable;

/// Language code used for key-phrase extraction when the requested one is unsupported
pub const DEFAULT_KEY_PHRASE_LANGUAGE: &str = "en";

/// Corrects a known misclassification: Swahili text reported as Tagalog.
///
/// When the service answers `tl` and the text contains one of the Swahili
/// keywords, the code becomes `sw` and the confidence is capped.
#[derive(Debug, Clone, PartialEq)]
pub struct TagalogSwahiliCorrection {
    keywords: Vec<String>,
    confidence_cap: f64,
}

impl TagalogSwahiliCorrection {
    pub const FROM_CODE: &'static str = "tl";
    pub const TO_CODE: &'static str = "sw";

    pub fn new(keywords: Vec<String>, confidence_cap: f64) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            confidence_cap,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.swahili_keywords.clone(), config.swahili_confidence_cap)
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn confidence_cap(&self) -> f64 {
        self.confidence_cap
    }

    /// Apply the rule, returning the (possibly corrected) code and confidence.
    pub fn apply<'a>(&self, code: &'a str, confidence: f64, text: &str) -> (&'a str, f64) {
        if code != Self::FROM_CODE {
            return (code, confidence);
        }

        let lowered = text.to_lowercase();
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            (Self::TO_CODE, confidence.min(self.confidence_cap))
        } else {
            (code, confidence)
        }
    }
}

impl Default for TagalogSwahiliCorrection {
    fn default() -> Self {
        Self::new(
            DEFAULT_SWAHILI_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_SWAHILI_CONFIDENCE_CAP,
        )
    }
}

/// Chooses the language code sent to the key-phrase operation.
///
/// Unsupported codes are silently replaced by [`DEFAULT_KEY_PHRASE_LANGUAGE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyPhraseLanguagePolicy;

impl KeyPhraseLanguagePolicy {
    pub fn resolve<'a>(&self, code: &'a str) -> &'a str {
        if LanguageTable::get().supports_key_phrases(code) {
            code
        } else {
            DEFAULT_KEY_PHRASE_LANGUAGE
        }
    }
}
