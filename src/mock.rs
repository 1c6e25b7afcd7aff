//! Offline stand-in for the NLP service.
//!
//! Used when no AWS credentials are available. Detection is plain keyword
//! matching and extraction is a regex over word runs, so results are only good
//! enough to demonstrate the page.

use crate::analysis::{validate_text, DetectedLanguage, KeyPhrase};
use crate::config::DEFAULT_SWAHILI_KEYWORDS;
use crate::error::{AnalysisError, AnalysisResult};
use crate::language::{LanguageTable, UNKNOWN_CODE};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

const ENGLISH_CUES: [&str; 4] = ["hello", "world", "love", "is"];
const SPANISH_CUES: [&str; 3] = ["hola", "mundo", "gusta"];

/// Cue categories in the order they are checked, with the confidence reported on a match
const CUE_CATEGORIES: [(&str, &[&str], f64); 3] = [
    ("en", &ENGLISH_CUES, 0.95),
    ("es", &SPANISH_CUES, 0.90),
    ("sw", &DEFAULT_SWAHILI_KEYWORDS, 0.90),
];

const UNKNOWN_CONFIDENCE: f64 = 0.80;

const PHRASE_CONFIDENCE: f64 = 0.85;
const MAX_CANDIDATES: usize = 3;
const MIN_PHRASE_CHARS: usize = 3;

static PHRASE_REGEX: OnceLock<Regex> = OnceLock::new();

fn phrase_regex() -> &'static Regex {
    PHRASE_REGEX.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]*\b|\b[a-z]+(?:\s+[a-z]+)*\b").expect("phrase pattern is valid")
    })
}

/// Heuristic analyzer that never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct MockAnalyzer;

impl MockAnalyzer {
    /// Guess the language from fixed cue words.
    ///
    /// Categories are checked English, Spanish, Swahili; the first category
    /// with any cue contained in the lowercased text wins.
    pub fn detect_language(&self, text: &str) -> AnalysisResult<DetectedLanguage> {
        validate_text(text)?;

        let lowered = text.to_lowercase();
        let (code, confidence) = CUE_CATEGORIES
            .iter()
            .find(|(_, cues, _)| cues.iter().any(|cue| lowered.contains(cue)))
            .map(|(code, _, confidence)| (*code, *confidence))
            .unwrap_or((UNKNOWN_CODE, UNKNOWN_CONFIDENCE));

        debug!("Mock language detection: {} ({})", code, confidence);

        Ok(DetectedLanguage {
            language: LanguageTable::get().display_name(code).to_string(),
            language_code: code.to_string(),
            confidence,
        })
    }

    /// Pick capitalized words and runs of lowercase words as key phrases.
    ///
    /// Only the first three candidates are considered; any of those with two
    /// characters or fewer is dropped.
    pub fn extract_key_phrases(&self, text: &str) -> AnalysisResult<Vec<KeyPhrase>> {
        validate_text(text)?;

        let key_phrases: Vec<KeyPhrase> = phrase_regex()
            .find_iter(text)
            .take(MAX_CANDIDATES)
            .map(|m| m.as_str())
            .filter(|phrase| phrase.chars().count() >= MIN_PHRASE_CHARS)
            .map(|phrase| KeyPhrase {
                phrase: phrase.to_string(),
                confidence: PHRASE_CONFIDENCE,
            })
            .collect();

        if key_phrases.is_empty() {
            return Err(AnalysisError::NoPhrases);
        }

        Ok(key_phrases)
    }
}
