//! Request and result shapes shared by the mock and live analyzers.

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

/// Maximum size of a document, in UTF-8 bytes
pub const MAX_TEXT_BYTES: usize = 5000;

/// A single analysis request
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawAnalysisRequest")]
pub struct AnalysisRequest {
    text: String,
    language_hint: Option<String>,
}

/// Wire shape of a request, normalized through [`AnalysisRequest::with_language_hint`]
#[derive(Deserialize)]
struct RawAnalysisRequest {
    text: String,
    #[serde(default)]
    language_hint: Option<String>,
}

impl From<RawAnalysisRequest> for AnalysisRequest {
    fn from(raw: RawAnalysisRequest) -> Self {
        let request = AnalysisRequest::new(raw.text);
        match raw.language_hint {
            Some(hint) => request.with_language_hint(hint),
            None => request,
        }
    }
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language_hint: None,
        }
    }

    /// Language code used for key-phrase extraction when detection yields none
    pub fn with_language_hint(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.language_hint = if code.trim().is_empty() {
            None
        } else {
            Some(code.trim().to_string())
        };
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language_hint(&self) -> Option<&str> {
        self.language_hint.as_deref()
    }

    /// True when there is nothing but whitespace to analyze
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Detected dominant language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedLanguage {
    /// Display name from the language table (e.g., "SPANISH")
    pub language: String,
    pub language_code: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPhrase {
    pub phrase: String,
    pub confidence: f64,
}

/// Outcome of the language detection stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LanguageResult {
    Detected(DetectedLanguage),
    Failed { error: String },
}

impl LanguageResult {
    pub fn detected(&self) -> Option<&DetectedLanguage> {
        match self {
            LanguageResult::Detected(detected) => Some(detected),
            LanguageResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LanguageResult::Detected(_) => None,
            LanguageResult::Failed { error } => Some(error),
        }
    }
}

impl From<AnalysisResult<DetectedLanguage>> for LanguageResult {
    fn from(result: AnalysisResult<DetectedLanguage>) -> Self {
        match result {
            Ok(detected) => LanguageResult::Detected(detected),
            Err(e) => LanguageResult::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Outcome of the key-phrase extraction stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KeyPhraseResult {
    Extracted { key_phrases: Vec<KeyPhrase> },
    Failed { error: String },
}

impl KeyPhraseResult {
    pub fn phrases(&self) -> Option<&[KeyPhrase]> {
        match self {
            KeyPhraseResult::Extracted { key_phrases } => Some(key_phrases),
            KeyPhraseResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            KeyPhraseResult::Extracted { .. } => None,
            KeyPhraseResult::Failed { error } => Some(error),
        }
    }
}

impl From<AnalysisResult<Vec<KeyPhrase>>> for KeyPhraseResult {
    fn from(result: AnalysisResult<Vec<KeyPhrase>>) -> Self {
        match result {
            Ok(key_phrases) => KeyPhraseResult::Extracted { key_phrases },
            Err(e) => KeyPhraseResult::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Reject empty text and text over [`MAX_TEXT_BYTES`] UTF-8 bytes
pub fn validate_text(text: &str) -> AnalysisResult<()> {
    if text.is_empty() || text.len() > MAX_TEXT_BYTES {
        return Err(AnalysisError::Validation);
    }
    Ok(())
}

/// Round a service score to 4 decimal places
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}
