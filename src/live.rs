//! Adapter from the NLP service's raw answers to normalized analysis results.

use crate::analysis::{round_score, validate_text, DetectedLanguage, KeyPhrase};
use crate::error::{AnalysisError, AnalysisResult};
use crate::language::{KeyPhraseLanguagePolicy, LanguageTable, TagalogSwahiliCorrection};
use crate::service::NlpService;
use std::sync::Arc;
use tracing::{debug, info};

/// Analyzer backed by the live NLP service
pub struct LiveAnalyzer {
    service: Arc<dyn NlpService>,
    correction: TagalogSwahiliCorrection,
    key_phrase_languages: KeyPhraseLanguagePolicy,
}

impl LiveAnalyzer {
    pub fn new(service: Arc<dyn NlpService>, correction: TagalogSwahiliCorrection) -> Self {
        Self {
            service,
            correction,
            key_phrase_languages: KeyPhraseLanguagePolicy,
        }
    }

    pub fn service(&self) -> &Arc<dyn NlpService> {
        &self.service
    }

    /// Detect the dominant language of `text`.
    ///
    /// Takes the service's top candidate, rounds its score to 4 decimals and
    /// applies the Tagalog/Swahili correction before mapping the code to a
    /// display name.
    pub async fn detect_language(&self, text: &str) -> AnalysisResult<DetectedLanguage> {
        validate_text(text)?;

        let languages = self.service.detect_dominant_language(text).await?;
        let top = languages.first().ok_or(AnalysisError::NoLanguageDetected)?;

        let (code, confidence) = self.correction.apply(&top.code, round_score(top.score), text);
        if code != top.code {
            info!(
                "Corrected detected language {} -> {} (confidence {})",
                top.code, code, confidence
            );
        }

        Ok(DetectedLanguage {
            language: LanguageTable::get().display_name(code).to_string(),
            language_code: code.to_string(),
            confidence,
        })
    }

    /// Extract key phrases of `text` written in `language_code`.
    ///
    /// Codes the service cannot extract phrases for are replaced by the default
    /// language before the call.
    pub async fn extract_key_phrases(
        &self,
        text: &str,
        language_code: &str,
    ) -> AnalysisResult<Vec<KeyPhrase>> {
        validate_text(text)?;

        let resolved = self.key_phrase_languages.resolve(language_code);
        if resolved != language_code {
            debug!(
                "Key phrases not supported for '{}', using '{}'",
                language_code, resolved
            );
        }

        let phrases = self.service.detect_key_phrases(text, resolved).await?;
        if phrases.is_empty() {
            return Err(AnalysisError::NoPhrases);
        }

        Ok(phrases
            .into_iter()
            .map(|p| KeyPhrase {
                phrase: p.text,
                confidence: round_score(p.score),
            })
            .collect())
    }
}
