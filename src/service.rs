//! Boundary to the external NLP service.

use crate::error::ServiceFault;
use async_trait::async_trait;

/// A candidate language with the service's score
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageScore {
    pub code: String,
    pub score: f64,
}

/// A key phrase with the service's score
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseScore {
    pub text: String,
    pub score: f64,
}

/// Operations consumed from the NLP service
#[async_trait]
pub trait NlpService: Send + Sync {
    /// Lightweight check that the service is reachable with the current credentials.
    ///
    /// Performs no analysis.
    async fn probe(&self) -> Result<(), ServiceFault>;

    /// Candidate languages of `text`, best first
    async fn detect_dominant_language(&self, text: &str)
        -> Result<Vec<LanguageScore>, ServiceFault>;

    /// Key phrases of `text`, in document order
    async fn detect_key_phrases(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<PhraseScore>, ServiceFault>;
}
