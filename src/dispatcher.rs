//! Per-request routing between the live service and the offline mock.
//!
//! Each request moves through `ProbeCredentials -> Live | Mock -> Rendered`:
//! [`Dispatcher::select_route`] probes the service and returns a [`Route`], and
//! [`Dispatcher::run`] executes both analysis stages on that route and folds
//! their outcomes into an [`AnalysisReport`].

use crate::analysis::{AnalysisRequest, KeyPhraseResult, LanguageResult};
use crate::error::ServiceFault;
use crate::language::DEFAULT_KEY_PHRASE_LANGUAGE;
use crate::live::LiveAnalyzer;
use crate::mock::MockAnalyzer;
use serde::Serialize;
use tracing::{info, warn};

/// Warning shown when there is nothing to analyze
pub const BLANK_INPUT_WARNING: &str = "Please enter some text to analyze.";

/// Advisory shown when the mock analyzer stands in for the service
pub const MOCK_ADVISORY: &str = "AWS credentials not configured. Using mock API for assignment testing. Run 'aws configure' to enable Comprehend API.";

/// Which analyzer produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    Live,
    Mock,
}

/// Route chosen by the credential probe
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    Live,
    Mock { advisory: String },
}

/// Normalized output of both analysis stages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub analyzer: AnalyzerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    pub language: LanguageResult,
    pub key_phrases: KeyPhraseResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisOutcome {
    /// Blank input: nothing was analyzed
    Skipped { warning: String },
    Completed(AnalysisReport),
}

pub struct Dispatcher {
    live: LiveAnalyzer,
    mock: MockAnalyzer,
}

impl Dispatcher {
    pub fn new(live: LiveAnalyzer) -> Self {
        Self {
            live,
            mock: MockAnalyzer,
        }
    }

    /// Analyze one request end to end.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        if request.is_blank() {
            return AnalysisOutcome::Skipped {
                warning: BLANK_INPUT_WARNING.to_string(),
            };
        }

        let route = self.select_route().await;
        AnalysisOutcome::Completed(self.run(route, request).await)
    }

    /// Probe the live service and decide where this request goes.
    ///
    /// Only missing credentials divert to the mock. Any other probe fault keeps
    /// the live route so the analysis stages report their own errors.
    pub async fn select_route(&self) -> Route {
        match self.live.service().probe().await {
            Ok(()) => Route::Live,
            Err(ServiceFault::MissingCredentials) => {
                warn!("AWS credentials not configured, falling back to mock analyzer");
                Route::Mock {
                    advisory: MOCK_ADVISORY.to_string(),
                }
            }
            Err(ServiceFault::Service(details)) => {
                warn!("Service probe failed, keeping live analyzer: {}", details);
                Route::Live
            }
        }
    }

    /// Run both stages on `route`. A failed stage never prevents the other.
    pub async fn run(&self, route: Route, request: &AnalysisRequest) -> AnalysisReport {
        let text = request.text();

        match route {
            Route::Live => {
                info!("Analyzing {} bytes with the live analyzer", text.len());

                let language = self.live.detect_language(text).await;
                let code = language
                    .as_ref()
                    .ok()
                    .map(|detected| detected.language_code.as_str())
                    .or(request.language_hint())
                    .unwrap_or(DEFAULT_KEY_PHRASE_LANGUAGE);
                let key_phrases = self.live.extract_key_phrases(text, code).await;

                AnalysisReport {
                    analyzer: AnalyzerKind::Live,
                    advisory: None,
                    language: language.into(),
                    key_phrases: key_phrases.into(),
                }
            }
            Route::Mock { advisory } => {
                info!("Analyzing {} bytes with the mock analyzer", text.len());

                AnalysisReport {
                    analyzer: AnalyzerKind::Mock,
                    advisory: Some(advisory),
                    language: self.mock.detect_language(text).into(),
                    key_phrases: self.mock.extract_key_phrases(text).into(),
                }
            }
        }
    }
}
