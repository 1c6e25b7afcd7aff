//! Error types for the analysis stages.
//!
//! Every variant is recoverable: analyzers return these to the dispatcher, which
//! folds them into result-shaped error values for the presentation layer.

use thiserror::Error;

/// Failure of a single analysis stage (language detection or key-phrase extraction)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Text is empty or larger than the service's per-document limit
    #[error("Text is empty or exceeds 5,000 bytes.")]
    Validation,

    #[error("AWS credentials not configured. Please run 'aws configure'.")]
    Credentials,

    /// Any other fault reported by the NLP service, surfaced verbatim
    #[error("AWS error: {0}")]
    Service(String),

    #[error("No language detected.")]
    NoLanguageDetected,

    #[error("No key phrases detected.")]
    NoPhrases,
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Fault raised by an NLP service implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceFault {
    /// No credentials could be resolved for the service
    #[error("credentials not configured")]
    MissingCredentials,

    #[error("{0}")]
    Service(String),
}

impl From<ServiceFault> for AnalysisError {
    fn from(fault: ServiceFault) -> Self {
        match fault {
            ServiceFault::MissingCredentials => AnalysisError::Credentials,
            ServiceFault::Service(details) => AnalysisError::Service(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            AnalysisError::Validation.to_string(),
            "Text is empty or exceeds 5,000 bytes."
        );
        assert_eq!(
            AnalysisError::Credentials.to_string(),
            "AWS credentials not configured. Please run 'aws configure'."
        );
        assert_eq!(
            AnalysisError::NoLanguageDetected.to_string(),
            "No language detected."
        );
        assert_eq!(AnalysisError::NoPhrases.to_string(), "No key phrases detected.");
    }

    #[test]
    fn test_service_error_wraps_details() {
        let error = AnalysisError::Service("ThrottlingException: slow down".to_string());
        assert_eq!(error.to_string(), "AWS error: ThrottlingException: slow down");
    }

    #[test]
    fn test_service_fault_conversion() {
        assert_eq!(
            AnalysisError::from(ServiceFault::MissingCredentials),
            AnalysisError::Credentials
        );
        assert_eq!(
            AnalysisError::from(ServiceFault::Service("boom".to_string())),
            AnalysisError::Service("boom".to_string())
        );
    }
}
