use crate::config::Config;
use crate::error::ServiceFault;
use crate::service::{LanguageScore, NlpService, PhraseScore};
use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::error::CredentialsError;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_comprehend::config::Credentials;
use aws_sdk_comprehend::error::{DisplayErrorContext, SdkError};
use aws_sdk_comprehend::types::LanguageCode;
use aws_sdk_comprehend::Client;
use tracing::{debug, info};

/// Amazon Comprehend backed NLP service.
///
/// Retries are disabled: a failed call is reported to the caller immediately.
pub struct ComprehendService {
    client: Client,
    credentials: Option<SharedCredentialsProvider>,
}

impl ComprehendService {
    pub fn new(client: Client, credentials: Option<SharedCredentialsProvider>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Build a client from the standard AWS configuration chain
    /// (environment, shared config files, instance metadata).
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint) = &config.comprehend_endpoint_url {
            info!("Using Comprehend endpoint override: {}", endpoint);
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let credentials = sdk_config.credentials_provider();
        if credentials.is_none() {
            debug!("No AWS credentials provider configured");
        }

        Self::new(Client::new(&sdk_config), credentials)
    }

    /// Build a client with fixed credentials against an explicit endpoint
    pub fn with_static_credentials(
        endpoint_url: &str,
        region: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Self {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "comprehend-analyzer",
        );

        let config = aws_sdk_comprehend::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint_url)
            .region(Region::new(region.to_string()))
            .credentials_provider(credentials.clone())
            .retry_config(RetryConfig::disabled())
            .build();

        Self::new(
            Client::from_conf(config),
            Some(SharedCredentialsProvider::new(credentials)),
        )
    }

    fn require_credentials(&self) -> Result<&SharedCredentialsProvider, ServiceFault> {
        self.credentials
            .as_ref()
            .ok_or(ServiceFault::MissingCredentials)
    }
}

#[async_trait]
impl NlpService for ComprehendService {
    async fn probe(&self) -> Result<(), ServiceFault> {
        let provider = self.require_credentials()?;

        match provider.provide_credentials().await {
            Ok(_) => {}
            Err(CredentialsError::CredentialsNotLoaded(_)) => {
                return Err(ServiceFault::MissingCredentials)
            }
            Err(e) => return Err(ServiceFault::Service(DisplayErrorContext(&e).to_string())),
        }

        self.client
            .list_endpoints()
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(())
    }

    async fn detect_dominant_language(
        &self,
        text: &str,
    ) -> Result<Vec<LanguageScore>, ServiceFault> {
        self.require_credentials()?;

        let output = self
            .client
            .detect_dominant_language()
            .text(text)
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(output
            .languages()
            .iter()
            .filter_map(|language| {
                Some(LanguageScore {
                    code: language.language_code()?.to_string(),
                    score: f64::from(language.score().unwrap_or_default()),
                })
            })
            .collect())
    }

    async fn detect_key_phrases(
        &self,
        text: &str,
        language_code: &str,
    ) -> Result<Vec<PhraseScore>, ServiceFault> {
        self.require_credentials()?;

        let output = self
            .client
            .detect_key_phrases()
            .text(text)
            .language_code(LanguageCode::from(language_code))
            .send()
            .await
            .map_err(classify_sdk_error)?;

        Ok(output
            .key_phrases()
            .iter()
            .filter_map(|phrase| {
                Some(PhraseScore {
                    text: phrase.text()?.to_string(),
                    score: f64::from(phrase.score().unwrap_or_default()),
                })
            })
            .collect())
    }
}

/// Map an SDK error to a service fault, recognising unresolvable credentials
fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> ServiceFault
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug + 'static,
{
    if is_missing_credentials(&err) {
        ServiceFault::MissingCredentials
    } else {
        ServiceFault::Service(DisplayErrorContext(&err).to_string())
    }
}

/// Walk the error's source chain looking for a "credentials not loaded" failure
fn is_missing_credentials(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(CredentialsError::CredentialsNotLoaded(_)) = e.downcast_ref::<CredentialsError>()
        {
            return true;
        }
        current = e.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::credential_fn::provide_credentials_fn;
    use wiremock::{
        matchers::{body_partial_json, header, method},
        Mock, MockServer, ResponseTemplate,
    };

    const AMZ_JSON: &str = "application/x-amz-json-1.1";

    // ==================== Helper Functions ====================

    fn target(operation: &str) -> wiremock::matchers::HeaderExactMatcher {
        header("x-amz-target", format!("Comprehend_20171127.{}", operation).as_str())
    }

    fn json_response(body: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), AMZ_JSON)
    }

    fn create_service(mock_server: &MockServer) -> ComprehendService {
        ComprehendService::with_static_credentials(
            &mock_server.uri(),
            "us-east-1",
            "AKIDTEST",
            "test-secret",
        )
    }

    fn create_service_without_credentials(mock_server: &MockServer) -> ComprehendService {
        let config = aws_sdk_comprehend::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(mock_server.uri())
            .region(Region::new("us-east-1"))
            .retry_config(RetryConfig::disabled())
            .build();
        ComprehendService::new(Client::from_conf(config), None)
    }

    /// Service whose provider chain resolves to `failure()` on every lookup,
    /// the way the default chain behaves on a machine without credentials
    fn create_service_with_failing_provider(
        mock_server: &MockServer,
        failure: fn() -> CredentialsError,
    ) -> ComprehendService {
        let provider = SharedCredentialsProvider::new(provide_credentials_fn(move || async move {
            Err(failure())
        }));
        let config = aws_sdk_comprehend::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(mock_server.uri())
            .region(Region::new("us-east-1"))
            .credentials_provider(provider.clone())
            .retry_config(RetryConfig::disabled())
            .build();
        ComprehendService::new(Client::from_conf(config), Some(provider))
    }

    async fn mount_no_calls(mock_server: &MockServer) {
        Mock::given(method("POST"))
            .respond_with(json_response(serde_json::json!({})))
            .expect(0)
            .mount(mock_server)
            .await;
    }

    // ==================== Dominant Language Tests ====================

    #[tokio::test]
    async fn test_detect_dominant_language_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("DetectDominantLanguage"))
            .and(body_partial_json(serde_json::json!({"Text": "Hola mundo"})))
            .respond_with(json_response(serde_json::json!({
                "Languages": [
                    {"LanguageCode": "es", "Score": 0.99},
                    {"LanguageCode": "pt", "Score": 0.01}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        let languages = service
            .detect_dominant_language("Hola mundo")
            .await
            .expect("Should succeed");

        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].code, "es");
        assert!((languages[0].score - 0.99).abs() < 1e-6);
        assert_eq!(languages[1].code, "pt");
    }

    #[tokio::test]
    async fn test_detect_dominant_language_empty_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("DetectDominantLanguage"))
            .respond_with(json_response(serde_json::json!({"Languages": []})))
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        let languages = service
            .detect_dominant_language("???")
            .await
            .expect("Should succeed");

        assert!(languages.is_empty());
    }

    #[tokio::test]
    async fn test_detect_dominant_language_service_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("DetectDominantLanguage"))
            .respond_with(ResponseTemplate::new(400).set_body_raw(
                serde_json::json!({
                    "__type": "TextSizeLimitExceededException",
                    "message": "Input text size exceeds limit."
                })
                .to_string(),
                AMZ_JSON,
            ))
            .expect(1) // No retries
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        let fault = service
            .detect_dominant_language("text")
            .await
            .expect_err("Should fail");

        match fault {
            ServiceFault::Service(details) => {
                assert!(
                    details.contains("TextSizeLimitExceeded"),
                    "Unexpected details: {}",
                    details
                );
            }
            other => panic!("Expected service fault, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detect_dominant_language_without_credentials_makes_no_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(json_response(serde_json::json!({"Languages": []})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let service = create_service_without_credentials(&mock_server);
        let fault = service
            .detect_dominant_language("Hello")
            .await
            .expect_err("Should fail");

        assert_eq!(fault, ServiceFault::MissingCredentials);
    }

    // ==================== Key Phrase Tests ====================

    #[tokio::test]
    async fn test_detect_key_phrases_sends_language_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("DetectKeyPhrases"))
            .and(body_partial_json(serde_json::json!({
                "Text": "Amazon Comprehend finds key phrases",
                "LanguageCode": "en"
            })))
            .respond_with(json_response(serde_json::json!({
                "KeyPhrases": [
                    {"Text": "Amazon Comprehend", "Score": 0.998, "BeginOffset": 0, "EndOffset": 17},
                    {"Text": "key phrases", "Score": 0.87, "BeginOffset": 24, "EndOffset": 35}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        let phrases = service
            .detect_key_phrases("Amazon Comprehend finds key phrases", "en")
            .await
            .expect("Should succeed");

        assert_eq!(phrases.len(), 2);
        assert_eq!(phrases[0].text, "Amazon Comprehend");
        assert_eq!(phrases[1].text, "key phrases");
        assert!((phrases[1].score - 0.87).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_detect_key_phrases_zh_tw_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("DetectKeyPhrases"))
            .and(body_partial_json(serde_json::json!({"LanguageCode": "zh-TW"})))
            .respond_with(json_response(serde_json::json!({"KeyPhrases": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        let phrases = service
            .detect_key_phrases("你好世界", "zh-TW")
            .await
            .expect("Should succeed");

        assert!(phrases.is_empty());
    }

    // ==================== Probe Tests ====================

    #[tokio::test]
    async fn test_probe_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("ListEndpoints"))
            .respond_with(json_response(serde_json::json!({"EndpointPropertiesList": []})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        assert!(service.probe().await.is_ok());
    }

    #[tokio::test]
    async fn test_probe_without_credentials() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(json_response(serde_json::json!({})))
            .expect(0)
            .mount(&mock_server)
            .await;

        let service = create_service_without_credentials(&mock_server);
        assert_eq!(
            service.probe().await,
            Err(ServiceFault::MissingCredentials)
        );
    }

    #[tokio::test]
    async fn test_probe_unloaded_credentials_is_missing_credentials() {
        let mock_server = MockServer::start().await;
        mount_no_calls(&mock_server).await;

        let service = create_service_with_failing_provider(&mock_server, || {
            CredentialsError::not_loaded("no providers in chain provided credentials")
        });

        assert_eq!(
            service.probe().await,
            Err(ServiceFault::MissingCredentials)
        );
    }

    #[tokio::test]
    async fn test_probe_provider_error_is_a_service_fault() {
        let mock_server = MockServer::start().await;
        mount_no_calls(&mock_server).await;

        let service = create_service_with_failing_provider(&mock_server, || {
            CredentialsError::provider_error("profile file is malformed")
        });

        let fault = service.probe().await.expect_err("Should fail");
        assert!(
            matches!(fault, ServiceFault::Service(_)),
            "Unexpected fault: {:?}",
            fault
        );
    }

    #[tokio::test]
    async fn test_probe_access_denied_is_a_service_fault() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(target("ListEndpoints"))
            .respond_with(ResponseTemplate::new(400).set_body_raw(
                serde_json::json!({
                    "__type": "AccessDeniedException",
                    "message": "not authorized to perform comprehend:ListEndpoints"
                })
                .to_string(),
                AMZ_JSON,
            ))
            .mount(&mock_server)
            .await;

        let service = create_service(&mock_server);
        let fault = service.probe().await.expect_err("Should fail");
        assert!(matches!(fault, ServiceFault::Service(_)));
    }

    // ==================== Error Classification Tests ====================

    #[test]
    fn test_is_missing_credentials_direct() {
        let err = CredentialsError::not_loaded("no providers in chain provided credentials");
        assert!(is_missing_credentials(&err));
    }

    #[test]
    fn test_is_missing_credentials_other_credential_errors() {
        let err = CredentialsError::provider_error("profile file is malformed");
        assert!(!is_missing_credentials(&err));
    }

    #[test]
    fn test_is_missing_credentials_nested_in_source_chain() {
        #[derive(Debug)]
        struct Wrapper(CredentialsError);

        impl std::fmt::Display for Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "failed to resolve identity")
            }
        }

        impl std::error::Error for Wrapper {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let nested = Wrapper(CredentialsError::not_loaded("none"));
        assert!(is_missing_credentials(&nested));

        let nested = Wrapper(CredentialsError::provider_error("boom"));
        assert!(!is_missing_credentials(&nested));
    }

    #[test]
    fn test_is_missing_credentials_unrelated_error() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "connection refused");
        assert!(!is_missing_credentials(&err));
    }
}
