use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::error::{CatalogError, Result};
use crate::policy::PolicyRequest;
use crate::reporting::logging;

/// Policy text returned by a generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySuggestion {
    pub suggested_policies: String,
}

/// Produces governance policy suggestions for an API description
#[async_trait]
pub trait PolicyGenerator: Send + Sync {
    async fn generate(&self, request: &PolicyRequest) -> Result<PolicySuggestion>;
}

/// Build the prompt sent to the language model.
pub fn build_prompt(request: &PolicyRequest) -> String {
    format!(
        "You are an expert in API security and governance.\n\
         \n\
         Based on the API's functionality, data sensitivity, and compliance requirements, \
         recommend optimal API security and governance policies.\n\
         \n\
         API Functionality: {}\n\
         Data Sensitivity: {}\n\
         Compliance Requirements: {}\n\
         \n\
         Suggested Policies:",
        request.api_functionality, request.data_sensitivity, request.compliance_requirements
    )
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Calls a `models/{model}:generateContent` endpoint once per request
pub struct HttpPolicyGenerator {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl HttpPolicyGenerator {
    pub fn new(config: &Config, api_key: Option<String>) -> Result<Self> {
        let user_agent = config.user_agent.as_deref().unwrap_or(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));

        let client = reqwest::Client::builder()
            .timeout(config.ai_timeout_duration())
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.ai_endpoint().trim_end_matches('/').to_string(),
            model: config.ai_model().to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_key_env: config.ai_api_key_env().to_string(),
        })
    }

    /// Build a generator reading its API key from the configured
    /// environment variable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = std::env::var(config.ai_api_key_env()).ok();
        Self::new(config, api_key)
    }

    pub fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl PolicyGenerator for HttpPolicyGenerator {
    async fn generate(&self, request: &PolicyRequest) -> Result<PolicySuggestion> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CatalogError::Policy(format!(
                "No API key found. Set the {} environment variable.",
                self.api_key_env
            ))
        })?;

        let prompt = build_prompt(request);
        logging::log_policy_request(&self.model, prompt.chars().count());

        let body = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(PolicySuggestion {
            suggested_policies: parsed.into_text(),
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::{Matcher, Server};

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    fn request() -> PolicyRequest {
        PolicyRequest {
            api_functionality: "Processes card payments for online orders".to_string(),
            data_sensitivity: "Cardholder data and billing addresses".to_string(),
            compliance_requirements: "PCI-DSS".to_string(),
        }
    }

    fn config_for(url: &str) -> Config {
        Config {
            ai_endpoint: Some(url.to_string()),
            ai_model: Some("test-model".to_string()),
            ai_timeout: Some(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_prompt_interpolates_fields() {
        let prompt = build_prompt(&request());
        assert!(prompt.starts_with("You are an expert in API security and governance."));
        assert!(prompt.contains("API Functionality: Processes card payments for online orders"));
        assert!(prompt.contains("Data Sensitivity: Cardholder data and billing addresses"));
        assert!(prompt.contains("Compliance Requirements: PCI-DSS"));
        assert!(prompt.ends_with("Suggested Policies:"));
    }

    #[test]
    fn test_request_url() -> TestResult {
        let generator =
            HttpPolicyGenerator::new(&config_for("https://ai.example.com/v1beta/"), None)?;
        assert_eq!(
            generator.request_url(),
            "https://ai.example.com/v1beta/models/test-model:generateContent"
        );
        Ok(())
    }

    #[test]
    fn test_from_config__when_env_var_missing__has_no_key() -> TestResult {
        let config = Config {
            ai_api_key_env: Some("APICATALOG_TEST_KEY_THAT_IS_NEVER_SET".to_string()),
            ..Default::default()
        };
        let generator = HttpPolicyGenerator::from_config(&config)?;
        assert!(generator.api_key.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_generate__when_model_answers__returns_text() -> TestResult {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/models/test-model:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::Regex("Compliance Requirements: PCI-DSS".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"1. Enforce OAuth2. "},{"text":"2. Tokenize card numbers."}]}}]}"#,
            )
            .create_async()
            .await;

        let generator =
            HttpPolicyGenerator::new(&config_for(&server.url()), Some("test-key".to_string()))?;
        let suggestion = generator.generate(&request()).await?;

        assert_eq!(
            suggestion.suggested_policies,
            "1. Enforce OAuth2. 2. Tokenize card numbers."
        );
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn test_generate__when_no_candidates__returns_empty_text() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let generator =
            HttpPolicyGenerator::new(&config_for(&server.url()), Some("test-key".to_string()))?;
        let suggestion = generator.generate(&request()).await?;
        assert!(suggestion.suggested_policies.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_generate__when_server_errors__is_http_error() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(500)
            .create_async()
            .await;

        let generator =
            HttpPolicyGenerator::new(&config_for(&server.url()), Some("test-key".to_string()))?;
        let result = generator.generate(&request()).await;
        assert!(matches!(result, Err(CatalogError::Http(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate__when_key_missing__fails_without_request() -> TestResult {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let generator = HttpPolicyGenerator::new(&config_for(&server.url()), None)?;
        match generator.generate(&request()).await {
            Err(CatalogError::Policy(msg)) => assert!(msg.contains("GEMINI_API_KEY")),
            other => panic!("Expected missing key error, got {other:?}"),
        }
        mock.assert_async().await;
        Ok(())
    }
}
