use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{AnalysisError, Provider, ProviderKind};
use crate::api::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::core::analysis::{parse_analysis_payload, AnalysisResult, RUBRIC_PROMPT};
use crate::core::config::Config;
use crate::utils::url::construct_api_url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 1000;

/// Chat-completions deployment on Azure OpenAI.
pub struct AzureProvider {
    config: Config,
    /// Holds the setup error message when the HTTP client could not be built.
    client: Result<Client, String>,
}

impl AzureProvider {
    pub fn new(config: Config) -> Self {
        Self::from_client_result(config, Client::builder().timeout(REQUEST_TIMEOUT).build())
    }

    pub(super) fn from_client_result(config: Config, client: reqwest::Result<Client>) -> Self {
        let client = client.map_err(|err| {
            warn!(error = %err, "failed to build HTTP client");
            err.to_string()
        });
        Self { config, client }
    }

    pub fn endpoint(&self) -> String {
        let path = format!(
            "openai/deployments/{}/chat/completions?api-version={}",
            self.config.deployment, self.config.api_version
        );
        construct_api_url(&self.config.url, &path)
    }

    fn request_body(prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            messages: vec![ChatMessage::system(RUBRIC_PROMPT), ChatMessage::user(prompt)],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[async_trait]
impl Provider for AzureProvider {
    async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, AnalysisError> {
        if !self.config.is_configured() {
            return Err(AnalysisError::NotConfigured);
        }

        let client = self
            .client
            .as_ref()
            .map_err(|message| AnalysisError::ClientSetup {
                message: message.clone(),
            })?;

        let endpoint = self.endpoint();
        debug!(%endpoint, prompt_chars = prompt.chars().count(), "sending analysis request");

        let response = client
            .post(&endpoint)
            .header("api-key", &self.config.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|source| AnalysisError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "analysis endpoint returned an error status");
            return Err(AnalysisError::HttpStatus { status, body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| AnalysisError::Transport { source })?;
        let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)
            .map_err(|source| AnalysisError::MalformedPayload { source })?;
        let content = completion
            .first_content()
            .ok_or(AnalysisError::MissingContent)?;

        let result = parse_analysis_payload(content)?;
        debug!(score = result.score, "analysis completed");
        Ok(result)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }
}
