//! Analysis providers.
//!
//! A provider turns a prompt into an [`AnalysisResult`]. The session only
//! talks to the [`Provider`] trait; [`create_provider`] picks the concrete
//! implementation for a [`ProviderKind`].

mod azure;

pub use azure::AzureProvider;

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;

use crate::core::analysis::AnalysisResult;
use crate::core::config::Config;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Scores `prompt`. One network round trip, no retries.
    async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, AnalysisError>;

    fn kind(&self) -> ProviderKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Azure,
}

impl ProviderKind {
    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::Azure => "Azure OpenAI",
        }
    }
}

pub fn create_provider(kind: ProviderKind, config: &Config) -> Box<dyn Provider> {
    match kind {
        ProviderKind::Azure => Box::new(AzureProvider::new(config.clone())),
    }
}

/// Why an analysis did not produce a result.
#[derive(Debug)]
pub enum AnalysisError {
    /// One or more connection fields are empty.
    NotConfigured,
    /// The HTTP client could not be constructed (TLS backend, system config).
    ClientSetup { message: String },
    /// The request never produced an HTTP response (DNS, TLS, timeout, ...).
    Transport { source: reqwest::Error },
    /// The endpoint answered with a non-success status.
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The response had no assistant text to parse.
    MissingContent,
    /// The response or the assistant text was not valid JSON.
    MalformedPayload { source: serde_json::Error },
    /// `score` was missing, not a number, or outside `[0, 1]`.
    InvalidScore { score: Option<f64> },
}

impl AnalysisError {
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AnalysisError::ClientSetup { .. }
                | AnalysisError::Transport { .. }
                | AnalysisError::HttpStatus { .. }
        )
    }

    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            AnalysisError::MissingContent
                | AnalysisError::MalformedPayload { .. }
                | AnalysisError::InvalidScore { .. }
        )
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NotConfigured => write!(f, "Configuration required"),
            AnalysisError::ClientSetup { message } => {
                write!(f, "Failed to set up the HTTP client: {message}")
            }
            AnalysisError::Transport { source } if source.is_timeout() => {
                write!(f, "Request to the analysis endpoint timed out")
            }
            AnalysisError::Transport { source } => {
                write!(f, "Failed to reach the analysis endpoint: {source}")
            }
            AnalysisError::HttpStatus { status, body } => {
                let body = body.split_whitespace().collect::<Vec<_>>().join(" ");
                if body.is_empty() {
                    write!(f, "API error: {status}")
                } else {
                    write!(f, "API error: {status} - {body}")
                }
            }
            AnalysisError::MissingContent => write!(f, "No response content from the API"),
            AnalysisError::MalformedPayload { .. } => {
                write!(f, "Failed to parse API response as JSON")
            }
            AnalysisError::InvalidScore { score: Some(score) } => {
                write!(f, "Invalid score in response: {score} is outside 0..1")
            }
            AnalysisError::InvalidScore { score: None } => {
                write!(f, "Invalid score in response")
            }
        }
    }
}

impl StdError for AnalysisError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AnalysisError::Transport { source } => Some(source),
            AnalysisError::MalformedPayload { source } => Some(source),
            _ => None,
        }
    }
}
