use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use tempfile::TempDir;

use crate::core::analysis::AnalysisResult;
use crate::core::app::{apply_action, App, AppAction, AppCommand};
use crate::core::config::{Config, ConfigStore};
use crate::core::providers::{AnalysisError, Provider, ProviderKind};

/// A session whose config lives in a scratch directory. Keep the `TempDir`
/// alive for as long as the app is used.
pub fn create_test_app() -> (App, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let store = ConfigStore::new(dir.path().join("config.json"));
    (App::new(store, ProviderKind::Azure), dir)
}

/// Like [`create_test_app`], with a complete connection config already saved.
pub fn create_configured_test_app() -> (App, TempDir) {
    let dir = TempDir::new().expect("temp dir");
    let store = ConfigStore::new(dir.path().join("config.json"));
    store.save(&test_config()).expect("seed config");
    (App::new(store, ProviderKind::Azure), dir)
}

pub fn test_config() -> Config {
    Config {
        url: "https://example.openai.azure.com".to_string(),
        api_key: "test-key".to_string(),
        deployment: "gpt-4o".to_string(),
        ..Config::default()
    }
}

pub fn sample_result(score: f64) -> AnalysisResult {
    AnalysisResult {
        score,
        improvements: Vec::new(),
        unclear_parts: Vec::new(),
    }
}

/// Provider that answers every prompt with a canned outcome and records
/// what it was asked.
pub struct StubProvider {
    outcome: Result<AnalysisResult, (StatusCode, String)>,
    prompts: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn returning(result: AnalysisResult) -> Self {
        Self {
            outcome: Ok(result),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with an HTTP error status and `body`.
    pub fn failing(status: StatusCode, body: &str) -> Self {
        Self {
            outcome: Err((status, body.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log").clone()
    }
}

#[async_trait]
impl Provider for StubProvider {
    async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, AnalysisError> {
        self.prompts.lock().expect("prompt log").push(prompt.to_string());
        match &self.outcome {
            Ok(result) => Ok(result.clone()),
            Err((status, body)) => Err(AnalysisError::HttpStatus {
                status: *status,
                body: body.clone(),
            }),
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Azure
    }
}

/// Runs the analysis behind a `SpawnAnalysis` command against `provider` and
/// feeds the completion back into the app, the way the session loop does.
pub async fn run_analysis_command(app: &mut App, command: AppCommand, provider: &dyn Provider) {
    let AppCommand::SpawnAnalysis(request) = command else {
        panic!("expected SpawnAnalysis, got {command:?}");
    };
    let result = provider
        .analyze(&request.prompt)
        .await
        .map_err(|err| err.to_string());
    apply_action(
        app,
        AppAction::AnalysisCompleted {
            token: request.token,
            result,
        },
    );
}
