use serde::{Deserialize, Serialize};
use std::path::Path;

/// API version written into fresh configurations.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// Connection settings for the analysis endpoint.
///
/// Persisted as a flat JSON object with camelCase keys. Keys missing from a
/// persisted file fall back to the default for that field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub url: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            deployment: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl Config {
    /// True when every connection field carries a value.
    pub fn is_configured(&self) -> bool {
        [&self.url, &self.api_key, &self.deployment, &self.api_version]
            .iter()
            .all(|field| !field.is_empty())
    }

    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Url => &self.url,
            ConfigField::ApiKey => &self.api_key,
            ConfigField::Deployment => &self.deployment,
            ConfigField::ApiVersion => &self.api_version,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: String) {
        match field {
            ConfigField::Url => self.url = value,
            ConfigField::ApiKey => self.api_key = value,
            ConfigField::Deployment => self.deployment = value,
            ConfigField::ApiVersion => self.api_version = value,
        }
    }
}

/// One editable connection field, in the order the settings screen walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Url,
    ApiKey,
    Deployment,
    ApiVersion,
}

impl ConfigField {
    pub const ALL: [ConfigField; 4] = [
        ConfigField::Url,
        ConfigField::ApiKey,
        ConfigField::Deployment,
        ConfigField::ApiVersion,
    ];

    pub fn index(self) -> usize {
        match self {
            ConfigField::Url => 0,
            ConfigField::ApiKey => 1,
            ConfigField::Deployment => 2,
            ConfigField::ApiVersion => 3,
        }
    }

    pub fn next(self) -> ConfigField {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn is_last(self) -> bool {
        self.index() == Self::ALL.len() - 1
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfigField::Url => "URL",
            ConfigField::ApiKey => "API Key",
            ConfigField::Deployment => "Deployment",
            ConfigField::ApiVersion => "API Version",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ConfigField::Url => "https://your-resource.openai.azure.com",
            ConfigField::ApiKey => "Your Azure API key",
            ConfigField::Deployment => "Your model deployment name",
            ConfigField::ApiVersion => DEFAULT_API_VERSION,
        }
    }

    pub fn is_secret(self) -> bool {
        matches!(self, ConfigField::ApiKey)
    }
}

pub fn path_display(path: &Path) -> String {
    if let Some(home) = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf()) {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
