use crate::core::config::{Config, ConfigField};

/// In-progress edits on the settings screen.
///
/// The draft is a full copy of the connection config; nothing reaches the
/// store until the final field is confirmed.
#[derive(Debug, Clone)]
pub struct SettingsEditor {
    draft: Config,
    focus: ConfigField,
    revision: u64,
}

impl Default for SettingsEditor {
    fn default() -> Self {
        Self {
            draft: Config::default(),
            focus: ConfigField::Url,
            revision: 0,
        }
    }
}

impl SettingsEditor {
    /// Start a fresh edit session from the persisted config.
    pub fn begin(&mut self, config: &Config) {
        self.draft = config.clone();
        self.focus = ConfigField::Url;
        self.revision += 1;
    }

    pub fn draft(&self) -> &Config {
        &self.draft
    }

    pub fn focus(&self) -> ConfigField {
        self.focus
    }

    pub fn current_value(&self) -> &str {
        self.draft.get(self.focus)
    }

    pub fn set_current_value(&mut self, value: String) {
        self.draft.set(self.focus, value);
    }

    /// Move focus to the next field, wrapping after the last one.
    pub fn advance(&mut self) {
        self.focus = self.focus.next();
        self.revision += 1;
    }

    /// Bumped whenever the focused text field must be rebuilt.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
