//! Session controller.
//!
//! [`App`] holds everything the renderer shows. It only changes through
//! [`apply_action`](actions::apply_action); side effects (network calls,
//! timers) come back out as [`AppCommand`]s for the event loop to run.

use tracing::debug;

use crate::commands::Command;
use crate::core::analysis::AnalysisResult;
use crate::core::config::{Config, ConfigStore};
use crate::core::providers::ProviderKind;

pub mod actions;
pub mod palette;
pub mod settings;

pub use actions::{apply_action, apply_actions, AppAction, AppActionDispatcher, AppCommand};
pub use palette::CommandPalette;
pub use settings::SettingsEditor;

const ANALYZING_VERBS: &[&str] = &[
    "Analyzing",
    "Adapting",
    "Evaluating",
    "Examining",
    "Inspecting",
    "Scrutinizing",
    "Assessing",
    "Dissecting",
    "Appraising",
    "Studying",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Main,
    Settings,
    /// Farewell screen shown for a moment before the process exits.
    Exiting,
}

/// Everything a spawned analysis needs, captured at submit time.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub token: u64,
    pub prompt: String,
    pub config: Config,
    pub provider_kind: ProviderKind,
}

/// Tracks the one analysis allowed in flight.
///
/// Each submission gets a fresh token; a completion is only accepted when it
/// carries the token of the request still in flight.
#[derive(Debug, Default)]
struct AnalysisSlot {
    last_token: u64,
    in_flight: Option<u64>,
}

impl AnalysisSlot {
    fn begin(&mut self) -> u64 {
        self.last_token += 1;
        self.in_flight = Some(self.last_token);
        self.last_token
    }

    fn finish(&mut self, token: u64) -> bool {
        if self.in_flight == Some(token) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    fn is_active(&self) -> bool {
        self.in_flight.is_some()
    }
}

pub struct App {
    screen: Screen,
    exit_requested: bool,
    input: String,
    input_revision: u64,
    config: Config,
    config_store: ConfigStore,
    provider_kind: ProviderKind,
    config_required: bool,
    last_result: Option<AnalysisResult>,
    last_error: Option<String>,
    analysis: AnalysisSlot,
    analyzing_verb: &'static str,
    spinner_frame: usize,
    palette: CommandPalette,
    settings: SettingsEditor,
}

impl App {
    /// Builds a session backed by `store`, loading whatever config it holds.
    pub fn new(config_store: ConfigStore, provider_kind: ProviderKind) -> Self {
        let config = config_store.load();
        debug!(
            path = %config_store.path().display(),
            configured = config.is_configured(),
            "session started"
        );
        Self {
            screen: Screen::Main,
            exit_requested: false,
            input: String::new(),
            input_revision: 0,
            config,
            config_store,
            provider_kind,
            config_required: false,
            last_result: None,
            last_error: None,
            analysis: AnalysisSlot::default(),
            analyzing_verb: ANALYZING_VERBS[0],
            spinner_frame: 0,
            palette: CommandPalette::default(),
            settings: SettingsEditor::default(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_exiting(&self) -> bool {
        self.screen == Screen::Exiting
    }

    /// Set once the session is over and the loop should tear down.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Bumped whenever the input buffer is replaced programmatically, so the
    /// text field can be rebuilt with the cursor at the end.
    pub fn input_revision(&self) -> u64 {
        self.input_revision
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_store(&self) -> &ConfigStore {
        &self.config_store
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider_kind
    }

    pub fn config_required(&self) -> bool {
        self.config_required
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis.is_active()
    }

    pub fn analyzing_verb(&self) -> &'static str {
        self.analyzing_verb
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn settings(&self) -> &SettingsEditor {
        &self.settings
    }

    pub fn palette(&self) -> &CommandPalette {
        &self.palette
    }

    /// The palette is shown on the main screen while the buffer starts with
    /// `/` and no analysis is running.
    pub fn palette_visible(&self) -> bool {
        self.screen == Screen::Main && !self.is_analyzing() && self.input.starts_with('/')
    }

    /// Commands to list under the prompt, empty when the palette is hidden.
    pub fn palette_commands(&self) -> &[&'static Command] {
        if self.palette_visible() {
            self.palette.matches()
        } else {
            &[]
        }
    }

    /// Replaces the buffer from code (not from typing) and re-filters the palette.
    fn replace_input(&mut self, value: String) {
        self.input = value;
        self.input_revision += 1;
        self.palette.refresh(&self.input);
    }

    fn clear_analysis(&mut self) {
        self.last_result = None;
        self.last_error = None;
    }
}

fn pick_analyzing_verb() -> &'static str {
    let roll = getrandom::u32().unwrap_or(0) as usize;
    ANALYZING_VERBS[roll % ANALYZING_VERBS.len()]
}
