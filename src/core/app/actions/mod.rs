mod analysis;
mod input;
mod settings;

use std::time::Duration;

use tokio::sync::mpsc;

use super::{AnalysisRequest, App};
use crate::core::analysis::AnalysisResult;

/// How long the farewell screen stays up after `/exit`.
pub const EXIT_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// The user edited the prompt field.
    InputChanged {
        value: String,
    },
    SubmitInput {
        value: String,
    },
    PaletteUp,
    PaletteDown,
    PaletteAccept,
    /// The user edited the focused settings field.
    SettingsFieldChanged {
        value: String,
    },
    SettingsAdvance,
    SettingsConfirm,
    SettingsCancel,
    AnalysisCompleted {
        token: u64,
        result: Result<AnalysisResult, String>,
    },
    SpinnerTick,
    ExitTimerFired,
    Interrupt,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppAction>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, action: AppAction) {
        let _ = self.tx.send(action);
    }
}

#[derive(Debug, Clone)]
pub enum AppCommand {
    SpawnAnalysis(AnalysisRequest),
    ScheduleExit { delay: Duration },
}

pub fn apply_actions(app: &mut App, actions: impl IntoIterator<Item = AppAction>) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    // Once the farewell screen is up only the exit paths still matter.
    if app.is_exiting() && !matches!(action, AppAction::ExitTimerFired | AppAction::Interrupt) {
        return None;
    }

    match action {
        AppAction::InputChanged { .. }
        | AppAction::SubmitInput { .. }
        | AppAction::PaletteUp
        | AppAction::PaletteDown
        | AppAction::PaletteAccept => input::handle_input_action(app, action),

        AppAction::SettingsFieldChanged { .. }
        | AppAction::SettingsAdvance
        | AppAction::SettingsConfirm
        | AppAction::SettingsCancel => settings::handle_settings_action(app, action),

        AppAction::AnalysisCompleted { .. } | AppAction::SpinnerTick => {
            analysis::handle_analysis_action(app, action)
        }

        AppAction::ExitTimerFired => {
            if app.is_exiting() {
                app.exit_requested = true;
            }
            None
        }
        AppAction::Interrupt => {
            app.exit_requested = true;
            None
        }
    }
}
