use tracing::debug;

use super::{App, AppAction, AppCommand, EXIT_DELAY};
use crate::commands::{process_input, CommandResult};
use crate::core::app::{pick_analyzing_verb, AnalysisRequest, Screen};

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    if app.screen != Screen::Main {
        return None;
    }

    match action {
        AppAction::InputChanged { value } => {
            app.input = value;
            app.config_required = false;
            app.palette.refresh(&app.input);
            None
        }
        AppAction::PaletteUp => {
            if app.palette_visible() {
                app.palette.select_previous();
            }
            None
        }
        AppAction::PaletteDown => {
            if app.palette_visible() {
                app.palette.select_next();
            }
            None
        }
        AppAction::PaletteAccept => {
            if !app.palette_visible() {
                return None;
            }
            if let Some(command) = app.palette.selected() {
                app.replace_input(command.name.to_string());
                app.config_required = false;
            }
            None
        }
        AppAction::SubmitInput { value } => handle_submit(app, &value),
        _ => unreachable!("non-input action routed to input handler"),
    }
}

fn handle_submit(app: &mut App, value: &str) -> Option<AppCommand> {
    match process_input(value) {
        CommandResult::OpenSettings => {
            app.replace_input(String::new());
            app.config_required = false;
            let persisted = app.config_store.load();
            app.settings.begin(&persisted);
            app.screen = Screen::Settings;
            None
        }
        CommandResult::ResetConfig => {
            app.replace_input(String::new());
            app.clear_analysis();
            match app.config_store.reset() {
                Ok(config) => app.config = config,
                Err(err) => {
                    app.config = Default::default();
                    app.last_error = Some(format!("Failed to reset config: {err}"));
                }
            }
            None
        }
        CommandResult::ClearAnalysis => {
            app.replace_input(String::new());
            app.clear_analysis();
            None
        }
        CommandResult::Exit => {
            app.screen = Screen::Exiting;
            Some(AppCommand::ScheduleExit { delay: EXIT_DELAY })
        }
        CommandResult::Analyze(prompt) => start_analysis(app, prompt),
        CommandResult::Ignore => None,
    }
}

fn start_analysis(app: &mut App, prompt: String) -> Option<AppCommand> {
    if app.is_analyzing() {
        return None;
    }
    if !app.config.is_configured() {
        app.config_required = true;
        return None;
    }

    app.replace_input(String::new());
    app.clear_analysis();
    app.analyzing_verb = pick_analyzing_verb();
    app.spinner_frame = 0;
    let token = app.analysis.begin();
    debug!(token, chars = prompt.chars().count(), "starting analysis");

    Some(AppCommand::SpawnAnalysis(AnalysisRequest {
        token,
        prompt,
        config: app.config.clone(),
        provider_kind: app.provider_kind,
    }))
}
