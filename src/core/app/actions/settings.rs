use tracing::{debug, warn};

use super::{App, AppAction, AppCommand};
use crate::core::app::Screen;

pub(super) fn handle_settings_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    if app.screen != Screen::Settings {
        return None;
    }

    match action {
        AppAction::SettingsFieldChanged { value } => {
            app.settings.set_current_value(value);
        }
        AppAction::SettingsAdvance => app.settings.advance(),
        AppAction::SettingsConfirm => {
            if app.settings.focus().is_last() {
                commit_settings(app);
            } else {
                app.settings.advance();
            }
        }
        AppAction::SettingsCancel => {
            debug!("settings edit discarded");
            app.screen = Screen::Main;
        }
        _ => unreachable!("non-settings action routed to settings handler"),
    }
    None
}

fn commit_settings(app: &mut App) {
    let draft = app.settings.draft().clone();
    if let Err(err) = app.config_store.save(&draft) {
        warn!(error = %err, "failed to save config");
        app.last_error = Some(format!("Failed to save config: {err}"));
    } else {
        debug!(configured = draft.is_configured(), "config saved");
    }
    app.config = draft;
    app.screen = Screen::Main;
}
