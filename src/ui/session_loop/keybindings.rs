//! Turns key presses into [`AppAction`]s for whichever part of the UI owns
//! the keyboard.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::{App, AppAction, Screen};
use crate::ui::text_field::InputFields;

const PROMPT_PLACEHOLDER: &str = "Enter a prompt to analyze, or / for commands";

/// Which component receives keys. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// Farewell screen; only Ctrl+C does anything.
    Exiting,
    Settings,
    /// Prompt field with the command palette open.
    Palette,
    Prompt,
}

impl KeyContext {
    pub fn for_app(app: &App) -> Self {
        match app.screen() {
            Screen::Exiting => KeyContext::Exiting,
            Screen::Settings => KeyContext::Settings,
            Screen::Main if !app.palette_commands().is_empty() => KeyContext::Palette,
            Screen::Main => KeyContext::Prompt,
        }
    }
}

/// Rebuilds the editing surfaces whose values the app replaced.
pub fn sync_fields(app: &App, fields: &mut InputFields) {
    fields
        .prompt
        .sync(app.input(), app.input_revision(), PROMPT_PLACEHOLDER, false);

    let editor = app.settings();
    let focus = editor.focus();
    fields.setting.sync(
        editor.current_value(),
        editor.revision(),
        focus.placeholder(),
        focus.is_secret(),
    );
}

pub fn route_key(app: &App, fields: &mut InputFields, key: KeyEvent) -> Vec<AppAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![AppAction::Interrupt];
    }

    match KeyContext::for_app(app) {
        KeyContext::Exiting => Vec::new(),
        KeyContext::Settings => route_settings_key(fields, key),
        KeyContext::Palette => match key.code {
            KeyCode::Up => vec![AppAction::PaletteUp],
            KeyCode::Down => vec![AppAction::PaletteDown],
            KeyCode::Tab => vec![AppAction::PaletteAccept],
            _ => route_prompt_key(fields, key),
        },
        KeyContext::Prompt => route_prompt_key(fields, key),
    }
}

/// Pasted text goes to whichever field has focus.
pub fn route_paste(app: &App, fields: &mut InputFields, text: &str) -> Vec<AppAction> {
    match KeyContext::for_app(app) {
        KeyContext::Exiting => Vec::new(),
        KeyContext::Settings => fields
            .setting
            .insert_text(text)
            .map(|value| AppAction::SettingsFieldChanged { value })
            .into_iter()
            .collect(),
        KeyContext::Palette | KeyContext::Prompt => fields
            .prompt
            .insert_text(text)
            .map(|value| AppAction::InputChanged { value })
            .into_iter()
            .collect(),
    }
}

fn route_settings_key(fields: &mut InputFields, key: KeyEvent) -> Vec<AppAction> {
    match key.code {
        KeyCode::Tab => vec![AppAction::SettingsAdvance],
        KeyCode::Enter => vec![AppAction::SettingsConfirm],
        KeyCode::Esc => vec![AppAction::SettingsCancel],
        KeyCode::BackTab => Vec::new(),
        _ => fields
            .setting
            .handle_key(key)
            .map(|value| AppAction::SettingsFieldChanged { value })
            .into_iter()
            .collect(),
    }
}

fn route_prompt_key(fields: &mut InputFields, key: KeyEvent) -> Vec<AppAction> {
    match key.code {
        KeyCode::Enter => vec![AppAction::SubmitInput {
            value: fields.prompt.value(),
        }],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => Vec::new(),
        _ => fields
            .prompt
            .handle_key(key)
            .map(|value| AppAction::InputChanged { value })
            .into_iter()
            .collect(),
    }
}
