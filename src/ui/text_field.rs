//! Single-line text fields backed by `tui-textarea`.
//!
//! The app owns the canonical string values; a [`TextField`] is only the
//! editing surface. It is rebuilt whenever the app reports a new revision
//! for its value (a programmatic replace or a focus change) and otherwise
//! left alone so the cursor survives normal typing.

use ratatui::crossterm::event::KeyEvent;
use ratatui::style::Style;
use tui_textarea::{CursorMove, Input, Key, TextArea};

use crate::ui::theme::Theme;

const MASK_CHAR: char = '*';

pub struct TextField {
    textarea: TextArea<'static>,
    revision: Option<u64>,
    text_style: Style,
    cursor_style: Style,
    placeholder_style: Style,
}

impl TextField {
    pub fn new(theme: &Theme) -> Self {
        let mut field = Self {
            textarea: TextArea::default(),
            revision: None,
            text_style: theme.input_text_style,
            cursor_style: theme.input_cursor_style,
            placeholder_style: theme.placeholder_style,
        };
        field.apply_styles();
        field
    }

    /// Rebuilds the field from `value` when `revision` differs from the one
    /// it was last built from.
    pub fn sync(&mut self, value: &str, revision: u64, placeholder: &str, secret: bool) {
        if self.revision == Some(revision) {
            return;
        }
        self.textarea = TextArea::from([value.to_string()]);
        self.apply_styles();
        self.textarea.set_placeholder_text(placeholder);
        if secret {
            self.textarea.set_mask_char(MASK_CHAR);
        }
        self.textarea.move_cursor(CursorMove::End);
        self.revision = Some(revision);
    }

    pub fn value(&self) -> String {
        self.textarea.lines().join(" ")
    }

    /// Feeds a key press to the field. Returns the new value if it changed.
    ///
    /// Keys that would split the line are swallowed.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        let input = Input::from(key);
        let splits_line = matches!(
            input,
            Input {
                key: Key::Enter,
                ..
            } | Input {
                key: Key::Char('m' | 'j'),
                ctrl: true,
                ..
            }
        );
        if splits_line {
            return None;
        }
        if self.textarea.input(input) {
            Some(self.value())
        } else {
            None
        }
    }

    /// Inserts pasted text at the cursor. Returns the new value if it changed.
    pub fn insert_text(&mut self, text: &str) -> Option<String> {
        let flattened = flatten_pasted_text(text);
        if flattened.is_empty() {
            return None;
        }
        if self.textarea.insert_str(flattened) {
            Some(self.value())
        } else {
            None
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    fn apply_styles(&mut self) {
        self.textarea.set_style(self.text_style);
        self.textarea.set_cursor_style(self.cursor_style);
        self.textarea.set_cursor_line_style(Style::default());
        self.textarea.set_placeholder_style(self.placeholder_style);
    }
}

/// The editing surfaces for the two places the user can type.
pub struct InputFields {
    pub prompt: TextField,
    pub setting: TextField,
}

impl InputFields {
    pub fn new(theme: &Theme) -> Self {
        Self {
            prompt: TextField::new(theme),
            setting: TextField::new(theme),
        }
    }
}

/// Normalises pasted text for a single-line field: line breaks and tabs
/// become spaces, other control characters are dropped.
pub fn flatten_pasted_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    unified
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn field_with(value: &str, revision: u64) -> TextField {
        let mut field = TextField::new(&Theme::mahoraga());
        field.sync(value, revision, "placeholder", false);
        field
    }

    #[test]
    fn typing_reports_new_value() {
        let mut field = field_with("/se", 1);
        assert_eq!(field.handle_key(key(KeyCode::Char('t'))), Some("/set".to_string()));
        assert_eq!(field.handle_key(key(KeyCode::Backspace)), Some("/se".to_string()));
    }

    #[test]
    fn enter_never_splits_the_line() {
        let mut field = field_with("abc", 1);
        assert_eq!(field.handle_key(key(KeyCode::Enter)), None);
        let ctrl_j = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(field.handle_key(ctrl_j), None);
        assert_eq!(field.textarea().lines().len(), 1);
        assert_eq!(field.value(), "abc");
    }

    #[test]
    fn cursor_movement_is_not_a_change() {
        let mut field = field_with("abc", 1);
        assert_eq!(field.handle_key(key(KeyCode::Left)), None);
    }

    #[test]
    fn sync_only_rebuilds_on_new_revision() {
        let mut field = field_with("abc", 1);
        field.handle_key(key(KeyCode::Char('d')));
        field.sync("abc", 1, "placeholder", false);
        assert_eq!(field.value(), "abcd");

        field.sync("/exit", 2, "placeholder", false);
        assert_eq!(field.value(), "/exit");
        // Cursor lands at the end, so typing appends.
        assert_eq!(field.handle_key(key(KeyCode::Char('!'))), Some("/exit!".to_string()));
    }

    #[test]
    fn paste_is_flattened_to_one_line() {
        let mut field = field_with("", 1);
        let value = field.insert_text("first line\r\nsecond\tline\u{7}");
        assert_eq!(value, Some("first line second line".to_string()));
        assert_eq!(field.textarea().lines().len(), 1);
    }

    #[test]
    fn empty_paste_is_ignored() {
        let mut field = field_with("abc", 1);
        assert_eq!(field.insert_text("\u{7}"), None);
        assert_eq!(field.value(), "abc");
    }
}
