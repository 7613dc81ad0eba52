use crate::commands::{matching_commands, Command};

/// Live-filtered slash-command list shown under the prompt field.
///
/// The match list and the selection are always rebuilt together so the
/// selection can never point past the end of a freshly filtered list.
#[derive(Debug, Default)]
pub struct CommandPalette {
    matches: Vec<&'static Command>,
    selected: usize,
}

impl CommandPalette {
    /// Re-filter for `input` and move the selection back to the top.
    pub fn refresh(&mut self, input: &str) {
        self.matches = if input.starts_with('/') {
            matching_commands(input)
        } else {
            Vec::new()
        };
        self.selected = 0;
    }

    pub fn matches(&self) -> &[&'static Command] {
        &self.matches
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&'static Command> {
        self.matches.get(self.selected).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn select_next(&mut self) {
        let len = self.matches.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.matches.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }
}
