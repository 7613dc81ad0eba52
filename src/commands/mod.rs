//! Slash-command interpretation for the prompt field.

mod registry;

pub use registry::{all_commands, find_command, matching_commands, Command, CommandKind};

/// What a submitted line asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    OpenSettings,
    ResetConfig,
    ClearAnalysis,
    Exit,
    /// Plain text to be scored.
    Analyze(String),
    /// Empty input or an unrecognised `/command`.
    Ignore,
}

/// Classifies a submitted line. The input is trimmed before matching.
pub fn process_input(input: &str) -> CommandResult {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return CommandResult::Ignore;
    }

    if !trimmed.starts_with('/') {
        return CommandResult::Analyze(trimmed.to_string());
    }

    match find_command(trimmed) {
        Some(command) => match command.kind {
            CommandKind::Settings => CommandResult::OpenSettings,
            CommandKind::Default => CommandResult::ResetConfig,
            CommandKind::Clear => CommandResult::ClearAnalysis,
            CommandKind::Exit => CommandResult::Exit,
        },
        None => CommandResult::Ignore,
    }
}

/// Help text listing every in-app command, for `--help`.
pub fn commands_help() -> String {
    let mut help = String::from("Commands (in app):\n");
    for command in all_commands() {
        help.push_str(&format!("  {:<11} {}\n", command.name, command.help));
    }
    help.push_str(&format!("  {:<11} {}\n", "Ctrl+C", "Exit the application"));
    help
}
