#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Settings,
    Default,
    Clear,
    Exit,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: CommandKind,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

/// Exact, case-sensitive lookup by full name (including the leading `/`).
pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands().iter().find(|command| command.name == name)
}

/// Commands whose name starts with `prefix`, ignoring case, in registration order.
pub fn matching_commands(prefix: &str) -> Vec<&'static Command> {
    let prefix = prefix.to_lowercase();
    all_commands()
        .iter()
        .filter(|command| command.name.to_lowercase().starts_with(&prefix))
        .collect()
}

const COMMANDS: &[Command] = &[
    Command {
        name: "/settings",
        help: "Configure API settings",
        kind: CommandKind::Settings,
    },
    Command {
        name: "/default",
        help: "Reset settings to defaults",
        kind: CommandKind::Default,
    },
    Command {
        name: "/clear",
        help: "Clear current analysis",
        kind: CommandKind::Clear,
    },
    Command {
        name: "/exit",
        help: "Exit the application",
        kind: CommandKind::Exit,
    },
];
