//! Built-in bot commands, answered before the reply mode.

#[cfg(test)]
mod tests;

use pigeon_core::method::BotCommand;

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
}

impl Command {
    /// Parse a command name as returned by `Message::command` (no slash,
    /// no `@botname`). Case-insensitive. Returns `None` for unknown names,
    /// which pass through to the reply mode.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            _ => None,
        }
    }

    /// Reply text for this command.
    pub fn reply(self, arg: &str) -> String {
        match self {
            Self::Start => format!("received start with arg {arg}"),
            Self::Help => help_text(),
        }
    }
}

/// Entries registered with `setMyCommands`.
pub fn menu() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Start the bot"),
        BotCommand::new("help", "List available commands"),
    ]
}

fn help_text() -> String {
    let mut out = String::from("Commands:");
    for cmd in menu() {
        out.push_str(&format!("\n/{} - {}", cmd.command, cmd.description));
    }
    out
}
