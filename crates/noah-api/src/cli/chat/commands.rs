//! Slash commands for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// Forget the cached session and start a new conversation.
    New,
    /// Reprint the local transcript.
    History,
    Unknown(String),
}

/// Parse user input as a slash command. `None` if it isn't one.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

pub fn help_lines() -> Vec<String> {
    vec![
        String::new(),
        format!("  {}", style("Available commands:").bold()),
        String::new(),
        format!("  {}    Show this help message", style("/help").cyan()),
        format!("  {}   Clear the screen", style("/clear").cyan()),
        format!("  {}     Start a new conversation", style("/new").cyan()),
        format!("  {} Show this conversation again", style("/history").cyan()),
        format!("  {}    End the chat", style("/exit").cyan()),
        String::new(),
    ]
}
