//! Welcome banner for chat sessions.

use console::style;

/// Banner lines shown when the chat starts.
pub fn welcome_banner(server_url: &str, session_id: Option<&str>) -> Vec<String> {
    let session = match session_id {
        Some(id) => style(short_id(id)).dim().to_string(),
        None => style("new").dim().to_string(),
    };

    vec![
        String::new(),
        format!("  {} {}", style("Noah").cyan().bold(), style("Your e-commerce assistant").dim()),
        String::new(),
        format!("  {}   {}", style("Server:").bold(), style(server_url).dim()),
        format!("  {}  {}", style("Session:").bold(), session),
        String::new(),
        format!("  {}", style("Type /help for commands, Ctrl+D to exit").dim()),
        format!("  {}", style("---").dim()),
    ]
}

/// Shown instead of a transcript when there is nothing to replay.
pub fn empty_state() -> Vec<String> {
    vec![
        format!("  {}", style("Welcome! 👋").bold()),
        format!("  {}", style("How can I assist you today?").dim()),
        String::new(),
    ]
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
