//! `noah history <SESSION_ID>`: print a stored conversation.

use crate::client::api::ChatClient;
use crate::client::session::TranscriptEntry;

use super::chat::renderer::render_transcript;

pub async fn print_history(server_url: &str, session_id: &str, json: bool) -> anyhow::Result<()> {
    let client = ChatClient::new(server_url)?;
    let history = client.history(session_id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.messages.is_empty() {
        println!("  No messages for session {session_id}.");
        return Ok(());
    }

    let entries: Vec<TranscriptEntry> = history
        .messages
        .into_iter()
        .map(TranscriptEntry::from)
        .collect();
    println!();
    for line in render_transcript(&entries) {
        println!("{line}");
    }
    Ok(())
}
