//! Main chat loop.
//!
//! Restores the cached session, replays its history, then reads lines until
//! Ctrl+D, Ctrl+C or `/exit`. Every message goes through `ClientSession`, so
//! the loop itself holds no conversation state.

use std::io::Write;
use std::path::Path;

use console::style;
use tracing::info;

use crate::client::ClientError;
use crate::client::api::ChatClient;
use crate::client::session::ClientSession;
use crate::client::session_cache::SessionCache;

use super::banner::{empty_state, welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::{render_entry, render_transcript, thinking_line};

fn emit(out: &mut impl Write, lines: &[String]) {
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
}

/// Run the interactive chat against `server_url`, caching the session
/// token under `client_dir`.
pub async fn run_chat_loop(server_url: &str, client_dir: &Path) -> anyhow::Result<()> {
    let client = ChatClient::new(server_url)?;
    let base_url = client.base_url().to_string();
    let session = ClientSession::new(client, SessionCache::new(client_dir));
    let restored = session.load().await;
    info!(restored, session_id = ?session.session_id(), "Chat session ready");

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut input, mut out) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    emit(&mut out, &welcome_banner(&base_url, session.session_id().as_deref()));
    let transcript = session.transcript();
    if transcript.is_empty() {
        emit(&mut out, &empty_state());
    } else {
        emit(&mut out, &render_transcript(&transcript));
    }

    loop {
        let text = match input.read_line().await {
            InputEvent::Eof | InputEvent::Interrupted => {
                emit(&mut out, &[format!("\n  {}", style("Session ended.").dim())]);
                break;
            }
            InputEvent::Message(text) if text.is_empty() => continue,
            InputEvent::Message(text) => text,
        };

        if let Some(command) = commands::parse(&text) {
            match command {
                ChatCommand::Help => emit(&mut out, &commands::help_lines()),
                ChatCommand::Clear => input.clear(),
                ChatCommand::Exit => {
                    emit(&mut out, &[format!("\n  {}", style("Session ended.").dim())]);
                    break;
                }
                ChatCommand::New => {
                    session.reset().await?;
                    emit(&mut out, &[format!("\n  {}\n", style("Started a new conversation.").dim())]);
                    emit(&mut out, &empty_state());
                }
                ChatCommand::History => {
                    let transcript = session.transcript();
                    if transcript.is_empty() {
                        emit(&mut out, &empty_state());
                    } else {
                        emit(&mut out, &render_transcript(&transcript));
                    }
                }
                ChatCommand::Unknown(name) => emit(
                    &mut out,
                    &[format!(
                        "\n  {} Unknown command: {}. Type /help for available commands.\n",
                        style("?").yellow().bold(),
                        style(name).dim()
                    )],
                ),
            }
            continue;
        }

        emit(&mut out, &[thinking_line()]);
        match session.send(&text).await {
            Ok(Some(reply)) => emit(&mut out, &render_entry(&reply)),
            Ok(None) => {}
            Err(ClientError::Busy) => emit(
                &mut out,
                &[format!("  {}", style("Still waiting for the last reply...").dim())],
            ),
            Err(e) => return Err(e.into()),
        }
    }

    input.flush();
    Ok(())
}
