//! Transcript formatting for the terminal.
//!
//! Each entry renders as a labelled block followed by its local `HH:MM`
//! timestamp. Output is returned as lines so the loop can print them above
//! the readline prompt.

use chrono::{DateTime, Local, TimeZone, Utc};
use console::style;
use noah_types::chat::Sender;

use crate::client::session::TranscriptEntry;

/// `HH:MM` in the given zone.
pub fn format_clock<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.with_timezone(tz).format("%H:%M").to_string()
}

/// Render one transcript entry.
pub fn render_entry(entry: &TranscriptEntry) -> Vec<String> {
    let clock = format_clock(&entry.at, &Local);
    let (label, time) = match entry.sender {
        Sender::User => (style("You").green().bold(), style(clock).dim()),
        Sender::Ai => (style("Noah").cyan().bold(), style(clock).dim()),
    };

    let mut lines = vec![format!("  {label} {time}")];
    lines.extend(entry.text.lines().map(|line| format!("  {line}")));
    lines.push(String::new());
    lines
}

pub fn render_transcript(entries: &[TranscriptEntry]) -> Vec<String> {
    entries.iter().flat_map(render_entry).collect()
}

pub fn thinking_line() -> String {
    format!("  {}", style("Noah is typing...").dim().italic())
}
