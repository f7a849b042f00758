//! Configuration types for Noah.
//!
//! `AppConfig` represents the top-level `config.toml`. Every field has a
//! default, so an empty file (or no file at all) yields a working setup.

use serde::{Deserialize, Serialize};

use crate::chat::{HistoryWindow, MAX_MESSAGE_CHARS};

/// Top-level configuration for the Noah server and terminal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite URL. `None` means `{data_dir}/noah.db`.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    4000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
        }
    }
}

/// Conversation handling limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Number of stored turns handed to the model as context.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Maximum characters accepted in a user message.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,

    /// Which end of the conversation the context window is read from.
    #[serde(default)]
    pub history_window: HistoryWindow,
}

fn default_history_limit() -> u32 {
    10
}

fn default_max_message_chars() -> usize {
    MAX_MESSAGE_CHARS
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            max_message_chars: default_max_message_chars(),
            history_window: HistoryWindow::default(),
        }
    }
}

/// External generation API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub temperature: Option<f64>,

    #[serde(default)]
    pub max_output_tokens: Option<u32>,

    /// Replaces the built-in store-support instruction when set.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
            max_output_tokens: None,
            system_prompt: None,
        }
    }
}

/// Terminal client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

fn default_server_url() -> String {
    "http://localhost:4000".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.chat.history_limit, 10);
        assert_eq!(config.chat.max_message_chars, 1000);
        assert_eq!(config.chat.history_window, HistoryWindow::Oldest);
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.client.server_url, "http://localhost:4000");
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.database_url.is_none());
        assert!(config.llm.system_prompt.is_none());
    }

    #[test]
    fn test_app_config_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[chat]
history_limit = 20
history_window = "newest"

[llm]
model = "gemini-2.5-flash"
temperature = 0.3
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chat.history_limit, 20);
        assert_eq!(config.chat.max_message_chars, 1000);
        assert_eq!(config.chat.history_window, HistoryWindow::Newest);
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.llm.temperature, Some(0.3));
        assert_eq!(config.llm.timeout_secs, 60);
    }
}
