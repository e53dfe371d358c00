//! Configuration types for relaychat.
//!
//! `RelaychatConfig` mirrors the optional `relaychat.toml` file. Every field
//! has a default so an empty file (or no file) is valid; environment
//! variables are layered on top by `relaychat-infra::config`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level configuration: relay server, upstream model, terminal client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelaychatConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Relay server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_database_url() -> String {
    "sqlite://relaychat.db?mode=rwc".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
        }
    }
}

/// Upstream generative-language API settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key; required to serve, never logged.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upstream request timeout. `None` waits until the transport gives up.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Terminal chat client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the relay API, including the `/api` prefix.
    #[serde(default = "default_relay_base_url")]
    pub relay_base_url: String,
    /// Cosmetic pause before the placeholder appears and the relay call starts.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    /// Most recent turns sent as history with each request. 0 = unlimited.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_relay_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_thinking_delay_ms() -> u64 {
    600
}

fn default_history_window() -> usize {
    100
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            relay_base_url: default_relay_base_url(),
            thinking_delay_ms: default_thinking_delay_ms(),
            history_window: default_history_window(),
        }
    }
}
