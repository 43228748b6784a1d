//! Client configuration.
//!
//! Holds where the chat backend lives and how requests are made. Built with
//! the builder methods or read from the environment.

use std::time::Duration;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default connect timeout. Streams themselves are not time-limited.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "CHATSTREAM_BASE_URL";
pub const ENV_TOKEN: &str = "CHATSTREAM_TOKEN";
pub const ENV_ALLOW_WRITES: &str = "CHATSTREAM_ALLOW_WRITES";
pub const ENV_TIMEOUT_SECS: &str = "CHATSTREAM_TIMEOUT_SECS";

/// Configuration for the chat client.
///
/// # Example
///
/// ```
/// use chatstream::config::ClientConfig;
///
/// let config = ClientConfig::default()
///     .with_base_url("https://chat.example.com/")
///     .with_allow_write_operations(true);
/// assert_eq!(config.base_url, "https://chat.example.com");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Bearer token sent with every request
    pub auth_token: Option<String>,
    /// Value of `allowWriteOperations` on outgoing messages (omitted when None)
    pub allow_write_operations: Option<bool>,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            allow_write_operations: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    /// Set the bearer token.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set the write-operations flag sent with each message.
    pub fn with_allow_write_operations(mut self, allow: bool) -> Self {
        self.allow_write_operations = Some(allow);
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout_secs(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// URL of the message endpoint for a conversation.
    pub fn messages_url(&self, conversation_id: &str) -> String {
        format!(
            "{}/api/conversations/{}/messages",
            self.base_url, conversation_id
        )
    }

    /// Create config from the process environment.
    ///
    /// Reads `CHATSTREAM_BASE_URL`, `CHATSTREAM_TOKEN`,
    /// `CHATSTREAM_ALLOW_WRITES` (`1`/`true`/`0`/`false`) and
    /// `CHATSTREAM_TIMEOUT_SECS`. Unset or unparsable values keep defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(url.trim());
        }
        if let Some(token) = lookup(ENV_TOKEN).filter(|v| !v.trim().is_empty()) {
            config = config.with_auth_token(token.trim());
        }
        if let Some(allow) = lookup(ENV_ALLOW_WRITES).and_then(|v| parse_flag(&v)) {
            config = config.with_allow_write_operations(allow);
        }
        match lookup(ENV_TIMEOUT_SECS).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) => config = config.with_connect_timeout_secs(secs),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Ignoring invalid {}", ENV_TIMEOUT_SECS);
            }
            None => {}
        }

        config
    }
}

fn normalize_base_url(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
