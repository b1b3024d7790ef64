//! Environment configuration for the bot binary.
//!
//! Required values missing or malformed at startup are fatal; everything
//! else falls back to a sensible default. Mirrors the deployment surface:
//!
//! - `BOT_TOKEN`: Telegram bot credential (required)
//! - `SOURCE_CHANNEL_ID`: chat id of the channel feeding the catalog
//!   (required)
//! - `REQUIRED_CHANNEL`: public handle users must join, with or without a
//!   leading `@` (required)
//! - `DATA_DIR`: durable store location; in-memory storage when unset
//! - `WEBHOOK_DOMAIN`: public HTTPS domain for push updates; long polling
//!   when unset
//! - `LISTEN_ADDR`: HTTP listen address, default `0.0.0.0:8080`

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use vidrelay_core::ChannelId;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Errors that make startup impossible.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has a value that cannot be used.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Full configuration for the bot process.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot credential.
    pub bot_token: String,
    /// The channel whose video posts feed the catalog.
    pub source_channel: ChannelId,
    /// Handle of the channel users must join, without the leading `@`.
    pub required_channel: String,
    /// Durable store location; `None` selects in-memory storage.
    pub data_dir: Option<PathBuf>,
    /// Public HTTPS domain for webhook delivery; `None` selects polling.
    pub webhook_domain: Option<String>,
    /// Address the HTTP surface (and webhook, if enabled) listens on.
    pub listen_addr: SocketAddr,
}

impl BotConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a required variable is missing or a
    /// value cannot be parsed; the caller is expected to exit.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require("BOT_TOKEN")?;

        let source_channel = require("SOURCE_CHANNEL_ID")?
            .parse::<ChannelId>()
            .map_err(|e| ConfigError::Invalid {
                name: "SOURCE_CHANNEL_ID",
                reason: e.to_string(),
            })?;

        let required_channel = normalize_handle(&require("REQUIRED_CHANNEL")?)?;

        let data_dir = optional("DATA_DIR").map(PathBuf::from);
        let webhook_domain = optional("WEBHOOK_DOMAIN");

        let listen_addr = optional("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "LISTEN_ADDR",
                reason: e.to_string(),
            })?;

        Ok(Self {
            bot_token,
            source_channel,
            required_channel,
            data_dir,
            webhook_domain,
            listen_addr,
        })
    }

    /// The URL Telegram should push updates to when webhooks are enabled.
    #[must_use]
    pub fn webhook_url(&self) -> Option<String> {
        self.webhook_domain
            .as_ref()
            .map(|domain| format!("https://{domain}/webhook"))
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Strip a leading `@` and validate the characters Telegram allows in
/// public handles, so the join link and the gate lookup are well formed.
fn normalize_handle(raw: &str) -> Result<String, ConfigError> {
    let handle = raw.trim().trim_start_matches('@');

    if handle.is_empty() {
        return Err(ConfigError::Missing("REQUIRED_CHANNEL"));
    }
    if !handle
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::Invalid {
            name: "REQUIRED_CHANNEL",
            reason: format!("'{handle}' is not a valid public channel handle"),
        });
    }

    Ok(handle.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_strips_at_prefix() {
        assert_eq!(normalize_handle("@my_channel").unwrap(), "my_channel");
        assert_eq!(normalize_handle("my_channel").unwrap(), "my_channel");
    }

    #[test]
    fn handle_rejects_urls() {
        assert!(matches!(
            normalize_handle("https://t.me/my_channel"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn bare_at_is_missing() {
        assert_eq!(
            normalize_handle("@"),
            Err(ConfigError::Missing("REQUIRED_CHANNEL"))
        );
    }

    #[test]
    fn webhook_url_shape() {
        let config = BotConfig {
            bot_token: "t".to_string(),
            source_channel: ChannelId::new(-1),
            required_channel: "c".to_string(),
            data_dir: None,
            webhook_domain: Some("bot.example.com".to_string()),
            listen_addr: DEFAULT_LISTEN_ADDR.parse().unwrap(),
        };
        assert_eq!(
            config.webhook_url().unwrap(),
            "https://bot.example.com/webhook"
        );
    }
}
