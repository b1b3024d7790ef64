//! Channel-membership gate for vidrelay.
//!
//! Every user-facing operation of the bot is wrapped by a membership check
//! against the required channel. This crate provides:
//!
//! - [`MembershipGate`]: the trait the delivery layer depends on
//! - [`ChannelGate`]: the Telegram-backed implementation (`getChatMember`)
//! - [`MockGate`]: a canned-answer double for tests (`test-utils` feature)
//!
//! # Fail-closed
//!
//! The gate classifies the returned membership status against the allow-list
//! {owner, administrator, member}. Anything else denies access: left,
//! banned, restricted, a chat-not-found rejection, or a plain network
//! failure. An infrastructure hiccup must never silently bypass the gate.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod telegram;

pub use telegram::ChannelGate;

use async_trait::async_trait;
use vidrelay_core::UserId;

/// Configuration for the membership gate.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Public handle of the required channel, without the leading `@`.
    pub channel_handle: String,
}

impl GateConfig {
    /// The channel handle in the `@name` form the Bot API expects.
    #[must_use]
    pub fn at_handle(&self) -> String {
        format!("@{}", self.channel_handle)
    }

    /// The public join link for the channel.
    #[must_use]
    pub fn invite_url(&self) -> String {
        format!("https://t.me/{}", self.channel_handle)
    }
}

/// Decides whether a user may use the bot.
#[async_trait]
pub trait MembershipGate: Send + Sync {
    /// Whether the user currently belongs to the required channel.
    ///
    /// Fails closed: implementations return `false` on any lookup error.
    async fn is_member(&self, user_id: UserId) -> bool;
}

/// A gate with a canned answer, for exercising the delivery flow in tests.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Clone, Copy)]
pub struct MockGate {
    member: bool,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockGate {
    /// A gate that admits everyone.
    #[must_use]
    pub const fn member() -> Self {
        Self { member: true }
    }

    /// A gate that denies everyone.
    #[must_use]
    pub const fn outsider() -> Self {
        Self { member: false }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl MembershipGate for MockGate {
    async fn is_member(&self, _user_id: UserId) -> bool {
        self.member
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_config_formats() {
        let config = GateConfig {
            channel_handle: "my_channel".to_string(),
        };
        assert_eq!(config.at_handle(), "@my_channel");
        assert_eq!(config.invite_url(), "https://t.me/my_channel");
    }

    #[tokio::test]
    async fn mock_gate_answers() {
        let user = UserId::new(1);
        assert!(MockGate::member().is_member(user).await);
        assert!(!MockGate::outsider().is_member(user).await);
    }
}
