//! Telegram-backed membership gate.
//!
//! Wraps the Bot API `getChatMember` call for the configured required
//! channel and maps its answer onto the allow-list.

use async_trait::async_trait;
use teloxide::prelude::Requester;
use teloxide::types::{ChatMember, Recipient};
use teloxide::{Bot, RequestError};

use vidrelay_core::UserId;

use crate::{GateConfig, MembershipGate};

/// Membership gate backed by the Telegram `getChatMember` lookup.
pub struct ChannelGate {
    bot: Bot,
    config: GateConfig,
}

impl ChannelGate {
    /// Create a gate for the configured required channel.
    #[must_use]
    pub const fn new(bot: Bot, config: GateConfig) -> Self {
        Self { bot, config }
    }

    async fn lookup(&self, user_id: UserId) -> Result<ChatMember, RequestError> {
        self.bot
            .get_chat_member(
                Recipient::ChannelUsername(self.config.at_handle()),
                teloxide::types::UserId(user_id.get()),
            )
            .await
    }
}

#[async_trait]
impl MembershipGate for ChannelGate {
    async fn is_member(&self, user_id: UserId) -> bool {
        match self.lookup(user_id).await {
            Ok(member) => {
                let allowed = member.kind.is_owner()
                    || member.kind.is_administrator()
                    || member.kind.is_member();
                if !allowed {
                    tracing::debug!(
                        user_id = %user_id,
                        status = ?member.kind,
                        "membership denied"
                    );
                }
                allowed
            }
            Err(e) => {
                // Fail closed: a lookup failure is never treated as "member".
                tracing::warn!(
                    user_id = %user_id,
                    channel = %self.config.at_handle(),
                    error = %e,
                    "membership lookup failed, denying access"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::path_regex;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TOKEN: &str = "123456:TEST";

    fn gate_for(server: &MockServer) -> ChannelGate {
        let api_url = url::Url::parse(&server.uri()).unwrap();
        let bot = Bot::new(TOKEN).set_api_url(api_url);
        ChannelGate::new(
            bot,
            GateConfig {
                channel_handle: "required_channel".to_string(),
            },
        )
    }

    async fn mock_status(server: &MockServer, status_body: serde_json::Value) {
        Mock::given(path_regex("(?i)getchatmember$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": status_body,
            })))
            .mount(server)
            .await;
    }

    fn user_json() -> serde_json::Value {
        json!({ "id": 42, "is_bot": false, "first_name": "Test" })
    }

    #[tokio::test]
    async fn member_status_is_allowed() {
        let server = MockServer::start().await;
        mock_status(&server, json!({ "status": "member", "user": user_json() })).await;

        assert!(gate_for(&server).is_member(UserId::new(42)).await);
    }

    #[tokio::test]
    async fn left_status_is_denied() {
        let server = MockServer::start().await;
        mock_status(&server, json!({ "status": "left", "user": user_json() })).await;

        assert!(!gate_for(&server).is_member(UserId::new(42)).await);
    }

    #[tokio::test]
    async fn api_rejection_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(path_regex("(?i)getchatmember$"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found",
            })))
            .mount(&server)
            .await;

        assert!(!gate_for(&server).is_member(UserId::new(42)).await);
    }

    #[tokio::test]
    async fn server_error_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(path_regex("(?i)getchatmember$"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(!gate_for(&server).is_member(UserId::new(42)).await);
    }

    #[tokio::test]
    async fn unreachable_api_fails_closed() {
        let server = MockServer::start().await;
        let gate = gate_for(&server);
        drop(server);

        assert!(!gate.is_member(UserId::new(42)).await);
    }
}
