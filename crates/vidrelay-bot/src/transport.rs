//! Telegram transport for video delivery.
//!
//! Videos are never re-uploaded: delivery is a `copyMessage` from the
//! source channel into the user's private chat, with the "next video"
//! button attached.

use async_trait::async_trait;
use teloxide::prelude::Requester;
use teloxide::payloads::CopyMessageSetters;
use teloxide::types::{ChatId, MessageId};
use teloxide::Bot;

use vidrelay_core::{ChannelId, UserId, VideoId};
use vidrelay_delivery::{Transport, TransportError};

use crate::ui;

/// [`Transport`] implementation over the Telegram Bot API.
pub struct TelegramTransport {
    bot: Bot,
    source_channel: ChannelId,
}

impl TelegramTransport {
    /// Create a transport copying from the given source channel.
    #[must_use]
    pub const fn new(bot: Bot, source_channel: ChannelId) -> Self {
        Self {
            bot,
            source_channel,
        }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn copy_video(&self, to: UserId, video: VideoId) -> Result<(), TransportError> {
        // In a private chat the chat id is the user id.
        let chat = ChatId::from(teloxide::types::UserId(to.get()));

        self.bot
            .copy_message(
                chat,
                ChatId(self.source_channel.get()),
                MessageId(video.get()),
            )
            .reply_markup(ui::next_video_keyboard())
            .await
            .map(|_| ())
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}
