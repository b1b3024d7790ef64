//! Update handlers: Telegram updates in, delivery events out.
//!
//! Each handler translates an update into a typed delivery event, lets the
//! service decide, and renders the outcome. Handler errors bubble to the
//! dispatcher's logging error handler; nothing here crashes the process.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::payloads::{AnswerCallbackQuerySetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use teloxide::utils::command::BotCommands;

use vidrelay_core::{ChannelId, UserId, VideoId};
use vidrelay_delivery::{DeliveryService, Event, Outcome};

use crate::config::BotConfig;
use crate::ui;

/// Commands understood in private chats.
#[derive(BotCommands, Clone, Copy)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Greet the user and explain the flow.
    Start,
    /// Deliver the next unwatched video.
    NewVideo,
}

/// Build the dispatcher handler tree.
#[must_use]
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
        .branch(Update::filter_channel_post().endpoint(handle_channel_post))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<DeliveryService>,
    config: Arc<BotConfig>,
) -> ResponseResult<()> {
    let Some(user) = private_sender(&msg) else {
        return Ok(());
    };

    let event = match cmd {
        Command::Start => Event::Start(user),
        Command::NewVideo => Event::NextVideo(user),
    };

    let outcome = service.handle(event).await;
    respond(&bot, msg.chat.id, &config, outcome).await
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    service: Arc<DeliveryService>,
    config: Arc<BotConfig>,
) -> ResponseResult<()> {
    let user = UserId::new(q.from.id.0);
    let chat = ChatId::from(q.from.id);

    match q.data.as_deref() {
        Some(ui::CALLBACK_NEXT_VIDEO) => {
            bot.answer_callback_query(q.id).await?;
            let outcome = service.handle(Event::NextVideo(user)).await;
            respond(&bot, chat, &config, outcome).await
        }
        Some(ui::CALLBACK_RETRY_JOIN) => {
            match service.handle(Event::RetryJoin(user)).await {
                Outcome::JoinConfirmed => {
                    bot.answer_callback_query(q.id)
                        .text(ui::JOIN_CONFIRMED_ALERT)
                        .show_alert(true)
                        .await?;
                    bot.send_message(chat, ui::JOIN_CONFIRMED).await?;
                }
                _ => {
                    bot.answer_callback_query(q.id)
                        .text(ui::STILL_NOT_MEMBER_ALERT)
                        .show_alert(true)
                        .await?;
                }
            }
            Ok(())
        }
        _ => {
            // Unknown button; just clear the spinner.
            bot.answer_callback_query(q.id).await?;
            Ok(())
        }
    }
}

async fn handle_channel_post(msg: Message, service: Arc<DeliveryService>) -> ResponseResult<()> {
    // Only posts carrying a video payload feed the catalog.
    if msg.video().is_none() {
        return Ok(());
    }

    service
        .handle(Event::ChannelPost {
            origin: ChannelId::new(msg.chat.id.0),
            video: VideoId::new(msg.id.0),
            posted_at: msg.date,
        })
        .await;

    Ok(())
}

/// Render an outcome into the user's chat.
async fn respond(
    bot: &Bot,
    chat: ChatId,
    config: &BotConfig,
    outcome: Outcome,
) -> ResponseResult<()> {
    match outcome {
        Outcome::Welcome => {
            bot.send_message(chat, ui::WELCOME).await?;
        }
        Outcome::JoinRequired => {
            bot.send_message(chat, ui::join_prompt_text(&config.required_channel))
                .reply_markup(ui::join_keyboard(&config.required_channel))
                .await?;
        }
        Outcome::CatalogExhausted => {
            bot.send_message(chat, ui::CATALOG_EXHAUSTED).await?;
        }
        Outcome::SendFailed => {
            bot.send_message(chat, ui::SEND_FAILED).await?;
        }
        Outcome::JoinConfirmed => {
            bot.send_message(chat, ui::JOIN_CONFIRMED).await?;
        }
        // The video itself (with its button) was already sent by the
        // transport; ingestion outcomes have no chat to answer.
        Outcome::Delivered(_) | Outcome::NotYetMember | Outcome::Recorded(_) | Outcome::Ignored => {}
    }
    Ok(())
}

/// The sender of a private-chat message, where the chat id is the user id.
///
/// Group and channel chatter is not addressed to the bot and is ignored.
fn private_sender(msg: &Message) -> Option<UserId> {
    if !msg.chat.is_private() {
        return None;
    }
    u64::try_from(msg.chat.id.0).ok().map(UserId::new)
}
