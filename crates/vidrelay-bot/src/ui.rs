//! Message texts and inline keyboards.
//!
//! All user-visible strings live here so the handlers stay logic-only.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

/// Callback data for the "next video" button under every delivered video.
pub const CALLBACK_NEXT_VIDEO: &str = "next_video";

/// Callback data for the retry button on the join prompt.
pub const CALLBACK_RETRY_JOIN: &str = "retry_join";

/// Greeting for members, sent on `/start`.
pub const WELCOME: &str = "👋 Welcome to the Video Bot!\n\n\
    Use /newvideo to get your next unwatched video, or click the \
    \"Next Video\" button under any video you receive.\n\n\
    The bot tracks your watch history so you never see the same video twice!";

/// Shown when a user has watched the entire catalog.
pub const CATALOG_EXHAUSTED: &str =
    "📭 No more videos available. You've watched everything!";

/// Shown when a delivery did not go through; nothing was recorded.
pub const SEND_FAILED: &str = "❌ Error sending the video. Please try again.";

/// Follow-up message after a successful retry.
pub const JOIN_CONFIRMED: &str =
    "✅ Great! You're now a member. Use /newvideo to get started!";

/// Callback alert after a successful retry.
pub const JOIN_CONFIRMED_ALERT: &str = "✅ Success! You can now use the bot.";

/// Callback alert when the retry still finds no membership.
pub const STILL_NOT_MEMBER_ALERT: &str = "❌ You still need to join the channel!";

/// The join prompt shown whenever the gate denies access.
#[must_use]
pub fn join_prompt_text(channel_handle: &str) -> String {
    format!(
        "⚠️ You must join our channel to use this bot.\n\n\
         Please join @{channel_handle} and then click the Retry button below."
    )
}

/// Keyboard for the join prompt: a join link plus a retry button.
///
/// # Panics
///
/// Panics if the handle does not form a valid `t.me` URL; configuration
/// validates handles at startup, so this cannot trigger for a running bot.
#[must_use]
pub fn join_keyboard(channel_handle: &str) -> InlineKeyboardMarkup {
    let join_url = Url::parse(&format!("https://t.me/{channel_handle}"))
        .expect("validated channel handle forms a valid URL");

    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::url("Join Channel", join_url)],
        vec![InlineKeyboardButton::callback(
            "✅ I Joined - Retry",
            CALLBACK_RETRY_JOIN,
        )],
    ])
}

/// The single "next video" button attached to every delivered video.
#[must_use]
pub fn next_video_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([vec![InlineKeyboardButton::callback(
        "▶️ Next Video",
        CALLBACK_NEXT_VIDEO,
    )]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn join_keyboard_links_to_channel() {
        let keyboard = join_keyboard("my_channel");

        let InlineKeyboardButtonKind::Url(url) = &keyboard.inline_keyboard[0][0].kind else {
            panic!("first row should be the join link");
        };
        assert_eq!(url.as_str(), "https://t.me/my_channel");

        let InlineKeyboardButtonKind::CallbackData(data) =
            &keyboard.inline_keyboard[1][0].kind
        else {
            panic!("second row should be the retry button");
        };
        assert_eq!(data, CALLBACK_RETRY_JOIN);
    }

    #[test]
    fn next_video_keyboard_uses_known_callback() {
        let keyboard = next_video_keyboard();

        let InlineKeyboardButtonKind::CallbackData(data) =
            &keyboard.inline_keyboard[0][0].kind
        else {
            panic!("expected a callback button");
        };
        assert_eq!(data, CALLBACK_NEXT_VIDEO);
    }

    #[test]
    fn join_prompt_names_the_channel() {
        assert!(join_prompt_text("my_channel").contains("@my_channel"));
    }
}
