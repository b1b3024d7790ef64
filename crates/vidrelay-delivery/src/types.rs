//! Event and outcome types for the delivery state machine.
//!
//! Inbound Telegram updates are translated into [`Event`]s at the bot edge;
//! the service answers with an [`Outcome`] the edge renders back into
//! messages, keyboards, and callback alerts.

use chrono::{DateTime, Utc};
use vidrelay_core::{ChannelId, UserId, VideoId};

/// Configuration for the delivery service.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryConfig {
    /// The only channel whose posts feed the catalog.
    pub source_channel: ChannelId,
}

/// An inbound event that triggers the delivery state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The user opened the bot (`/start`).
    Start(UserId),
    /// The user asked for their next video (`/newvideo` or the
    /// `next_video` button).
    NextVideo(UserId),
    /// The user claims to have joined the required channel
    /// (`retry_join` button).
    RetryJoin(UserId),
    /// A video post was observed in a channel the bot is watching.
    ChannelPost {
        /// Channel the post came from; non-source channels are ignored.
        origin: ChannelId,
        /// Message id of the post.
        video: VideoId,
        /// When the post was published.
        posted_at: DateTime<Utc>,
    },
}

/// What happened to an event, for the bot edge to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Member opened the bot; show the welcome text.
    Welcome,
    /// The gate denied access; show the join prompt.
    JoinRequired,
    /// A video was sent and progress committed.
    Delivered(VideoId),
    /// The user has watched everything in the catalog.
    CatalogExhausted,
    /// The transport send failed; progress untouched, ask to retry.
    SendFailed,
    /// Retry succeeded: the user is now a member.
    JoinConfirmed,
    /// Retry failed: the user still is not a member.
    NotYetMember,
    /// A source-channel video was added to the catalog.
    Recorded(VideoId),
    /// The event required no action (e.g. a post from a foreign channel).
    Ignored,
}
