//! Delivery service implementation.
//!
//! [`DeliveryService`] routes typed events through the
//! gate → selection → send → commit pipeline described in the crate docs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use vidrelay_core::{ChannelId, UserId, VideoId};
use vidrelay_gate::MembershipGate;
use vidrelay_store::{Store, VideoRecord};

use crate::error::TransportError;
use crate::selection;
use crate::types::{DeliveryConfig, Event, Outcome};

/// Sends a selected video to a user.
///
/// Abstracts the Telegram message copy so the state machine can run against
/// a recording double in tests. Success means the platform confirmed the
/// send; only then may progress be committed.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Copy the video's content from the source channel to the user's chat.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the platform did not confirm the
    /// send; the caller must leave watch progress untouched.
    async fn copy_video(&self, to: UserId, video: VideoId) -> Result<(), TransportError>;
}

/// The delivery state machine, shared by every update handler.
pub struct DeliveryService {
    store: Arc<dyn Store>,
    gate: Arc<dyn MembershipGate>,
    transport: Arc<dyn Transport>,
    config: DeliveryConfig,
}

impl DeliveryService {
    /// Create a new delivery service.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        gate: Arc<dyn MembershipGate>,
        transport: Arc<dyn Transport>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            store,
            gate,
            transport,
            config,
        }
    }

    /// Route an inbound event through the state machine.
    pub async fn handle(&self, event: Event) -> Outcome {
        match event {
            Event::Start(user) => {
                if self.gate.is_member(user).await {
                    Outcome::Welcome
                } else {
                    Outcome::JoinRequired
                }
            }
            Event::NextVideo(user) => self.deliver_next(user).await,
            Event::RetryJoin(user) => {
                if self.gate.is_member(user).await {
                    Outcome::JoinConfirmed
                } else {
                    Outcome::NotYetMember
                }
            }
            Event::ChannelPost {
                origin,
                video,
                posted_at,
            } => self.ingest(origin, video, posted_at),
        }
    }

    /// The next video this user has not seen, if any.
    #[must_use]
    pub fn next_unwatched(&self, user: UserId) -> Option<VideoId> {
        let ordered = self.store.list_ordered();
        let watched = self.store.get_watched(user);
        selection::next_unwatched(&ordered, &watched)
    }

    async fn deliver_next(&self, user: UserId) -> Outcome {
        if !self.gate.is_member(user).await {
            return Outcome::JoinRequired;
        }

        let Some(video) = self.next_unwatched(user) else {
            return Outcome::CatalogExhausted;
        };

        match self.transport.copy_video(user, video).await {
            Ok(()) => {
                // Commit only after the confirmed send.
                self.store.mark_watched(user, video);
                tracing::debug!(user_id = %user, video_id = %video, "video delivered");
                Outcome::Delivered(video)
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user,
                    video_id = %video,
                    error = %e,
                    "delivery failed, video stays eligible"
                );
                Outcome::SendFailed
            }
        }
    }

    fn ingest(&self, origin: ChannelId, video: VideoId, posted_at: DateTime<Utc>) -> Outcome {
        if origin != self.config.source_channel {
            tracing::debug!(
                origin = %origin,
                video_id = %video,
                "ignoring post from foreign channel"
            );
            return Outcome::Ignored;
        }

        self.store
            .record_video(&VideoRecord::new(video, posted_at));
        tracing::info!(video_id = %video, catalog = self.store.catalog_size(), "video recorded");
        Outcome::Recorded(video)
    }
}
