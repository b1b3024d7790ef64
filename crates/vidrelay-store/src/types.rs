//! Domain types stored in the database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vidrelay_core::VideoId;

/// A video observed in the source channel.
///
/// Created when a channel-post event carrying a video is seen; never mutated
/// afterwards apart from an idempotent timestamp refresh, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    /// Telegram message id of the post, the catalog key.
    pub video_id: VideoId,
    /// When the video was posted to the source channel.
    pub posted_at: DateTime<Utc>,
}

impl VideoRecord {
    /// Create a record for a channel post.
    #[must_use]
    pub const fn new(video_id: VideoId, posted_at: DateTime<Utc>) -> Self {
        Self {
            video_id,
            posted_at,
        }
    }

    /// Sort key for the most-recent-first catalog order.
    ///
    /// Ties on the post time (Telegram dates are second-granular) break on
    /// the message id, which Telegram assigns monotonically.
    pub(crate) fn order_key(&self) -> (DateTime<Utc>, i32) {
        (self.posted_at, self.video_id.get())
    }
}

/// Insert or refresh a record in a catalog kept in descending order.
///
/// Idempotent on the video id: an existing entry with the same timestamp is
/// left alone, one with a refreshed timestamp is moved to its new position.
/// Sorted insertion (rather than blind prepend) keeps the descending
/// invariant intact even when a backfilled post arrives out of order.
pub(crate) fn upsert_ordered(catalog: &mut Vec<VideoRecord>, record: VideoRecord) {
    if let Some(pos) = catalog
        .iter()
        .position(|r| r.video_id == record.video_id)
    {
        if catalog[pos].posted_at == record.posted_at {
            return;
        }
        catalog.remove(pos);
    }

    let at = catalog.partition_point(|r| r.order_key() > record.order_key());
    catalog.insert(at, record);
}
