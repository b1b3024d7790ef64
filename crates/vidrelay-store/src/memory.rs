//! Volatile in-memory storage implementation.
//!
//! Used when no data directory is configured or the durable backend could
//! not be opened at startup. Everything is lost when the process exits; the
//! catalog refills as new channel posts arrive.

use std::collections::{HashMap, HashSet};

use parking_lot::RwLock;

use vidrelay_core::{UserId, VideoId};

use crate::types::{upsert_ordered, VideoRecord};
use crate::{StorageMode, Store};

/// In-memory storage implementation.
///
/// The volatile twin of [`crate::RocksStore`]: same ordering behavior, no
/// backend to fail, so none of the degraded-write paths apply.
#[derive(Default)]
pub struct MemoryStore {
    catalog: RwLock<Vec<VideoRecord>>,
    watched: RwLock<HashMap<UserId, HashSet<VideoId>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn record_video(&self, video: &VideoRecord) {
        upsert_ordered(&mut self.catalog.write(), video.clone());
    }

    fn list_ordered(&self) -> Vec<VideoId> {
        self.catalog.read().iter().map(|r| r.video_id).collect()
    }

    fn mark_watched(&self, user_id: UserId, video_id: VideoId) {
        self.watched
            .write()
            .entry(user_id)
            .or_default()
            .insert(video_id);
    }

    fn get_watched(&self, user_id: UserId) -> HashSet<VideoId> {
        self.watched
            .read()
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn catalog_size(&self) -> usize {
        self.catalog.read().len()
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Volatile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn record(id: i32, secs: i64) -> VideoRecord {
        VideoRecord::new(
            VideoId::new(id),
            DateTime::from_timestamp(secs, 0).unwrap(),
        )
    }

    #[test]
    fn orders_most_recent_first() {
        let store = MemoryStore::new();

        store.record_video(&record(1, 100));
        store.record_video(&record(2, 200));
        store.record_video(&record(3, 300));

        assert_eq!(
            store.list_ordered(),
            vec![VideoId::new(3), VideoId::new(2), VideoId::new(1)]
        );
    }

    #[test]
    fn record_video_is_idempotent() {
        let store = MemoryStore::new();

        store.record_video(&record(1, 100));
        store.record_video(&record(1, 100));

        assert_eq!(store.catalog_size(), 1);
    }

    #[test]
    fn backfill_keeps_descending_order() {
        let store = MemoryStore::new();

        store.record_video(&record(2, 200));
        store.record_video(&record(3, 300));
        store.record_video(&record(1, 100));

        assert_eq!(
            store.list_ordered(),
            vec![VideoId::new(3), VideoId::new(2), VideoId::new(1)]
        );
    }

    #[test]
    fn watched_sets_are_per_user() {
        let store = MemoryStore::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);

        store.mark_watched(alice, VideoId::new(7));
        store.mark_watched(alice, VideoId::new(7));

        assert_eq!(store.get_watched(alice).len(), 1);
        assert!(store.get_watched(bob).is_empty());
    }

    #[test]
    fn mode_is_volatile() {
        let store = MemoryStore::new();
        assert_eq!(store.mode(), StorageMode::Volatile);
    }
}
