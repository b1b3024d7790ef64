//! `RocksDB` storage implementation.
//!
//! This module provides the durable [`Store`] implementation. The primary
//! video records and per-user watched sets live in `RocksDB`; the
//! most-recent-first catalog order is mirrored in memory and refreshed from
//! the `videos_by_time` index after every successful insert.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use vidrelay_core::{UserId, VideoId};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::types::{upsert_ordered, VideoRecord};
use crate::{StorageMode, Store};

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Mirror of the catalog in most-recent-first order.
    ///
    /// Kept consistent with what the process has observed even when a
    /// durable write fails, so selection never goes backwards in time.
    catalog: RwLock<Vec<VideoRecord>>,
    /// Serializes read-modify-write progress updates so concurrent
    /// deliveries to the same user cannot drop each other's mark.
    progress_write: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path and load the
    /// catalog ordering into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created; the
    /// caller is expected to fall back to the volatile store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let store = Self {
            db: Arc::new(db),
            catalog: RwLock::new(Vec::new()),
            progress_write: Mutex::new(()),
        };

        let ordered = store.load_catalog()?;
        *store.catalog.write() = ordered;

        Ok(store)
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Upsert the primary record and maintain the time index.
    fn put_video(&self, record: &VideoRecord) -> Result<()> {
        let cf_videos = self.cf(cf::VIDEOS)?;
        let cf_by_time = self.cf(cf::VIDEOS_BY_TIME)?;

        let video_key = keys::video_key(record.video_id);
        let value = Self::serialize(record)?;

        // An existing record with a different timestamp leaves a stale index
        // entry behind; find it so the batch can delete it.
        let old_posted_at = self
            .db
            .get_cf(&cf_videos, video_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<VideoRecord>(&data))
            .transpose()?
            .map(|r| r.posted_at);

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_videos, video_key, &value);

        if let Some(old) = old_posted_at {
            if old != record.posted_at {
                batch.delete_cf(&cf_by_time, keys::time_index_key(old, record.video_id));
            }
        }
        batch.put_cf(
            &cf_by_time,
            keys::time_index_key(record.posted_at, record.video_id),
            [],
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    /// Rebuild the full catalog ordering from the time index, most recent
    /// first.
    fn load_catalog(&self) -> Result<Vec<VideoRecord>> {
        let cf_by_time = self.cf(cf::VIDEOS_BY_TIME)?;

        let mut ordered = Vec::new();
        for item in self.db.iterator_cf(&cf_by_time, IteratorMode::End) {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if let Some((posted_at, video_id)) = keys::decode_time_index_key(&key) {
                ordered.push(VideoRecord::new(video_id, posted_at));
            } else {
                tracing::warn!(key_len = key.len(), "skipping malformed time index key");
            }
        }

        Ok(ordered)
    }

    fn read_watched(&self, user_id: UserId) -> Result<HashSet<VideoId>> {
        let cf_progress = self.cf(cf::WATCH_PROGRESS)?;

        self.db
            .get_cf(&cf_progress, keys::progress_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map_or_else(|| Ok(HashSet::new()), |data| Self::deserialize(&data))
    }

    fn write_watched(&self, user_id: UserId, video_id: VideoId) -> Result<()> {
        let _guard = self.progress_write.lock();

        let mut watched = self.read_watched(user_id)?;
        if !watched.insert(video_id) {
            // Already present; observably a no-op.
            return Ok(());
        }

        let cf_progress = self.cf(cf::WATCH_PROGRESS)?;
        let value = Self::serialize(&watched)?;
        self.db
            .put_cf(&cf_progress, keys::progress_key(user_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    fn record_video(&self, video: &VideoRecord) {
        match self.put_video(video) {
            Ok(()) => match self.load_catalog() {
                Ok(ordered) => *self.catalog.write() = ordered,
                Err(e) => {
                    tracing::warn!(
                        video_id = %video.video_id,
                        error = %e,
                        "catalog reload failed, patching cached order in place"
                    );
                    upsert_ordered(&mut self.catalog.write(), video.clone());
                }
            },
            Err(e) => {
                // Best-effort degraded write: the durable backend missed
                // this video, but the process keeps serving it.
                tracing::warn!(
                    video_id = %video.video_id,
                    error = %e,
                    "durable catalog write failed, updating in-memory mirror only"
                );
                upsert_ordered(&mut self.catalog.write(), video.clone());
            }
        }
    }

    fn list_ordered(&self) -> Vec<VideoId> {
        self.catalog.read().iter().map(|r| r.video_id).collect()
    }

    fn mark_watched(&self, user_id: UserId, video_id: VideoId) {
        if let Err(e) = self.write_watched(user_id, video_id) {
            // Deliberately no in-memory fallback: progress the backend did
            // not accept is lost, and the store keeps reporting only what
            // was actually persisted.
            tracing::warn!(
                user_id = %user_id,
                video_id = %video_id,
                error = %e,
                "durable progress write failed, this delivery will not be remembered"
            );
        }
    }

    fn get_watched(&self, user_id: UserId) -> HashSet<VideoId> {
        match self.read_watched(user_id) {
            Ok(watched) => watched,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "durable progress read failed, treating user as having watched nothing"
                );
                HashSet::new()
            }
        }
    }

    fn catalog_size(&self) -> usize {
        self.catalog.read().len()
    }

    fn mode(&self) -> StorageMode {
        StorageMode::Durable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tempfile::TempDir;

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn record(id: i32, secs: i64) -> VideoRecord {
        VideoRecord::new(
            VideoId::new(id),
            DateTime::from_timestamp(secs, 0).unwrap(),
        )
    }

    #[test]
    fn record_video_orders_most_recent_first() {
        let (store, _dir) = create_test_store();

        store.record_video(&record(1, 100));
        store.record_video(&record(2, 200));
        store.record_video(&record(3, 300));

        assert_eq!(
            store.list_ordered(),
            vec![VideoId::new(3), VideoId::new(2), VideoId::new(1)]
        );
        assert_eq!(store.catalog_size(), 3);
    }

    #[test]
    fn record_video_is_idempotent() {
        let (store, _dir) = create_test_store();

        store.record_video(&record(1, 100));
        let before = store.list_ordered();
        store.record_video(&record(1, 100));

        assert_eq!(store.list_ordered(), before);
        assert_eq!(store.catalog_size(), 1);
    }

    #[test]
    fn timestamp_refresh_moves_index_entry() {
        let (store, _dir) = create_test_store();

        store.record_video(&record(1, 100));
        store.record_video(&record(2, 200));
        store.record_video(&record(1, 300));

        assert_eq!(
            store.list_ordered(),
            vec![VideoId::new(1), VideoId::new(2)]
        );
    }

    #[test]
    fn unknown_user_has_empty_watched_set() {
        let (store, _dir) = create_test_store();
        assert!(store.get_watched(UserId::new(42)).is_empty());
    }

    #[test]
    fn mark_watched_is_idempotent() {
        let (store, _dir) = create_test_store();
        let user = UserId::new(42);

        store.mark_watched(user, VideoId::new(7));
        store.mark_watched(user, VideoId::new(7));
        store.mark_watched(user, VideoId::new(8));

        let watched = store.get_watched(user);
        assert_eq!(watched.len(), 2);
        assert!(watched.contains(&VideoId::new(7)));
    }

    #[test]
    fn catalog_and_progress_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let user = UserId::new(42);

        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.record_video(&record(1, 100));
            store.record_video(&record(2, 200));
            store.mark_watched(user, VideoId::new(1));
        }

        let store = RocksStore::open(dir.path()).unwrap();
        assert_eq!(
            store.list_ordered(),
            vec![VideoId::new(2), VideoId::new(1)]
        );
        assert!(store.get_watched(user).contains(&VideoId::new(1)));
    }

    #[test]
    fn backfilled_post_lands_in_order() {
        let (store, _dir) = create_test_store();

        store.record_video(&record(2, 200));
        store.record_video(&record(3, 300));
        store.record_video(&record(1, 100));

        assert_eq!(
            store.list_ordered(),
            vec![VideoId::new(3), VideoId::new(2), VideoId::new(1)]
        );
    }

    #[test]
    fn mode_is_durable() {
        let (store, _dir) = create_test_store();
        assert_eq!(store.mode(), StorageMode::Durable);
    }
}
