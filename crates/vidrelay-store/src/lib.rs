//! Catalog and watch-progress storage for vidrelay.
//!
//! This crate provides the two ledgers the bot lives on: the **video
//! catalog** (every video ever observed in the source channel, ordered most
//! recent first) and **watch progress** (the set of videos already delivered
//! to each user). Both are exposed through the [`Store`] trait with two
//! implementations:
//!
//! - [`RocksStore`]: durable, backed by `RocksDB` with column families for
//!   the primary records and a descending-timestamp index
//! - [`MemoryStore`]: volatile, process-lifetime only
//!
//! [`open_store`] picks the implementation once at startup: if no data
//! directory is configured, or the database cannot be opened, the process
//! runs on the volatile store for its whole lifetime. Callers never see the
//! difference.
//!
//! # Degraded writes
//!
//! `Store` methods do not return errors. A durable backend failure after
//! startup degrades rather than propagates: catalog writes still land in the
//! in-memory ordering mirror, failed progress writes are logged and dropped
//! (the user may see that video again), and failed progress reads come back
//! as an empty set. A repeat delivery is livable; a crashed event handler is
//! not.
//!
//! # Example
//!
//! ```no_run
//! use vidrelay_store::open_store;
//!
//! let store = open_store(None);
//! assert_eq!(store.catalog_size(), 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod memory;
pub mod rocks;
pub mod schema;
pub mod types;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use rocks::RocksStore;
pub use types::VideoRecord;

use vidrelay_core::{UserId, VideoId};

/// Which backend the process is running on.
///
/// Selected once at startup and reported by the HTTP status surface; it has
/// no influence on the [`Store`] contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// `RocksDB`-backed storage that survives restarts.
    Durable,
    /// In-memory storage, lost when the process exits.
    Volatile,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Durable => f.write_str("durable"),
            Self::Volatile => f.write_str("volatile"),
        }
    }
}

/// The storage trait covering the catalog and watch-progress ledgers.
///
/// All methods are infallible from the caller's point of view; backend
/// failures are logged and degrade per the method contracts below. The
/// implementations are safe to share across concurrently handled updates.
pub trait Store: Send + Sync {
    /// Record a video observed in the source channel.
    ///
    /// Idempotent upsert: re-observing an existing video id never creates a
    /// duplicate, though its timestamp may be refreshed. The cached ordering
    /// is updated so a subsequent [`Store::list_ordered`] reflects the entry
    /// even when the durable backend rejected the write.
    fn record_video(&self, video: &VideoRecord);

    /// The catalog ids, most recent first.
    ///
    /// Served from the in-memory ordering cache; O(catalog) to clone, no
    /// backend round trip.
    fn list_ordered(&self) -> Vec<VideoId>;

    /// Add a video to a user's watched set.
    ///
    /// Idempotent. On a durable write failure the event is logged and the
    /// progress for this delivery is lost; the in-memory mirror is *not*
    /// updated behind the backend's back, so what the store reports always
    /// matches what was actually persisted.
    fn mark_watched(&self, user_id: UserId, video_id: VideoId);

    /// A user's full watched set, empty if the user is unknown.
    ///
    /// On a durable read failure, returns an empty set: risking a repeat
    /// delivery beats blocking the user.
    fn get_watched(&self, user_id: UserId) -> HashSet<VideoId>;

    /// Number of videos in the catalog.
    fn catalog_size(&self) -> usize;

    /// Which backend this store runs on.
    fn mode(&self) -> StorageMode;
}

/// Open the process-wide store.
///
/// With a data directory, attempts to open the durable backend and falls
/// back to the volatile store if that fails; without one, goes straight to
/// volatile. The choice is permanent for the process lifetime; there is no
/// later upgrade to durable mode.
pub fn open_store(data_dir: Option<&Path>) -> Arc<dyn Store> {
    match data_dir {
        Some(path) => match RocksStore::open(path) {
            Ok(store) => {
                tracing::info!(
                    path = %path.display(),
                    videos = store.catalog_size(),
                    "durable store opened"
                );
                Arc::new(store)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "durable store unavailable, falling back to in-memory storage"
                );
                Arc::new(MemoryStore::new())
            }
        },
        None => {
            tracing::info!("no data directory configured, using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    }
}
