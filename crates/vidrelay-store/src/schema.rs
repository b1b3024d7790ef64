//! Database schema definitions and column families.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary video records, keyed by `video_id`.
    pub const VIDEOS: &str = "videos";

    /// Index: videos by post time, keyed by `unix_seconds || video_id`.
    ///
    /// Iterated in reverse to rebuild the most-recent-first catalog order.
    pub const VIDEOS_BY_TIME: &str = "videos_by_time";

    /// Per-user watched sets, keyed by `user_id`.
    pub const WATCH_PROGRESS: &str = "watch_progress";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::VIDEOS, cf::VIDEOS_BY_TIME, cf::WATCH_PROGRESS]
}
