//! Key encoding utilities for `RocksDB`.
//!
//! The time index key sorts lexicographically by post time then video id, so
//! a reverse scan of `videos_by_time` yields the catalog most recent first.

use chrono::{DateTime, Utc};
use vidrelay_core::{UserId, VideoId};

/// Encode a video key (big-endian message id).
#[must_use]
pub fn video_key(video_id: VideoId) -> [u8; 4] {
    video_id.get().to_be_bytes()
}

/// Encode a time-index key: `unix_seconds || video_id`, both big-endian.
///
/// Telegram post dates are unix seconds and never negative; anything earlier
/// than the epoch clamps to zero.
#[must_use]
pub fn time_index_key(posted_at: DateTime<Utc>, video_id: VideoId) -> [u8; 12] {
    let secs = u64::try_from(posted_at.timestamp()).unwrap_or(0);
    let mut key = [0u8; 12];
    key[..8].copy_from_slice(&secs.to_be_bytes());
    key[8..].copy_from_slice(&video_id.get().to_be_bytes());
    key
}

/// Decode a time-index key back into its post time and video id.
///
/// Returns `None` for malformed keys so a corrupt entry degrades to a skip
/// instead of a panic.
#[must_use]
pub fn decode_time_index_key(key: &[u8]) -> Option<(DateTime<Utc>, VideoId)> {
    if key.len() != 12 {
        return None;
    }

    let secs = u64::from_be_bytes(key[..8].try_into().ok()?);
    let id = i32::from_be_bytes(key[8..].try_into().ok()?);

    let posted_at = DateTime::from_timestamp(i64::try_from(secs).ok()?, 0)?;
    Some((posted_at, VideoId::new(id)))
}

/// Encode a watch-progress key (big-endian user id).
#[must_use]
pub fn progress_key(user_id: UserId) -> [u8; 8] {
    user_id.get().to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_index_key_roundtrip() {
        let posted_at = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let video_id = VideoId::new(42);

        let key = time_index_key(posted_at, video_id);
        let (decoded_at, decoded_id) = decode_time_index_key(&key).unwrap();

        assert_eq!(decoded_at, posted_at);
        assert_eq!(decoded_id, video_id);
    }

    #[test]
    fn time_index_keys_sort_by_time_then_id() {
        let earlier = DateTime::from_timestamp(1_000, 0).unwrap();
        let later = DateTime::from_timestamp(2_000, 0).unwrap();

        let a = time_index_key(earlier, VideoId::new(9));
        let b = time_index_key(later, VideoId::new(1));
        let c = time_index_key(later, VideoId::new(2));

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn malformed_key_decodes_to_none() {
        assert!(decode_time_index_key(&[1, 2, 3]).is_none());
    }
}
