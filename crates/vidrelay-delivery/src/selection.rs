//! Next-video selection.
//!
//! Pure function over the two store reads: scan the most-recent-first
//! catalog and return the first video the user has not seen. A linear scan
//! is fine: the catalog is a single channel's feed, not a media library.

use std::collections::HashSet;

use vidrelay_core::VideoId;

/// The first video in `ordered` that is not in `watched`, or `None` when
/// the user has exhausted the catalog.
///
/// Deterministic given its inputs: same catalog and same watched set always
/// pick the same video.
#[must_use]
pub fn next_unwatched(ordered: &[VideoId], watched: &HashSet<VideoId>) -> Option<VideoId> {
    ordered.iter().copied().find(|id| !watched.contains(id))
}
