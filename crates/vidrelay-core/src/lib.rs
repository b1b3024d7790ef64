//! Core types for vidrelay.
//!
//! This crate provides the foundational identifier types used throughout the
//! vidrelay bot:
//!
//! - **`UserId`**: a Telegram user, the key for watch progress
//! - **`VideoId`**: a video post in the source channel (Telegram message id)
//! - **`ChannelId`**: a Telegram channel chat id
//!
//! # Example
//!
//! ```
//! use vidrelay_core::{ChannelId, UserId, VideoId};
//!
//! let user = UserId::new(123_456_789);
//! let video = VideoId::new(1007);
//!
//! // Channel ids come from configuration as strings
//! let channel: ChannelId = "-1001234567890".parse().unwrap();
//! assert_eq!(channel.get(), -1_001_234_567_890);
//! assert_eq!(user.to_string(), "123456789");
//! assert_eq!(video.get(), 1007);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;

pub use error::IdError;
pub use ids::{ChannelId, UserId, VideoId};
