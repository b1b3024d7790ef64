//! Delivery state machine and next-video selection for vidrelay.
//!
//! This crate is the bot's core: it decides, for each inbound event, whether
//! the user gets a video or a join prompt, and it is the only place that
//! mutates watch progress.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Bot surface (commands / buttons / posts)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Event
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DeliveryService                        │
//! │   gate check ─▶ selection ─▶ transport send ─▶ commit       │
//! └─────────────────────────────────────────────────────────────┘
//!          │                │                    │
//!          ▼                ▼                    ▼
//!   ┌────────────┐   ┌────────────┐      ┌────────────┐
//!   │ Membership │   │   Store    │      │ Transport  │
//!   │   Gate     │   │ (catalog + │      │ (Telegram  │
//!   │            │   │  progress) │      │  copy)     │
//!   └────────────┘   └────────────┘      └────────────┘
//! ```
//!
//! Every collaborator sits behind a trait, so the whole machine runs in
//! tests with a canned gate, the in-memory store, and a recording transport.
//!
//! # Commit ordering
//!
//! A video is marked watched only after the transport confirms the send. A
//! failed send leaves progress untouched so the video stays eligible for the
//! next attempt; the livable worst case is a duplicate delivery, never a
//! silently skipped one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod selection;
pub mod service;
pub mod types;

pub use error::TransportError;
pub use service::{DeliveryService, Transport};
pub use types::{DeliveryConfig, Event, Outcome};

// Re-export commonly used types from dependencies for convenience
pub use vidrelay_core::{ChannelId, UserId, VideoId};
