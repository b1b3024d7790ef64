//! Telegram bot surface for vidrelay.
//!
//! This crate is the thin outer shell around the delivery core: it reads
//! configuration from the environment, translates Telegram updates into
//! delivery events, renders outcomes back into messages and keyboards, and
//! serves a small HTTP status surface for operators.
//!
//! The interesting decisions (what to deliver, when to gate, when to
//! commit progress) all live in `vidrelay-delivery`; nothing here mutates
//! state directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod handlers;
pub mod http;
pub mod transport;
pub mod ui;

pub use config::{BotConfig, ConfigError};
pub use transport::TelegramTransport;
