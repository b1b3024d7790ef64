//! Identifier types for vidrelay.
//!
//! All ids are assigned by Telegram and treated as opaque by the rest of the
//! system; the numeric representations only matter at the transport edge and
//! in storage keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdError;

/// A Telegram user id.
///
/// Telegram user ids are positive and fit in 52 bits; `u64` covers them with
/// room to spare. In a private chat the chat id equals the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Create a `UserId` from a raw Telegram user id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Return the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i128 = s.parse().map_err(|_| IdError::NotAnInteger)?;
        let value = u64::try_from(raw).map_err(|_| IdError::OutOfRange)?;
        Ok(Self(value))
    }
}

/// A video in the source channel, identified by its Telegram message id.
///
/// Message ids are stable and unique within a chat, which makes them a
/// sufficient catalog key for a single-channel feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(i32);

impl VideoId {
    /// Create a `VideoId` from a raw Telegram message id.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Return the raw message id.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VideoId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i128 = s.parse().map_err(|_| IdError::NotAnInteger)?;
        let value = i32::try_from(raw).map_err(|_| IdError::OutOfRange)?;
        Ok(Self(value))
    }
}

/// A Telegram channel chat id.
///
/// Channel ids are negative (`-100`-prefixed in the Bot API); this type keeps
/// the raw `i64` exactly as Telegram reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(i64);

impl ChannelId {
    /// Create a `ChannelId` from a raw Telegram chat id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Return the raw chat id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChannelId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i128 = s.parse().map_err(|_| IdError::NotAnInteger)?;
        let value = i64::try_from(raw).map_err(|_| IdError::OutOfRange)?;
        Ok(Self(value))
    }
}
