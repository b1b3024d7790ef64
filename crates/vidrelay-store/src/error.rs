//! Error types for the storage layer.
//!
//! These errors stay inside the crate: the public [`Store`](crate::Store)
//! contract degrades instead of propagating them. They surface only from
//! [`RocksStore::open`](crate::RocksStore::open), where a failure triggers
//! the volatile fallback.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
