//! Errors for identifier parsing.

use thiserror::Error;

/// Errors that can occur when parsing an identifier from a string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The value is not a decimal integer.
    #[error("not a valid integer id")]
    NotAnInteger,

    /// The value does not fit the numeric range of this id type.
    #[error("value out of range for this id type")]
    OutOfRange,
}
