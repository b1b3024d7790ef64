//! Error types for the delivery layer.

use thiserror::Error;

/// Errors reported by the transport when a send does not complete.
///
/// The state machine only distinguishes "sent" from "not sent" (an
/// unconfirmed delivery must not commit progress), so transport failures
/// collapse to a single variant carrying the underlying reason for the log.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The message copy to the user did not complete.
    #[error("send failed: {0}")]
    Send(String),
}
