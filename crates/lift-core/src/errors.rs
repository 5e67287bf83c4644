//! Cross-cutting error types for postlift.
//!
//! Remote and migration errors live in `lift-cms` and `lift-migrate`; this
//! module only covers the phase state machine.

use thiserror::Error;

/// Errors raised by domain types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A phase transition was attempted out of order.
    #[error("Invalid phase transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
