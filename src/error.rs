//! Error types used by the echobus runtime and the transport seam.
//!
//! This module defines two error enums:
//!
//! - [`RuntimeError`]: errors raised by the supervisor runtime itself.
//! - [`TransportError`]: failures reported by a [`GroupTransport`](crate::GroupTransport)
//!   implementation.
//!
//! Transport errors never cross the controller's request queue as panics or
//! return values; the controller converts them into error status notices and
//! terminates (or continues tearing down) locally. Both types provide
//! `as_label` / `as_message` helpers for logs.

use std::time::Duration;
use thiserror::Error;

/// # Errors produced by the supervisor runtime.
///
/// The runtime never crashes the process; the worst outcome is early
/// termination of the service with a reported reason. The only error that
/// escapes [`Supervisor::run`](crate::Supervisor::run) is a teardown that
/// outlived its grace window.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Shutdown grace period was exceeded; the bus controller was still
    /// tearing down and had to be abandoned.
    #[error("shutdown grace {grace:?} exceeded; bus controller still tearing down")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use echobus::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5) };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::GraceExceeded { grace } => {
                format!("grace exceeded after {grace:?}; controller abandoned")
            }
        }
    }
}

/// # Errors reported by a group transport.
///
/// Implementations of [`GroupTransport`](crate::GroupTransport) return these
/// from the two operations the core consumes. Creation failures are fatal to
/// the lifecycle; cleanup failures are reported and otherwise ignored.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TransportError {
    /// The named group could not be created or advertised.
    #[error("group creation failed: {reason}")]
    CreateGroup {
        /// The underlying transport failure.
        reason: String,
    },

    /// Releasing the group handle failed. Teardown continues regardless.
    #[error("group cleanup failed: {reason}")]
    Cleanup {
        /// The underlying transport failure.
        reason: String,
    },
}

impl TransportError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TransportError::CreateGroup { .. } => "transport_create_group",
            TransportError::Cleanup { .. } => "transport_cleanup",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TransportError::CreateGroup { reason } => format!("create group: {reason}"),
            TransportError::Cleanup { reason } => format!("cleanup: {reason}"),
        }
    }
}
