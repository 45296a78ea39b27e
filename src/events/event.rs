//! # Events emitted by the echo service and the bus controller.
//!
//! The [`EventKind`] enum classifies event types across two categories:
//! - **RPC traffic**: a ping arrived, a reply was returned
//! - **Status notices**: human-readable controller diagnostics, flagged as
//!   plain or error
//!
//! The [`Event`] struct carries the payload fields alongside a wall-clock
//! timestamp and a sequence number. Events are immutable once constructed.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically at construction time. Subscribers observing events in
//! delivery order see `seq` strictly increasing, because publication order
//! and construction order coincide for every publisher in this crate.
//!
//! ## Example
//! ```rust
//! use echobus::{Event, EventKind};
//!
//! let ev = Event::ping_received("hello");
//! assert_eq!(ev.kind, EventKind::PingReceived);
//! assert_eq!(ev.text.as_deref(), Some("hello"));
//! assert!(!ev.is_error);
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A peer invoked the echo capability.
    ///
    /// Sets:
    /// - `text`: the string the peer sent
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    PingReceived,

    /// The echo capability returned its reply.
    ///
    /// Always follows the matching [`PingReceived`](EventKind::PingReceived)
    /// of the same call.
    ///
    /// Sets:
    /// - `text`: the string echoed back
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    PingReplied,

    /// Controller diagnostic for the observer.
    ///
    /// Sets:
    /// - `message`: human-readable description
    /// - `is_error`: whether the notice should be surfaced to the user
    ///   rather than merely logged
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    StatusNotice,
}

/// Runtime event with payload metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Ping payload, for RPC traffic events.
    pub text: Option<Arc<str>>,
    /// Human-readable message, for status notices.
    pub message: Option<Arc<str>>,
    /// Whether a status notice reports an error.
    pub is_error: bool,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            text: None,
            message: None,
            is_error: false,
        }
    }

    /// Attaches a ping payload.
    #[inline]
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Attaches a human-readable message.
    #[inline]
    pub fn with_message(mut self, message: impl Into<Arc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Marks the event as reporting an error.
    #[inline]
    pub fn as_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    /// Creates the event for an inbound ping.
    #[inline]
    pub fn ping_received(text: impl Into<Arc<str>>) -> Self {
        Event::new(EventKind::PingReceived).with_text(text)
    }

    /// Creates the event for an echoed reply.
    #[inline]
    pub fn ping_replied(text: impl Into<Arc<str>>) -> Self {
        Event::new(EventKind::PingReplied).with_text(text)
    }

    /// Creates a plain status notice.
    #[inline]
    pub fn notice(message: impl Into<Arc<str>>) -> Self {
        Event::new(EventKind::StatusNotice).with_message(message)
    }

    /// Creates an error status notice.
    #[inline]
    pub fn error_notice(message: impl Into<Arc<str>>) -> Self {
        Event::new(EventKind::StatusNotice).with_message(message).as_error()
    }

    #[inline]
    pub fn is_status_notice(&self) -> bool {
        matches!(self.kind, EventKind::StatusNotice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase_monotonically() {
        let a = Event::new(EventKind::PingReceived);
        let b = Event::new(EventKind::PingReplied);
        let c = Event::new(EventKind::StatusNotice);
        assert!(a.seq < b.seq);
        assert!(b.seq < c.seq);
    }

    #[test]
    fn ping_constructors_set_text() {
        let rx = Event::ping_received("abc");
        let tx = Event::ping_replied("abc");
        assert_eq!(rx.kind, EventKind::PingReceived);
        assert_eq!(tx.kind, EventKind::PingReplied);
        assert_eq!(rx.text.as_deref(), Some("abc"));
        assert_eq!(tx.text.as_deref(), Some("abc"));
        assert!(!rx.is_error);
    }

    #[test]
    fn notice_constructors_set_error_flag() {
        let plain = Event::notice("connected");
        let err = Event::error_notice("boom");
        assert!(plain.is_status_notice());
        assert!(!plain.is_error);
        assert!(err.is_error);
        assert_eq!(err.message.as_deref(), Some("boom"));
    }
}
