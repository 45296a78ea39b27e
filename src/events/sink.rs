//! # Event sink: ordered, non-blocking delivery to the interactive context.
//!
//! [`EventSink`] is a thin wrapper around an unbounded [`tokio::sync::mpsc`]
//! channel. Publishing never blocks and never drops: every event enqueued
//! while the consuming [`EventStream`] is open is delivered, in FIFO order
//! per publisher.
//!
//! ## Architecture
//! ```text
//! Publishers (many):                     Consumer (one):
//!   EchoService (any context) ──┐
//!                               ├──► EventStream ──► supervisor listener
//!   BusController (background) ─┘      (mpsc, FIFO)
//! ```
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` enqueues and returns.
//! - **No silent discard**: the queue is unbounded; events are only let go
//!   once the stream has been closed during final drain.
//! - **Causal order**: a publisher's events arrive in the order it sent
//!   them, so a reply is always observed after its matching receipt.

use tokio::sync::mpsc;

use super::event::Event;

/// Publishing half of the event channel.
///
/// Cheap to clone; every clone feeds the same stream. Held by the echo
/// service and the bus controller.
#[derive(Clone, Debug)]
pub struct EventSink {
    tx: mpsc::UnboundedSender<Event>,
}

impl EventSink {
    /// Creates a connected sink/stream pair.
    pub fn channel() -> (EventSink, EventStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (EventSink { tx }, EventStream { rx })
    }

    /// Publishes an event.
    ///
    /// Returns immediately. If the stream has already been closed (final
    /// drain under way), the event is discarded; at that point the service
    /// is past Terminated and nothing is listening.
    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }
}

/// Consuming half of the event channel.
///
/// Owned by the supervisor's listener on the interactive context.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventStream {
    /// Receives the next event in publication order.
    ///
    /// Returns `None` once the channel is closed and drained.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Receives without waiting; `None` if nothing is queued right now.
    pub fn try_recv(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    /// Stops accepting new events while keeping already-queued ones
    /// readable. Used by the supervisor for the final drain.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
