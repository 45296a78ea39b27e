//! # EchoService: the single remote capability.
//!
//! [`EchoService`] answers the one wire-visible operation, `ping`, by
//! returning its input unchanged. Its only side effect is reporting the
//! traffic: a receipt event before handling, a reply event after.
//!
//! The service is stateless beyond its [`EventSink`] clone, so concurrent
//! invocations from any transport context need no synchronization. Both
//! events of a call are published from the same invocation in order, which
//! gives the per-call guarantee: the receipt is always delivered before the
//! reply. Events from different concurrent calls may interleave.
//!
//! Calls that arrive after a disconnect has begun are tolerated: the service
//! still echoes, the events land in a channel nobody may be reading anymore,
//! and nothing about the terminated lifecycle is revived.

use async_trait::async_trait;

use crate::events::{Event, EventSink};
use crate::transport::EchoCapability;

/// Stateless echo capability.
///
/// Registered with the transport under the configured service path while
/// the group is being served.
pub struct EchoService {
    sink: EventSink,
}

impl EchoService {
    /// Creates a service reporting through the given sink.
    pub fn new(sink: EventSink) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl EchoCapability for EchoService {
    async fn ping(&self, text: String) -> String {
        self.sink.publish(Event::ping_received(text.as_str()));
        self.sink.publish(Event::ping_replied(text.as_str()));
        text
    }
}
