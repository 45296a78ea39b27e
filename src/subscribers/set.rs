//! # SubscriberSet: non-blocking fan-out over multiple subscribers.
//!
//! [`SubscriberSet`] distributes each [`Event`](crate::events::Event) to
//! multiple subscribers **without awaiting** their processing.
//!
//! ## What it guarantees
//! - `emit(&Event)` returns immediately.
//! - Per-subscriber FIFO (queue order); no event is discarded while the
//!   set is alive.
//! - Panics inside subscribers are caught and reported (isolation).
//!
//! ## What it does **not** guarantee
//! - No global ordering across different subscribers.
//!
//! ## Diagram
//! ```text
//!    emit(&Event)
//!        │                        (Arc-clone per subscriber)
//!        ├────────────────► [queue S1] ─► worker S1 ─► on_event()
//!        ├────────────────► [queue S2] ─► worker S2 ─► on_event()
//!        └────────────────► [queue SN] ─► worker SN ─► on_event()
//! ```

use std::sync::Arc;

use futures::FutureExt;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::Event;

use super::Subscribe;

/// Per-subscriber channel with metadata.
struct SubscriberChannel {
    name: &'static str,
    sender: mpsc::UnboundedSender<Arc<Event>>,
}

/// Composite fan-out with per-subscriber FIFO queues and worker tasks.
pub struct SubscriberSet {
    channels: Vec<SubscriberChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SubscriberSet {
    /// Creates a new set and spawns one worker per subscriber.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>) -> Self {
        let mut channels = Vec::with_capacity(subs.len());
        let mut workers = Vec::with_capacity(subs.len());

        for sub in subs {
            let name = sub.name();
            let (tx, mut rx) = mpsc::unbounded_channel::<Arc<Event>>();
            let s = Arc::clone(&sub);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = s.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        eprintln!("[echobus] subscriber '{}' panicked: {:?}", s.name(), panic_err);
                    }
                }
            });

            channels.push(SubscriberChannel { name, sender: tx });
            workers.push(handle);
        }

        Self { channels, workers }
    }

    /// Fans one event out to all subscribers (non-blocking).
    pub fn emit(&self, event: &Event) {
        let ev = Arc::new(event.clone());
        for channel in &self.channels {
            if channel.sender.send(Arc::clone(&ev)).is_err() {
                // Worker gone; only reachable if its task was aborted.
                eprintln!("[echobus] subscriber '{}' dropped event: worker closed", channel.name);
            }
        }
    }

    /// Graceful shutdown: close all queues and await worker completion.
    ///
    /// Every event emitted before this call is processed before it returns.
    pub async fn shutdown(self) {
        drop(self.channels);
        for h in self.workers {
            let _ = h.await;
        }
    }

    /// True if there are no subscribers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct Collector {
        seen: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl Subscribe for Collector {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.seq);
        }

        fn name(&self) -> &'static str {
            "collector"
        }
    }

    #[tokio::test]
    async fn delivers_every_event_in_order_to_each_subscriber() {
        let first = Arc::new(Collector { seen: Mutex::new(Vec::new()) });
        let second = Arc::new(Collector { seen: Mutex::new(Vec::new()) });
        let set = SubscriberSet::new(vec![
            Arc::clone(&first) as Arc<dyn Subscribe>,
            Arc::clone(&second) as Arc<dyn Subscribe>,
        ]);
        assert_eq!(set.len(), 2);

        let events: Vec<Event> = (0..50).map(|_| Event::notice("tick")).collect();
        let seqs: Vec<u64> = events.iter().map(|e| e.seq).collect();
        for ev in &events {
            set.emit(ev);
        }
        set.shutdown().await;

        assert_eq!(*first.seen.lock().unwrap(), seqs);
        assert_eq!(*second.seen.lock().unwrap(), seqs);
    }

    struct Grenade;

    #[async_trait]
    impl Subscribe for Grenade {
        async fn on_event(&self, _event: &Event) {
            panic!("boom");
        }

        fn name(&self) -> &'static str {
            "grenade"
        }
    }

    #[tokio::test]
    async fn panicking_subscriber_does_not_stop_the_others() {
        let ok = Arc::new(Collector { seen: Mutex::new(Vec::new()) });
        let set = SubscriberSet::new(vec![
            Arc::new(Grenade) as Arc<dyn Subscribe>,
            Arc::clone(&ok) as Arc<dyn Subscribe>,
        ]);

        let ev = Event::notice("survives");
        set.emit(&ev);
        set.shutdown().await;

        assert_eq!(*ok.seen.lock().unwrap(), vec![ev.seq]);
    }
}
