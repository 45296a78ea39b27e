//! # Supervisor: interactive-context owner of the service.
//!
//! The [`Supervisor`] wires the pieces together and mirrors what an
//! interactive front-end does with this service: start it when the screen
//! comes up, render its activity feed, and disconnect when the user leaves.
//!
//! ## Key responsibilities
//! - spawn the [`BusController`] on its background task and issue Connect
//!   at startup
//! - consume the [`EventStream`] and fan events out to subscribers, in
//!   publication order, off the publishers' contexts
//! - on a termination signal (or a caller-supplied shutdown future), issue
//!   Disconnect and wait up to [`Config::grace`] for teardown
//! - drain the event feed so nothing reported before termination is lost
//!
//! ## High-level flow
//! ```text
//! run():
//!   EventSink/EventStream ── channel
//!   EchoService(sink) ── the served capability
//!   BusController::run(token) ── spawned background task
//!   handle.request_connect()
//!
//!   select:
//!     shutdown signal ──► handle.request_disconnect()
//!                         wait grace ──► (overrun: cancel token,
//!                                         RuntimeError::GraceExceeded)
//!     controller ended ──► (fatal startup failure already reported)
//!
//!   drain listener ──► SubscriberSet::shutdown()
//! ```

use std::future::Future;
use std::sync::Arc;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::controller::BusController;
use crate::core::shutdown;
use crate::error::RuntimeError;
use crate::events::{EventSink, EventStream};
use crate::service::EchoService;
use crate::subscribers::{Subscribe, SubscriberSet};
use crate::transport::GroupTransport;

use super::builder::SupervisorBuilder;

/// Coordinates the bus controller, the echo service, and event delivery.
pub struct Supervisor {
    cfg: Config,
    transport: Arc<dyn GroupTransport>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl Supervisor {
    /// Creates a supervisor with the given configuration, transport, and
    /// subscribers.
    pub fn new(
        cfg: Config,
        transport: Arc<dyn GroupTransport>,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        Self {
            cfg,
            transport,
            subscribers,
        }
    }

    /// Starts a [`SupervisorBuilder`].
    pub fn builder(cfg: Config, transport: Arc<dyn GroupTransport>) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg, transport)
    }

    /// Runs the service until a termination signal arrives, then tears it
    /// down gracefully.
    ///
    /// Returns `Ok(())` when the controller finished within the grace
    /// window (including the fatal-startup case, which the controller
    /// already reported through an error notice), or
    /// [`RuntimeError::GraceExceeded`] when teardown had to be abandoned.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        self.run_until(async {
            let _ = shutdown::wait_for_shutdown_signal().await;
        })
        .await
    }

    /// Like [`run`](Supervisor::run), with a caller-supplied shutdown
    /// trigger instead of OS signals.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()>,
    {
        let (sink, stream) = EventSink::channel();
        let service = Arc::new(EchoService::new(sink.clone()));
        let (controller, handle) =
            BusController::new(self.cfg.clone(), Arc::clone(&self.transport), service, sink);

        let runtime_token = CancellationToken::new();
        let drain_token = CancellationToken::new();

        let subs = SubscriberSet::new(self.subscribers.clone());
        let listener = tokio::spawn(deliver_events(stream, subs, drain_token.clone()));
        let mut controller_task = tokio::spawn(controller.run(runtime_token.clone()));

        handle.request_connect();

        let mut result = Ok(());
        tokio::select! {
            _ = shutdown => {
                handle.request_disconnect();
                if time::timeout(self.cfg.grace, &mut controller_task).await.is_err() {
                    // Teardown is stuck inside the transport. Abandon the
                    // controller task; it observes the cancellation at its
                    // next safe point.
                    runtime_token.cancel();
                    result = Err(RuntimeError::GraceExceeded { grace: self.cfg.grace });
                }
            }
            _ = &mut controller_task => {
                // The controller finished on its own: group creation
                // failed and the fatal notice is already in the feed.
            }
        }

        // Hand the already-published tail of the feed to subscribers
        // before returning.
        drain_token.cancel();
        let _ = listener.await;
        result
    }
}

/// Forwards events from the stream to the subscriber fan-out.
///
/// Runs on the interactive context until the stream closes or the drain
/// token fires; the drain path keeps delivering whatever was already
/// published, then shuts the fan-out down so every queued event is
/// processed before the supervisor returns.
async fn deliver_events(mut stream: EventStream, subs: SubscriberSet, drain: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            maybe = stream.recv() => match maybe {
                Some(ev) => subs.emit(&ev),
                None => break,
            },
            _ = drain.cancelled() => {
                stream.close();
                while let Some(ev) = stream.recv().await {
                    subs.emit(&ev);
                }
                break;
            }
        }
    }
    subs.shutdown().await;
}
