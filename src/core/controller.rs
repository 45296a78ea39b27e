//! # BusController: the serialized lifecycle state machine.
//!
//! [`BusController`] owns the [`LifecycleState`] and the group handle, and
//! is the only code that talks to the [`GroupTransport`]. It runs as one
//! background task; lifecycle requests reach it through a FIFO queue and
//! are processed strictly one at a time, each to completion (including the
//! transport call it triggers) before the next is looked at.
//!
//! ## Request flow
//! ```text
//! interactive context                 background task
//!   handle.request_connect()    ──►  ┌─ recv Connect
//!   handle.request_disconnect() ──►  │   Idle → Connecting → create_group
//!        (enqueue, return)           │     ok  → Serving          (silent)
//!                                    │     err → StatusNotice, Terminated
//!                                    ├─ recv Disconnect
//!                                    │   Connecting/Serving → Disconnecting
//!                                    │     cleanup (best-effort) → Terminated
//!                                    └─ anything else → no-op
//! ```
//!
//! ## Rules
//! - Requests are processed in arrival order; no two transitions overlap.
//! - A request that does not apply to the current state is a silent no-op.
//! - Group creation failure is fatal: one error notice, then Terminated,
//!   without ever entering Serving. No retry.
//! - Teardown is best-effort: cleanup errors become error notices, and the
//!   machine reaches Terminated regardless.
//! - The group handle, if one was created, is released exactly once.
//!
//! Once Terminated the task exits; requests still queued or sent later are
//! dropped unread, which makes duplicates after the fact no-ops by
//! construction.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::state::LifecycleState;
use crate::events::{Event, EventSink};
use crate::transport::{EchoCapability, GroupHandle, GroupTransport, Registration};

/// Lifecycle commands accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Connect,
    Disconnect,
}

/// Cloneable, non-blocking front door to a [`BusController`].
///
/// Both methods enqueue and return immediately; neither blocks the calling
/// context on bus or network work. Requests sent after the controller
/// terminated are silently discarded.
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::UnboundedSender<Request>,
}

impl ControllerHandle {
    /// Requests the connect sequence: create the group and start serving.
    ///
    /// A no-op unless the controller is still Idle when the request is
    /// processed, so back-to-back connects cause exactly one group
    /// creation attempt.
    pub fn request_connect(&self) {
        let _ = self.tx.send(Request::Connect);
    }

    /// Requests teardown: unregister, release the group, terminate.
    ///
    /// A no-op if nothing was connected (Idle) or the controller already
    /// finished (Terminated).
    pub fn request_disconnect(&self) {
        let _ = self.tx.send(Request::Disconnect);
    }
}

/// Owns the lifecycle state machine and drives the group transport.
///
/// Constructed with the capability to serve and the sink to report through,
/// then consumed by [`run`](BusController::run) on a background task.
pub struct BusController {
    cfg: Config,
    transport: Arc<dyn GroupTransport>,
    capability: Arc<dyn EchoCapability>,
    sink: EventSink,
    state: LifecycleState,
    group: Option<GroupHandle>,
    rx: mpsc::UnboundedReceiver<Request>,
}

impl BusController {
    /// Creates a controller and the handle used to send it requests.
    pub fn new(
        cfg: Config,
        transport: Arc<dyn GroupTransport>,
        capability: Arc<dyn EchoCapability>,
        sink: EventSink,
    ) -> (Self, ControllerHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self {
            cfg,
            transport,
            capability,
            sink,
            state: LifecycleState::Idle,
            group: None,
            rx,
        };
        (controller, ControllerHandle { tx })
    }

    /// Processes requests until the lifecycle finishes.
    ///
    /// Exits when the state machine reaches Terminated, when every handle
    /// has been dropped, or when `token` is cancelled. The last two exits
    /// tear down a live group first, so a handle created earlier is always
    /// released on the way out.
    pub async fn run(mut self, token: CancellationToken) {
        loop {
            tokio::select! {
                biased;
                maybe = self.rx.recv() => match maybe {
                    Some(Request::Connect) => self.on_connect().await,
                    Some(Request::Disconnect) => self.on_disconnect().await,
                    None => {
                        self.on_disconnect().await;
                        break;
                    }
                },
                _ = token.cancelled() => {
                    self.on_disconnect().await;
                    break;
                }
            }
            if self.state.is_terminal() {
                break;
            }
        }
    }

    /// Moves the machine along one legal edge.
    fn advance(&mut self, next: LifecycleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
    }

    async fn on_connect(&mut self) {
        if !self.state.accepts_connect() {
            return;
        }
        self.advance(LifecycleState::Connecting);

        let registration =
            Registration::new(Arc::clone(&self.capability), self.cfg.service_path.clone());
        let created = self
            .transport
            .create_group(&self.cfg.group_prefix, &self.cfg.group_name, vec![registration])
            .await;

        match created {
            Ok(handle) => {
                // Silent on success: only failures and RPC traffic are
                // reported to the observer.
                self.group = Some(handle);
                self.advance(LifecycleState::Serving);
            }
            Err(err) => {
                self.sink.publish(Event::error_notice(format!(
                    "group creation failed for {}: {err}",
                    self.cfg.advertised_identity()
                )));
                self.advance(LifecycleState::Terminated);
            }
        }
    }

    async fn on_disconnect(&mut self) {
        if !self.state.accepts_disconnect() {
            return;
        }
        self.advance(LifecycleState::Disconnecting);

        if let Some(handle) = self.group.take() {
            if let Err(err) = self.transport.cleanup(handle).await {
                self.sink.publish(Event::error_notice(format!(
                    "cleanup of {} failed: {err}",
                    self.cfg.advertised_identity()
                )));
            }
        }
        self.advance(LifecycleState::Terminated);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::error::TransportError;
    use crate::events::{EventKind, EventStream};
    use crate::service::EchoService;

    #[derive(Default)]
    struct RecordingTransport {
        fail_create: bool,
        fail_cleanup: bool,
        creates: AtomicUsize,
        cleanups: AtomicUsize,
        identity: Mutex<Option<(String, String)>>,
        paths: Mutex<Vec<String>>,
        released: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl GroupTransport for RecordingTransport {
        async fn create_group(
            &self,
            prefix: &str,
            name: &str,
            registrations: Vec<Registration>,
        ) -> Result<GroupHandle, TransportError> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            *self.identity.lock().unwrap() = Some((prefix.to_string(), name.to_string()));
            *self.paths.lock().unwrap() =
                registrations.iter().map(|r| r.path().to_string()).collect();
            if self.fail_create {
                return Err(TransportError::CreateGroup { reason: "no adapter".into() });
            }
            Ok(GroupHandle::new(7))
        }

        async fn cleanup(&self, handle: GroupHandle) -> Result<(), TransportError> {
            self.cleanups.fetch_add(1, Ordering::SeqCst);
            self.released.lock().unwrap().push(handle.id());
            if self.fail_cleanup {
                return Err(TransportError::Cleanup { reason: "link lost".into() });
            }
            Ok(())
        }
    }

    struct NullCapability;

    #[async_trait]
    impl EchoCapability for NullCapability {
        async fn ping(&self, text: String) -> String {
            text
        }
    }

    fn spawn_controller(
        transport: Arc<RecordingTransport>,
        capability: Arc<dyn EchoCapability>,
    ) -> (JoinHandle<()>, ControllerHandle, EventStream, CancellationToken) {
        let (sink, stream) = EventSink::channel();
        let (controller, handle) =
            BusController::new(Config::default(), transport, capability, sink);
        let token = CancellationToken::new();
        let task = tokio::spawn(controller.run(token.clone()));
        (task, handle, stream, token)
    }

    fn drain(stream: &mut EventStream) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(ev) = stream.try_recv() {
            events.push(ev);
        }
        events
    }

    #[tokio::test]
    async fn connect_then_disconnect_walks_the_full_cycle() {
        let transport = Arc::new(RecordingTransport::default());
        let (task, handle, mut stream, _token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_connect();
        handle.request_disconnect();
        task.await.unwrap();

        assert_eq!(transport.creates.load(Ordering::SeqCst), 1);
        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 1);
        assert_eq!(*transport.released.lock().unwrap(), vec![7]);
        let cfg = Config::default();
        assert_eq!(
            *transport.identity.lock().unwrap(),
            Some((cfg.group_prefix.clone(), cfg.group_name.clone()))
        );
        assert_eq!(*transport.paths.lock().unwrap(), vec![cfg.service_path]);
        // Successful connect and teardown are silent.
        assert!(drain(&mut stream).is_empty());
    }

    #[tokio::test]
    async fn duplicate_connect_creates_the_group_once() {
        let transport = Arc::new(RecordingTransport::default());
        let (task, handle, mut stream, _token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_connect();
        handle.request_connect();
        handle.request_disconnect();
        task.await.unwrap();

        assert_eq!(transport.creates.load(Ordering::SeqCst), 1);
        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 1);
        assert!(drain(&mut stream).is_empty());
    }

    #[tokio::test]
    async fn disconnect_before_connect_is_a_noop() {
        let transport = Arc::new(RecordingTransport::default());
        let (task, handle, mut stream, _token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_disconnect();
        drop(handle);
        task.await.unwrap();

        assert_eq!(transport.creates.load(Ordering::SeqCst), 0);
        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 0);
        assert!(drain(&mut stream).is_empty());
    }

    #[tokio::test]
    async fn creation_failure_is_fatal_and_reported_once() {
        let transport = Arc::new(RecordingTransport {
            fail_create: true,
            ..RecordingTransport::default()
        });
        let (task, handle, mut stream, _token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_connect();
        task.await.unwrap();

        let events = drain(&mut stream);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::StatusNotice);
        assert!(events[0].is_error);
        assert_eq!(transport.creates.load(Ordering::SeqCst), 1);
        // The service was never registered, so there is nothing to release.
        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 0);

        // The machine is finished; late requests go nowhere.
        handle.request_connect();
        handle.request_disconnect();
        assert_eq!(transport.creates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cleanup_failure_still_reaches_terminated() {
        let transport = Arc::new(RecordingTransport {
            fail_cleanup: true,
            ..RecordingTransport::default()
        });
        let (task, handle, mut stream, _token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_connect();
        handle.request_disconnect();
        task.await.unwrap();

        let events = drain(&mut stream);
        assert_eq!(events.len(), 1);
        assert!(events[0].is_error);
        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_releases_a_live_group() {
        let transport = Arc::new(RecordingTransport::default());
        let (task, handle, _stream, token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_connect();
        while transport.creates.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        token.cancel();
        task.await.unwrap();

        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 1);
        assert_eq!(*transport.released.lock().unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn dropping_every_handle_tears_down() {
        let transport = Arc::new(RecordingTransport::default());
        let (task, handle, _stream, _token) =
            spawn_controller(Arc::clone(&transport), Arc::new(NullCapability));

        handle.request_connect();
        drop(handle);
        task.await.unwrap();

        assert_eq!(transport.creates.load(Ordering::SeqCst), 1);
        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn serving_window_scenario_with_concurrent_pings() {
        let (sink, mut stream) = EventSink::channel();
        let service = Arc::new(EchoService::new(sink.clone()));
        let transport = Arc::new(RecordingTransport::default());
        let (controller, handle) = BusController::new(
            Config::default(),
            Arc::clone(&transport) as Arc<dyn GroupTransport>,
            Arc::clone(&service) as Arc<dyn EchoCapability>,
            sink,
        );
        let token = CancellationToken::new();
        let task = tokio::spawn(controller.run(token));

        handle.request_connect();
        while transport.creates.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        // Two peers call concurrently while the group is served.
        let a = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.ping("hello".to_string()).await }
        });
        let b = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.ping("world".to_string()).await }
        });
        assert_eq!(a.await.unwrap(), "hello");
        assert_eq!(b.await.unwrap(), "world");

        handle.request_disconnect();
        task.await.unwrap();

        assert_eq!(transport.cleanups.load(Ordering::SeqCst), 1);

        let events = drain(&mut stream);
        assert_eq!(events.len(), 4);
        for text in ["hello", "world"] {
            let received = events
                .iter()
                .position(|e| e.kind == EventKind::PingReceived && e.text.as_deref() == Some(text))
                .unwrap();
            let replied = events
                .iter()
                .position(|e| e.kind == EventKind::PingReplied && e.text.as_deref() == Some(text))
                .unwrap();
            assert!(received < replied, "reply for {text:?} preceded its receipt");
        }
        // Delivery order matches publication order.
        for pair in events.windows(2) {
            assert!(pair[0].seq < pair[1].seq);
        }
    }
}
