//! # echobus
//!
//! **echobus** is a minimal peer-to-peer RPC service built around a supervised
//! bus lifecycle. It advertises a named group on a local ad-hoc bus, serves a
//! single remote call (echo a string back to the caller), and reports all
//! activity to observers through an ordered, asynchronous event channel.
//!
//! The group transport itself (discovery, framing, carrying bytes between
//! peers) is an external collaborator consumed through the [`GroupTransport`]
//! capability trait. This crate owns the part that is easy to get wrong:
//! the connection lifecycle state machine and the two-context coordination
//! protocol around it.
//!
//! ## Architecture
//! ```text
//!  interactive context                      background context
//! ┌──────────────────────────┐   Request   ┌──────────────────────────────┐
//! │ Supervisor               │ ──────────► │ BusController                │
//! │  - issues Connect at     │  (mpsc,     │  - owns LifecycleState       │
//! │    startup, Disconnect   │   FIFO)     │  - one request at a time     │
//! │    at shutdown           │             │  - drives GroupTransport     │
//! │  - event listener        │             │    (create_group / cleanup)  │
//! │      │                   │             └──────────┬───────────────────┘
//! │      ▼                   │                        │ create_group
//! │  SubscriberSet fan-out   │                        ▼
//! │   [LogWriter] [custom]   │             ┌──────────────────────────────┐
//! └──────────▲───────────────┘             │ GroupTransport (external)    │
//!            │ Event (mpsc, FIFO,          │  peers join, calls arrive    │
//!            │  never dropped)             └──────────┬───────────────────┘
//!            │                                        │ Ping(text)
//!  ┌─────────┴──────────┐                             ▼
//!  │ EventSink          │ ◄────────────── EchoService::ping
//!  └────────────────────┘   PingReceived, PingReplied
//! ```
//!
//! ## Lifecycle
//! ```text
//! Idle ──► Connecting ──► Serving ──► Disconnecting ──► Terminated
//!              │                                            ▲
//!              └────────── group creation failed ───────────┘
//! ```
//! Transitions are monotonic: there is exactly one cycle and no way back.
//! A failed group creation is fatal (one error notice, then Terminated,
//! never Serving). Teardown is best-effort: cleanup errors are reported
//! as events but never stop the machine from reaching Terminated.
//!
//! ## Contexts and ordering
//! - `request_connect` / `request_disconnect` enqueue and return; the caller
//!   is never blocked by bus or network work.
//! - The background task processes requests strictly in arrival order, one
//!   at a time. It is the only place lifecycle state or the group handle
//!   are touched.
//! - Inbound pings run on whatever context the transport supplies. They are
//!   stateless and only append to the event channel, so they need no locks
//!   and cannot resurrect a terminated controller.
//! - Events reach subscribers in publication order; within one ping the
//!   receipt always precedes the reply.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use echobus::{
//!     Config, GroupHandle, GroupTransport, LogWriter, Registration, Supervisor, TransportError,
//! };
//!
//! /// Transport stub: a real implementation would advertise the group and
//! /// dispatch peer calls to the registered capability.
//! struct LocalGroup;
//!
//! #[async_trait]
//! impl GroupTransport for LocalGroup {
//!     async fn create_group(
//!         &self,
//!         _prefix: &str,
//!         _name: &str,
//!         _registrations: Vec<Registration>,
//!     ) -> Result<GroupHandle, TransportError> {
//!         Ok(GroupHandle::new(1))
//!     }
//!
//!     async fn cleanup(&self, _handle: GroupHandle) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), echobus::RuntimeError> {
//!     let sup = Supervisor::builder(Config::default(), Arc::new(LocalGroup))
//!         .with_subscriber(Arc::new(LogWriter))
//!         .build();
//!     // Connects on startup, serves until a termination signal, then
//!     // disconnects and drains the event feed.
//!     sup.run().await
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod service;
mod subscribers;
mod transport;

// ---- Public re-exports ----

pub use config::Config;
pub use core::{BusController, ControllerHandle, LifecycleState, Supervisor, SupervisorBuilder};
pub use error::{RuntimeError, TransportError};
pub use events::{Event, EventKind, EventSink, EventStream};
pub use service::EchoService;
pub use subscribers::{LogWriter, Subscribe, SubscriberSet};
pub use transport::{EchoCapability, GroupHandle, GroupTransport, Registration};
