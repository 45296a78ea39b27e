//! # Group transport seam.
//!
//! The core does not implement discovery, framing, or peer authentication.
//! It consumes a transport through [`GroupTransport`], a two-operation
//! capability: create an advertised group with a set of registrations, and
//! release it again. Everything else about moving bytes between peers is
//! the transport's business.
//!
//! ## Contract
//! - `create_group` advertises `"<prefix>.<name>"`, registers the supplied
//!   capabilities under their paths, and returns an opaque [`GroupHandle`].
//!   While the registration is live, the transport dispatches inbound calls
//!   to the registered [`EchoCapability`] on contexts of its choosing.
//! - `cleanup` unregisters the capabilities and releases the group. It must
//!   be idempotent from the caller's point of view; errors are reported by
//!   the caller but never retried.
//!
//! [`GroupHandle`] is deliberately not `Clone`: the controller moves it into
//! `cleanup`, so a handle can only ever be released once.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;

/// Opaque handle to a created group.
///
/// Returned by [`GroupTransport::create_group`] and owned exclusively by the
/// bus controller until it is moved back into [`GroupTransport::cleanup`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct GroupHandle {
    id: u64,
}

impl GroupHandle {
    /// Creates a handle wrapping a transport-assigned identifier.
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// The transport-assigned identifier.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// The callable surface a transport dispatches inbound calls to.
///
/// This is the entire wire-visible API of the service: one operation that
/// echoes its input. Implementations must tolerate concurrent invocation
/// from any context the transport supplies.
#[async_trait]
pub trait EchoCapability: Send + Sync + 'static {
    /// Handles one remote call, returning the reply sent back to the peer.
    async fn ping(&self, text: String) -> String;
}

/// Association between a capability and the path it is advertised under.
pub struct Registration {
    capability: Arc<dyn EchoCapability>,
    path: String,
}

impl Registration {
    /// Pairs a capability with a stable path identifier such as
    /// `"/SimpleService"`.
    pub fn new(capability: Arc<dyn EchoCapability>, path: impl Into<String>) -> Self {
        Self {
            capability,
            path: path.into(),
        }
    }

    /// The capability to dispatch inbound calls to.
    pub fn capability(&self) -> &Arc<dyn EchoCapability> {
        &self.capability
    }

    /// The path identifier the capability is advertised under.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration").field("path", &self.path).finish()
    }
}

/// External capability that creates and releases advertised groups.
///
/// Implemented by the surrounding application or a transport crate, never
/// by this core. Both operations either complete or fail; no timeout is
/// imposed by the caller.
#[async_trait]
pub trait GroupTransport: Send + Sync + 'static {
    /// Creates and advertises a group, registering the supplied
    /// capabilities for the lifetime of the group.
    async fn create_group(
        &self,
        prefix: &str,
        name: &str,
        registrations: Vec<Registration>,
    ) -> Result<GroupHandle, TransportError>;

    /// Unregisters the capabilities and releases the group.
    ///
    /// Idempotent; a reported error means the caller logs and moves on.
    async fn cleanup(&self, handle: GroupHandle) -> Result<(), TransportError>;
}
