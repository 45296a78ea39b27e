//! # Connection lifecycle states.
//!
//! [`LifecycleState`] models the single forward cycle a bus controller walks:
//!
//! ```text
//! Idle ──► Connecting ──► Serving ──► Disconnecting ──► Terminated
//!              │              │                             ▲
//!              │              └── (disconnect requested) ───┤
//!              └───────── group creation failed ────────────┘
//! ```
//!
//! There is no backward edge. A controller that reached `Terminated` stays
//! there; duplicate requests against a finished machine are no-ops, not
//! errors. The value is owned by exactly one background task and is never
//! shared across contexts.

use std::fmt;

/// Position of a bus controller within its single connect/serve/disconnect
/// cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, nothing requested yet.
    Idle,
    /// Group creation in flight.
    Connecting,
    /// Group advertised, capability registered, peers may call.
    Serving,
    /// Teardown in progress: unregistering and releasing the group.
    Disconnecting,
    /// Finished. No further requests are accepted.
    Terminated,
}

impl LifecycleState {
    /// Whether a connect request does anything in this state.
    #[inline]
    pub fn accepts_connect(self) -> bool {
        matches!(self, LifecycleState::Idle)
    }

    /// Whether a disconnect request does anything in this state.
    #[inline]
    pub fn accepts_disconnect(self) -> bool {
        matches!(self, LifecycleState::Connecting | LifecycleState::Serving)
    }

    /// Whether this is the final state of the cycle.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Terminated)
    }

    /// Whether `next` is a legal successor of this state.
    ///
    /// Encodes the forward cycle plus the fast exit taken when group
    /// creation fails.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Idle, Connecting)
                | (Connecting, Serving)
                | (Connecting, Disconnecting)
                | (Connecting, Terminated)
                | (Serving, Disconnecting)
                | (Disconnecting, Terminated)
        )
    }

    /// Short stable label (snake_case) for logs.
    pub fn as_label(self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Connecting => "connecting",
            LifecycleState::Serving => "serving",
            LifecycleState::Disconnecting => "disconnecting",
            LifecycleState::Terminated => "terminated",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}
