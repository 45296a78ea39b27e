//! # Runtime configuration.
//!
//! Provides [`Config`], the settings shared by the supervisor and the bus
//! controller: the advertised group identity, the path the echo capability
//! is registered under, and the shutdown grace window.
//!
//! The group identity follows the two-part scheme used by ad-hoc bus stacks:
//! a reverse-URL style prefix naming the application family, and a short
//! group name identifying this particular group. The transport advertises
//! `"<prefix>.<name>"` to peers.

use std::time::Duration;

/// Configuration for the supervisor runtime.
///
/// ## Field semantics
/// - `group_prefix`: reverse-URL prefix advertised to peers
/// - `group_name`: short identifier for this group, appended to the prefix
/// - `service_path`: stable path the echo capability is registered under
/// - `grace`: maximum wait for the controller to finish teardown on shutdown
#[derive(Clone, Debug)]
pub struct Config {
    /// Advertised group prefix, reverse-URL style.
    pub group_prefix: String,

    /// Group identifier, combined with `group_prefix` to form the advertised
    /// identity passed to [`GroupTransport::create_group`](crate::GroupTransport::create_group).
    pub group_name: String,

    /// Path identifier the echo capability is registered under.
    pub service_path: String,

    /// Maximum time to wait for the bus controller to reach its terminal
    /// state after a disconnect was requested.
    ///
    /// When the window is exceeded the supervisor cancels the controller
    /// task and returns [`RuntimeError::GraceExceeded`](crate::RuntimeError::GraceExceeded).
    pub grace: Duration,
}

impl Config {
    /// Returns the full advertised identity, `"<prefix>.<name>"`.
    #[inline]
    pub fn advertised_identity(&self) -> String {
        format!("{}.{}", self.group_prefix, self.group_name)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `group_prefix = "org.echobus.simple"`
    /// - `group_name = "service"`
    /// - `service_path = "/SimpleService"`
    /// - `grace = 30s`
    fn default() -> Self {
        Self {
            group_prefix: "org.echobus.simple".to_string(),
            group_name: "service".to_string(),
            service_path: "/SimpleService".to_string(),
            grace: Duration::from_secs(30),
        }
    }
}
