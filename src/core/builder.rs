//! Fluent construction of a [`Supervisor`].

use std::sync::Arc;

use crate::config::Config;
use crate::subscribers::Subscribe;
use crate::transport::GroupTransport;

use super::supervisor::Supervisor;

/// Builder for a [`Supervisor`] with optional subscribers.
///
/// ## Example
/// ```no_run
/// # use std::sync::Arc;
/// # use echobus::{Config, LogWriter, Supervisor};
/// # fn with(transport: Arc<dyn echobus::GroupTransport>) -> Supervisor {
/// Supervisor::builder(Config::default(), transport)
///     .with_subscriber(Arc::new(LogWriter))
///     .build()
/// # }
/// ```
pub struct SupervisorBuilder {
    cfg: Config,
    transport: Arc<dyn GroupTransport>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration and transport.
    pub fn new(cfg: Config, transport: Arc<dyn GroupTransport>) -> Self {
        Self {
            cfg,
            transport,
            subscribers: Vec::new(),
        }
    }

    /// Adds one event subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Replaces the subscriber list.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the supervisor.
    pub fn build(self) -> Supervisor {
        Supervisor::new(self.cfg, self.transport, self.subscribers)
    }
}
