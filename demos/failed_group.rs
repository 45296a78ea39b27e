//! # Failed Group Demo
//!
//! Shows the fatal-startup path: the transport cannot create the group,
//! the controller reports one error notice and terminates, and the
//! process exits on its own without waiting for a signal.
//!
//! ## Run
//! ```bash
//! cargo run --example failed_group
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use echobus::{
    Config, GroupHandle, GroupTransport, LogWriter, Registration, Supervisor, TransportError,
};

struct DeadRadio;

#[async_trait]
impl GroupTransport for DeadRadio {
    async fn create_group(
        &self,
        _prefix: &str,
        _name: &str,
        _registrations: Vec<Registration>,
    ) -> Result<GroupHandle, TransportError> {
        Err(TransportError::CreateGroup {
            reason: "no network adapter available".into(),
        })
    }

    async fn cleanup(&self, _handle: GroupHandle) -> Result<(), TransportError> {
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let sup = Supervisor::builder(Config::default(), Arc::new(DeadRadio))
        .with_subscriber(Arc::new(LogWriter))
        .build();

    // The controller terminates by itself; no shutdown trigger fires.
    sup.run_until(std::future::pending()).await?;
    println!("service terminated after startup failure");
    Ok(())
}
