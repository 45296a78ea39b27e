//! # Local Echo Demo
//!
//! Runs the full service against an in-process loopback transport and
//! simulates two peers calling the echo capability while the group is
//! served. The activity feed is rendered by the built-in `LogWriter`.
//!
//! ## Run
//! ```bash
//! cargo run --example local_echo
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use echobus::{
    Config, EchoCapability, GroupHandle, GroupTransport, LogWriter, Registration, Supervisor,
    TransportError,
};

/// In-process stand-in for a real group transport: "advertising" a group
/// just makes its registrations callable through `peer_ping`.
#[derive(Default)]
struct LoopbackTransport {
    next_id: AtomicU64,
    registrations: Mutex<HashMap<String, Arc<dyn EchoCapability>>>,
}

impl LoopbackTransport {
    /// Simulates a peer calling the capability registered under `path`.
    async fn peer_ping(&self, path: &str, text: &str) -> Option<String> {
        let capability = self.registrations.lock().unwrap().get(path).cloned()?;
        Some(capability.ping(text.to_string()).await)
    }
}

#[async_trait]
impl GroupTransport for LoopbackTransport {
    async fn create_group(
        &self,
        _prefix: &str,
        _name: &str,
        registrations: Vec<Registration>,
    ) -> Result<GroupHandle, TransportError> {
        let mut live = self.registrations.lock().unwrap();
        for reg in registrations {
            live.insert(reg.path().to_string(), Arc::clone(reg.capability()));
        }
        Ok(GroupHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed)))
    }

    async fn cleanup(&self, _handle: GroupHandle) -> Result<(), TransportError> {
        self.registrations.lock().unwrap().clear();
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let transport = Arc::new(LoopbackTransport::default());
    let sup = Supervisor::builder(Config::default(), Arc::clone(&transport) as _)
        .with_subscriber(Arc::new(LogWriter))
        .build();

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let run = tokio::spawn(async move {
        sup.run_until(async {
            let _ = stop_rx.await;
        })
        .await
    });

    // Let the controller reach Serving, then call in as two peers would.
    tokio::time::sleep(Duration::from_millis(50)).await;
    for text in ["hello", "world"] {
        match transport.peer_ping("/SimpleService", text).await {
            Some(reply) => println!("peer got: {reply}"),
            None => println!("peer call rejected: nothing registered"),
        }
    }

    let _ = stop_tx.send(());
    run.await??;

    // The group is gone; a late call finds nothing registered.
    assert!(transport.peer_ping("/SimpleService", "late").await.is_none());
    println!("group released, service terminated");
    Ok(())
}
