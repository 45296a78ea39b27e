//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints the activity feed to stdout in a human-readable
//! format, the way an interactive front-end would render it: one line per
//! ping and per reply, notices logged quietly, error notices surfaced
//! prominently.
//!
//! ## Output format
//! ```text
//! [ping] hello
//! [reply] hello
//! [notice] group released
//! [error] group creation failed for org.echobus.simple.service: ...
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};

use super::Subscribe;

/// Simple stdout logging subscriber.
///
/// Useful for development and the demo programs. Implement a custom
/// [`Subscribe`] for structured logging or a real UI.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, event: &Event) {
        match event.kind {
            EventKind::PingReceived => {
                if let Some(text) = &event.text {
                    println!("[ping] {text}");
                }
            }
            EventKind::PingReplied => {
                if let Some(text) = &event.text {
                    println!("[reply] {text}");
                }
            }
            EventKind::StatusNotice => {
                let message = event.message.as_deref().unwrap_or("");
                if event.is_error {
                    eprintln!("[error] {message}");
                } else {
                    println!("[notice] {message}");
                }
            }
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
