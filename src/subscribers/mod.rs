//! # Event subscribers for the interactive context.
//!
//! This module provides the [`Subscribe`] trait and the built-in
//! [`LogWriter`] for rendering the activity feed, plus [`SubscriberSet`],
//! the fan-out the supervisor's listener pushes every event through.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   EventStream ──► supervisor listener ──► SubscriberSet::emit(&Event)
//!                                               ├──► [queue S1] ─► worker ─► on_event()
//!                                               ├──► [queue S2] ─► worker ─► on_event()
//!                                               └──► [queue SN] ─► worker ─► on_event()
//! ```
//!
//! Subscribers observe events strictly after they were published and never
//! on the publisher's context.

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
