//! Snapshot source abstraction for the dashboard.
//!
//! The TUI never performs network I/O on its draw loop; it polls a
//! [`SnapshotSource`] which is fed by a background producer (the HTTP
//! poller in production, a plain channel in tests and embeddings).

mod channel;
mod http;

pub use channel::ChannelSource;
pub use http::HttpSource;

use std::fmt::Debug;

use crate::data::DashboardSnapshot;

/// Trait for receiving dashboard snapshots from a producer.
///
/// # Example
///
/// ```
/// use beatlytics_tui::{ChannelSource, SnapshotSource};
///
/// let (tx, mut source) = ChannelSource::create("test");
/// assert!(source.poll().is_none());
/// ```
pub trait SnapshotSource: Send + Debug {
    /// Poll for the latest snapshot.
    ///
    /// Returns `Some(snapshot)` if a new one arrived since the last
    /// poll, `None` otherwise. Must be non-blocking.
    fn poll(&mut self) -> Option<DashboardSnapshot>;

    /// Human-readable description for the status bar.
    fn description(&self) -> &str;

    /// Error encountered by the source itself, if any.
    fn error(&self) -> Option<&str>;

    /// Ask the producer to run an extra fetch cycle now.
    ///
    /// Returns false when a manual cycle is already queued or the
    /// source has no producer to ask.
    fn request_refresh(&mut self) -> bool {
        false
    }
}
