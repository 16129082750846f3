//! Channel-based snapshot source.
//!
//! Receives dashboard snapshots via a tokio watch channel. Used by the
//! HTTP poller internally and directly by tests and embeddings that
//! produce snapshots themselves.

use tokio::sync::watch;

use super::SnapshotSource;
use crate::data::DashboardSnapshot;

/// A snapshot source fed through a watch channel.
///
/// The watch channel holds a single slot, so a slow consumer simply
/// observes the latest snapshot: last writer wins, matching the
/// dashboard's replace-wholesale state model.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<DashboardSnapshot>>,
    description: String,
    disconnected: bool,
}

impl ChannelSource {
    /// Wrap an existing watch receiver.
    pub fn new(
        receiver: watch::Receiver<Option<DashboardSnapshot>>,
        source_description: &str,
    ) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            disconnected: false,
        }
    }

    /// Create a sender/source pair.
    ///
    /// The sender side pushes snapshots; the source side plugs into the
    /// TUI.
    pub fn create(source_description: &str) -> (watch::Sender<Option<DashboardSnapshot>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl SnapshotSource for ChannelSource {
    fn poll(&mut self) -> Option<DashboardSnapshot> {
        match self.receiver.has_changed() {
            Ok(true) => self.receiver.borrow_and_update().clone(),
            Ok(false) => None,
            Err(_) => {
                // Producer went away; keep showing the last snapshot
                self.disconnected = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.disconnected.then_some("snapshot producer disconnected")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{mock_genres, mock_health};
    use crate::data::FetchOutcome;
    use std::time::Instant;

    fn sample_snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            genres: FetchOutcome::Live(mock_genres()),
            health: FetchOutcome::Live(mock_health()),
            fetched_at: Instant::now(),
        }
    }

    #[test]
    fn test_poll_returns_nothing_until_sent() {
        let (_tx, mut source) = ChannelSource::create("test");
        assert!(source.poll().is_none());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_poll_returns_latest_once() {
        let (tx, mut source) = ChannelSource::create("test");

        tx.send(Some(sample_snapshot())).unwrap();

        let snapshot = source.poll().expect("snapshot after send");
        assert_eq!(snapshot.genre_data().len(), 6);

        // No change, so poll returns None
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_last_writer_wins() {
        let (tx, mut source) = ChannelSource::create("test");

        let mut first = sample_snapshot();
        first.genres = FetchOutcome::Live(Vec::new());
        tx.send(Some(first)).unwrap();
        tx.send(Some(sample_snapshot())).unwrap();

        let snapshot = source.poll().expect("latest snapshot");
        assert_eq!(snapshot.genre_data().len(), 6);
    }

    #[test]
    fn test_dropped_producer_reports_error() {
        let (tx, mut source) = ChannelSource::create("test");
        drop(tx);

        assert!(source.poll().is_none());
        assert!(source.error().is_some());
    }

    #[test]
    fn test_description() {
        let (_tx, source) = ChannelSource::create("embedded");
        assert_eq!(source.description(), "channel: embedded");
    }
}
