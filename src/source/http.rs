//! HTTP polling snapshot source.
//!
//! Owns the repeating fetch task: an interval tick and a manual
//! refresh request both trigger a fetch cycle, and each completed
//! cycle is published through a watch channel for the TUI to poll.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ tokio task                                               │
//! │   interval(30s) ──┐                                      │
//! │                   ├─▶ ApiClient::fetch_snapshot() ──┐    │
//! │   refresh_rx ─────┘                                 │    │
//! └─────────────────────────────────────────────────────┼────┘
//!                                              watch::Sender
//!                                                      │
//!                              HttpSource::poll() ◀────┘
//! ```
//!
//! The task is aborted when the source is dropped, so the periodic
//! fetch lives exactly as long as the view that owns it.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::SnapshotSource;
use crate::client::ApiClient;
use crate::data::DashboardSnapshot;

/// A snapshot source that polls the analytics API on an interval.
#[derive(Debug)]
pub struct HttpSource {
    receiver: watch::Receiver<Option<DashboardSnapshot>>,
    refresh_tx: mpsc::Sender<()>,
    description: String,
    task: tokio::task::JoinHandle<()>,
    disconnected: bool,
}

impl HttpSource {
    /// Spawn the polling task. Must be called within a tokio runtime
    /// context. The first fetch cycle runs immediately.
    pub fn spawn(client: ApiClient, refresh_interval: Duration) -> Self {
        let description = format!("http: {}", client.base_url());
        let (tx, rx) = watch::channel(None);
        // Capacity 1: a queued manual refresh absorbs repeat requests
        let (refresh_tx, mut refresh_rx) = mpsc::channel::<()>(1);

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        debug!("interval fetch cycle");
                    }
                    request = refresh_rx.recv() => {
                        if request.is_none() {
                            break;
                        }
                        debug!("manual fetch cycle");
                    }
                }

                let snapshot = client.fetch_snapshot().await;
                if tx.send(Some(snapshot)).is_err() {
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            refresh_tx,
            description,
            task,
            disconnected: false,
        }
    }
}

impl SnapshotSource for HttpSource {
    fn poll(&mut self) -> Option<DashboardSnapshot> {
        match self.receiver.has_changed() {
            Ok(true) => self.receiver.borrow_and_update().clone(),
            Ok(false) => None,
            Err(_) => {
                // Task gone; keep showing the last snapshot but say so
                self.disconnected = true;
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Fetch failures travel inside the snapshot as FetchOutcome;
        // this only reports the poller itself dying
        self.disconnected.then_some("poller task stopped")
    }

    fn request_refresh(&mut self) -> bool {
        self.refresh_tx.try_send(()).is_ok()
    }
}

impl Drop for HttpSource {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FallbackPolicy;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_backend() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/genres"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"genre": "rock", "plays": 42}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})),
            )
            .mount(&server)
            .await;
        server
    }

    async fn wait_for_snapshot(source: &mut HttpSource) -> DashboardSnapshot {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if let Some(snapshot) = source.poll() {
                    return snapshot;
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("snapshot within timeout")
    }

    #[tokio::test]
    async fn test_initial_fetch_runs_immediately() {
        let server = mock_backend().await;
        let client = ApiClient::new(&server.uri(), FallbackPolicy::Mock).unwrap();
        let mut source = HttpSource::spawn(client, Duration::from_secs(3600));

        let snapshot = wait_for_snapshot(&mut source).await;
        assert!(snapshot.is_fully_live());
        assert_eq!(snapshot.genre_data()[0].genre, "rock");
    }

    #[tokio::test]
    async fn test_manual_refresh_triggers_cycle() {
        let server = mock_backend().await;
        let client = ApiClient::new(&server.uri(), FallbackPolicy::Mock).unwrap();
        let mut source = HttpSource::spawn(client, Duration::from_secs(3600));

        // Consume the startup cycle, then request another
        let _ = wait_for_snapshot(&mut source).await;
        assert!(source.request_refresh());

        let snapshot = wait_for_snapshot(&mut source).await;
        assert!(snapshot.is_fully_live());
    }

    #[tokio::test]
    async fn test_rapid_refresh_requests_collapse() {
        let server = mock_backend().await;
        let client = ApiClient::new(&server.uri(), FallbackPolicy::Mock).unwrap();
        let mut source = HttpSource::spawn(client, Duration::from_secs(3600));

        let _ = wait_for_snapshot(&mut source).await;

        // Back-to-back requests without yielding: only one fits the queue
        assert!(source.request_refresh());
        assert!(!source.request_refresh());
    }

    #[tokio::test]
    async fn test_dead_poller_reports_error() {
        let server = mock_backend().await;
        let client = ApiClient::new(&server.uri(), FallbackPolicy::Mock).unwrap();
        let mut source = HttpSource::spawn(client, Duration::from_secs(3600));

        let _ = wait_for_snapshot(&mut source).await;
        assert!(source.error().is_none());

        source.task.abort();
        tokio::time::timeout(Duration::from_secs(5), async {
            while !source.task.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("task stops within timeout");

        assert!(source.poll().is_none());
        assert_eq!(source.error(), Some("poller task stopped"));
    }

    #[tokio::test]
    async fn test_description() {
        let client = ApiClient::new("http://localhost:8081", FallbackPolicy::Mock).unwrap();
        let source = HttpSource::spawn(client, Duration::from_secs(30));
        assert_eq!(source.description(), "http: http://localhost:8081");
    }
}
