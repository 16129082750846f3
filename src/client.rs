//! HTTP client for the Beatlytics analytics API.
//!
//! Two read endpoints, one attempt each, no retries. The original web
//! dashboard swallowed every failure and showed hardcoded demo data so
//! the page kept working before the backend existed; here that policy
//! is explicit and configurable via [`FallbackPolicy`], and every
//! result carries its provenance in a [`FetchOutcome`].

use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::data::{
    DashboardSnapshot, FetchOutcome, GenreDatum, HealthSnapshot, ServiceStatus,
};
use crate::data::timefmt::now_unix;

/// Default API base when nothing is configured. Matches the backend's
/// development port, which the original web UI reached through a dev
/// proxy rule for `/api/*`.
pub const DEFAULT_API_BASE: &str = "http://localhost:8081";

const GENRES_PATH: &str = "/api/genres";
const HEALTH_PATH: &str = "/api/health";

/// Per-request timeout. The browser original leaned on the browser's
/// own limits; a TUI poll cycle must not hang on a wedged backend.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// What to do when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Substitute the fixed demo data and keep going (dev default).
    #[default]
    Mock,
    /// Surface the failure so the UI can show it.
    Surface,
}

/// Client for the two analytics read endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    policy: FallbackPolicy,
}

impl ApiClient {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(base_url: &str, policy: FallbackPolicy) -> Result<Self> {
        let mut headers = HeaderMap::new();
        // Every poll must hit the network, never a stale cache.
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            policy,
        })
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the per-genre play counts.
    pub async fn fetch_genres(&self) -> FetchOutcome<Vec<GenreDatum>> {
        self.fetch(GENRES_PATH, mock_genres).await
    }

    /// Fetch the service health status.
    pub async fn fetch_health(&self) -> FetchOutcome<HealthSnapshot> {
        self.fetch(HEALTH_PATH, mock_health).await
    }

    /// Run both fetches concurrently and bundle the outcomes.
    ///
    /// Never fails: each half independently resolves to live data,
    /// fallback data, or (strict mode) a surfaced error.
    pub async fn fetch_snapshot(&self) -> DashboardSnapshot {
        let (genres, health) = tokio::join!(self.fetch_genres(), self.fetch_health());
        DashboardSnapshot {
            genres,
            health,
            fetched_at: std::time::Instant::now(),
        }
    }

    async fn fetch<T, F>(&self, path: &str, mock: F) -> FetchOutcome<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        match self.get_json(path).await {
            Ok(data) => FetchOutcome::Live(data),
            Err(e) => {
                let reason = format!("GET {}: {}", path, e);
                warn!(%reason, "fetch failed");
                match self.policy {
                    FallbackPolicy::Mock => FetchOutcome::Fallback {
                        data: mock(),
                        reason,
                    },
                    FallbackPolicy::Surface => FetchOutcome::Failed(reason),
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {}", response.status());
        }

        Ok(response.json().await?)
    }
}

/// The fixed demo genre list shown before the backend exists.
pub fn mock_genres() -> Vec<GenreDatum> {
    [
        ("rock", 42),
        ("pop", 31),
        ("hip-hop", 28),
        ("indie", 15),
        ("electronic", 12),
        ("R&B", 55),
    ]
    .iter()
    .map(|(genre, plays)| GenreDatum {
        genre: genre.to_string(),
        plays: *plays,
    })
    .collect()
}

/// The fixed demo health value: degraded, last ingest two hours ago.
pub fn mock_health() -> HealthSnapshot {
    HealthSnapshot {
        status: ServiceStatus::Degraded,
        last_ingest_unix: Some(now_unix() - 7200),
    }
}
