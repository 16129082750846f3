//! Wire types for the Beatlytics analytics API and the snapshot
//! structures the dashboard keeps in memory.
//!
//! The wire types match the JSON served by the Beatlytics backend:
//! `/api/genres` returns an array of [`GenreDatum`] and `/api/health`
//! returns a single [`HealthSnapshot`].

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// One observed genre with its play count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreDatum {
    /// Short genre label, unique within a snapshot.
    pub genre: String,
    /// Non-negative play count.
    pub plays: u64,
}

/// Reported health of the ingest service.
///
/// Any status string the dashboard does not recognize is treated as
/// [`ServiceStatus::Down`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Degraded,
    #[serde(other)]
    Down,
}

impl ServiceStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceStatus::Ok => "Healthy",
            ServiceStatus::Degraded => "Degraded",
            ServiceStatus::Down => "Down",
        }
    }
}

/// Health state reported by `/api/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: ServiceStatus,
    /// Unix timestamp of the most recent successful ingest, if any.
    #[serde(rename = "lastIngestUnix", default, skip_serializing_if = "Option::is_none")]
    pub last_ingest_unix: Option<i64>,
}

/// Outcome of a single fetch against the analytics API.
///
/// The original web dashboard silently substituted mock data on any
/// failure; this type keeps the distinction so the UI can decide how
/// loudly to surface it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome<T> {
    /// Fresh data from the backend.
    Live(T),
    /// The request failed and the fixed fallback was substituted.
    Fallback { data: T, reason: String },
    /// The request failed and strict mode surfaced the error.
    Failed(String),
}

impl<T> FetchOutcome<T> {
    /// The carried data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchOutcome::Live(data) | FetchOutcome::Fallback { data, .. } => Some(data),
            FetchOutcome::Failed(_) => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, FetchOutcome::Live(_))
    }

    /// The failure description for fallback or failed outcomes.
    pub fn reason(&self) -> Option<&str> {
        match self {
            FetchOutcome::Live(_) => None,
            FetchOutcome::Fallback { reason, .. } => Some(reason),
            FetchOutcome::Failed(reason) => Some(reason),
        }
    }
}

/// One complete poll cycle: both datasets plus when they were fetched.
///
/// Each cycle replaces the previous snapshot wholesale; no history is
/// kept here (see [`crate::data::PlayHistory`] for trend tracking).
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub genres: FetchOutcome<Vec<GenreDatum>>,
    pub health: FetchOutcome<HealthSnapshot>,
    /// When this snapshot was produced, for "updated Ns ago" display.
    pub fetched_at: Instant,
}

impl DashboardSnapshot {
    /// Genre data if the fetch produced any (live or fallback).
    pub fn genre_data(&self) -> &[GenreDatum] {
        self.genres.data().map(Vec::as_slice).unwrap_or_default()
    }

    /// Health data if the fetch produced any.
    pub fn health_data(&self) -> Option<HealthSnapshot> {
        self.health.data().copied()
    }

    /// True when both datasets came straight from the backend.
    pub fn is_fully_live(&self) -> bool {
        self.genres.is_live() && self.health.is_live()
    }

    /// First failure reason across both fetches, if any.
    pub fn degraded_reason(&self) -> Option<&str> {
        self.genres.reason().or_else(|| self.health.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_genres() {
        let json = r#"[
            {"genre": "rock", "plays": 42},
            {"genre": "pop", "plays": 31}
        ]"#;

        let genres: Vec<GenreDatum> = serde_json::from_str(json).unwrap();
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[0].genre, "rock");
        assert_eq!(genres[0].plays, 42);
    }

    #[test]
    fn test_deserialize_health() {
        let json = r#"{"status": "ok", "lastIngestUnix": 1700000000}"#;
        let health: HealthSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(health.status, ServiceStatus::Ok);
        assert_eq!(health.last_ingest_unix, Some(1700000000));
    }

    #[test]
    fn test_deserialize_health_without_timestamp() {
        let json = r#"{"status": "degraded"}"#;
        let health: HealthSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(health.status, ServiceStatus::Degraded);
        assert_eq!(health.last_ingest_unix, None);
    }

    #[test]
    fn test_unknown_status_maps_to_down() {
        let json = r#"{"status": "on-fire"}"#;
        let health: HealthSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(health.status, ServiceStatus::Down);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ServiceStatus::Ok.label(), "Healthy");
        assert_eq!(ServiceStatus::Degraded.label(), "Degraded");
        assert_eq!(ServiceStatus::Down.label(), "Down");
    }

    #[test]
    fn test_outcome_accessors() {
        let live = FetchOutcome::Live(vec![1u64]);
        assert!(live.is_live());
        assert_eq!(live.data(), Some(&vec![1u64]));
        assert!(live.reason().is_none());

        let fallback = FetchOutcome::Fallback {
            data: vec![2u64],
            reason: "HTTP 500".to_string(),
        };
        assert!(!fallback.is_live());
        assert_eq!(fallback.data(), Some(&vec![2u64]));
        assert_eq!(fallback.reason(), Some("HTTP 500"));

        let failed: FetchOutcome<Vec<u64>> = FetchOutcome::Failed("refused".to_string());
        assert!(failed.data().is_none());
        assert_eq!(failed.reason(), Some("refused"));
    }
}
