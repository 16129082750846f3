//! Data models and derivations for dashboard snapshots.
//!
//! ## Submodules
//!
//! - [`model`]: Wire types and snapshot structures ([`GenreDatum`],
//!   [`HealthSnapshot`], [`DashboardSnapshot`], [`FetchOutcome`])
//! - [`stats`]: Display projections (top-8 list, distribution slices)
//! - [`timefmt`]: Relative "time since last ingest" formatting
//! - [`history`]: Bounded play-count history for sparklines
//!
//! ## Data Flow
//!
//! ```text
//! /api/genres + /api/health (JSON)
//!        │
//!        ▼
//! ApiClient::fetch_snapshot()
//!        │
//!        ├──▶ DashboardSnapshot (FetchOutcome per dataset)
//!        │
//!        ├──▶ stats::top_genres() / stats::distribution() (per draw)
//!        │
//!        └──▶ PlayHistory::record() (for sparklines)
//! ```

pub mod history;
pub mod model;
pub mod stats;
pub mod timefmt;

pub use history::PlayHistory;
pub use model::{DashboardSnapshot, FetchOutcome, GenreDatum, HealthSnapshot, ServiceStatus};
pub use stats::{distribution, top_genres, total_plays, DistributionSlice, TOP_GENRES_LIMIT};
