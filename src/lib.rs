// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # beatlytics-tui
//!
//! A terminal dashboard for monitoring Beatlytics play analytics.
//!
//! This crate renders per-genre play counts and the ingest service's
//! health in an interactive terminal UI, polling the analytics API on
//! a fixed interval. When the backend is unreachable it can substitute
//! fixed demo data, clearly marked as such, so the dashboard stays
//! usable during local development.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(projections)  │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── HttpSource | ChannelSource                 │
//! │  │ (input) │         │                                      │
//! │  └─────────┘         └──▶ client (reqwest, /api/*)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and refresh gating
//! - **[`client`]**: HTTP client for `/api/genres` and `/api/health`,
//!   with the configurable fallback-to-demo-data policy
//! - **[`source`]**: Snapshot source abstraction ([`SnapshotSource`] trait)
//!   with an interval-driven HTTP poller and a channel-based source
//! - **[`data`]**: Wire types and display projections - top-8 ranking,
//!   distribution slices, relative time formatting, play history
//! - **[`settings`]**: Layered configuration (defaults, TOML file,
//!   environment, CLI)
//! - **[`ui`]**: Terminal rendering using ratatui - status cards, bar
//!   chart, distribution bars, genre table, theme support
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Poll the default local backend every 30 seconds
//! beatlytics-tui
//!
//! # Point at a deployed backend, fail loudly instead of showing demo data
//! beatlytics-tui --url https://analytics.example.com --strict
//! ```
//!
//! ### As a library with a channel source
//!
//! ```
//! use beatlytics_tui::{App, ChannelSource};
//!
//! // Create a channel for pushing snapshots
//! let (tx, source) = ChannelSource::create("embedded");
//!
//! // Create the app
//! let app = App::new(Box::new(source));
//! ```
//!
//! ### As a library with the HTTP poller
//!
//! ```no_run
//! use std::time::Duration;
//! use beatlytics_tui::{ApiClient, App, FallbackPolicy, HttpSource};
//!
//! # tokio_test::block_on(async {
//! let client = ApiClient::new("http://localhost:8081", FallbackPolicy::Mock).unwrap();
//! let source = HttpSource::spawn(client, Duration::from_secs(30));
//! let app = App::new(Box::new(source));
//! # });
//! ```

pub mod app;
pub mod client;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use client::{ApiClient, FallbackPolicy};
pub use data::{
    DashboardSnapshot, FetchOutcome, GenreDatum, HealthSnapshot, PlayHistory, ServiceStatus,
};
pub use settings::Settings;
pub use source::{ChannelSource, HttpSource, SnapshotSource};
