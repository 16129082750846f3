//! Relative time formatting for the "last ingest" card.

use std::time::{SystemTime, UNIX_EPOCH};

/// Placeholder shown when no ingest timestamp has been reported.
pub const MISSING_TIMESTAMP: &str = "–";

/// Format "time since last ingest" relative to `now_unix`.
///
/// Thresholds: under a minute shows seconds, under an hour shows
/// minutes, everything else shows hours. A timestamp in the future
/// clamps to zero seconds.
pub fn format_time_ago(last_ingest_unix: Option<i64>, now_unix: i64) -> String {
    let Some(unix) = last_ingest_unix else {
        return MISSING_TIMESTAMP.to_string();
    };

    let delta = (now_unix - unix).max(0);
    if delta < 60 {
        format!("{}s ago", delta)
    } else if delta < 3600 {
        format!("{}m ago", delta / 60)
    } else {
        format!("{}h ago", delta / 3600)
    }
}

/// Current Unix time in seconds.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
