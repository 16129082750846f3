//! Historical play-count tracking for sparklines.
//!
//! Each poll replaces the snapshot wholesale, so trend information has
//! to be accumulated here: one bounded series of play totals per genre.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use super::model::GenreDatum;

/// Maximum number of polls retained per genre.
const MAX_HISTORY_SIZE: usize = 60;

/// Bounded per-genre play history recorded across poll cycles.
#[derive(Debug, Clone, Default)]
pub struct PlayHistory {
    /// Play totals per genre, oldest first.
    genre_plays: HashMap<String, VecDeque<u64>>,
    /// Timestamps of recorded polls, for rate calculations.
    timestamps: VecDeque<Instant>,
}

impl PlayHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a genre snapshot.
    pub fn record(&mut self, genres: &[GenreDatum], fetched_at: Instant) {
        for datum in genres {
            let series = self.genre_plays.entry(datum.genre.clone()).or_default();
            series.push_back(datum.plays);
            if series.len() > MAX_HISTORY_SIZE {
                series.pop_front();
            }
        }

        self.timestamps.push_back(fetched_at);
        if self.timestamps.len() > MAX_HISTORY_SIZE {
            self.timestamps.pop_front();
        }
    }

    /// Sparkline data for a genre, normalized to 0-7 for 8 bar levels.
    ///
    /// Values are deltas between consecutive polls; returns an empty Vec
    /// until at least two polls have been recorded for the genre.
    pub fn sparkline(&self, genre: &str) -> Vec<u8> {
        let Some(series) = self.genre_plays.get(genre) else {
            return Vec::new();
        };

        if series.len() < 2 {
            return Vec::new();
        }

        let deltas: Vec<i64> =
            series.iter().zip(series.iter().skip(1)).map(|(a, b)| *b as i64 - *a as i64).collect();

        let max = deltas.iter().copied().max().unwrap_or(1).max(1);
        let min = deltas.iter().copied().min().unwrap_or(0).min(0);
        let range = (max - min).max(1) as f64;

        deltas
            .iter()
            .map(|&v| {
                let normalized = ((v - min) as f64 / range * 7.0) as u8;
                normalized.min(7)
            })
            .collect()
    }

    /// Plays per second for a genre over the last two polls.
    ///
    /// Returns None until enough history exists to calculate a rate.
    pub fn play_rate(&self, genre: &str) -> Option<f64> {
        let series = self.genre_plays.get(genre)?;
        if series.len() < 2 || self.timestamps.len() < 2 {
            return None;
        }

        let current = *series.back()?;
        let previous = *series.get(series.len() - 2)?;
        let delta = current as i64 - previous as i64;

        let current_time = self.timestamps.back()?;
        let previous_time = self.timestamps.get(self.timestamps.len() - 2)?;
        let elapsed = current_time.duration_since(*previous_time).as_secs_f64();

        if elapsed > 0.0 {
            Some(delta as f64 / elapsed)
        } else {
            None
        }
    }
}
