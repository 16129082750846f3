//! Derived projections of a genre snapshot for display.
//!
//! The dashboard never mutates the snapshot it received; each view
//! derives its own shape from the same slice.

use super::model::GenreDatum;

/// Maximum number of entries shown in the top-genres bar chart.
pub const TOP_GENRES_LIMIT: usize = 8;

/// One slice of the distribution chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSlice {
    pub name: String,
    pub value: u64,
    /// Share of total plays, 0.0 when the snapshot is empty.
    pub percent: f64,
}

/// Genres sorted by descending play count, truncated to `limit`.
///
/// Ties are broken by name so the ordering is stable across polls.
pub fn top_genres(genres: &[GenreDatum], limit: usize) -> Vec<GenreDatum> {
    let mut sorted: Vec<GenreDatum> = genres.to_vec();
    sorted.sort_by(|a, b| b.plays.cmp(&a.plays).then_with(|| a.genre.cmp(&b.genre)));
    sorted.truncate(limit);
    sorted
}

/// Full-list distribution projection: one slice per input entry, same
/// name and value, input order preserved.
pub fn distribution(genres: &[GenreDatum]) -> Vec<DistributionSlice> {
    let total: u64 = genres.iter().map(|g| g.plays).sum();

    genres
        .iter()
        .map(|g| DistributionSlice {
            name: g.genre.clone(),
            value: g.plays,
            percent: if total > 0 {
                g.plays as f64 / total as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Total plays across a snapshot.
pub fn total_plays(genres: &[GenreDatum]) -> u64 {
    genres.iter().map(|g| g.plays).sum()
}

/// Format large numbers with K/M suffixes.
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<GenreDatum> {
        [
            ("rock", 42),
            ("pop", 31),
            ("hip-hop", 28),
            ("indie", 15),
            ("electronic", 12),
            ("R&B", 55),
            ("jazz", 9),
            ("metal", 20),
            ("folk", 7),
            ("ambient", 3),
        ]
        .iter()
        .map(|(genre, plays)| GenreDatum {
            genre: genre.to_string(),
            plays: *plays,
        })
        .collect()
    }

    #[test]
    fn test_top_genres_sorted_descending() {
        let top = top_genres(&sample(), TOP_GENRES_LIMIT);
        assert!(top.windows(2).all(|w| w[0].plays >= w[1].plays));
        assert_eq!(top[0].genre, "R&B");
        assert_eq!(top[0].plays, 55);
    }

    #[test]
    fn test_top_genres_truncates_to_limit() {
        let top = top_genres(&sample(), TOP_GENRES_LIMIT);
        assert_eq!(top.len(), TOP_GENRES_LIMIT);
    }

    #[test]
    fn test_top_genres_shorter_input() {
        let few = &sample()[..3];
        let top = top_genres(few, TOP_GENRES_LIMIT);
        assert_eq!(top.len(), 3);
    }

    #[test]
    fn test_top_genres_empty() {
        assert!(top_genres(&[], TOP_GENRES_LIMIT).is_empty());
    }

    #[test]
    fn test_top_genres_tie_broken_by_name() {
        let genres = vec![
            GenreDatum { genre: "b".into(), plays: 10 },
            GenreDatum { genre: "a".into(), plays: 10 },
        ];
        let top = top_genres(&genres, 8);
        assert_eq!(top[0].genre, "a");
    }

    #[test]
    fn test_distribution_preserves_values_and_order() {
        let genres = sample();
        let dist = distribution(&genres);

        assert_eq!(dist.len(), genres.len());
        for (slice, datum) in dist.iter().zip(genres.iter()) {
            assert_eq!(slice.name, datum.genre);
            assert_eq!(slice.value, datum.plays);
        }
    }

    #[test]
    fn test_distribution_percentages_sum_to_hundred() {
        let dist = distribution(&sample());
        let sum: f64 = dist.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_empty_snapshot() {
        assert!(distribution(&[]).is_empty());
    }

    #[test]
    fn test_distribution_zero_plays() {
        let genres = vec![GenreDatum { genre: "rock".into(), plays: 0 }];
        let dist = distribution(&genres);
        assert_eq!(dist[0].percent, 0.0);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_200), "1.2K");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn test_total_plays() {
        assert_eq!(total_plays(&sample()), 222);
        assert_eq!(total_plays(&[]), 0);
    }
}
