//! Genres view rendering.
//!
//! Displays a table of every genre in the snapshot with play counts,
//! share of total plays, play rate, and sparkline trends.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::stats::{format_count, total_plays};
use crate::data::GenreDatum;

/// Sparkline characters (8 levels of height).
const SPARKLINE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Column to sort by in the Genres view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    /// Sort by play count (ranking order).
    #[default]
    Plays,
    /// Sort by genre name alphabetically.
    Genre,
}

impl SortColumn {
    /// Cycle to the next sort column.
    pub fn next(self) -> Self {
        match self {
            SortColumn::Plays => SortColumn::Genre,
            SortColumn::Genre => SortColumn::Plays,
        }
    }
}

/// Render the Genres view showing all genres in a sortable table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let all = snapshot.genre_data();
    let total = total_plays(all);

    // Get filtered and sorted rows
    let mut genres: Vec<&GenreDatum> =
        all.iter().filter(|g| app.matches_filter(&g.genre)).collect();
    sort_genres_by(&mut genres, app.sort_column, app.sort_ascending);

    let header = Row::new(vec![
        Cell::from(format_header("Genre", SortColumn::Genre, app)),
        Cell::from(format_header("Plays", SortColumn::Plays, app)),
        Cell::from(format_header("Share", SortColumn::Plays, app)), // Share ranks like Plays
        Cell::from(Span::raw("Rate")),
        Cell::from(Span::raw("Trend")),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = genres
        .iter()
        .map(|g| {
            let share = if total > 0 {
                format!("{:.1}%", g.plays as f64 / total as f64 * 100.0)
            } else {
                "-".to_string()
            };

            let rate = app
                .history
                .play_rate(&g.genre)
                .map(|r| format!("{:.1}/s", r))
                .unwrap_or_else(|| "-".to_string());

            let sparkline = render_sparkline(&app.history.sparkline(&g.genre));

            Row::new(vec![
                Cell::from(g.genre.clone()),
                Cell::from(format_count(g.plays)),
                Cell::from(share),
                Cell::from(rate),
                Cell::from(sparkline),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(3), // Genre - gets 3x share (largest)
        Constraint::Fill(1), // Plays
        Constraint::Fill(1), // Share
        Constraint::Fill(1), // Rate
        Constraint::Min(8),  // Trend/Sparkline - fixed 8 for sparkline chars
    ];

    let selected_visual_index = app.selected_genre_index.min(genres.len().saturating_sub(1));

    let sort_indicator = match app.sort_column {
        SortColumn::Plays => "plays",
        SortColumn::Genre => "name",
    };
    let sort_dir = if app.sort_ascending { "↑" } else { "↓" };

    // Build title with filter info
    let filter_info = if app.filter_active {
        format!(" /{}_", app.filter_text)
    } else if !app.filter_text.is_empty() {
        format!(" /{}/ [c:clear]", app.filter_text)
    } else {
        String::new()
    };

    // Show scroll position if there are rows
    let position_info = if !genres.is_empty() {
        format!(" [{}/{}]", selected_visual_index + 1, genres.len())
    } else {
        String::new()
    };

    let title = format!(
        " Genres ({}/{}) [s:sort {}{}]{}{} ",
        genres.len(),
        all.len(),
        sort_indicator,
        sort_dir,
        filter_info,
        position_info
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected_visual_index));

    frame.render_stateful_widget(table, area, &mut state);
}

fn format_header(name: &str, col: SortColumn, app: &App) -> Span<'static> {
    if app.sort_column == col {
        let arrow = if app.sort_ascending { "↑" } else { "↓" };
        Span::raw(format!("{}{}", name, arrow))
    } else {
        Span::raw(name.to_string())
    }
}

/// Sort genres by the given column and direction.
pub fn sort_genres_by(genres: &mut [&GenreDatum], column: SortColumn, ascending: bool) {
    genres.sort_by(|a, b| {
        let primary = match column {
            SortColumn::Genre => a.genre.cmp(&b.genre),
            SortColumn::Plays => a.plays.cmp(&b.plays),
        };

        let primary = if ascending {
            primary
        } else {
            primary.reverse()
        };

        // Secondary sort by name for stability when counts are equal
        if primary == std::cmp::Ordering::Equal {
            a.genre.cmp(&b.genre)
        } else {
            primary
        }
    });
}

fn render_sparkline(data: &[u8]) -> String {
    if data.is_empty() {
        return "        ".to_string(); // 8 spaces placeholder
    }

    // Take last 8 values
    let values: Vec<u8> = data.iter().rev().take(8).rev().copied().collect();

    values.iter().map(|&v| SPARKLINE_CHARS[v.min(7) as usize]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<GenreDatum> {
        vec![
            GenreDatum { genre: "rock".into(), plays: 42 },
            GenreDatum { genre: "pop".into(), plays: 31 },
            GenreDatum { genre: "ambient".into(), plays: 42 },
        ]
    }

    #[test]
    fn test_sort_by_plays_descending() {
        let data = sample();
        let mut rows: Vec<&GenreDatum> = data.iter().collect();
        sort_genres_by(&mut rows, SortColumn::Plays, false);

        assert_eq!(rows[0].genre, "ambient"); // tie broken by name
        assert_eq!(rows[1].genre, "rock");
        assert_eq!(rows[2].genre, "pop");
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let data = sample();
        let mut rows: Vec<&GenreDatum> = data.iter().collect();
        sort_genres_by(&mut rows, SortColumn::Genre, true);

        assert_eq!(rows[0].genre, "ambient");
        assert_eq!(rows[2].genre, "rock");
    }

    #[test]
    fn test_sparkline_rendering() {
        assert_eq!(render_sparkline(&[0, 7]), "▁█");
        assert_eq!(render_sparkline(&[]), "        ");
    }
}
