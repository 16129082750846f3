//! Overview rendering: status cards and the top-genres bar chart.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::app::App;
use crate::data::stats::format_count;
use crate::data::timefmt::{format_time_ago, now_unix};
use crate::data::{top_genres, ServiceStatus, TOP_GENRES_LIMIT};

/// Render the Overview: three status cards above the top-8 bar chart.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Status cards
        Constraint::Min(8),    // Bar chart
    ])
    .split(area);

    let cards = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(chunks[0]);

    let health = snapshot.health_data();
    let status = health.map(|h| h.status).unwrap_or(ServiceStatus::Down);

    render_card(
        frame,
        app,
        cards[0],
        "Service Health",
        status.label(),
        app.theme.status_style(status).add_modifier(Modifier::BOLD),
    );

    let last_ingest = format_time_ago(health.and_then(|h| h.last_ingest_unix), now_unix());
    render_card(
        frame,
        app,
        cards[1],
        "Last Ingest",
        &last_ingest,
        Style::default().add_modifier(Modifier::BOLD),
    );

    let genre_count = snapshot.genre_data().len().to_string();
    render_card(
        frame,
        app,
        cards[2],
        "Tracked Genres",
        &genre_count,
        Style::default().add_modifier(Modifier::BOLD),
    );

    render_top_genres(frame, app, chunks[1]);
}

fn render_card(
    frame: &mut Frame,
    app: &App,
    area: Rect,
    title: &str,
    value: &str,
    value_style: Style,
) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(Line::styled(value.to_string(), value_style)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_top_genres(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let top = top_genres(snapshot.genre_data(), TOP_GENRES_LIMIT);

    let block = Block::default()
        .title(format!(" Plays by Genre (Top {}) ", TOP_GENRES_LIMIT))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if top.is_empty() {
        let paragraph = Paragraph::new("No genre data yet")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2);
    let bar_width = bar_width_for(inner_width, top.len());

    let bars: Vec<Bar> = top
        .iter()
        .map(|g| {
            Bar::default()
                .value(g.plays)
                .label(Line::from(truncate(&g.genre, bar_width as usize)))
                .text_value(format_count(g.plays))
                .style(Style::default().fg(app.theme.chart))
        })
        .collect();

    let max = top.iter().map(|g| g.plays).max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(max)
        .bar_gap(1)
        .bar_width(bar_width);

    frame.render_widget(chart, area);
}

/// Pick a bar width that fits `count` bars plus gaps into `width`.
fn bar_width_for(width: u16, count: usize) -> u16 {
    let count = count.max(1) as u16;
    ((width.saturating_sub(count - 1)) / count).clamp(3, 12)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_bounds() {
        assert_eq!(bar_width_for(80, 8), 9);
        assert_eq!(bar_width_for(10, 8), 3);
        assert_eq!(bar_width_for(200, 2), 12);
    }
}
