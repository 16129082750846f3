//! Distribution view rendering.
//!
//! The terminal counterpart of the original pie chart: one horizontal
//! share bar per genre, full list, input order preserved.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::truncate;
use crate::app::App;
use crate::data::distribution;

/// Palette cycled across slices, mirroring per-slice pie colors.
const SLICE_COLORS: [Color; 6] = [
    Color::Green,
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::LightGreen,
];

/// Render the Distribution view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let slices = distribution(snapshot.genre_data());

    let block = Block::default()
        .title(format!(" Distribution ({} genres) ", slices.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if slices.is_empty() {
        let paragraph = Paragraph::new("No genre data yet")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner_width = area.width.saturating_sub(2) as usize;
    let label_width = slices.iter().map(|s| s.name.chars().count()).max().unwrap_or(0).min(16);
    // label + space + bar + space + "100.0% (NNNN)"
    let bar_width = inner_width.saturating_sub(label_width + 18).max(10);

    let lines: Vec<Line> = slices
        .iter()
        .enumerate()
        .map(|(idx, slice)| {
            let color = SLICE_COLORS[idx % SLICE_COLORS.len()];
            let filled = ((slice.percent / 100.0) * bar_width as f64).round() as usize;
            let filled = filled.min(bar_width);

            Line::from(vec![
                Span::raw(label_cell(&slice.name, label_width)),
                Span::styled("█".repeat(filled), Style::default().fg(color)),
                Span::styled(
                    "░".repeat(bar_width - filled),
                    Style::default().fg(color).add_modifier(Modifier::DIM),
                ),
                Span::raw(format!(" {:>5.1}% ({})", slice.percent, slice.value)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Fixed-width label column: pad short names, clip long ones so the
/// bar and percentage never shift.
fn label_cell(name: &str, width: usize) -> String {
    format!("{:<width$} ", truncate(name, width), width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_cell_pads_short_names() {
        assert_eq!(label_cell("rock", 8), "rock     ");
    }

    #[test]
    fn test_label_cell_clips_long_names() {
        let cell = label_cell("progressive deathcore", 16);
        assert_eq!(cell.chars().count(), 17);
        assert_eq!(cell, "progressive dea… ");
    }
}
