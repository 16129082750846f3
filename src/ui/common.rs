//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, provenance banner,
//! status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::stats::{format_count, total_plays};
use crate::data::ServiceStatus;

/// Render the header bar with the service health overview.
///
/// Displays: status indicator, health label, genre count, total plays.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        let line = Line::from(vec![
            Span::styled(
                " BEATLYTICS ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Loading..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let status = snapshot
        .health_data()
        .map(|h| h.status)
        .unwrap_or(ServiceStatus::Down);
    let status_style = app.theme.status_style(status);

    let genres = snapshot.genre_data();
    let plays = total_plays(genres);

    let mut spans = vec![
        Span::styled(" ● ", status_style),
        Span::styled("BEATLYTICS ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(status.label(), status_style),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", genres.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" genres │ "),
        Span::raw(format!("{} plays", format_count(plays))),
    ];

    if !snapshot.is_fully_live() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            "DEMO",
            Style::default().fg(app.theme.degraded).add_modifier(Modifier::BOLD),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Views in tab order, shared by the renderer and the mouse hit test.
const TAB_VIEWS: [View; 3] = [View::Overview, View::Distribution, View::Genres];

const TAB_DIVIDER: &str = "|";

fn tab_title(index: usize, view: View) -> String {
    format!(" {}:{} ", index + 1, view.label())
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TAB_VIEWS
        .into_iter()
        .enumerate()
        .map(|(i, view)| Line::from(tab_title(i, view)))
        .collect();

    let selected = TAB_VIEWS
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider(TAB_DIVIDER);

    frame.render_widget(tabs, area);
}

/// Map a click column on the tab row to the view whose title spans it.
///
/// Follows the layout [`Tabs`] produces for [`render_tabs`]: one
/// padding cell on either side of each title and a divider between
/// tabs. Divider cells and anything past the last tab map to nothing.
pub fn tab_at_column(column: u16) -> Option<View> {
    let mut x = 0u16;
    for (i, view) in TAB_VIEWS.into_iter().enumerate() {
        let width = tab_title(i, view).chars().count() as u16 + 2;
        if (x..x + width).contains(&column) {
            return Some(view);
        }
        x += width + TAB_DIVIDER.chars().count() as u16;
    }
    None
}

/// Render the provenance banner when the snapshot is not fully live.
///
/// Demo-data substitution shows in yellow, surfaced failures in red.
/// Callers should only reserve a row for this when
/// [`App::snapshot`] holds a snapshot that is not fully live.
pub fn render_alert(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref snapshot) = app.snapshot else {
        return;
    };

    let has_failure = snapshot.genres.data().is_none() || snapshot.health.data().is_none();
    let reason = snapshot.degraded_reason().unwrap_or("unknown");

    let (text, color) = if has_failure {
        (format!(" fetch failed: {} ", reason), app.theme.down)
    } else {
        (
            format!(" showing demo data ({}) ", reason),
            app.theme.degraded,
        )
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

/// Render the status bar at the bottom.
///
/// Shows: time since last fetch, refresh state, available controls.
/// Also displays temporary status messages and source errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref snapshot) = app.snapshot {
        let elapsed = snapshot.fetched_at.elapsed();

        // A source error alongside stale data must not stay silent
        let source_error = match app.load_error {
            Some(ref err) => format!("{} | ", err),
            None => String::new(),
        };

        let refresh_state = if app.refreshing {
            "refreshing… | "
        } else {
            ""
        };

        let controls = match app.current_view {
            View::Genres => {
                if app.filter_active {
                    "Type to search | Enter:apply Esc:cancel"
                } else {
                    "r:refresh /:search s:sort S:reverse Tab:switch ?:help q:quit"
                }
            }
            _ => "r:refresh Tab:switch ?:help q:quit",
        };

        format!(
            " {} | Updated {:.1}s ago | {}{}{}",
            app.current_view.label(),
            elapsed.as_secs_f64(),
            source_error,
            refresh_state,
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit", err)
    } else {
        " Loading... | q:quit".to_string()
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  ↑/↓ j/k     Navigate table"),
        Line::from("  PgUp/PgDn   Jump 10 rows"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Genres view",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  /         Start filter/search"),
        Line::from("  c         Clear filter"),
        Line::from("  s         Cycle sort column"),
        Line::from("  S         Toggle sort direction"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Refresh now"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_hit_zones_follow_title_widths() {
        // " 1:Overview " plus one padding cell each side spans 0..14
        assert_eq!(tab_at_column(0), Some(View::Overview));
        assert_eq!(tab_at_column(13), Some(View::Overview));
        // Divider cell selects nothing
        assert_eq!(tab_at_column(14), None);
        assert_eq!(tab_at_column(15), Some(View::Distribution));
        assert_eq!(tab_at_column(32), Some(View::Distribution));
        assert_eq!(tab_at_column(34), Some(View::Genres));
        assert_eq!(tab_at_column(45), Some(View::Genres));
        // Past the last tab
        assert_eq!(tab_at_column(46), None);
        assert_eq!(tab_at_column(200), None);
    }
}
