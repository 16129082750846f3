// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tracing_subscriber::EnvFilter;

mod app;
mod client;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::{App, View};
use client::ApiClient;
use settings::Settings;
use source::{HttpSource, SnapshotSource};

#[derive(Parser, Debug)]
#[command(name = "beatlytics-tui")]
#[command(about = "Terminal dashboard for monitoring Beatlytics play analytics")]
struct Args {
    /// Base URL of the analytics API (overrides config/env)
    #[arg(short, long)]
    url: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long)]
    refresh: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Surface fetch failures instead of substituting demo data
    #[arg(long)]
    strict: bool,

    /// Write logs to this file (logging is disabled otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        settings.api_base = url;
    }
    if let Some(refresh) = args.refresh {
        settings.refresh_secs = refresh;
    }
    if args.strict {
        settings.strict = true;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }

    // Stdout belongs to the TUI, so logs can only go to a file
    if let Some(ref path) = settings.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with_writer(file)
            .with_ansi(false)
            .init();
    }

    let refresh_interval = Duration::from_secs(settings.refresh_secs.max(1));
    let client = ApiClient::new(&settings.api_base, settings.fallback_policy())?;

    // The poller runs on the runtime; the TUI stays on the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let source = {
        let _guard = rt.enter();
        Box::new(HttpSource::spawn(client, refresh_interval))
    };

    run_tui(source)
}

/// Run the TUI with the given snapshot source
fn run_tui(source: Box<dyn SnapshotSource>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(source);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        // Absorb any newly completed fetch cycle
        app.reload_data();

        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                frame.render_widget(paragraph, minsize_message_area(area));
                return;
            }

            // Reserve a banner row when showing non-live data
            let show_alert = app.snapshot.as_ref().is_some_and(|s| !s.is_fully_live());

            let mut constraints = vec![
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
            ];
            if show_alert {
                constraints.push(Constraint::Length(1)); // Provenance banner
            }
            constraints.push(Constraint::Min(8)); // Content
            constraints.push(Constraint::Length(1)); // Status bar

            let chunks = Layout::vertical(constraints).split(area);

            // Render header with service health
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            let content_idx = if show_alert {
                ui::common::render_alert(frame, app, chunks[2]);
                3
            } else {
                2
            };

            // Render current view
            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[content_idx]),
                View::Distribution => ui::distribution::render(frame, app, chunks[content_idx]),
                View::Genres => ui::genres::render(frame, app, chunks[content_idx]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[content_idx + 1]);

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }
    }

    Ok(())
}

/// Vertically centered band for the too-small message, clamped so it
/// stays inside the frame at any terminal height.
fn minsize_message_area(area: ratatui::layout::Rect) -> ratatui::layout::Rect {
    let y = (area.height / 2).saturating_sub(2);
    ratatui::layout::Rect::new(0, y, area.width, 5).intersection(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_minsize_message_centered_at_normal_heights() {
        assert_eq!(
            minsize_message_area(Rect::new(0, 0, 60, 10)),
            Rect::new(0, 3, 60, 5)
        );
    }

    #[test]
    fn test_minsize_message_fits_every_undersized_terminal() {
        for height in 0..12 {
            let area = Rect::new(0, 0, 60, height);
            let band = minsize_message_area(area);
            assert!(band.bottom() <= area.bottom());
        }
    }
}
