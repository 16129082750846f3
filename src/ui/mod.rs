//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//! Each view is implemented in its own submodule with a `render` function.
//!
//! ## Submodules
//!
//! - [`overview`]: Status cards and the top-8 plays-by-genre bar chart
//! - [`distribution`]: Full-list play share bars (the pie chart counterpart)
//! - [`genres`]: Sortable, filterable table of every tracked genre
//! - [`common`]: Shared components (header, tabs, banner, status bar, help)
//! - [`theme`]: Light/dark theme support with terminal auto-detection

pub mod common;
pub mod distribution;
pub mod genres;
pub mod overview;
pub mod theme;

pub use genres::SortColumn;
pub use theme::Theme;

/// Clip a label to at most `max` characters, ending in an ellipsis.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars()
            .take(max.saturating_sub(1))
            .chain(std::iter::once('…'))
            .collect()
    }
}
