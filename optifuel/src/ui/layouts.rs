//! Reusable layout builders for consistent screen structure.
//!
//! These functions provide standard layouts that all screens should use
//! to ensure consistent margins, spacing, and element positioning.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HELP_BAR_HEIGHT, SCREEN_MARGIN, TAB_BAR_HEIGHT, TITLE_HEIGHT};

/// Standard screen layout with title, content area, and help bar.
///
/// Returns a tuple of (title_area, content_area, help_area)
pub fn screen_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Dashboard screen layout with the tab bar under the title.
///
/// Returns a tuple of (title_area, tab_area, content_area, help_area)
pub fn dashboard_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(SCREEN_MARGIN)
        .constraints([
            Constraint::Length(TITLE_HEIGHT),
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(HELP_BAR_HEIGHT),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2], chunks[3])
}

/// Split a title area into title text and loading indicator.
///
/// Returns (title_text_area, loading_indicator_area)
pub fn title_with_loading(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(100), Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Split a content area into day sidebar and main pane.
///
/// Returns (sidebar_area, main_area)
pub fn content_with_sidebar(area: Rect, sidebar_width: u16) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered popup rectangle.
///
/// # Arguments
/// * `percent_x` - Width as percentage of parent (0-100)
/// * `percent_y` - Height as percentage of parent (0-100)
/// * `area` - The parent area to center within
pub fn centered_popup(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Standard popup sizes
pub mod popup_sizes {
    /// Small popup (50% x 30%) - for simple confirmations
    pub const SMALL: (u16, u16) = (50, 30);

    /// Medium popup (60% x 40%) - for confirmations with more info
    pub const MEDIUM: (u16, u16) = (60, 40);

    /// Large popup (80% x 80%) - for help screens and complex dialogs
    pub const LARGE: (u16, u16) = (80, 80);
}
