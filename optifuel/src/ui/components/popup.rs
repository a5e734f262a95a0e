//! Shared popup/modal base component.

use ratatui::prelude::Rect;
use ratatui::{
    Frame,
    layout::Alignment,
    style::Style,
    widgets::{Block, Borders, Clear},
};

use crate::ui::layouts;

/// Centers a popup of `size` (width percent, height percent) over
/// `parent_area`, clears what is underneath, draws the titled border
/// and returns the inner area for the caller's content.
pub fn render_popup_frame(
    f: &mut Frame,
    parent_area: Rect,
    size: (u16, u16),
    title: &str,
    border_style: Style,
) -> Rect {
    let area = layouts::centered_popup(size.0, size.1, parent_area);

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    f.render_widget(block, area);

    inner
}
