use ratatui::{
    Frame,
    prelude::*,
    widgets::{List, ListItem},
};

use crate::localization::t;
use crate::state::AppState;
use crate::ui::{layouts, theme};

/// Render the slide-over notification panel, newest entry first.
pub fn render(f: &mut Frame, state: &AppState) {
    let language = state.language;
    let title = format!(
        " {} ({}) ",
        t(language, "notifications"),
        state.unread_notifications()
    );
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        &title,
        theme::info_border_style(),
    );

    if state.notifications.is_empty() {
        let empty = ratatui::widgets::Paragraph::new(t(language, "noNotifications"))
            .style(theme::help_text_style())
            .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    let items: Vec<ListItem> = state
        .notifications
        .iter()
        .enumerate()
        .map(|(i, notification)| {
            let marker = if notification.read { "  " } else { "* " };
            let style = if notification.read {
                theme::help_text_style()
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let item = ListItem::new(Line::from(vec![
                Span::styled(marker, theme::header_style()),
                Span::styled(
                    notification.timestamp.format("%H:%M ").to_string(),
                    theme::help_text_style(),
                ),
                Span::styled(notification.message.clone(), style),
            ]));
            if i == state.notification_cursor {
                item.style(theme::selection_style())
            } else {
                item
            }
        })
        .collect();

    let footer = format!(
        "k/j  Enter: {}  m: {}  Esc: {}",
        t(language, "markRead"),
        t(language, "markAllRead"),
        t(language, "close")
    );
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    f.render_widget(List::new(items), chunks[0]);
    f.render_widget(
        ratatui::widgets::Paragraph::new(footer)
            .style(theme::help_text_style())
            .alignment(Alignment::Center),
        chunks[1],
    );
}
