use ratatui::{
    Frame,
    layout::Rect,
    prelude::*,
    widgets::Paragraph,
};

use crate::localization::t;
use crate::state::AppState;
use crate::ui::screens::Screen;
use crate::ui::theme;

/// Render the dashboard tab bar with language, notification, and plan
/// badges on the right.
pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
    let language = state.language;
    let tabs: [(&str, &'static str, bool); 4] = [
        ("1", "yourPlan", matches!(state.current_screen(), Screen::Plan(_))),
        ("2", "eventPlanner", matches!(state.current_screen(), Screen::Events(_))),
        ("3", "aiAssistant", matches!(state.current_screen(), Screen::Assistant(_))),
        ("4", "hydrationTracker", matches!(state.current_screen(), Screen::Hydration(_))),
    ];

    let mut spans: Vec<Span> = Vec::new();
    for (digit, key, active) in tabs {
        let label = format!(" [{digit}] {} ", t(language, key));
        if active {
            spans.push(Span::styled(label, theme::selection_style()));
        } else {
            spans.push(Span::styled(label, theme::help_text_style()));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);

    // Right-aligned badges
    let subscription = if state.is_premium() {
        Span::styled(t(language, "premium"), theme::premium_style())
    } else {
        Span::styled(t(language, "basic"), theme::help_text_style())
    };
    let unread = state.unread_notifications();
    let badges = Line::from(vec![
        subscription,
        Span::raw("  "),
        Span::styled(
            format!("{} ({unread})", t(language, "notifications")),
            if unread > 0 {
                theme::header_style()
            } else {
                theme::help_text_style()
            },
        ),
        Span::raw("  "),
        Span::styled(language.label(), theme::help_text_style()),
    ]);
    f.render_widget(Paragraph::new(badges).alignment(Alignment::Right), area);
}
