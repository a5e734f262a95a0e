use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::localization::{Language, t};
use crate::state::{AppState, EventField, EventsState, LoadingState};
use crate::ui::{
    components::{help_bar, loading_indicator, tab_bar},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &EventsState, app: &AppState) {
    let language = app.language;
    let (title_area, tab_area, content_area, help_area) = layouts::dashboard_layout(f.area());
    let (title_text_area, loading_area) = layouts::title_with_loading(title_area);

    f.render_widget(
        Paragraph::new(Span::styled(
            t(language, "eventPlanner"),
            theme::title_style(),
        )),
        title_text_area,
    );
    loading_indicator::render_loading_indicator(f, loading_area, &state.recommendations_loading);
    tab_bar::render(f, tab_area, app);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(content_area);

    render_field(
        f,
        chunks[0],
        t(language, "eventName"),
        &state.event_name,
        state.focused_field == EventField::Name,
    );
    render_field(
        f,
        chunks[1],
        t(language, "eventDate"),
        &state.event_date,
        state.focused_field == EventField::Date,
    );

    let location = match app.location {
        Some((latitude, longitude)) => Span::styled(
            format!(
                "{} ({latitude:.4}, {longitude:.4})",
                t(language, "locationDetected")
            ),
            theme::success_style(),
        ),
        None => Span::styled(
            t(language, "locationUnavailable"),
            theme::help_text_style(),
        ),
    };
    f.render_widget(Paragraph::new(Line::from(location)), chunks[2]);

    render_recommendations(f, chunks[3], state, app, language);

    let help = format!(
        "Tab: {}  Enter: {}",
        t(language, "next"),
        t(language, "getRecommendations")
    );
    help_bar::render_help_bar(f, help_area, &help);
}

fn render_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };
    let rendered = if focused {
        format!(" {value}_")
    } else {
        format!(" {value}")
    };
    let lines = vec![
        Line::from(Span::styled(label.to_string(), theme::header_style())),
        Line::from(Span::styled(rendered, style)),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_recommendations(
    f: &mut Frame,
    area: Rect,
    state: &EventsState,
    app: &AppState,
    language: Language,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(t(language, "getRecommendations"));

    if !app.is_premium() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t(language, "premiumFeature"),
                theme::premium_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Enter: {} ({})",
                    t(language, "upgradeToPremium"),
                    t(language, "upgradePrice")
                ),
                theme::help_text_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    if let LoadingState::Error(message) = &state.recommendations_loading {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(message.clone(), theme::error_style())),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    if matches!(state.recommendations_loading, LoadingState::Loading(..)) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t(language, "generatingRecommendations"),
                theme::loading_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let mut lines = Vec::new();
    for category in &state.recommendations {
        lines.push(Line::from(Span::styled(
            category.category.clone(),
            theme::header_style(),
        )));
        for item in &category.recommendations {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", item.title), theme::title_style()),
                Span::raw(item.advice.clone()),
            ]));
        }
        lines.push(Line::from(""));
    }
    if let Some(guidance) = &state.ai_guidance {
        for paragraph in guidance.lines() {
            lines.push(Line::from(paragraph.to_string()));
        }
    }

    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}
