use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use optifuel_ai::types::Role;

use crate::localization::{Language, t};
use crate::state::{AppState, AssistantState, LoadingState};
use crate::ui::{
    components::{help_bar, loading_indicator, tab_bar},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &AssistantState, app: &AppState) {
    let language = app.language;
    let (title_area, tab_area, content_area, help_area) = layouts::dashboard_layout(f.area());
    let (title_text_area, loading_area) = layouts::title_with_loading(title_area);

    f.render_widget(
        Paragraph::new(Span::styled(
            t(language, "aiAssistant"),
            theme::title_style(),
        )),
        title_text_area,
    );
    loading_indicator::render_loading_indicator(f, loading_area, &state.sending);
    tab_bar::render(f, tab_area, app);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(content_area);

    render_conversation(f, chunks[0], state, language);
    render_input(f, chunks[1], state, language);

    let help = format!(
        "Enter: {}  Up/Down: scroll",
        t(language, "typeMessage")
    );
    help_bar::render_help_bar(f, help_area, &help);
}

fn render_conversation(f: &mut Frame, area: Rect, state: &AssistantState, language: Language) {
    let block = Block::default().borders(Borders::ALL);

    if state.messages.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t(language, "askAnything"),
                theme::loading_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for message in &state.messages {
        let (prefix, style) = match message.role {
            Role::User => ("You: ", theme::header_style()),
            Role::Model => ("Coach: ", theme::premium_style()),
        };
        let mut first = true;
        for text_line in message.text.lines() {
            if first {
                lines.push(Line::from(vec![
                    Span::styled(prefix, style),
                    Span::raw(text_line.to_string()),
                ]));
                first = false;
            } else {
                lines.push(Line::from(format!("{:5}{text_line}", "")));
            }
        }
        lines.push(Line::from(""));
    }
    if matches!(state.sending, LoadingState::Loading(..)) {
        lines.push(Line::from(Span::styled(
            t(language, "assistantThinking"),
            theme::loading_style(),
        )));
    }

    // scroll_offset counts lines up from the bottom of the conversation
    let inner_height = area.height.saturating_sub(2) as usize;
    let end = lines.len().saturating_sub(state.scroll_offset);
    let start = end.saturating_sub(inner_height);
    let visible: Vec<Line> = lines[start..end].to_vec();

    f.render_widget(
        Paragraph::new(visible).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_input(f: &mut Frame, area: Rect, state: &AssistantState, language: Language) {
    let input = Paragraph::new(format!("{}_", state.input))
        .style(theme::form_field_focused_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(t(language, "typeMessage")),
        );
    f.render_widget(input, area);
}
