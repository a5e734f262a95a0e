use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::localization::t;
use crate::state::{AppState, HydrationState, HYDRATION_GOAL_ML};
use crate::ui::{
    components::{help_bar, tab_bar},
    layouts, theme,
};

pub fn render(f: &mut Frame, state: &HydrationState, app: &AppState) {
    let language = app.language;
    let (title_area, tab_area, content_area, help_area) = layouts::dashboard_layout(f.area());

    f.render_widget(
        Paragraph::new(Span::styled(
            t(language, "hydrationTracker"),
            theme::title_style(),
        )),
        title_area,
    );
    tab_bar::render(f, tab_area, app);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(content_area);

    let intake = format!(
        "{}: {} / {} ml ({}% {})",
        t(language, "waterIntake"),
        state.intake_ml,
        HYDRATION_GOAL_ML,
        state.percent_of_goal(),
        t(language, "ofGoal")
    );
    f.render_widget(Paragraph::new(intake), chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(if state.goal_reached() {
            theme::success_style()
        } else {
            Style::default().fg(theme::COLOR_HEADER)
        })
        .percent(state.percent_of_goal().min(100) as u16);
    f.render_widget(gauge, chunks[1]);

    if state.goal_reached() {
        f.render_widget(
            Paragraph::new(Span::styled(
                t(language, "goalReached"),
                theme::success_style(),
            )),
            chunks[2],
        );
    }

    let help = format!(
        "a/s/d: {} (250/500/750 ml)  r: {}",
        t(language, "addWater"),
        t(language, "reset")
    );
    help_bar::render_help_bar(f, help_area, &help);
}
