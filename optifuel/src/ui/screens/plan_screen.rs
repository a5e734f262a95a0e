use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::localization::{Language, t};
use crate::state::{AppState, LoadingState, PlanState, TipAudioStatus};
use crate::ui::{
    components::{empty_state, help_bar, loading_indicator, tab_bar},
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, state: &PlanState, app: &AppState) {
    let language = app.language;
    let (title_area, tab_area, content_area, help_area) = layouts::dashboard_layout(f.area());
    let (title_text_area, loading_area) = layouts::title_with_loading(title_area);

    f.render_widget(
        Paragraph::new(Span::styled(t(language, "yourPlan"), theme::title_style())),
        title_text_area,
    );
    loading_indicator::render_loading_indicator(f, loading_area, &state.plan_loading);
    tab_bar::render(f, tab_area, app);

    render_content(f, content_area, state, language);

    let help = format!(
        "h/l: day  k/j: meal  Enter: {}  o: {}  t: {}",
        t(language, "mealDetails"),
        t(language, "orderMeal"),
        t(language, "listenToTip")
    );
    help_bar::render_help_bar(f, help_area, &help);
}

fn render_content(f: &mut Frame, area: Rect, state: &PlanState, language: Language) {
    if state.plan.is_empty() {
        let message = match &state.plan_loading {
            LoadingState::Loading(..) => t(language, "generatingPlan"),
            LoadingState::Error(_) => t(language, "aiError"),
            _ => t(language, "loading"),
        };
        empty_state::render_empty_state(f, area, t(language, "yourPlan"), message, None);
        return;
    }

    let (sidebar_area, main_area) = layouts::content_with_sidebar(area, theme::DAY_SIDEBAR_WIDTH);
    render_day_sidebar(f, sidebar_area, state);
    render_day(f, main_area, state, language);
}

fn render_day_sidebar(f: &mut Frame, area: Rect, state: &PlanState) {
    let items: Vec<ListItem> = state
        .plan
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let item = ListItem::new(day.day.clone());
            if i == state.selected_day {
                item.style(theme::selection_style())
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL));
    f.render_widget(list, area);
}

fn render_day(f: &mut Frame, area: Rect, state: &PlanState, language: Language) {
    let Some(day) = state.current_day() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(5),
        ])
        .split(area);

    // Meal slots in day order
    let items: Vec<ListItem> = day
        .meals
        .slots()
        .iter()
        .enumerate()
        .map(|(i, (slot_key, meal))| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:18}", t(language, slot_key)),
                    theme::header_style(),
                ),
                Span::raw(meal.name.clone()),
                Span::styled(
                    format!("  {}", utils::fmt_macros(&meal.macros)),
                    theme::help_text_style(),
                ),
            ]);
            let item = ListItem::new(line);
            if i == state.selected_meal {
                item.style(theme::selection_style())
            } else {
                item
            }
        })
        .collect();
    let meals = List::new(items).block(Block::default().borders(Borders::ALL).title(day.day.clone()));
    f.render_widget(meals, chunks[0]);

    let summary = format!(
        "{}: {} kcal  {}: {}g  {}: {}g  {}: {}g",
        t(language, "calories"),
        day.daily_summary.calories,
        t(language, "protein"),
        day.daily_summary.protein,
        t(language, "carbs"),
        day.daily_summary.carbs,
        t(language, "fats"),
        day.daily_summary.fats
    );
    f.render_widget(
        Paragraph::new(summary)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(t(language, "dailySummary")),
            ),
        chunks[1],
    );

    let mut tip_lines = vec![Line::from(day.nutritionist_tip.clone())];
    match &state.tip_audio {
        Some(TipAudioStatus::Synthesizing) => {
            tip_lines.push(Line::from(Span::styled(
                format!("t: {}...", t(language, "listenToTip")),
                theme::loading_style(),
            )));
        }
        Some(TipAudioStatus::Saved(path)) => {
            tip_lines.push(Line::from(Span::styled(
                format!("{} {}", t(language, "speechSaved"), path.display()),
                theme::success_style(),
            )));
        }
        Some(TipAudioStatus::Failed) => {
            tip_lines.push(Line::from(Span::styled(
                t(language, "speechFailed"),
                theme::error_style(),
            )));
        }
        None => {}
    }
    f.render_widget(
        Paragraph::new(tip_lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(t(language, "nutritionistTip")),
        ),
        chunks[2],
    );
}
