use ratatui::{
    Frame,
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::localization::t;
use crate::models::Meal;
use crate::state::AppState;
use crate::ui::{layouts, theme, utils};

/// Render the meal detail popup with ingredients, preparation steps, and
/// the athlete's allergy notice.
pub fn render(f: &mut Frame, meal: &Meal, state: &AppState) {
    let language = state.language;
    let title = format!(" {} ", t(language, "mealDetails"));
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        &title,
        theme::accent_border_style(),
    );

    let mut lines = vec![
        Line::from(Span::styled(meal.name.clone(), theme::title_style())),
        Line::from(Span::styled(
            utils::fmt_macros(&meal.macros),
            theme::header_style(),
        )),
        Line::from(""),
        Line::from(meal.description.clone()),
    ];

    if let Some(ingredients) = &meal.ingredients {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            t(language, "ingredients"),
            theme::header_style(),
        )));
        for ingredient in ingredients {
            lines.push(Line::from(format!("  - {ingredient}")));
        }
    }

    if let Some(preparation) = &meal.preparation {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            t(language, "preparation"),
            theme::header_style(),
        )));
        for (i, step) in preparation.iter().enumerate() {
            lines.push(Line::from(format!("  {}. {step}", i + 1)));
        }
    }

    // Allergy notice whenever the athlete declared any
    if let Some(profile) = &state.user_profile {
        let allergies = profile.allergy_list();
        if !allergies.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                t(language, "allergyWarningTitle"),
                theme::error_style(),
            )));
            lines.push(Line::from(Span::styled(
                t(language, "allergyWarningText").replace("{allergies}", &allergies.join(", ")),
                theme::help_text_style(),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("o: {}  Esc: {}", t(language, "orderMeal"), t(language, "close")),
        theme::help_text_style(),
    )));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
