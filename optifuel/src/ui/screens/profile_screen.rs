use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::localization::{Language, t};
use crate::models::COMMON_ALLERGIES;
use crate::state::{ProfileField, ProfileFormState};
use crate::ui::{
    components::help_bar,
    layouts, theme, utils,
};

pub fn render(f: &mut Frame, form: &ProfileFormState, language: Language) {
    let (title_area, content_area, help_area) = layouts::screen_layout(f.area());

    let step_title = match form.step {
        1 => t(language, "personalInfo"),
        2 => t(language, "biometrics"),
        _ => t(language, "sportDetails"),
    };
    let title = Line::from(vec![
        Span::styled(t(language, "createProfile"), theme::title_style()),
        Span::raw("  "),
        Span::styled(
            format!(
                "{} {} {} 3: {step_title}",
                t(language, "step"),
                form.step,
                t(language, "of")
            ),
            theme::header_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(title), title_area);

    render_fields(f, content_area, form, language);

    let help = format!(
        "Tab: {}  Enter: {}  Esc: {}",
        t(language, "next"),
        if form.step == 3 {
            t(language, "submit")
        } else {
            t(language, "next")
        },
        t(language, "back")
    );
    help_bar::render_help_bar(f, help_area, &help);
}

fn render_fields(f: &mut Frame, area: Rect, form: &ProfileFormState, language: Language) {
    let fields = form.fields();
    let focused = form.focused();

    let mut constraints: Vec<Constraint> = fields
        .iter()
        .map(|field| match field {
            // The checklist needs a row per allergy plus its label
            ProfileField::Allergies => Constraint::Length(COMMON_ALLERGIES.len() as u16 + 1),
            _ => Constraint::Length(2),
        })
        .collect();
    constraints.push(Constraint::Length(2));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, field) in fields.iter().enumerate() {
        render_field(f, chunks[i], form, *field, *field == focused, language);
    }

    if let Some(error_key) = form.validation_error {
        f.render_widget(
            Paragraph::new(Span::styled(t(language, error_key), theme::error_style())),
            chunks[fields.len()],
        );
    }
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    form: &ProfileFormState,
    field: ProfileField,
    focused: bool,
    language: Language,
) {
    let style = if focused {
        theme::form_field_focused_style()
    } else {
        theme::form_field_style()
    };

    let (label_key, value, cycles) = match field {
        ProfileField::Name => ("fullName", form.name.clone(), false),
        ProfileField::Age => ("age", form.age.clone(), false),
        ProfileField::Gender => ("gender", form.gender.label().to_string(), true),
        ProfileField::Height => ("height", form.height.clone(), false),
        ProfileField::Weight => ("weight", form.weight.clone(), false),
        ProfileField::Area => ("geographicalArea", form.area.clone(), false),
        ProfileField::Sport => ("primarySport", form.sport.label().to_string(), true),
        ProfileField::Diet => ("diet", form.diet.label().to_string(), true),
        ProfileField::OtherAllergy => ("otherAllergy", form.other_allergy.clone(), false),
        ProfileField::Allergies => {
            render_allergy_checklist(f, area, form, focused, language);
            return;
        }
    };

    let rendered = if cycles {
        if focused {
            format!("< {value} >")
        } else {
            value
        }
    } else if focused {
        format!("{value}_")
    } else {
        value
    };

    let lines = vec![
        Line::from(Span::styled(t(language, label_key), theme::header_style())),
        Line::from(Span::styled(format!(" {rendered}"), style)),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_allergy_checklist(
    f: &mut Frame,
    area: Rect,
    form: &ProfileFormState,
    focused: bool,
    language: Language,
) {
    let mut lines = vec![Line::from(Span::styled(
        t(language, "allergies"),
        theme::header_style(),
    ))];
    for (i, allergy) in COMMON_ALLERGIES.iter().enumerate() {
        let marker = utils::checkbox(form.allergy_selected[i]);
        let row = format!(" {marker} {allergy}");
        if focused && i == form.allergy_cursor {
            lines.push(Line::from(Span::styled(row, theme::selection_style())));
        } else {
            lines.push(Line::from(row));
        }
    }
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::NONE)),
        area,
    );
}
