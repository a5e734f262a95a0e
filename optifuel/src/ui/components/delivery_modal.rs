use ratatui::{
    Frame,
    prelude::*,
    widgets::{Paragraph, Row, Table, Wrap},
};

use crate::localization::{Language, t};
use crate::models::MealDeliveryOption;
use crate::state::{ComparisonMetrics, DeliveryModalState, DeliveryStep};
use crate::ui::{layouts, theme, utils};

/// Render the meal ordering flow. Each step draws its own popup so the
/// flow reads as one dialog moving through states.
pub fn render(f: &mut Frame, modal: &DeliveryModalState, language: Language) {
    match &modal.step {
        DeliveryStep::Loading(throbber) => {
            let inner = frame(f, language, layouts::popup_sizes::SMALL);
            let label = throbber_widgets_tui::Throbber::default()
                .label(t(language, "findingOptions"))
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(label, centered_line(inner), &mut throbber.clone());
        }

        DeliveryStep::List {
            cursor,
            compare_mode,
            compare_selection,
        } => {
            let inner = frame(f, language, layouts::popup_sizes::LARGE);
            render_list(
                f,
                inner,
                modal,
                *cursor,
                *compare_mode,
                compare_selection,
                language,
            );
        }

        DeliveryStep::Compare { items, cursor } => {
            let inner = frame(f, language, layouts::popup_sizes::LARGE);
            render_compare(f, inner, modal, items, *cursor, language);
        }

        DeliveryStep::Confirm { selected } => {
            let inner = frame(f, language, layouts::popup_sizes::MEDIUM);
            if let Some(option) = modal.options.get(*selected) {
                render_confirm(f, inner, option, language);
            }
        }

        DeliveryStep::Payment {
            selected,
            phone_number,
            payment_error,
        } => {
            let inner = frame(f, language, layouts::popup_sizes::MEDIUM);
            if let Some(option) = modal.options.get(*selected) {
                render_payment(f, inner, option, phone_number, *payment_error, language);
            }
        }

        DeliveryStep::ProcessingPayment { throbber, .. } => {
            let inner = frame(f, language, layouts::popup_sizes::SMALL);
            let label = throbber_widgets_tui::Throbber::default()
                .label(t(language, "processingPayment"))
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            f.render_stateful_widget(label, centered_line(inner), &mut throbber.clone());
        }

        DeliveryStep::Success => {
            let inner = frame(f, language, layouts::popup_sizes::SMALL);
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    t(language, "paymentSuccess"),
                    theme::success_style(),
                )),
            ];
            f.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center),
                inner,
            );
        }
    }
}

fn frame(f: &mut Frame, language: Language, size: (u16, u16)) -> Rect {
    let title = format!(" {} ", t(language, "deliveryOptions"));
    super::popup::render_popup_frame(f, f.area(), size, &title, theme::info_border_style())
}

fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    }
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    modal: &DeliveryModalState,
    cursor: usize,
    compare_mode: bool,
    compare_selection: &[usize],
    language: Language,
) {
    if modal.options.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t(language, "noDeliveryOptions"),
                theme::loading_style(),
            )),
        ];
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let rows: Vec<Row> = modal
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let mut cells = Vec::new();
            if compare_mode {
                cells.push(utils::checkbox(compare_selection.contains(&i)).to_string());
            }
            cells.push(option.partner_name.clone());
            cells.push(utils::truncate(&option.meal_name, 30));
            cells.push(utils::fmt_price(option));
            cells.push(option.delivery_time.clone());
            cells.push(utils::fmt_rating(option.rating));
            cells.push(option.special_offer.clone().unwrap_or_default());

            let row = Row::new(cells);
            if i == cursor {
                row.style(theme::selection_style())
            } else {
                row
            }
        })
        .collect();

    let mut header = Vec::new();
    let mut widths = Vec::new();
    if compare_mode {
        header.push("".to_string());
        widths.push(Constraint::Length(3));
    }
    header.extend([
        "Partner".to_string(),
        "Meal".to_string(),
        "Price".to_string(),
        t(language, "deliveryTime").to_string(),
        t(language, "rating").to_string(),
        t(language, "specialOffer").to_string(),
    ]);
    widths.extend([
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(12),
        Constraint::Length(7),
        Constraint::Min(10),
    ]);

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(theme::header_style()).bottom_margin(1));
    f.render_widget(table, chunks[0]);

    let hint = if compare_mode {
        if compare_selection.len() < 2 {
            t(language, "selectAtLeastTwo").to_string()
        } else {
            format!("Enter: {}", t(language, "compare"))
        }
    } else {
        format!("Enter: {}  c: {}", t(language, "confirmOrder"), t(language, "compare"))
    };
    f.render_widget(
        Paragraph::new(hint)
            .style(theme::help_text_style())
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_compare(
    f: &mut Frame,
    area: Rect,
    modal: &DeliveryModalState,
    items: &[usize],
    cursor: usize,
    language: Language,
) {
    let compared: Vec<&MealDeliveryOption> = items
        .iter()
        .filter_map(|&i| modal.options.get(i))
        .collect();
    let Some(metrics) = ComparisonMetrics::of(&compared) else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let rows: Vec<Row> = compared
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let price = if option.price == metrics.best_price {
                Span::styled(utils::fmt_price(option), theme::success_style())
            } else {
                Span::raw(utils::fmt_price(option))
            };
            let delivery = if option.lead_minutes().is_some()
                && option.lead_minutes() == metrics.fastest_minutes
            {
                Span::styled(option.delivery_time.clone(), theme::success_style())
            } else {
                Span::raw(option.delivery_time.clone())
            };
            let rating = if option.rating == metrics.highest_rating {
                Span::styled(utils::fmt_rating(option.rating), theme::success_style())
            } else {
                Span::raw(utils::fmt_rating(option.rating))
            };

            let row = Row::new(vec![
                Line::from(option.partner_name.clone()),
                Line::from(price),
                Line::from(delivery),
                Line::from(rating),
            ]);
            if i == cursor {
                row.style(theme::selection_style())
            } else {
                row
            }
        })
        .collect();

    let header = Row::new(vec![
        "Partner".to_string(),
        format!("Price ({})", t(language, "bestPrice")),
        format!("{} ({})", t(language, "deliveryTime"), t(language, "fastestDelivery")),
        format!("{} ({})", t(language, "rating"), t(language, "highestRating")),
    ]);
    let widths = [
        Constraint::Length(18),
        Constraint::Min(12),
        Constraint::Min(16),
        Constraint::Min(12),
    ];

    let table = Table::new(rows, widths).header(header.style(theme::header_style()).bottom_margin(1));
    f.render_widget(table, chunks[0]);

    let hint = format!("Enter: {}  Esc: {}", t(language, "confirmOrder"), t(language, "back"));
    f.render_widget(
        Paragraph::new(hint)
            .style(theme::help_text_style())
            .alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_confirm(f: &mut Frame, area: Rect, option: &MealDeliveryOption, language: Language) {
    let lines = vec![
        Line::from(Span::styled(
            t(language, "confirmOrder"),
            theme::title_style(),
        )),
        Line::from(""),
        Line::from(format!("{} - {}", option.partner_name, option.meal_name)),
        Line::from(format!(
            "{}  |  {}  |  {}",
            utils::fmt_price(option),
            option.delivery_time,
            utils::fmt_rating(option.rating)
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "Enter: {}  Esc: {}",
                t(language, "proceedToPayment"),
                t(language, "back")
            ),
            theme::help_text_style(),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_payment(
    f: &mut Frame,
    area: Rect,
    option: &MealDeliveryOption,
    phone_number: &str,
    payment_error: Option<&'static str>,
    language: Language,
) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{}: {}", t(language, "pay"), utils::fmt_price(option)),
            theme::title_style(),
        )),
        Line::from(""),
        Line::from(t(language, "mpesaPhonePrompt")),
        Line::from(Span::styled(
            format!("{}: {phone_number}_", t(language, "phoneNumber")),
            theme::form_field_focused_style(),
        )),
    ];
    if let Some(error_key) = payment_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            t(language, error_key),
            theme::error_style(),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Enter: {}  Esc: {}", t(language, "pay"), t(language, "back")),
        theme::help_text_style(),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}
