use ratatui::{
    Frame,
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::localization::{Language, t};
use crate::state::{UpgradeModalState, UpgradeStep};
use crate::ui::{layouts, theme};

/// Render the premium upgrade flow as a staged dialog ending in a
/// simulated STK push.
pub fn render(f: &mut Frame, modal: &UpgradeModalState, language: Language) {
    let title = format!(" {} ", t(language, "upgradeToPremium"));
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::MEDIUM,
        &title,
        theme::accent_border_style(),
    );

    match &modal.step {
        UpgradeStep::Input {
            phone_number,
            error,
        } => {
            let mut lines = vec![
                Line::from(Span::styled(
                    t(language, "premiumFeature"),
                    theme::premium_style(),
                )),
                Line::from(""),
                Line::from(t(language, "upgradePrice")),
                Line::from(""),
                Line::from(t(language, "mpesaPhonePrompt")),
                Line::from(Span::styled(
                    format!("{}: {phone_number}_", t(language, "phoneNumber")),
                    theme::form_field_focused_style(),
                )),
            ];
            if let Some(error_key) = error {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    t(language, error_key),
                    theme::error_style(),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Enter: {}  Esc: {}", t(language, "next"), t(language, "close")),
                theme::help_text_style(),
            )));
            f.render_widget(centered(lines), inner);
        }

        UpgradeStep::FinalConfirmation { phone_number } => {
            let lines = vec![
                Line::from(Span::styled(
                    t(language, "confirmUpgrade"),
                    theme::title_style(),
                )),
                Line::from(""),
                Line::from(t(language, "upgradePrice")),
                Line::from(format!("{}: {phone_number}", t(language, "phoneNumber"))),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "y/Enter: {}  n: {}  Esc: {}",
                        t(language, "next"),
                        t(language, "back"),
                        t(language, "close")
                    ),
                    theme::help_text_style(),
                )),
            ];
            f.render_widget(centered(lines), inner);
        }

        UpgradeStep::SimulatedPin { pin, error, .. } => {
            let masked: String = "*".repeat(pin.chars().count());
            let mut lines = vec![
                Line::from(Span::styled(
                    t(language, "enterPin"),
                    theme::title_style(),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    format!("PIN: {masked}_"),
                    theme::form_field_focused_style(),
                )),
            ];
            if let Some(error_key) = error {
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
            f.render_widget(centered(lines), inner);
        }

        UpgradeStep::Processing { throbber, .. } => {
            let label = throbber_widgets_tui::Throbber::default()
                .label(t(language, "processing"))
                .throbber_set(throbber_widgets_tui::BRAILLE_EIGHT);
            let line = Rect {
                y: inner.y + inner.height / 2,
                height: 1,
                ..inner
            };
            f.render_stateful_widget(label, line, &mut throbber.clone());
        }

        UpgradeStep::Success => {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    t(language, "upgradeSuccess"),
                    theme::success_style(),
                )),
            ];
            f.render_widget(centered(lines), inner);
        }
    }
}

fn centered(lines: Vec<Line<'_>>) -> Paragraph<'_> {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
}
