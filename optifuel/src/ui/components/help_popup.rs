use ratatui::{
    Frame,
    prelude::*,
    widgets::{List, ListItem},
};

use crate::state::AppState;
use crate::ui::{layouts, screens::Screen, theme};

pub fn render_help_popup(f: &mut Frame, state: &AppState) {
    let help_items = get_help_items(state);

    // Use shared popup frame
    let inner = super::popup::render_popup_frame(
        f,
        f.area(),
        layouts::popup_sizes::LARGE,
        " Help (press ? or Esc to close) ",
        theme::accent_border_style(),
    );

    // Create the help list
    let items: Vec<ListItem> = help_items
        .iter()
        .map(|(key, description)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:15}", key), theme::header_style()),
                Span::raw(*description),
            ]))
        })
        .collect();

    let list = List::new(items).style(Style::default().fg(Color::White));

    f.render_widget(list, inner);
}

fn get_help_items(state: &AppState) -> Vec<(&'static str, &'static str)> {
    let mut items = vec![];

    // Screen-specific help
    match state.current_screen() {
        Screen::Profile(..) => {
            items.push(("Tab/↓", "Next field"));
            items.push(("Shift+Tab/↑", "Previous field"));
            items.push(("←/→", "Cycle options (gender, sport, diet)"));
            items.push(("Space", "Tick allergy when the checklist is focused"));
            items.push(("Enter", "Next step, submit from the last one"));
            items.push(("Esc", "Previous step"));
        }
        Screen::Plan(..) => {
            items.push(("←/h ↔ →/l", "Previous / next day"));
            items.push(("↑/k ↔ ↓/j", "Previous / next meal"));
            items.push(("Enter", "Open meal details"));
            items.push(("o", "Order the selected meal"));
            items.push(("t", "Listen to the nutritionist's tip"));
        }
        Screen::Events(..) => {
            items.push(("Tab/↑/↓", "Switch between name and date"));
            items.push(("Type", "Fill the focused field"));
            items.push(("Enter", "Get race-day recommendations"));
        }
        Screen::Assistant(..) => {
            items.push(("Type", "Compose your message"));
            items.push(("Enter", "Send"));
            items.push(("↑/↓", "Scroll the conversation"));
        }
        Screen::Hydration(..) => {
            items.push(("a", "Add 250 ml"));
            items.push(("s", "Add 500 ml"));
            items.push(("d", "Add 750 ml"));
            items.push(("r", "Reset the day"));
        }
        Screen::Logs(..) => {
            items.push(("↑/k", "Scroll up (older logs)"));
            items.push(("↓/j", "Scroll down (newer logs)"));
            items.push(("Page Up", "Scroll up one page"));
            items.push(("Page Down", "Scroll down one page"));
            items.push(("g then g", "Scroll to oldest logs"));
            items.push(("G", "Scroll to newest logs"));
            items.push(("h/←/Esc", "Back"));
        }
    }

    // Global help
    items.push(("", ""));
    items.push(("--- Global ---", ""));
    items.push(("1-4", "Switch dashboard tab (Ctrl+digit while typing)"));
    items.push(("n / Ctrl+n", "Notifications"));
    items.push(("L / Ctrl+l", "Toggle language (English/Kiswahili)"));
    items.push(("g then l", "Go to logs"));
    items.push(("?", "Toggle this help"));
    items.push(("q / Ctrl+q", "Quit application"));

    items
}
