pub mod components;
pub mod layouts;
pub mod screens;
pub mod theme;
pub mod utils;

use crate::log_buffer::LogBuffer;
use crate::state::AppState;
use ratatui::Frame;
use screens::*;

/// Pure render dispatcher - routes to appropriate screen renderer
/// This function is read-only and never mutates state
pub fn render_app(f: &mut Frame, state: &AppState, log_buffer: &LogBuffer) {
    let language = state.language;

    // Render the current screen
    match state.current_screen() {
        Screen::Profile(form) => {
            profile_screen::render(f, form, language);
        }
        Screen::Plan(plan_state) => {
            plan_screen::render(f, plan_state, state);

            if plan_state.meal_detail_visible {
                if let Some(meal) = plan_state.selected_meal() {
                    components::meal_detail::render(f, meal, state);
                }
            }

            // The ordering flow sits on top of everything on this screen
            if let Some(modal) = &plan_state.delivery {
                components::delivery_modal::render(f, modal, language);
            }
        }
        Screen::Events(events_state) => {
            events_screen::render(f, events_state, state);

            if let Some(modal) = &events_state.upgrade {
                components::upgrade_modal::render(f, modal, language);
            }
        }
        Screen::Assistant(assistant_state) => {
            assistant_screen::render(f, assistant_state, state);
        }
        Screen::Hydration(hydration_state) => {
            hydration_screen::render(f, hydration_state, state);
        }
        Screen::Logs(logs_state) => {
            logs_screen::render(f, logs_state, language, log_buffer);
        }
    }

    // Notification panel overlays the screen but sits under help
    if state.notification_panel_visible {
        components::notification_panel::render(f, state);
    }

    // Render help popup on top if visible
    if state.help_visible {
        components::help_popup::render_help_popup(f, state);
    }
}
