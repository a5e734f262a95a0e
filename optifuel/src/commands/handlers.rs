use crate::events::{AppCommand, DashboardTab};
use crate::input::{Key, KeyEvent};
use crate::state::*;
use crate::ui::screens::Screen;

/// Map user input (KeyEvent) to AppCommand based on current UI state
/// Returns None if the key should be ignored
pub fn handle_key_input(event: KeyEvent, state: &AppState) -> Option<AppCommand> {
    let key = event.key;

    // Priority 0: Ctrl shortcuts work everywhere, including text-entry
    // screens where plain letters are typed into a field
    if event.modifiers.ctrl {
        return handle_ctrl_keys(key, state);
    }

    // Priority 1: Delivery modal captures everything while open
    if let Screen::Plan(plan_state) = state.current_screen() {
        if let Some(modal) = &plan_state.delivery {
            return handle_delivery_modal_keys(key, modal);
        }
        if plan_state.meal_detail_visible {
            return match key {
                Key::Esc | Key::Enter => Some(AppCommand::ToggleMealDetail),
                Key::Char('o') => plan_state
                    .selected_meal()
                    .map(|meal| AppCommand::OpenDeliveryModal { meal: meal.clone() }),
                Key::Char('t') => Some(AppCommand::SpeakTip),
                _ => None,
            };
        }
    }

    // Priority 2: Premium upgrade modal
    if let Screen::Events(events_state) = state.current_screen() {
        if let Some(modal) = &events_state.upgrade {
            return handle_upgrade_modal_keys(key, modal);
        }
    }

    // Priority 3: Notification panel
    if state.notification_panel_visible {
        return match key {
            Key::Esc | Key::Char('n') => Some(AppCommand::ToggleNotificationPanel),
            Key::Up | Key::Char('k') => Some(AppCommand::SelectNotification { forward: false }),
            Key::Down | Key::Char('j') => Some(AppCommand::SelectNotification { forward: true }),
            Key::Enter => Some(AppCommand::MarkNotificationRead),
            Key::Char('m') => Some(AppCommand::MarkAllNotificationsRead),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 4: Help popup
    if state.help_visible {
        return match key {
            Key::Char('?') | Key::Esc => Some(AppCommand::ToggleHelp),
            Key::Char('q') => Some(AppCommand::Quit),
            _ => None,
        };
    }

    // Priority 5: Profile form is always in text-entry mode
    if let Screen::Profile(form) = state.current_screen() {
        return handle_profile_form_keys(key, form);
    }

    // Priority 6: Events and Assistant screens type into their fields
    if let Screen::Events(events_state) = state.current_screen() {
        return handle_events_keys(key, events_state, state);
    }
    if let Screen::Assistant(..) = state.current_screen() {
        return handle_assistant_keys(key);
    }

    // Handle multi-key sequences
    if let Some(pending) = state.pending_key {
        return match (pending, key) {
            // 'g' followed by 'l' -> go to logs
            ('g', Key::Char('l')) => Some(AppCommand::NavigateToLogs),
            // 'g' followed by 'g' -> scroll to oldest log entry
            ('g', Key::Char('g')) => {
                if matches!(state.current_screen(), Screen::Logs(..)) {
                    Some(AppCommand::ScrollLogsToTop)
                } else {
                    Some(AppCommand::ClearPendingKey)
                }
            }
            // Any other key clears the pending key
            _ => Some(AppCommand::ClearPendingKey),
        };
    }

    match (state.current_screen(), key) {
        // Global help toggle
        (_, Key::Char('?')) => Some(AppCommand::ToggleHelp),

        // Global quit command
        (_, Key::Char('q')) => Some(AppCommand::Quit),

        // Multi-key sequence initiator: 'g' sets pending key
        (_, Key::Char('g')) => Some(AppCommand::SetPendingKey('g')),

        // Global toggles
        (_, Key::Char('n')) => Some(AppCommand::ToggleNotificationPanel),
        (_, Key::Char('L')) => Some(AppCommand::ToggleLanguage),

        // Dashboard tab switching
        (_, Key::Char('1')) => Some(AppCommand::SwitchTab(DashboardTab::Plan)),
        (_, Key::Char('2')) => Some(AppCommand::SwitchTab(DashboardTab::Events)),
        (_, Key::Char('3')) => Some(AppCommand::SwitchTab(DashboardTab::Assistant)),
        (_, Key::Char('4')) => Some(AppCommand::SwitchTab(DashboardTab::Hydration)),

        // Plan screen
        (Screen::Plan(..), Key::Left | Key::Char('h')) => {
            Some(AppCommand::SelectDay { forward: false })
        }
        (Screen::Plan(..), Key::Right | Key::Char('l')) => {
            Some(AppCommand::SelectDay { forward: true })
        }
        (Screen::Plan(..), Key::Up | Key::Char('k')) => {
            Some(AppCommand::SelectMeal { forward: false })
        }
        (Screen::Plan(..), Key::Down | Key::Char('j')) => {
            Some(AppCommand::SelectMeal { forward: true })
        }
        (Screen::Plan(..), Key::Enter) => Some(AppCommand::ToggleMealDetail),
        (Screen::Plan(plan_state), Key::Char('o')) => plan_state
            .selected_meal()
            .map(|meal| AppCommand::OpenDeliveryModal { meal: meal.clone() }),
        (Screen::Plan(..), Key::Char('t')) => Some(AppCommand::SpeakTip),

        // Hydration screen
        (Screen::Hydration(..), Key::Char('a')) => Some(AppCommand::AddWater { amount_ml: 250 }),
        (Screen::Hydration(..), Key::Char('s')) => Some(AppCommand::AddWater { amount_ml: 500 }),
        (Screen::Hydration(..), Key::Char('d')) => Some(AppCommand::AddWater { amount_ml: 750 }),
        (Screen::Hydration(..), Key::Char('r')) => Some(AppCommand::ResetWater),

        // Logs screen
        (Screen::Logs(..), Key::Up | Key::Char('k')) => Some(AppCommand::ScrollLogsUp),
        (Screen::Logs(..), Key::Down | Key::Char('j')) => Some(AppCommand::ScrollLogsDown),
        (Screen::Logs(..), Key::PageUp) => Some(AppCommand::ScrollLogsPageUp),
        (Screen::Logs(..), Key::PageDown) => Some(AppCommand::ScrollLogsPageDown),
        (Screen::Logs(..), Key::Char('G')) => Some(AppCommand::ScrollLogsToBottom),
        (Screen::Logs(..), Key::Esc | Key::Left | Key::Char('h')) => {
            Some(AppCommand::NavigateBack)
        }

        // Ignore other keys
        _ => None,
    }
}

/// Ctrl shortcuts: the escape hatch that stays available while a screen
/// is swallowing plain keys as text
fn handle_ctrl_keys(key: Key, state: &AppState) -> Option<AppCommand> {
    // Tab switching is blocked while a modal flow is open
    let modal_open = match state.current_screen() {
        Screen::Plan(plan_state) => plan_state.delivery.is_some(),
        Screen::Events(events_state) => events_state.upgrade.is_some(),
        _ => false,
    };

    match key {
        Key::Char('q') => Some(AppCommand::Quit),
        Key::Char('l') => Some(AppCommand::ToggleLanguage),
        Key::Char('n') => Some(AppCommand::ToggleNotificationPanel),
        Key::Char('1') if !modal_open => Some(AppCommand::SwitchTab(DashboardTab::Plan)),
        Key::Char('2') if !modal_open => Some(AppCommand::SwitchTab(DashboardTab::Events)),
        Key::Char('3') if !modal_open => Some(AppCommand::SwitchTab(DashboardTab::Assistant)),
        Key::Char('4') if !modal_open => Some(AppCommand::SwitchTab(DashboardTab::Hydration)),
        _ => None,
    }
}

/// Handle keyboard input while the delivery modal is open
fn handle_delivery_modal_keys(key: Key, modal: &DeliveryModalState) -> Option<AppCommand> {
    match &modal.step {
        DeliveryStep::Loading(..) => match key {
            Key::Esc => Some(AppCommand::CloseDeliveryModal),
            _ => None,
        },

        DeliveryStep::List {
            compare_mode,
            compare_selection,
            ..
        } => match key {
            Key::Esc => {
                if *compare_mode {
                    Some(AppCommand::DeliveryBack)
                } else {
                    Some(AppCommand::CloseDeliveryModal)
                }
            }
            Key::Up | Key::Char('k') => Some(AppCommand::DeliverySelect { forward: false }),
            Key::Down | Key::Char('j') => Some(AppCommand::DeliverySelect { forward: true }),
            Key::Char('c') => Some(AppCommand::ToggleCompareMode),
            Key::Char(' ') => {
                if *compare_mode {
                    Some(AppCommand::ToggleCompareSelection)
                } else {
                    None
                }
            }
            Key::Enter => {
                if *compare_mode {
                    // Enter confirms the comparison once enough options are
                    // ticked, otherwise it ticks the highlighted one
                    if compare_selection.len() >= 2 {
                        Some(AppCommand::ShowComparison)
                    } else {
                        Some(AppCommand::ToggleCompareSelection)
                    }
                } else {
                    Some(AppCommand::ConfirmDeliverySelection)
                }
            }
            _ => None,
        },

        DeliveryStep::Compare { .. } => match key {
            Key::Esc | Key::Backspace => Some(AppCommand::DeliveryBack),
            Key::Left | Key::Char('h') | Key::Up | Key::Char('k') => {
                Some(AppCommand::DeliverySelect { forward: false })
            }
            Key::Right | Key::Char('l') | Key::Down | Key::Char('j') => {
                Some(AppCommand::DeliverySelect { forward: true })
            }
            Key::Enter => Some(AppCommand::ConfirmDeliverySelection),
            _ => None,
        },

        DeliveryStep::Confirm { .. } => match key {
            Key::Enter | Key::Char('y') => Some(AppCommand::ProceedToPayment),
            Key::Esc | Key::Backspace | Key::Char('n') => Some(AppCommand::DeliveryBack),
            _ => None,
        },

        DeliveryStep::Payment { .. } => match key {
            Key::Esc => Some(AppCommand::DeliveryBack),
            Key::Backspace => Some(AppCommand::DeletePhoneChar),
            Key::Enter => Some(AppCommand::SubmitPayment),
            Key::Char(c) if c.is_ascii_digit() => Some(AppCommand::AppendPhoneChar(c)),
            _ => None,
        },

        // The STK push is in flight, nothing to do but wait
        DeliveryStep::ProcessingPayment { .. } => None,

        DeliveryStep::Success => match key {
            Key::Esc | Key::Enter => Some(AppCommand::CloseDeliveryModal),
            _ => None,
        },
    }
}

/// Handle keyboard input while the premium upgrade modal is open
fn handle_upgrade_modal_keys(key: Key, modal: &UpgradeModalState) -> Option<AppCommand> {
    match &modal.step {
        UpgradeStep::Input { .. } => match key {
            Key::Esc => Some(AppCommand::CloseUpgradeModal),
            Key::Backspace => Some(AppCommand::DeleteUpgradeChar),
            Key::Enter => Some(AppCommand::UpgradeContinue),
            Key::Char(c) if c.is_ascii_digit() => Some(AppCommand::AppendUpgradeChar(c)),
            _ => None,
        },

        UpgradeStep::FinalConfirmation { .. } => match key {
            Key::Enter | Key::Char('y') => Some(AppCommand::UpgradeContinue),
            Key::Backspace | Key::Char('n') => Some(AppCommand::UpgradeBack),
            Key::Esc => Some(AppCommand::CloseUpgradeModal),
            _ => None,
        },

        UpgradeStep::SimulatedPin { .. } => match key {
            Key::Esc => Some(AppCommand::CloseUpgradeModal),
            Key::Backspace => Some(AppCommand::DeleteUpgradeChar),
            Key::Enter => Some(AppCommand::UpgradeContinue),
            Key::Char(c) if c.is_ascii_digit() => Some(AppCommand::AppendUpgradeChar(c)),
            _ => None,
        },

        UpgradeStep::Processing { .. } => None,

        UpgradeStep::Success => match key {
            Key::Esc | Key::Enter => Some(AppCommand::CloseUpgradeModal),
            _ => None,
        },
    }
}

/// Handle keyboard input on the profile form
fn handle_profile_form_keys(key: Key, form: &ProfileFormState) -> Option<AppCommand> {
    match key {
        // Escape returns to the previous step
        Key::Esc => Some(AppCommand::FormPrevStep),

        // Tab / arrows move between fields
        Key::Tab | Key::Down => Some(AppCommand::NavigateFormField { forward: true }),
        Key::BackTab | Key::Up => Some(AppCommand::NavigateFormField { forward: false }),

        // Left/right cycle through the options of choice fields
        Key::Left => Some(AppCommand::CycleFieldOption { forward: false }),
        Key::Right => Some(AppCommand::CycleFieldOption { forward: true }),

        Key::Backspace => Some(AppCommand::DeleteFormFieldChar),

        // Enter advances the step, submitting from the last one
        Key::Enter => {
            if form.step < 3 {
                Some(AppCommand::FormNextStep)
            } else {
                Some(AppCommand::SubmitProfileForm)
            }
        }

        // Space ticks the highlighted allergy when the checklist is focused
        Key::Char(' ') => {
            if form.focused() == ProfileField::Allergies {
                Some(AppCommand::ToggleAllergy)
            } else {
                Some(AppCommand::AppendFormFieldChar { c: ' ' })
            }
        }

        Key::Char(c) => Some(AppCommand::AppendFormFieldChar { c }),

        _ => None,
    }
}

/// Handle keyboard input on the events screen (no upgrade modal open)
fn handle_events_keys(key: Key, events_state: &EventsState, state: &AppState) -> Option<AppCommand> {
    match key {
        Key::Tab | Key::BackTab | Key::Up | Key::Down => Some(AppCommand::ToggleEventField),
        Key::Backspace => Some(AppCommand::DeleteEventChar),

        // Enter requests guidance, or opens the upsell for basic users
        Key::Enter => {
            if state.is_premium() {
                if events_state.event_name.trim().is_empty() {
                    None
                } else {
                    Some(AppCommand::RequestEventRecommendations)
                }
            } else {
                Some(AppCommand::OpenUpgradeModal)
            }
        }

        Key::Char(c) => Some(AppCommand::AppendEventChar(c)),

        _ => None,
    }
}

/// Handle keyboard input on the assistant screen
fn handle_assistant_keys(key: Key) -> Option<AppCommand> {
    match key {
        Key::Enter => Some(AppCommand::SubmitChatMessage),
        Key::Backspace => Some(AppCommand::DeleteChatChar),
        Key::Up => Some(AppCommand::ScrollChat { up: true }),
        Key::Down => Some(AppCommand::ScrollChat { up: false }),
        Key::Char(c) => Some(AppCommand::AppendChatChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Macros, Meal};
    use throbber_widgets_tui::ThrobberState;

    fn sample_meal() -> Meal {
        Meal {
            name: "Oatmeal with Banana & Honey".to_string(),
            description: "Slow-release carbs for the morning session".to_string(),
            macros: Macros {
                protein: 18,
                carbs: 75,
                fats: 12,
            },
            ingredients: None,
            preparation: None,
        }
    }

    /// Helper to create a state sitting on the Hydration screen
    fn hydration_state() -> AppState {
        let mut state = AppState::new();
        state.history = vec![Screen::Hydration(HydrationState::default())];
        state
    }

    fn plan_state_with_modal(step: DeliveryStep) -> AppState {
        let mut state = AppState::new();
        state.history = vec![Screen::Plan(PlanState {
            delivery: Some(DeliveryModalState {
                meal: sample_meal(),
                options: Vec::new(),
                step,
            }),
            ..PlanState::default()
        })];
        state
    }

    // ============================================================================
    // Global Commands
    // ============================================================================

    #[test]
    fn test_quit_command() {
        let state = hydration_state();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('q')), &state),
            Some(AppCommand::Quit)
        );
    }

    #[test]
    fn test_help_toggle() {
        let state = hydration_state();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('?')), &state),
            Some(AppCommand::ToggleHelp)
        );
    }

    #[test]
    fn test_help_visible_blocks_other_commands() {
        let mut state = hydration_state();
        state.help_visible = true;

        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('a')), &state),
            None
        );
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Esc), &state),
            Some(AppCommand::ToggleHelp)
        );
    }

    #[test]
    fn test_tab_digits_switch_dashboard() {
        let state = hydration_state();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('2')), &state),
            Some(AppCommand::SwitchTab(DashboardTab::Events))
        );
    }

    // ============================================================================
    // Multi-key Sequences
    // ============================================================================

    #[test]
    fn test_g_sets_pending_key() {
        let state = hydration_state();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('g')), &state),
            Some(AppCommand::SetPendingKey('g'))
        );
    }

    #[test]
    fn test_gl_navigates_to_logs() {
        let mut state = hydration_state();
        state.pending_key = Some('g');
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('l')), &state),
            Some(AppCommand::NavigateToLogs)
        );
    }

    #[test]
    fn test_invalid_multi_key_sequence_clears_pending() {
        let mut state = hydration_state();
        state.pending_key = Some('g');
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('x')), &state),
            Some(AppCommand::ClearPendingKey)
        );
    }

    // ============================================================================
    // Profile Form
    // ============================================================================

    #[test]
    fn test_profile_form_typing_appends() {
        let state = AppState::new();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('A')), &state),
            Some(AppCommand::AppendFormFieldChar { c: 'A' })
        );
    }

    #[test]
    fn test_profile_form_enter_advances_then_submits() {
        let mut state = AppState::new();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Enter), &state),
            Some(AppCommand::FormNextStep)
        );

        if let Screen::Profile(ref mut form) = state.history[0] {
            form.step = 3;
        }
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Enter), &state),
            Some(AppCommand::SubmitProfileForm)
        );
    }

    #[test]
    fn test_profile_form_q_is_text_not_quit() {
        let state = AppState::new();
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('q')), &state),
            Some(AppCommand::AppendFormFieldChar { c: 'q' })
        );
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('q')), &state),
            Some(AppCommand::Quit)
        );
    }

    #[test]
    fn test_profile_form_space_toggles_allergy_when_checklist_focused() {
        let mut state = AppState::new();
        if let Screen::Profile(ref mut form) = state.history[0] {
            form.step = 3;
            // Area, Sport, Diet, Allergies
            form.focused_field = 3;
        }
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char(' ')), &state),
            Some(AppCommand::ToggleAllergy)
        );
    }

    // ============================================================================
    // Delivery Modal
    // ============================================================================

    #[test]
    fn test_delivery_list_esc_closes_modal() {
        let state = plan_state_with_modal(DeliveryStep::pristine_list());
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Esc), &state),
            Some(AppCommand::CloseDeliveryModal)
        );
    }

    #[test]
    fn test_delivery_compare_mode_esc_backs_out_to_list() {
        let state = plan_state_with_modal(DeliveryStep::List {
            cursor: 0,
            compare_mode: true,
            compare_selection: vec![0],
        });
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Esc), &state),
            Some(AppCommand::DeliveryBack)
        );
    }

    #[test]
    fn test_delivery_payment_accepts_digits_only() {
        let state = plan_state_with_modal(DeliveryStep::Payment {
            selected: 0,
            phone_number: String::new(),
            payment_error: None,
        });
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('2')), &state),
            Some(AppCommand::AppendPhoneChar('2'))
        );
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('x')), &state),
            None
        );
    }

    #[test]
    fn test_delivery_processing_ignores_input() {
        let state = plan_state_with_modal(DeliveryStep::ProcessingPayment {
            selected: 0,
            phone_number: "254712345678".to_string(),
            throbber: ThrobberState::default(),
        });
        assert_eq!(handle_key_input(KeyEvent::new(Key::Esc), &state), None);
        assert_eq!(handle_key_input(KeyEvent::new(Key::Enter), &state), None);
    }

    #[test]
    fn test_delivery_modal_blocks_tab_switching() {
        let state = plan_state_with_modal(DeliveryStep::pristine_list());
        assert_eq!(
            handle_key_input(KeyEvent::with_ctrl(Key::Char('2')), &state),
            None
        );
    }

    // ============================================================================
    // Events Screen
    // ============================================================================

    #[test]
    fn test_events_enter_opens_upsell_for_basic_users() {
        let mut state = AppState::new();
        state.history = vec![Screen::Events(EventsState {
            event_name: "County Trials".to_string(),
            ..EventsState::default()
        })];
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Enter), &state),
            Some(AppCommand::OpenUpgradeModal)
        );
    }

    #[test]
    fn test_events_typing_goes_to_focused_field() {
        let mut state = AppState::new();
        state.history = vec![Screen::Events(EventsState::default())];
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('C')), &state),
            Some(AppCommand::AppendEventChar('C'))
        );
    }

    // ============================================================================
    // Upgrade Modal
    // ============================================================================

    #[test]
    fn test_upgrade_confirmation_y_continues_n_backs() {
        let mut state = AppState::new();
        state.history = vec![Screen::Events(EventsState {
            upgrade: Some(UpgradeModalState {
                step: UpgradeStep::FinalConfirmation {
                    phone_number: "254712345678".to_string(),
                },
            }),
            ..EventsState::default()
        })];
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('y')), &state),
            Some(AppCommand::UpgradeContinue)
        );
        assert_eq!(
            handle_key_input(KeyEvent::new(Key::Char('n')), &state),
            Some(AppCommand::UpgradeBack)
        );
    }
}
