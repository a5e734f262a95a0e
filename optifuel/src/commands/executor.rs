use crate::background::{BackgroundTaskManager, data_loader::DataLoader};
use crate::events::{AppCommand, DashboardTab};
use crate::models::{COMMON_ALLERGIES, Diet, Gender, Meal, SportType, UserProfile};
use crate::state::validators;
use crate::state::*;
use crate::ui::screens::Screen;
use optifuel_ai::types::ChatMessage;
use throbber_widgets_tui::ThrobberState;

/// Execute a command by mutating state and spawning background tasks.
/// Commands with no background side effect are delegated to
/// `execute_command_sync`.
pub fn execute_command(
    command: AppCommand,
    state: &mut AppState,
    task_manager: &mut BackgroundTaskManager,
    data_loader: &DataLoader,
) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        AppCommand::SwitchTab(tab) => {
            if let Some(profile) = switch_tab(state, tab) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("load-plan".to_string(), async move {
                    data_loader.load_nutrition_plan(profile).await;
                });
            }
        }

        AppCommand::SubmitProfileForm => {
            if let Some(profile) = submit_profile_form(state) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("load-plan".to_string(), async move {
                    data_loader.load_nutrition_plan(profile).await;
                });
            }
        }

        AppCommand::OpenDeliveryModal { meal } => {
            if let Some((generation, meal_name, area)) = open_delivery_modal(state, meal) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("delivery-options".to_string(), async move {
                    data_loader
                        .load_delivery_options(generation, meal_name, area)
                        .await;
                });
            }
        }

        AppCommand::CloseDeliveryModal => {
            if close_delivery_modal(state) {
                // A pending fetch, payment, or auto-close timer must not
                // outlive the modal.
                task_manager.cancel("delivery-options");
                task_manager.cancel("delivery-payment");
            }
        }

        AppCommand::SubmitPayment => {
            if let Some((generation, phone_number, amount)) = submit_payment(state) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("delivery-payment".to_string(), async move {
                    data_loader
                        .submit_delivery_payment(generation, phone_number, amount)
                        .await;
                });
            }
        }

        AppCommand::UpgradeContinue => {
            if let Some((generation, phone_number)) = upgrade_continue(state) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("upgrade-payment".to_string(), async move {
                    data_loader
                        .submit_upgrade_payment(generation, phone_number)
                        .await;
                });
            }
        }

        AppCommand::CloseUpgradeModal => {
            if close_upgrade_modal(state) {
                task_manager.cancel("upgrade-payment");
            }
        }

        AppCommand::RequestEventRecommendations => {
            if let Some((profile, event_name, event_date, location)) =
                request_event_recommendations(state)
            {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("event-recommendations".to_string(), async move {
                    data_loader
                        .load_event_recommendations(profile, event_name, event_date, location)
                        .await;
                });
            }
        }

        AppCommand::SubmitChatMessage => {
            if let Some((history, message)) = submit_chat_message(state) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("chat-message".to_string(), async move {
                    data_loader.send_chat_message(history, message).await;
                });
            }
        }

        AppCommand::SpeakTip => {
            if let Some(tip) = speak_tip(state) {
                let data_loader = data_loader.clone();
                task_manager.spawn_load_task("tip-audio".to_string(), async move {
                    data_loader.speak_tip(tip).await;
                });
            }
        }

        other => execute_command_sync(other, state),
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}

/// Synchronous command execution for testing (no background tasks)
///
/// Commands that normally spawn background work still apply their state
/// transition here; tests inject the corresponding DataEvents directly.
pub fn execute_command_sync(command: AppCommand, state: &mut AppState) {
    let is_setting_pending_key = matches!(command, AppCommand::SetPendingKey(_));

    match command {
        // Simple state updates
        AppCommand::Quit => state.should_quit = true,
        AppCommand::ToggleHelp => state.help_visible = !state.help_visible,
        AppCommand::ToggleLanguage => state.language = state.language.toggled(),
        AppCommand::ToggleNotificationPanel => {
            state.notification_panel_visible = !state.notification_panel_visible;
            state.notification_cursor = 0;
        }
        AppCommand::SelectNotification { forward } => {
            let len = state.notifications.len();
            if len > 0 {
                state.notification_cursor = if forward {
                    (state.notification_cursor + 1) % len
                } else {
                    (state.notification_cursor + len - 1) % len
                };
            }
        }
        AppCommand::MarkNotificationRead => {
            if let Some(id) = state
                .notifications
                .get(state.notification_cursor)
                .map(|n| n.id)
            {
                state.mark_notification_read(id);
            }
        }
        AppCommand::MarkAllNotificationsRead => state.mark_all_notifications_read(),
        AppCommand::SetPendingKey(c) => state.pending_key = Some(c),
        AppCommand::ClearPendingKey => state.pending_key = None,

        // Navigation
        AppCommand::NavigateBack => {
            state.navigate_back();
        }
        AppCommand::NavigateToLogs => {
            state.navigate_to(Screen::Logs(LogsState::default()));
        }

        // Profile form
        AppCommand::NavigateFormField { forward } => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                let len = form.fields().len();
                form.focused_field = if forward {
                    (form.focused_field + 1) % len
                } else {
                    (form.focused_field + len - 1) % len
                };
            }
        }
        AppCommand::FormNextStep => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                if form.step < 3 {
                    form.step += 1;
                    form.focused_field = 0;
                }
            }
        }
        AppCommand::FormPrevStep => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                if form.step > 1 {
                    form.step -= 1;
                    form.focused_field = 0;
                }
            }
        }
        AppCommand::AppendFormFieldChar { c } => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                let pushed = match form.focused() {
                    ProfileField::Name => {
                        form.name.push(c);
                        true
                    }
                    ProfileField::Area => {
                        form.area.push(c);
                        true
                    }
                    ProfileField::OtherAllergy => {
                        form.other_allergy.push(c);
                        true
                    }
                    ProfileField::Age => {
                        if c.is_ascii_digit() && form.age.len() < 3 {
                            form.age.push(c);
                            true
                        } else {
                            false
                        }
                    }
                    ProfileField::Height => push_numeric(&mut form.height, c),
                    ProfileField::Weight => push_numeric(&mut form.weight, c),
                    ProfileField::Gender
                    | ProfileField::Sport
                    | ProfileField::Diet
                    | ProfileField::Allergies => false,
                };
                if pushed {
                    form.validation_error = None;
                }
            }
        }
        AppCommand::DeleteFormFieldChar => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                let field = match form.focused() {
                    ProfileField::Name => Some(&mut form.name),
                    ProfileField::Age => Some(&mut form.age),
                    ProfileField::Height => Some(&mut form.height),
                    ProfileField::Weight => Some(&mut form.weight),
                    ProfileField::Area => Some(&mut form.area),
                    ProfileField::OtherAllergy => Some(&mut form.other_allergy),
                    _ => None,
                };
                if let Some(field) = field {
                    field.pop();
                    form.validation_error = None;
                }
            }
        }
        AppCommand::CycleFieldOption { forward } => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                match form.focused() {
                    ProfileField::Gender => form.gender = cycled(&Gender::ALL, form.gender, forward),
                    ProfileField::Sport => form.sport = cycled(&SportType::ALL, form.sport, forward),
                    ProfileField::Diet => form.diet = cycled(&Diet::ALL, form.diet, forward),
                    ProfileField::Allergies => {
                        let len = COMMON_ALLERGIES.len();
                        form.allergy_cursor = if forward {
                            (form.allergy_cursor + 1) % len
                        } else {
                            (form.allergy_cursor + len - 1) % len
                        };
                    }
                    _ => {}
                }
            }
        }
        AppCommand::ToggleAllergy => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                if form.focused() == ProfileField::Allergies {
                    form.allergy_selected[form.allergy_cursor] =
                        !form.allergy_selected[form.allergy_cursor];
                }
            }
        }

        // Plan screen
        AppCommand::SelectDay { forward } => {
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                let len = plan_state.plan.len();
                if len > 0 {
                    plan_state.selected_day = if forward {
                        (plan_state.selected_day + 1) % len
                    } else {
                        (plan_state.selected_day + len - 1) % len
                    };
                    plan_state.selected_meal = 0;
                }
            }
        }
        AppCommand::SelectMeal { forward } => {
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                if !plan_state.plan.is_empty() {
                    plan_state.selected_meal = if forward {
                        (plan_state.selected_meal + 1) % 5
                    } else {
                        (plan_state.selected_meal + 4) % 5
                    };
                }
            }
        }
        AppCommand::ToggleMealDetail => {
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                if plan_state.current_day().is_some() {
                    plan_state.meal_detail_visible = !plan_state.meal_detail_visible;
                }
            }
        }

        // Delivery modal (pure transitions)
        AppCommand::DeliverySelect { forward } => {
            if let Some(modal) = delivery_modal_mut(state) {
                match &mut modal.step {
                    DeliveryStep::List { cursor, .. } => {
                        *cursor = cycled_index(*cursor, modal.options.len(), forward);
                    }
                    DeliveryStep::Compare { items, cursor } => {
                        *cursor = cycled_index(*cursor, items.len(), forward);
                    }
                    _ => {}
                }
            }
        }
        AppCommand::ToggleCompareMode => {
            if let Some(modal) = delivery_modal_mut(state) {
                if let DeliveryStep::List {
                    compare_mode,
                    compare_selection,
                    ..
                } = &mut modal.step
                {
                    *compare_mode = !*compare_mode;
                    // Entering or leaving compare mode always starts from a
                    // clean selection.
                    compare_selection.clear();
                }
            }
        }
        AppCommand::ToggleCompareSelection => {
            if let Some(modal) = delivery_modal_mut(state) {
                if let DeliveryStep::List {
                    cursor,
                    compare_mode: true,
                    compare_selection,
                } = &mut modal.step
                {
                    if let Some(position) = compare_selection.iter().position(|i| i == cursor) {
                        compare_selection.remove(position);
                    } else {
                        compare_selection.push(*cursor);
                    }
                }
            }
        }
        AppCommand::ShowComparison => {
            if let Some(modal) = delivery_modal_mut(state) {
                if let DeliveryStep::List {
                    compare_mode: true,
                    compare_selection,
                    ..
                } = &modal.step
                {
                    if compare_selection.len() >= 2 {
                        let mut items = compare_selection.clone();
                        items.sort_unstable();
                        modal.step = DeliveryStep::Compare { items, cursor: 0 };
                    }
                }
            }
        }
        AppCommand::ConfirmDeliverySelection => {
            if let Some(modal) = delivery_modal_mut(state) {
                match modal.step.clone() {
                    DeliveryStep::List {
                        cursor,
                        compare_mode: false,
                        ..
                    } => {
                        if cursor < modal.options.len() {
                            modal.step = DeliveryStep::Confirm { selected: cursor };
                        }
                    }
                    DeliveryStep::Compare { items, cursor } => {
                        if let Some(&selected) = items.get(cursor) {
                            modal.step = DeliveryStep::Confirm { selected };
                        }
                    }
                    _ => {}
                }
            }
        }
        AppCommand::DeliveryBack => {
            if let Some(modal) = delivery_modal_mut(state) {
                match modal.step {
                    DeliveryStep::Compare { .. }
                    | DeliveryStep::Confirm { .. }
                    | DeliveryStep::Payment { .. }
                    | DeliveryStep::List {
                        compare_mode: true, ..
                    } => {
                        modal.step = DeliveryStep::pristine_list();
                    }
                    _ => {}
                }
            }
        }
        AppCommand::ProceedToPayment => {
            if let Some(modal) = delivery_modal_mut(state) {
                if let DeliveryStep::Confirm { selected } = modal.step {
                    modal.step = DeliveryStep::Payment {
                        selected,
                        phone_number: String::new(),
                        payment_error: None,
                    };
                }
            }
        }
        AppCommand::AppendPhoneChar(c) => {
            if let Some(modal) = delivery_modal_mut(state) {
                if let DeliveryStep::Payment {
                    phone_number,
                    payment_error,
                    ..
                } = &mut modal.step
                {
                    if c.is_ascii_digit() && phone_number.len() < 12 {
                        phone_number.push(c);
                        *payment_error = None;
                    }
                }
            }
        }
        AppCommand::DeletePhoneChar => {
            if let Some(modal) = delivery_modal_mut(state) {
                if let DeliveryStep::Payment {
                    phone_number,
                    payment_error,
                    ..
                } = &mut modal.step
                {
                    phone_number.pop();
                    *payment_error = None;
                }
            }
        }

        // Events screen
        AppCommand::ToggleEventField => {
            if let Screen::Events(events_state) = state.current_screen_mut() {
                events_state.focused_field = match events_state.focused_field {
                    EventField::Name => EventField::Date,
                    EventField::Date => EventField::Name,
                };
            }
        }
        AppCommand::AppendEventChar(c) => {
            if let Screen::Events(events_state) = state.current_screen_mut() {
                match events_state.focused_field {
                    EventField::Name => events_state.event_name.push(c),
                    EventField::Date => {
                        if (c.is_ascii_digit() || c == '-') && events_state.event_date.len() < 10 {
                            events_state.event_date.push(c);
                        }
                    }
                }
            }
        }
        AppCommand::DeleteEventChar => {
            if let Screen::Events(events_state) = state.current_screen_mut() {
                match events_state.focused_field {
                    EventField::Name => {
                        events_state.event_name.pop();
                    }
                    EventField::Date => {
                        events_state.event_date.pop();
                    }
                }
            }
        }

        // Upgrade modal (pure transitions)
        AppCommand::OpenUpgradeModal => {
            open_upgrade_modal(state);
        }
        AppCommand::AppendUpgradeChar(c) => {
            if let Some(modal) = upgrade_modal_mut(state) {
                match &mut modal.step {
                    UpgradeStep::Input {
                        phone_number,
                        error,
                    } => {
                        if c.is_ascii_digit() && phone_number.len() < 12 {
                            phone_number.push(c);
                            *error = None;
                        }
                    }
                    UpgradeStep::SimulatedPin { pin, error, .. } => {
                        if c.is_ascii_digit() && pin.len() < 8 {
                            pin.push(c);
                            *error = None;
                        }
                    }
                    _ => {}
                }
            }
        }
        AppCommand::DeleteUpgradeChar => {
            if let Some(modal) = upgrade_modal_mut(state) {
                match &mut modal.step {
                    UpgradeStep::Input {
                        phone_number,
                        error,
                    } => {
                        phone_number.pop();
                        *error = None;
                    }
                    UpgradeStep::SimulatedPin { pin, error, .. } => {
                        pin.pop();
                        *error = None;
                    }
                    _ => {}
                }
            }
        }
        AppCommand::UpgradeBack => {
            if let Some(modal) = upgrade_modal_mut(state) {
                match modal.step.clone() {
                    UpgradeStep::FinalConfirmation { phone_number } => {
                        modal.step = UpgradeStep::Input {
                            phone_number,
                            error: None,
                        };
                    }
                    UpgradeStep::SimulatedPin { phone_number, .. } => {
                        modal.step = UpgradeStep::FinalConfirmation { phone_number };
                    }
                    _ => {}
                }
            }
        }

        // Assistant screen
        AppCommand::AppendChatChar(c) => {
            if let Screen::Assistant(assistant_state) = state.current_screen_mut() {
                assistant_state.input.push(c);
            }
        }
        AppCommand::DeleteChatChar => {
            if let Screen::Assistant(assistant_state) = state.current_screen_mut() {
                assistant_state.input.pop();
            }
        }
        AppCommand::ScrollChat { up } => {
            if let Screen::Assistant(assistant_state) = state.current_screen_mut() {
                if up {
                    assistant_state.scroll_offset += 1;
                } else {
                    assistant_state.scroll_offset =
                        assistant_state.scroll_offset.saturating_sub(1);
                }
            }
        }

        // Hydration screen
        AppCommand::AddWater { amount_ml } => {
            if let Screen::Hydration(hydration_state) = state.current_screen_mut() {
                hydration_state.add(amount_ml);
            }
        }
        AppCommand::ResetWater => {
            if let Screen::Hydration(hydration_state) = state.current_screen_mut() {
                hydration_state.reset();
            }
        }

        // Log screen commands
        AppCommand::ScrollLogsUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                if s.scroll_offset < s.total_entries.saturating_sub(1) {
                    s.scroll_offset += 1;
                }
            }
        }
        AppCommand::ScrollLogsDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsPageUp => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = (s.scroll_offset + 20).min(s.total_entries.saturating_sub(1));
            }
        }
        AppCommand::ScrollLogsPageDown => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.scroll_offset.saturating_sub(20);
            }
        }
        AppCommand::ScrollLogsToTop => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = s.total_entries.saturating_sub(1);
            }
        }
        AppCommand::ScrollLogsToBottom => {
            if let Screen::Logs(s) = state.current_screen_mut() {
                s.scroll_offset = 0;
            }
        }

        // Commands that normally spawn background tasks - apply the state
        // transition only. Tests inject the corresponding DataEvents.
        AppCommand::SwitchTab(tab) => {
            let _ = switch_tab(state, tab);
        }
        AppCommand::SubmitProfileForm => {
            let _ = submit_profile_form(state);
        }
        AppCommand::OpenDeliveryModal { meal } => {
            let _ = open_delivery_modal(state, meal);
        }
        AppCommand::CloseDeliveryModal => {
            let _ = close_delivery_modal(state);
        }
        AppCommand::SubmitPayment => {
            let _ = submit_payment(state);
        }
        AppCommand::UpgradeContinue => {
            let _ = upgrade_continue(state);
        }
        AppCommand::CloseUpgradeModal => {
            let _ = close_upgrade_modal(state);
        }
        AppCommand::RequestEventRecommendations => {
            let _ = request_event_recommendations(state);
        }
        AppCommand::SubmitChatMessage => {
            let _ = submit_chat_message(state);
        }
        AppCommand::SpeakTip => {
            let _ = speak_tip(state);
        }
    }

    // Clear pending key after any command except SetPendingKey
    if !is_setting_pending_key && state.pending_key.is_some() {
        state.pending_key = None;
    }
}

fn push_numeric(field: &mut String, c: char) -> bool {
    if c.is_ascii_digit() || (c == '.' && !field.contains('.')) {
        field.push(c);
        true
    } else {
        false
    }
}

fn cycled<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let len = all.len();
    let position = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    all[next]
}

fn cycled_index(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

fn delivery_modal_mut(state: &mut AppState) -> Option<&mut DeliveryModalState> {
    match state.current_screen_mut() {
        Screen::Plan(plan_state) => plan_state.delivery.as_mut(),
        _ => None,
    }
}

fn upgrade_modal_mut(state: &mut AppState) -> Option<&mut UpgradeModalState> {
    match state.current_screen_mut() {
        Screen::Events(events_state) => events_state.upgrade.as_mut(),
        _ => None,
    }
}

/// Replaces the current screen with the requested tab. Returns the
/// profile when a plan fetch must be spawned.
fn switch_tab(state: &mut AppState, tab: DashboardTab) -> Option<UserProfile> {
    let profile = state.user_profile.clone()?;
    match tab {
        DashboardTab::Plan => {
            if matches!(state.current_screen(), Screen::Plan(_)) {
                return None;
            }
            match state.nutrition_plan.clone() {
                Some(plan) => {
                    state.switch_to(Screen::Plan(PlanState {
                        plan,
                        plan_loading: LoadingState::Loaded,
                        ..Default::default()
                    }));
                    None
                }
                None => {
                    state.switch_to(Screen::Plan(PlanState {
                        plan_loading: LoadingState::Loading(ThrobberState::default()),
                        ..Default::default()
                    }));
                    Some(profile)
                }
            }
        }
        DashboardTab::Events => {
            if !matches!(state.current_screen(), Screen::Events(_)) {
                state.switch_to(Screen::Events(EventsState::default()));
            }
            None
        }
        DashboardTab::Assistant => {
            if !matches!(state.current_screen(), Screen::Assistant(_)) {
                state.switch_to(Screen::Assistant(AssistantState::default()));
            }
            None
        }
        DashboardTab::Hydration => {
            if !matches!(state.current_screen(), Screen::Hydration(_)) {
                state.switch_to(Screen::Hydration(HydrationState::default()));
            }
            None
        }
    }
}

/// Validates the form; on success installs the profile, resets the
/// navigation stack onto the Plan screen, and returns the profile so the
/// plan fetch can be spawned.
fn submit_profile_form(state: &mut AppState) -> Option<UserProfile> {
    let result = match state.current_screen_mut() {
        Screen::Profile(form) => validators::validate_and_build_profile(form),
        _ => return None,
    };
    match result {
        Err(key) => {
            if let Screen::Profile(form) = state.current_screen_mut() {
                form.validation_error = Some(key);
            }
            None
        }
        Ok(profile) => {
            tracing::info!(name = %profile.name, "profile created");
            state.user_profile = Some(profile.clone());
            state.nutrition_plan = None;
            state.history = vec![Screen::Plan(PlanState {
                plan_loading: LoadingState::Loading(ThrobberState::default()),
                ..Default::default()
            })];
            Some(profile)
        }
    }
}

/// Opens the delivery modal in its loading step under a fresh generation.
/// Returns the spawn payload for the option fetch.
fn open_delivery_modal(state: &mut AppState, meal: Meal) -> Option<(u64, String, String)> {
    let area = state.user_profile.as_ref()?.geographical_area.clone();
    if !matches!(state.current_screen(), Screen::Plan(_)) {
        return None;
    }
    state.delivery_generation += 1;
    let generation = state.delivery_generation;
    let meal_name = meal.name.clone();
    if let Screen::Plan(plan_state) = state.current_screen_mut() {
        plan_state.meal_detail_visible = false;
        plan_state.delivery = Some(DeliveryModalState {
            meal,
            options: Vec::new(),
            step: DeliveryStep::Loading(ThrobberState::default()),
        });
    }
    Some((generation, meal_name, area))
}

/// Drops the modal and bumps the generation so any in-flight result for
/// it is discarded. Returns whether a modal was actually open.
fn close_delivery_modal(state: &mut AppState) -> bool {
    let mut closed = false;
    if let Screen::Plan(plan_state) = state.current_screen_mut() {
        if plan_state.delivery.take().is_some() {
            closed = true;
        }
    }
    if closed {
        state.delivery_generation += 1;
    }
    closed
}

/// Validates the entered number; on success moves to the processing step
/// and returns the spawn payload. The gateway is never reached with an
/// invalid number.
fn submit_payment(state: &mut AppState) -> Option<(u64, String, u32)> {
    let generation = state.delivery_generation;
    let modal = delivery_modal_mut(state)?;
    let (selected, phone_number) = match &modal.step {
        DeliveryStep::Payment {
            selected,
            phone_number,
            ..
        } => (*selected, phone_number.clone()),
        _ => return None,
    };
    match validators::validate_phone_number(&phone_number) {
        Err(key) => {
            if let DeliveryStep::Payment { payment_error, .. } = &mut modal.step {
                *payment_error = Some(key);
            }
            None
        }
        Ok(()) => {
            let amount = modal.options.get(selected).map(|o| o.price)?;
            modal.step = DeliveryStep::ProcessingPayment {
                selected,
                phone_number: phone_number.clone(),
                throbber: ThrobberState::default(),
            };
            Some((generation, phone_number, amount))
        }
    }
}

fn open_upgrade_modal(state: &mut AppState) -> bool {
    if state.is_premium() {
        return false;
    }
    let mut opened = false;
    if let Screen::Events(events_state) = state.current_screen_mut() {
        if events_state.upgrade.is_none() {
            events_state.upgrade = Some(UpgradeModalState {
                step: UpgradeStep::Input {
                    phone_number: String::new(),
                    error: None,
                },
            });
            opened = true;
        }
    }
    if opened {
        state.upgrade_generation += 1;
    }
    opened
}

fn close_upgrade_modal(state: &mut AppState) -> bool {
    let mut closed = false;
    if let Screen::Events(events_state) = state.current_screen_mut() {
        if events_state.upgrade.take().is_some() {
            closed = true;
        }
    }
    if closed {
        state.upgrade_generation += 1;
    }
    closed
}

/// Advances the upgrade flow one step. Returns the spawn payload when the
/// PIN gate passes and the payment should start.
fn upgrade_continue(state: &mut AppState) -> Option<(u64, String)> {
    let generation = state.upgrade_generation;
    let modal = upgrade_modal_mut(state)?;
    match modal.step.clone() {
        UpgradeStep::Input { phone_number, .. } => {
            match validators::validate_phone_number(&phone_number) {
                Err(key) => {
                    modal.step = UpgradeStep::Input {
                        phone_number,
                        error: Some(key),
                    };
                }
                Ok(()) => {
                    modal.step = UpgradeStep::FinalConfirmation { phone_number };
                }
            }
            None
        }
        UpgradeStep::FinalConfirmation { phone_number } => {
            modal.step = UpgradeStep::SimulatedPin {
                phone_number,
                pin: String::new(),
                error: None,
            };
            None
        }
        UpgradeStep::SimulatedPin {
            phone_number, pin, ..
        } => match validators::validate_pin(&pin) {
            Err(key) => {
                modal.step = UpgradeStep::SimulatedPin {
                    phone_number,
                    pin,
                    error: Some(key),
                };
                None
            }
            Ok(()) => {
                modal.step = UpgradeStep::Processing {
                    phone_number: phone_number.clone(),
                    throbber: ThrobberState::default(),
                };
                Some((generation, phone_number))
            }
        },
        UpgradeStep::Processing { .. } | UpgradeStep::Success => None,
    }
}

fn request_event_recommendations(
    state: &mut AppState,
) -> Option<(UserProfile, String, String, Option<(f64, f64)>)> {
    let profile = state.user_profile.clone()?;
    let location = state.location;
    let Screen::Events(events_state) = state.current_screen_mut() else {
        return None;
    };
    if !profile.is_premium() || events_state.upgrade.is_some() {
        return None;
    }
    if matches!(events_state.recommendations_loading, LoadingState::Loading(_)) {
        return None;
    }
    if events_state.event_name.trim().is_empty() {
        return None;
    }
    events_state.recommendations_loading = LoadingState::Loading(ThrobberState::default());
    Some((
        profile,
        events_state.event_name.clone(),
        events_state.event_date.clone(),
        location,
    ))
}

fn submit_chat_message(state: &mut AppState) -> Option<(Vec<ChatMessage>, String)> {
    let Screen::Assistant(assistant_state) = state.current_screen_mut() else {
        return None;
    };
    if matches!(assistant_state.sending, LoadingState::Loading(_)) {
        return None;
    }
    let message = assistant_state.input.trim().to_string();
    if message.is_empty() {
        return None;
    }
    let history = assistant_state.messages.clone();
    assistant_state.messages.push(ChatMessage::user(message.clone()));
    assistant_state.input.clear();
    assistant_state.scroll_offset = 0;
    assistant_state.sending = LoadingState::Loading(ThrobberState::default());
    Some((history, message))
}

fn speak_tip(state: &mut AppState) -> Option<String> {
    let Screen::Plan(plan_state) = state.current_screen_mut() else {
        return None;
    };
    let tip = plan_state.current_day()?.nutritionist_tip.clone();
    plan_state.tip_audio = Some(TipAudioStatus::Synthesizing);
    Some(tip)
}
