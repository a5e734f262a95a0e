use optifuel::events::DataEvent;
use optifuel::fixtures;
use optifuel::input::{Key, KeyEvent};
use optifuel::models::{Diet, MealDeliveryOption, NutritionPlan, SportType};
use optifuel::state::{DeliveryStep, LoadingState, UpgradeStep};
use optifuel::testing::TestApp;
use optifuel::ui::screens::Screen;

fn sample_plan() -> NutritionPlan {
    fixtures::plan_for(SportType::Sprints, Diet::None).clone()
}

fn sample_options() -> Vec<MealDeliveryOption> {
    vec![
        MealDeliveryOption {
            partner_name: "Uber Eats".to_string(),
            meal_name: "Classic Berry Oatmeal".to_string(),
            price: 650,
            currency: "KES".to_string(),
            delivery_time: "25-35 min".to_string(),
            rating: 4.6,
            special_offer: None,
        },
        MealDeliveryOption {
            partner_name: "EldoFresh Meals".to_string(),
            meal_name: "Local Honey Oatmeal".to_string(),
            price: 550,
            currency: "KES".to_string(),
            delivery_time: "20-30 min".to_string(),
            rating: 4.8,
            special_offer: Some("10% off first order".to_string()),
        },
    ]
}

/// Drive the three-step onboarding form to completion and land on the
/// plan screen with data loaded.
fn onboard(app: &mut TestApp) {
    // Step 1: personal info
    app.send_text("Amina");
    app.send_key(Key::Tab);
    app.send_text("24");
    app.send_key(Key::Enter);

    // Step 2: biometrics
    app.send_text("168");
    app.send_key(Key::Tab);
    app.send_text("55");
    app.send_key(Key::Enter);

    // Step 3: sport details, then submit
    app.send_text("Eldoret");
    app.send_key(Key::Enter);

    assert!(app.state().user_profile.is_some());
    app.send_data_event(DataEvent::PlanLoaded {
        plan: sample_plan(),
    });
}

/// Walk from the plan screen to a delivery modal showing the options
/// list.
fn open_delivery_list(app: &mut TestApp) {
    app.send_key(Key::Char('o'));
    let generation = app.state().delivery_generation;
    app.send_data_event(DataEvent::DeliveryOptionsLoaded {
        generation,
        options: sample_options(),
    });
}

fn delivery_step(app: &TestApp) -> &DeliveryStep {
    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen, got {:?}", app.state().current_screen());
    };
    &plan_state
        .delivery
        .as_ref()
        .expect("expected an open delivery modal")
        .step
}

fn upgrade_step(app: &TestApp) -> &UpgradeStep {
    let Screen::Events(events_state) = app.state().current_screen() else {
        panic!(
            "expected events screen, got {:?}",
            app.state().current_screen()
        );
    };
    &events_state
        .upgrade
        .as_ref()
        .expect("expected an open upgrade modal")
        .step
}

#[test]
fn test_quit_flow() {
    let mut app = TestApp::new();
    app.assert_not_quit();

    // The profile form treats 'q' as text, so quit via Ctrl+q
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('q')));
    app.assert_should_quit();
}

#[test]
fn test_help_toggle() {
    let mut app = TestApp::new();
    assert!(!app.state().help_visible);

    app.send_key(Key::Char('?'));
    // '?' is text input on the profile form, help stays hidden
    assert!(!app.state().help_visible);

    onboard(&mut app);
    app.send_key(Key::Char('?'));
    assert!(app.state().help_visible);

    app.send_key(Key::Esc);
    assert!(!app.state().help_visible);
}

#[test]
fn test_tab_switching_requires_profile() {
    let mut app = TestApp::new();

    // No profile yet, Ctrl+1 stays on the form
    app.send_key_event(KeyEvent::with_ctrl(Key::Char('1')));
    assert!(matches!(app.state().current_screen(), Screen::Profile(_)));

    onboard(&mut app);
    app.send_key(Key::Char('4'));
    assert!(matches!(app.state().current_screen(), Screen::Hydration(_)));
    app.send_key(Key::Char('1'));
    assert!(matches!(app.state().current_screen(), Screen::Plan(_)));
}

#[test]
fn test_profile_form_validation_blocks_submit() {
    let mut app = TestApp::new();

    // Submit the empty form from step 3
    app.send_key(Key::Enter);
    app.send_key(Key::Enter);
    app.send_key(Key::Enter);

    assert!(app.state().user_profile.is_none());
    let Screen::Profile(form) = app.state().current_screen() else {
        panic!("expected profile form");
    };
    assert_eq!(form.validation_error, Some("nameRequired"));
}

#[test]
fn test_plan_reloads_from_cache_on_return() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Char('4'));
    app.send_key(Key::Char('1'));

    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen");
    };
    assert_eq!(plan_state.plan_loading, LoadingState::Loaded);
    assert!(!plan_state.plan.is_empty());
}

#[test]
fn test_plan_day_and_meal_navigation() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Char('l'));
    app.send_key(Key::Char('j'));
    app.send_key(Key::Char('j'));
    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen");
    };
    assert_eq!(plan_state.selected_day, 1);
    assert_eq!(plan_state.selected_meal, 2);

    // Switching day resets the meal cursor
    app.send_key(Key::Char('h'));
    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen");
    };
    assert_eq!(plan_state.selected_day, 0);
    assert_eq!(plan_state.selected_meal, 0);
}

#[test]
fn test_meal_detail_toggle() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Enter);
    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen");
    };
    assert!(plan_state.meal_detail_visible);

    app.send_key(Key::Esc);
    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen");
    };
    assert!(!plan_state.meal_detail_visible);
}

#[test]
fn test_delivery_order_happy_path() {
    let mut app = TestApp::new();
    onboard(&mut app);
    open_delivery_list(&mut app);
    assert!(matches!(delivery_step(&app), DeliveryStep::List { .. }));

    // Pick the first option and walk to payment
    app.send_key(Key::Enter);
    assert!(matches!(
        delivery_step(&app),
        DeliveryStep::Confirm { selected: 0 }
    ));
    app.send_key(Key::Enter);
    assert!(matches!(delivery_step(&app), DeliveryStep::Payment { .. }));

    app.send_text("254712345678");
    app.send_key(Key::Enter);
    assert!(matches!(
        delivery_step(&app),
        DeliveryStep::ProcessingPayment { .. }
    ));

    let generation = app.state().delivery_generation;
    app.send_data_event(DataEvent::DeliveryPaymentCompleted {
        generation,
        success: true,
    });
    assert!(matches!(delivery_step(&app), DeliveryStep::Success));
    assert_eq!(app.state().notifications.len(), 1);
    assert!(app.state().notifications[0].message.contains("Uber Eats"));

    app.send_data_event(DataEvent::DeliveryAutoClose { generation });
    let Screen::Plan(plan_state) = app.state().current_screen() else {
        panic!("expected plan screen");
    };
    assert!(plan_state.delivery.is_none());
}

#[test]
fn test_delivery_payment_rejects_malformed_number_locally() {
    let mut app = TestApp::new();
    onboard(&mut app);
    open_delivery_list(&mut app);

    app.send_key(Key::Enter);
    app.send_key(Key::Enter);
    app.send_text("0712345678");
    app.send_key(Key::Enter);

    // Validation failed in place, no gateway round trip
    match delivery_step(&app) {
        DeliveryStep::Payment {
            phone_number,
            payment_error,
            ..
        } => {
            assert_eq!(phone_number, "0712345678");
            assert_eq!(*payment_error, Some("invalidPhoneNumber"));
        }
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn test_delivery_payment_letters_are_ignored() {
    let mut app = TestApp::new();
    onboard(&mut app);
    open_delivery_list(&mut app);

    app.send_key(Key::Enter);
    app.send_key(Key::Enter);
    app.send_text("25x4");
    match delivery_step(&app) {
        DeliveryStep::Payment { phone_number, .. } => assert_eq!(phone_number, "254"),
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn test_stale_delivery_options_after_reopen_are_discarded() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Char('o'));
    let first_generation = app.state().delivery_generation;
    app.send_key(Key::Esc);
    app.send_key(Key::Char('o'));
    let second_generation = app.state().delivery_generation;
    assert!(second_generation > first_generation);

    // The first request resolves late and must not touch the new modal
    app.send_data_event(DataEvent::DeliveryOptionsLoaded {
        generation: first_generation,
        options: sample_options(),
    });
    assert!(matches!(delivery_step(&app), DeliveryStep::Loading(_)));

    app.send_data_event(DataEvent::DeliveryOptionsLoaded {
        generation: second_generation,
        options: sample_options(),
    });
    assert!(matches!(delivery_step(&app), DeliveryStep::List { .. }));
}

#[test]
fn test_compare_flow_reaches_confirm() {
    let mut app = TestApp::new();
    onboard(&mut app);
    open_delivery_list(&mut app);

    app.send_key(Key::Char('c'));
    app.send_key(Key::Char(' '));
    app.send_key(Key::Char('j'));
    app.send_key(Key::Char(' '));
    match delivery_step(&app) {
        DeliveryStep::List {
            compare_mode,
            compare_selection,
            ..
        } => {
            assert!(compare_mode);
            assert_eq!(compare_selection, &[0, 1]);
        }
        other => panic!("unexpected step: {other:?}"),
    }

    app.send_key(Key::Enter);
    assert!(matches!(delivery_step(&app), DeliveryStep::Compare { .. }));

    // Esc backs out of compare to a fresh list, not out of the modal
    app.send_key(Key::Esc);
    assert!(matches!(
        delivery_step(&app),
        DeliveryStep::List {
            compare_mode: false,
            ..
        }
    ));

    app.send_key(Key::Char('c'));
    app.send_key(Key::Char(' '));
    app.send_key(Key::Char('j'));
    app.send_key(Key::Char(' '));
    app.send_key(Key::Enter);
    app.send_key(Key::Char('j'));
    app.send_key(Key::Enter);
    assert!(matches!(
        delivery_step(&app),
        DeliveryStep::Confirm { selected: 1 }
    ));
}

#[test]
fn test_upgrade_flow_flips_subscription() {
    let mut app = TestApp::new();
    onboard(&mut app);
    assert!(!app.state().is_premium());

    app.send_key(Key::Char('2'));
    assert!(matches!(app.state().current_screen(), Screen::Events(_)));

    // Enter on a basic account opens the upsell instead of requesting
    // recommendations
    app.send_key(Key::Enter);
    assert!(matches!(upgrade_step(&app), UpgradeStep::Input { .. }));

    app.send_text("254712345678");
    app.send_key(Key::Enter);
    assert!(matches!(
        upgrade_step(&app),
        UpgradeStep::FinalConfirmation { .. }
    ));

    app.send_key(Key::Char('y'));
    assert!(matches!(upgrade_step(&app), UpgradeStep::SimulatedPin { .. }));

    app.send_text("1234");
    app.send_key(Key::Enter);
    assert!(matches!(upgrade_step(&app), UpgradeStep::Processing { .. }));

    let generation = app.state().upgrade_generation;
    app.send_data_event(DataEvent::UpgradeCompleted {
        generation,
        success: true,
    });
    assert!(matches!(upgrade_step(&app), UpgradeStep::Success));

    app.send_data_event(DataEvent::UpgradeAutoClose { generation });
    assert!(app.state().is_premium());
    assert_eq!(app.state().notifications.len(), 1);
    let Screen::Events(events_state) = app.state().current_screen() else {
        panic!("expected events screen");
    };
    assert!(events_state.upgrade.is_none());
}

#[test]
fn test_upgrade_survives_manual_close_before_auto_close() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Char('2'));
    app.send_key(Key::Enter);
    app.send_text("254712345678");
    app.send_key(Key::Enter);
    app.send_key(Key::Char('y'));
    app.send_text("1234");
    app.send_key(Key::Enter);

    let generation = app.state().upgrade_generation;
    app.send_data_event(DataEvent::UpgradeCompleted {
        generation,
        success: true,
    });
    assert!(app.state().is_premium());

    // Dismiss the Success screen before the timer fires
    app.send_key(Key::Enter);
    let Screen::Events(events_state) = app.state().current_screen() else {
        panic!("expected events screen");
    };
    assert!(events_state.upgrade.is_none());
    assert!(app.state().is_premium());

    // The pending timer is a generation behind and changes nothing
    let bumped = app.state().upgrade_generation;
    app.send_data_event(DataEvent::UpgradeAutoClose { generation });
    assert!(app.state().is_premium());
    assert_eq!(app.state().upgrade_generation, bumped);
    assert_eq!(app.state().notifications.len(), 1);
}

#[test]
fn test_upgrade_pin_too_short_is_rejected() {
    let mut app = TestApp::new();
    onboard(&mut app);
    app.send_key(Key::Char('2'));
    app.send_key(Key::Enter);
    app.send_text("254712345678");
    app.send_key(Key::Enter);
    app.send_key(Key::Char('y'));
    app.send_text("12");
    app.send_key(Key::Enter);

    match upgrade_step(&app) {
        UpgradeStep::SimulatedPin { error, .. } => assert_eq!(*error, Some("invalidPin")),
        other => panic!("unexpected step: {other:?}"),
    }
}

#[test]
fn test_premium_user_can_request_recommendations() {
    let mut app = TestApp::new();
    onboard(&mut app);

    // Shortcut the upgrade by completing the modal flow
    app.send_key(Key::Char('2'));
    app.send_key(Key::Enter);
    app.send_text("254712345678");
    app.send_key(Key::Enter);
    app.send_key(Key::Char('y'));
    app.send_text("1234");
    app.send_key(Key::Enter);
    let generation = app.state().upgrade_generation;
    app.send_data_event(DataEvent::UpgradeCompleted {
        generation,
        success: true,
    });
    app.send_data_event(DataEvent::UpgradeAutoClose { generation });
    assert!(app.state().is_premium());

    app.send_text("Kip Keino Classic");
    app.send_key(Key::Enter);
    let Screen::Events(events_state) = app.state().current_screen() else {
        panic!("expected events screen");
    };
    assert!(matches!(
        events_state.recommendations_loading,
        LoadingState::Loading(_)
    ));

    app.send_data_event(DataEvent::EventRecommendationsLoaded {
        categories: fixtures::event_recommendations().to_vec(),
    });
    let Screen::Events(events_state) = app.state().current_screen() else {
        panic!("expected events screen");
    };
    assert_eq!(events_state.recommendations_loading, LoadingState::Loaded);
    assert!(!events_state.recommendations.is_empty());
}

#[test]
fn test_chat_round_trip() {
    let mut app = TestApp::new();
    onboard(&mut app);
    app.send_key(Key::Char('3'));

    app.send_text("What should I eat before a 400m race?");
    app.send_key(Key::Enter);
    let Screen::Assistant(assistant_state) = app.state().current_screen() else {
        panic!("expected assistant screen");
    };
    assert_eq!(assistant_state.messages.len(), 1);
    assert!(assistant_state.input.is_empty());
    assert!(matches!(
        assistant_state.sending,
        LoadingState::Loading(_)
    ));

    app.send_data_event(DataEvent::ChatResponseReceived {
        text: "Go for easily digestible carbs about three hours out.".to_string(),
    });
    let Screen::Assistant(assistant_state) = app.state().current_screen() else {
        panic!("expected assistant screen");
    };
    assert_eq!(assistant_state.messages.len(), 2);
    assert_eq!(assistant_state.sending, LoadingState::Loaded);
}

#[test]
fn test_chat_ignores_blank_messages() {
    let mut app = TestApp::new();
    onboard(&mut app);
    app.send_key(Key::Char('3'));

    app.send_text("   ");
    app.send_key(Key::Enter);
    let Screen::Assistant(assistant_state) = app.state().current_screen() else {
        panic!("expected assistant screen");
    };
    assert!(assistant_state.messages.is_empty());
    assert_eq!(assistant_state.sending, LoadingState::NotStarted);
}

#[test]
fn test_hydration_tracking() {
    let mut app = TestApp::new();
    onboard(&mut app);
    app.send_key(Key::Char('4'));

    app.send_key(Key::Char('a'));
    app.send_key(Key::Char('s'));
    let Screen::Hydration(hydration) = app.state().current_screen() else {
        panic!("expected hydration screen");
    };
    assert_eq!(hydration.intake_ml, 750);

    app.send_key(Key::Char('r'));
    let Screen::Hydration(hydration) = app.state().current_screen() else {
        panic!("expected hydration screen");
    };
    assert_eq!(hydration.intake_ml, 0);
}

#[test]
fn test_language_toggle_from_dashboard_and_text_screen() {
    use optifuel::localization::Language;

    let mut app = TestApp::new();
    onboard(&mut app);
    assert_eq!(app.state().language, Language::En);

    app.send_key(Key::Char('L'));
    assert_eq!(app.state().language, Language::Sw);

    // On the assistant screen plain chars are text, Ctrl+l still works
    app.send_key(Key::Char('3'));
    app.send_key(Key::Char('L'));
    assert_eq!(app.state().language, Language::Sw);
    let Screen::Assistant(assistant_state) = app.state().current_screen() else {
        panic!("expected assistant screen");
    };
    assert_eq!(assistant_state.input, "L");

    app.send_key_event(KeyEvent::with_ctrl(Key::Char('l')));
    assert_eq!(app.state().language, Language::En);
}

#[test]
fn test_notification_panel_mark_all_read() {
    let mut app = TestApp::new();
    onboard(&mut app);
    open_delivery_list(&mut app);
    app.send_key(Key::Enter);
    app.send_key(Key::Enter);
    app.send_text("254712345678");
    app.send_key(Key::Enter);
    let generation = app.state().delivery_generation;
    app.send_data_event(DataEvent::DeliveryPaymentCompleted {
        generation,
        success: true,
    });
    app.send_data_event(DataEvent::DeliveryAutoClose { generation });
    assert_eq!(app.state().unread_notifications(), 1);

    app.send_key(Key::Char('n'));
    assert!(app.state().notification_panel_visible);
    app.send_key(Key::Char('m'));
    assert_eq!(app.state().unread_notifications(), 0);
    app.send_key(Key::Esc);
    assert!(!app.state().notification_panel_visible);
}

#[test]
fn test_notification_panel_mark_selected_read() {
    let mut app = TestApp::new();
    onboard(&mut app);
    // Two completed orders leave two unread notifications, newest first
    for _ in 0..2 {
        open_delivery_list(&mut app);
        app.send_key(Key::Enter);
        app.send_key(Key::Enter);
        app.send_text("254712345678");
        app.send_key(Key::Enter);
        let generation = app.state().delivery_generation;
        app.send_data_event(DataEvent::DeliveryPaymentCompleted {
            generation,
            success: true,
        });
        app.send_data_event(DataEvent::DeliveryAutoClose { generation });
    }
    assert_eq!(app.state().unread_notifications(), 2);

    app.send_key(Key::Char('n'));
    assert_eq!(app.state().notification_cursor, 0);
    app.send_key(Key::Char('j'));
    assert_eq!(app.state().notification_cursor, 1);
    app.send_key(Key::Enter);
    assert_eq!(app.state().unread_notifications(), 1);
    assert!(app.state().notifications[1].read);
    assert!(!app.state().notifications[0].read);

    // selection wraps
    app.send_key(Key::Char('j'));
    assert_eq!(app.state().notification_cursor, 0);
    app.send_key(Key::Char('k'));
    assert_eq!(app.state().notification_cursor, 1);
}

#[test]
fn test_logs_navigation_sequence() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));
    app.send_key(Key::Char('l'));
    assert_eq!(app.state().pending_key, None);
    assert!(matches!(app.state().current_screen(), Screen::Logs(_)));

    // Back out to the plan screen
    app.send_key(Key::Esc);
    assert!(matches!(app.state().current_screen(), Screen::Plan(_)));
}

#[test]
fn test_pending_key_cleared_after_invalid_sequence() {
    let mut app = TestApp::new();
    onboard(&mut app);

    app.send_key(Key::Char('g'));
    assert_eq!(app.state().pending_key, Some('g'));
    app.send_key(Key::Char('x'));
    assert_eq!(app.state().pending_key, None);
    assert!(matches!(app.state().current_screen(), Screen::Plan(_)));
}
