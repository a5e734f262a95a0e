use super::{AppState, DeliveryStep, LoadingState, TipAudioStatus, UpgradeStep};
use crate::events::DataEvent;
use crate::localization::t;
use crate::models::{Subscription, UserProfile};
use crate::ui::screens::Screen;
use optifuel_ai::types::ChatMessage;

/// Pure state transition function for data events
pub fn reduce_data_event(state: &mut AppState, event: DataEvent) {
    match event {
        DataEvent::PlanLoaded { plan } => {
            state.nutrition_plan = Some(plan.clone());
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                plan_state.plan = plan;
                plan_state.plan_loading = LoadingState::Loaded;
                plan_state.selected_day = 0;
                plan_state.selected_meal = 0;
            }
        }

        DataEvent::DeliveryOptionsLoaded {
            generation,
            options,
        } => {
            if generation != state.delivery_generation {
                tracing::debug!(generation, "discarding stale delivery options");
                return;
            }
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                if let Some(modal) = &mut plan_state.delivery {
                    if matches!(modal.step, DeliveryStep::Loading(_)) {
                        modal.options = options;
                        modal.step = DeliveryStep::pristine_list();
                    }
                }
            }
        }

        DataEvent::DeliveryPaymentCompleted {
            generation,
            success,
        } => {
            if generation != state.delivery_generation {
                tracing::debug!(generation, "discarding stale payment result");
                return;
            }
            let language = state.language;
            let mut notification = None;
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                if let Some(modal) = &mut plan_state.delivery {
                    if let DeliveryStep::ProcessingPayment {
                        selected,
                        phone_number,
                        ..
                    } = &modal.step
                    {
                        let selected = *selected;
                        let phone_number = phone_number.clone();
                        if success {
                            if let Some(option) = modal.options.get(selected) {
                                notification = Some(
                                    t(language, "orderPlacedNotification")
                                        .replace("{partner}", &option.partner_name)
                                        .replace("{meal}", &option.meal_name),
                                );
                            }
                            modal.step = DeliveryStep::Success;
                        } else {
                            // Keep the entered number so the user can correct
                            // and resubmit.
                            modal.step = DeliveryStep::Payment {
                                selected,
                                phone_number,
                                payment_error: Some("paymentFailed"),
                            };
                        }
                    }
                }
            }
            if let Some(message) = notification {
                state.add_notification(message);
            }
        }

        DataEvent::DeliveryAutoClose { generation } => {
            if generation != state.delivery_generation {
                tracing::debug!(generation, "discarding stale auto-close");
                return;
            }
            let mut closed = false;
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                if let Some(modal) = &plan_state.delivery {
                    if matches!(modal.step, DeliveryStep::Success) {
                        plan_state.delivery = None;
                        closed = true;
                    }
                }
            }
            if closed {
                state.delivery_generation += 1;
            }
        }

        DataEvent::UpgradeCompleted {
            generation,
            success,
        } => {
            if generation != state.upgrade_generation {
                tracing::debug!(generation, "discarding stale upgrade result");
                return;
            }
            let mut paid = false;
            if let Screen::Events(events_state) = state.current_screen_mut() {
                if let Some(modal) = &mut events_state.upgrade {
                    if let UpgradeStep::Processing { phone_number, .. } = &modal.step {
                        if success {
                            modal.step = UpgradeStep::Success;
                            paid = true;
                        } else {
                            modal.step = UpgradeStep::Input {
                                phone_number: phone_number.clone(),
                                error: Some("paymentFailed"),
                            };
                        }
                    }
                }
            }
            // The subscription flips the moment payment succeeds.
            // Dismissing the Success screen early must not undo it.
            if paid {
                if let Some(profile) = state.user_profile.take() {
                    state.user_profile = Some(UserProfile {
                        subscription: Subscription::Premium,
                        ..profile
                    });
                }
                let message = t(state.language, "upgradeNotification").to_string();
                state.add_notification(message);
            }
        }

        DataEvent::UpgradeAutoClose { generation } => {
            if generation != state.upgrade_generation {
                tracing::debug!(generation, "discarding stale upgrade auto-close");
                return;
            }
            let mut closed = false;
            if let Screen::Events(events_state) = state.current_screen_mut() {
                if let Some(modal) = &events_state.upgrade {
                    if matches!(modal.step, UpgradeStep::Success) {
                        events_state.upgrade = None;
                        closed = true;
                    }
                }
            }
            if closed {
                state.upgrade_generation += 1;
            }
        }

        DataEvent::EventRecommendationsLoaded { categories } => {
            if let Screen::Events(events_state) = state.current_screen_mut() {
                events_state.recommendations = categories;
                events_state.ai_guidance = None;
                events_state.recommendations_loading = LoadingState::Loaded;
            }
        }

        DataEvent::EventGuidanceLoaded { text } => {
            if let Screen::Events(events_state) = state.current_screen_mut() {
                events_state.ai_guidance = Some(text);
                events_state.recommendations = Vec::new();
                events_state.recommendations_loading = LoadingState::Loaded;
            }
        }

        DataEvent::EventRecommendationsFailed { error_key } => {
            let language = state.language;
            if let Screen::Events(events_state) = state.current_screen_mut() {
                events_state.recommendations_loading =
                    LoadingState::Error(t(language, error_key).to_string());
            }
        }

        DataEvent::ChatResponseReceived { text } => {
            if let Screen::Assistant(assistant_state) = state.current_screen_mut() {
                assistant_state.messages.push(ChatMessage::model(text));
                assistant_state.sending = LoadingState::Loaded;
            }
        }

        // Assistant failures render as assistant messages rather than a
        // separate error surface.
        DataEvent::ChatFailed { error_key } => {
            let language = state.language;
            if let Screen::Assistant(assistant_state) = state.current_screen_mut() {
                assistant_state
                    .messages
                    .push(ChatMessage::model(t(language, error_key)));
                assistant_state.sending = LoadingState::Loaded;
            }
        }

        DataEvent::TipAudioSaved { path } => {
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                plan_state.tip_audio = Some(TipAudioStatus::Saved(path));
            }
        }

        DataEvent::TipAudioFailed => {
            if let Screen::Plan(plan_state) = state.current_screen_mut() {
                plan_state.tip_audio = Some(TipAudioStatus::Failed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealDeliveryOption;
    use crate::state::{DeliveryModalState, PlanState};
    use throbber_widgets_tui::ThrobberState;

    fn sample_option() -> MealDeliveryOption {
        MealDeliveryOption {
            partner_name: "Uber Eats".to_string(),
            meal_name: "Classic Berry Oatmeal".to_string(),
            price: 650,
            currency: "KES".to_string(),
            delivery_time: "25-35 min".to_string(),
            rating: 4.6,
            special_offer: None,
        }
    }

    fn sample_meal() -> crate::models::Meal {
        crate::models::Meal {
            name: "Oatmeal with Banana & Honey".to_string(),
            description: String::new(),
            macros: crate::models::Macros {
                protein: 18,
                carbs: 75,
                fats: 12,
            },
            ingredients: None,
            preparation: None,
        }
    }

    fn state_with_loading_modal() -> AppState {
        let mut state = AppState::new();
        state.history = vec![Screen::Plan(PlanState {
            delivery: Some(DeliveryModalState {
                meal: sample_meal(),
                options: Vec::new(),
                step: DeliveryStep::Loading(ThrobberState::default()),
            }),
            ..PlanState::default()
        })];
        state
    }

    #[test]
    fn stale_delivery_options_are_discarded() {
        let mut state = state_with_loading_modal();
        state.delivery_generation = 5;
        reduce_data_event(
            &mut state,
            DataEvent::DeliveryOptionsLoaded {
                generation: 4,
                options: vec![sample_option()],
            },
        );
        let Screen::Plan(plan_state) = state.current_screen() else {
            panic!("expected plan screen");
        };
        let modal = plan_state.delivery.as_ref().unwrap();
        assert!(matches!(modal.step, DeliveryStep::Loading(_)));
        assert!(modal.options.is_empty());
    }

    #[test]
    fn current_generation_options_reach_the_list() {
        let mut state = state_with_loading_modal();
        reduce_data_event(
            &mut state,
            DataEvent::DeliveryOptionsLoaded {
                generation: 0,
                options: vec![sample_option()],
            },
        );
        let Screen::Plan(plan_state) = state.current_screen() else {
            panic!("expected plan screen");
        };
        let modal = plan_state.delivery.as_ref().unwrap();
        assert!(matches!(modal.step, DeliveryStep::List { .. }));
        assert_eq!(modal.options.len(), 1);
    }

    #[test]
    fn failed_payment_returns_to_payment_with_number_retained() {
        let mut state = state_with_loading_modal();
        {
            let Screen::Plan(plan_state) = state.current_screen_mut() else {
                panic!("expected plan screen");
            };
            let modal = plan_state.delivery.as_mut().unwrap();
            modal.options = vec![sample_option()];
            modal.step = DeliveryStep::ProcessingPayment {
                selected: 0,
                phone_number: "254712345678".to_string(),
                throbber: ThrobberState::default(),
            };
        }
        reduce_data_event(
            &mut state,
            DataEvent::DeliveryPaymentCompleted {
                generation: 0,
                success: false,
            },
        );
        let Screen::Plan(plan_state) = state.current_screen() else {
            panic!("expected plan screen");
        };
        match &plan_state.delivery.as_ref().unwrap().step {
            DeliveryStep::Payment {
                phone_number,
                payment_error,
                ..
            } => {
                assert_eq!(phone_number, "254712345678");
                assert_eq!(*payment_error, Some("paymentFailed"));
            }
            other => panic!("unexpected step: {other:?}"),
        }
        assert!(state.notifications.is_empty());
    }

    #[test]
    fn successful_payment_notifies_and_auto_close_resets() {
        let mut state = state_with_loading_modal();
        {
            let Screen::Plan(plan_state) = state.current_screen_mut() else {
                panic!("expected plan screen");
            };
            let modal = plan_state.delivery.as_mut().unwrap();
            modal.options = vec![sample_option()];
            modal.step = DeliveryStep::ProcessingPayment {
                selected: 0,
                phone_number: "254712345678".to_string(),
                throbber: ThrobberState::default(),
            };
        }
        reduce_data_event(
            &mut state,
            DataEvent::DeliveryPaymentCompleted {
                generation: 0,
                success: true,
            },
        );
        {
            let Screen::Plan(plan_state) = state.current_screen() else {
                panic!("expected plan screen");
            };
            assert!(matches!(
                plan_state.delivery.as_ref().unwrap().step,
                DeliveryStep::Success
            ));
        }
        assert_eq!(state.notifications.len(), 1);
        assert!(state.notifications[0].message.contains("Uber Eats"));

        reduce_data_event(&mut state, DataEvent::DeliveryAutoClose { generation: 0 });
        let Screen::Plan(plan_state) = state.current_screen() else {
            panic!("expected plan screen");
        };
        assert!(plan_state.delivery.is_none());
        assert_eq!(state.delivery_generation, 1);
    }

    fn state_with_processing_upgrade() -> AppState {
        use crate::state::{EventsState, UpgradeModalState};

        let mut state = AppState::new();
        state.user_profile = Some({
            let form = crate::state::ProfileFormState {
                name: "Amina".to_string(),
                age: "24".to_string(),
                height: "168".to_string(),
                weight: "55".to_string(),
                ..Default::default()
            };
            crate::state::validators::validate_and_build_profile(&form).unwrap()
        });
        state.history = vec![Screen::Events(EventsState {
            upgrade: Some(UpgradeModalState {
                step: UpgradeStep::Processing {
                    phone_number: "254712345678".to_string(),
                    throbber: ThrobberState::default(),
                },
            }),
            ..EventsState::default()
        })];
        state
    }

    #[test]
    fn successful_upgrade_payment_flips_subscription() {
        let mut state = state_with_processing_upgrade();

        reduce_data_event(
            &mut state,
            DataEvent::UpgradeCompleted {
                generation: 0,
                success: true,
            },
        );

        assert!(state.is_premium());
        assert_eq!(state.notifications.len(), 1);
        let Screen::Events(events_state) = state.current_screen() else {
            panic!("expected events screen");
        };
        assert!(matches!(
            events_state.upgrade.as_ref().unwrap().step,
            UpgradeStep::Success
        ));

        // The timer only dismisses the Success screen.
        reduce_data_event(&mut state, DataEvent::UpgradeAutoClose { generation: 0 });
        assert_eq!(state.upgrade_generation, 1);
        assert_eq!(state.notifications.len(), 1);
        let Screen::Events(events_state) = state.current_screen() else {
            panic!("expected events screen");
        };
        assert!(events_state.upgrade.is_none());
    }

    #[test]
    fn failed_upgrade_payment_keeps_basic_subscription() {
        let mut state = state_with_processing_upgrade();

        reduce_data_event(
            &mut state,
            DataEvent::UpgradeCompleted {
                generation: 0,
                success: false,
            },
        );

        assert!(!state.is_premium());
        assert!(state.notifications.is_empty());
        let Screen::Events(events_state) = state.current_screen() else {
            panic!("expected events screen");
        };
        match &events_state.upgrade.as_ref().unwrap().step {
            UpgradeStep::Input {
                phone_number,
                error,
            } => {
                assert_eq!(phone_number, "254712345678");
                assert_eq!(*error, Some("paymentFailed"));
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }
}
