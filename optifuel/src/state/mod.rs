pub mod reducer;
pub mod validators;

use crate::localization::Language;
use crate::models::{
    COMMON_ALLERGIES, DailyPlan, Diet, EventRecommendationCategory, Gender, Meal,
    MealDeliveryOption, Notification, NutritionPlan, SportType, UserProfile,
};
use crate::ui::screens::Screen;
use chrono::Local;
use optifuel_ai::types::ChatMessage;
use std::path::PathBuf;
use throbber_widgets_tui::ThrobberState;
use uuid::Uuid;

pub const NOTIFICATION_CAP: usize = 20;
pub const HYDRATION_GOAL_ML: u32 = 3000;
pub const HYDRATION_OVERAGE_ML: u32 = 500;

/// Represents loading state separate from data state
#[derive(Default, Debug, Clone, PartialEq)]
pub enum LoadingState {
    #[default]
    NotStarted,
    Loading(ThrobberState),
    Loaded,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub history: Vec<Screen>,

    pub user_profile: Option<UserProfile>,
    /// Last loaded plan, kept across tab switches so returning to the
    /// Plan screen does not refetch.
    pub nutrition_plan: Option<NutritionPlan>,
    pub language: Language,
    pub notifications: Vec<Notification>,
    /// (latitude, longitude) read from the environment at startup.
    pub location: Option<(f64, f64)>,

    // Stale-result guards for the two modal flows. Any event tagged with
    // an older generation is discarded by the reducer.
    pub delivery_generation: u64,
    pub upgrade_generation: u64,

    // UI state
    pub notification_panel_visible: bool,
    pub notification_cursor: usize,
    pub help_visible: bool,
    pub pending_key: Option<char>,

    // System
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            history: vec![Screen::Profile(ProfileFormState::default())],

            user_profile: None,
            nutrition_plan: None,
            language: Language::default(),
            notifications: Vec::new(),
            location: read_location_from_env(),

            delivery_generation: 0,
            upgrade_generation: 0,

            notification_panel_visible: false,
            notification_cursor: 0,
            help_visible: false,
            pending_key: None,

            should_quit: false,
        }
    }

    /// Get the current screen (last in navigation stack)
    pub fn current_screen(&self) -> &Screen {
        self.history
            .last()
            .expect("Navigation stack should never be empty")
    }

    /// Get mutable reference to current screen
    pub fn current_screen_mut(&mut self) -> &mut Screen {
        self.history
            .last_mut()
            .expect("Navigation stack should never be empty")
    }

    /// Navigate to a new screen (push to stack)
    pub fn navigate_to(&mut self, screen: Screen) {
        tracing::debug!(
            "Navigating to new screen, stack depth: {} -> {}",
            self.history.len(),
            self.history.len() + 1
        );
        self.history.push(screen);
    }

    /// Replace the current screen instead of stacking on top of it. Used
    /// for tab-style switching between the dashboard screens.
    pub fn switch_to(&mut self, screen: Screen) {
        *self.current_screen_mut() = screen;
    }

    /// Navigate back (pop from stack)
    /// Returns true if navigation succeeded, false if already at root
    pub fn navigate_back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            tracing::debug!("Cannot navigate back, already at root screen");
            false
        }
    }

    pub fn is_premium(&self) -> bool {
        self.user_profile.as_ref().is_some_and(|p| p.is_premium())
    }

    /// Prepends a notification and drops everything past the cap.
    pub fn add_notification(&mut self, message: impl Into<String>) {
        self.notifications.insert(
            0,
            Notification {
                id: Uuid::new_v4(),
                message: message.into(),
                timestamp: Local::now(),
                read: false,
            },
        );
        self.notifications.truncate(NOTIFICATION_CAP);
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn mark_notification_read(&mut self, id: Uuid) {
        if let Some(notification) = self.notifications.iter_mut().find(|n| n.id == id) {
            notification.read = true;
        }
    }

    pub fn mark_all_notifications_read(&mut self) {
        for notification in &mut self.notifications {
            notification.read = true;
        }
    }

    /// The throbber driving the current screen's loading indicator, when
    /// one is active. Ticked by the event loop.
    pub fn loading_state(&mut self) -> Option<&mut ThrobberState> {
        match self.current_screen_mut() {
            Screen::Plan(state) => {
                if let Some(modal) = &mut state.delivery {
                    match &mut modal.step {
                        DeliveryStep::Loading(throbber)
                        | DeliveryStep::ProcessingPayment { throbber, .. } => {
                            return Some(throbber);
                        }
                        _ => {}
                    }
                }
                if let LoadingState::Loading(ref mut throbber) = state.plan_loading {
                    return Some(throbber);
                }
            }
            Screen::Events(state) => {
                if let Some(modal) = &mut state.upgrade {
                    if let UpgradeStep::Processing { throbber, .. } = &mut modal.step {
                        return Some(throbber);
                    }
                }
                if let LoadingState::Loading(ref mut throbber) = state.recommendations_loading {
                    return Some(throbber);
                }
            }
            Screen::Assistant(state) => {
                if let LoadingState::Loading(ref mut throbber) = state.sending {
                    return Some(throbber);
                }
            }
            Screen::Profile(_) | Screen::Hydration(_) | Screen::Logs(_) => {}
        }
        None
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn read_location_from_env() -> Option<(f64, f64)> {
    let latitude = std::env::var("OPTIFUEL_LATITUDE").ok()?.parse().ok()?;
    let longitude = std::env::var("OPTIFUEL_LONGITUDE").ok()?.parse().ok()?;
    Some((latitude, longitude))
}

/// Fields of the three-step profile form, in tab order per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Age,
    Gender,
    Height,
    Weight,
    Area,
    Sport,
    Diet,
    Allergies,
    OtherAllergy,
}

impl ProfileField {
    pub fn for_step(step: u8) -> &'static [ProfileField] {
        match step {
            1 => &[ProfileField::Name, ProfileField::Age, ProfileField::Gender],
            2 => &[ProfileField::Height, ProfileField::Weight],
            _ => &[
                ProfileField::Area,
                ProfileField::Sport,
                ProfileField::Diet,
                ProfileField::Allergies,
                ProfileField::OtherAllergy,
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProfileFormState {
    pub step: u8,
    pub focused_field: usize,

    pub name: String,
    pub age: String,
    pub gender: Gender,
    pub height: String,
    pub weight: String,
    pub area: String,
    pub sport: SportType,
    pub diet: Diet,
    pub allergy_selected: [bool; COMMON_ALLERGIES.len()],
    pub allergy_cursor: usize,
    pub other_allergy: String,

    /// Localization key of the current validation error.
    pub validation_error: Option<&'static str>,
}

impl Default for ProfileFormState {
    fn default() -> Self {
        Self {
            step: 1,
            focused_field: 0,
            name: String::new(),
            age: String::new(),
            gender: Gender::Male,
            height: String::new(),
            weight: String::new(),
            area: String::new(),
            sport: SportType::Sprints,
            diet: Diet::None,
            allergy_selected: [false; COMMON_ALLERGIES.len()],
            allergy_cursor: 0,
            other_allergy: String::new(),
            validation_error: None,
        }
    }
}

impl ProfileFormState {
    pub fn fields(&self) -> &'static [ProfileField] {
        ProfileField::for_step(self.step)
    }

    pub fn focused(&self) -> ProfileField {
        let fields = self.fields();
        fields[self.focused_field.min(fields.len() - 1)]
    }

    pub fn selected_allergies(&self) -> Vec<String> {
        COMMON_ALLERGIES
            .iter()
            .zip(self.allergy_selected)
            .filter(|(_, selected)| *selected)
            .map(|(name, _)| name.to_string())
            .collect()
    }
}

/// How the listen-to-tip action last ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum TipAudioStatus {
    Synthesizing,
    Saved(PathBuf),
    Failed,
}

#[derive(Default, Debug, Clone)]
pub struct PlanState {
    pub plan: NutritionPlan,
    pub plan_loading: LoadingState,
    pub selected_day: usize,
    pub selected_meal: usize,
    pub meal_detail_visible: bool,
    pub delivery: Option<DeliveryModalState>,
    pub tip_audio: Option<TipAudioStatus>,
}

impl PlanState {
    pub fn current_day(&self) -> Option<&DailyPlan> {
        self.plan.get(self.selected_day)
    }

    pub fn selected_meal(&self) -> Option<&Meal> {
        self.current_day()
            .map(|day| day.meals.slots()[self.selected_meal.min(4)].1)
    }
}

#[derive(Debug, Clone)]
pub struct DeliveryModalState {
    pub meal: Meal,
    pub options: Vec<MealDeliveryOption>,
    pub step: DeliveryStep,
}

/// Step of the ordering flow. Each variant carries only the data valid
/// at that step; indices point into `DeliveryModalState::options`.
#[derive(Debug, Clone)]
pub enum DeliveryStep {
    Loading(ThrobberState),
    List {
        cursor: usize,
        compare_mode: bool,
        compare_selection: Vec<usize>,
    },
    Compare {
        items: Vec<usize>,
        cursor: usize,
    },
    Confirm {
        selected: usize,
    },
    Payment {
        selected: usize,
        phone_number: String,
        payment_error: Option<&'static str>,
    },
    ProcessingPayment {
        selected: usize,
        phone_number: String,
        throbber: ThrobberState,
    },
    Success,
}

impl DeliveryStep {
    pub fn pristine_list() -> Self {
        DeliveryStep::List {
            cursor: 0,
            compare_mode: false,
            compare_selection: Vec::new(),
        }
    }
}

/// Pointwise best values across a set of compared options.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonMetrics {
    pub best_price: u32,
    pub fastest_minutes: Option<u32>,
    pub highest_rating: f64,
}

impl ComparisonMetrics {
    pub fn of(options: &[&MealDeliveryOption]) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        Some(Self {
            best_price: options.iter().map(|o| o.price).min().unwrap_or_default(),
            fastest_minutes: options.iter().filter_map(|o| o.lead_minutes()).min(),
            highest_rating: options
                .iter()
                .map(|o| o.rating)
                .fold(f64::MIN, f64::max),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventField {
    #[default]
    Name,
    Date,
}

#[derive(Default, Debug, Clone)]
pub struct EventsState {
    pub event_name: String,
    pub event_date: String,
    pub focused_field: EventField,
    pub recommendations: Vec<EventRecommendationCategory>,
    /// Free-text guidance from the AI-backed variant.
    pub ai_guidance: Option<String>,
    pub recommendations_loading: LoadingState,
    pub upgrade: Option<UpgradeModalState>,
}

#[derive(Debug, Clone)]
pub struct UpgradeModalState {
    pub step: UpgradeStep,
}

#[derive(Debug, Clone)]
pub enum UpgradeStep {
    Input {
        phone_number: String,
        error: Option<&'static str>,
    },
    FinalConfirmation {
        phone_number: String,
    },
    SimulatedPin {
        phone_number: String,
        pin: String,
        error: Option<&'static str>,
    },
    Processing {
        phone_number: String,
        throbber: ThrobberState,
    },
    Success,
}

#[derive(Default, Debug, Clone)]
pub struct AssistantState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub sending: LoadingState,
    pub scroll_offset: usize,
}

#[derive(Default, Debug, Clone)]
pub struct HydrationState {
    pub intake_ml: u32,
}

impl HydrationState {
    /// Adds water, allowing a slight overage past the goal.
    pub fn add(&mut self, amount_ml: u32) {
        self.intake_ml = (self.intake_ml + amount_ml).min(HYDRATION_GOAL_ML + HYDRATION_OVERAGE_ML);
    }

    pub fn reset(&mut self) {
        self.intake_ml = 0;
    }

    pub fn goal_reached(&self) -> bool {
        self.intake_ml >= HYDRATION_GOAL_ML
    }

    pub fn percent_of_goal(&self) -> u32 {
        self.intake_ml * 100 / HYDRATION_GOAL_ML
    }
}

#[derive(Default, Debug, Clone)]
pub struct LogsState {
    pub scroll_offset: usize,
    pub total_entries: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_log_keeps_the_newest_twenty() {
        let mut state = AppState::new();
        for i in 0..25 {
            state.add_notification(format!("notification {i}"));
        }
        assert_eq!(state.notifications.len(), NOTIFICATION_CAP);
        assert_eq!(state.notifications[0].message, "notification 24");
        assert_eq!(state.notifications[19].message, "notification 5");
    }

    #[test]
    fn mark_all_read_clears_unread_count() {
        let mut state = AppState::new();
        state.add_notification("one");
        state.add_notification("two");
        assert_eq!(state.unread_notifications(), 2);
        state.mark_all_notifications_read();
        assert_eq!(state.unread_notifications(), 0);
    }

    #[test]
    fn mark_single_read_leaves_the_rest_unread() {
        let mut state = AppState::new();
        state.add_notification("one");
        state.add_notification("two");
        let id = state.notifications[1].id;
        state.mark_notification_read(id);
        assert_eq!(state.unread_notifications(), 1);
        assert!(state.notifications[1].read);
        assert!(!state.notifications[0].read);
    }

    #[test]
    fn hydration_allows_slight_overage_only() {
        let mut hydration = HydrationState::default();
        for _ in 0..20 {
            hydration.add(750);
        }
        assert_eq!(hydration.intake_ml, HYDRATION_GOAL_ML + HYDRATION_OVERAGE_ML);
        assert!(hydration.goal_reached());
        hydration.reset();
        assert_eq!(hydration.intake_ml, 0);
        assert!(!hydration.goal_reached());
    }

    #[test]
    fn comparison_metrics_are_pointwise() {
        let a = MealDeliveryOption {
            partner_name: "Uber Eats".to_string(),
            meal_name: "Classic Berry Oatmeal".to_string(),
            price: 650,
            currency: "KES".to_string(),
            delivery_time: "25-35 min".to_string(),
            rating: 4.6,
            special_offer: None,
        };
        let b = MealDeliveryOption {
            partner_name: "EldoFresh Meals".to_string(),
            meal_name: "Local Honey Oatmeal".to_string(),
            price: 550,
            currency: "KES".to_string(),
            delivery_time: "20-30 min".to_string(),
            rating: 4.8,
            special_offer: None,
        };
        let metrics = ComparisonMetrics::of(&[&a, &b]).unwrap();
        assert_eq!(metrics.best_price, 550);
        assert_eq!(metrics.fastest_minutes, Some(20));
        assert_eq!(metrics.highest_rating, 4.8);
    }
}
