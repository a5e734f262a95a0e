pub mod assistant_screen;
pub mod events_screen;
pub mod hydration_screen;
pub mod logs_screen;
pub mod plan_screen;
pub mod profile_screen;

use crate::state::{
    AssistantState, EventsState, HydrationState, LogsState, PlanState, ProfileFormState,
};

#[derive(Debug, Clone)]
pub enum Screen {
    Profile(ProfileFormState),
    Plan(PlanState),
    Events(EventsState),
    Assistant(AssistantState),
    Hydration(HydrationState),
    Logs(LogsState),
}
