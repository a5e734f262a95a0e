use std::path::PathBuf;

use crate::models::{EventRecommendationCategory, Meal, MealDeliveryOption, NutritionPlan};

/// Dashboard screens reachable by tab switching once a profile exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Plan,
    Events,
    Assistant,
    Hydration,
}

/// Commands to execute (user actions → state changes and background tasks)
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // Navigation
    SwitchTab(DashboardTab),
    NavigateBack,
    NavigateToLogs,

    // Global toggles
    ToggleHelp,
    ToggleLanguage,
    ToggleNotificationPanel,
    SelectNotification { forward: bool },
    MarkNotificationRead,
    MarkAllNotificationsRead,

    // Profile form
    NavigateFormField { forward: bool },
    FormNextStep,
    FormPrevStep,
    AppendFormFieldChar { c: char },
    DeleteFormFieldChar,
    CycleFieldOption { forward: bool },
    ToggleAllergy,
    SubmitProfileForm,

    // Plan screen
    SelectDay { forward: bool },
    SelectMeal { forward: bool },
    ToggleMealDetail,
    SpeakTip,

    // Delivery modal
    OpenDeliveryModal { meal: Meal },
    CloseDeliveryModal,
    DeliverySelect { forward: bool },
    ToggleCompareMode,
    ToggleCompareSelection,
    ShowComparison,
    ConfirmDeliverySelection,
    DeliveryBack,
    ProceedToPayment,
    AppendPhoneChar(char),
    DeletePhoneChar,
    SubmitPayment,

    // Events screen
    ToggleEventField,
    AppendEventChar(char),
    DeleteEventChar,
    RequestEventRecommendations,

    // Premium upgrade modal
    OpenUpgradeModal,
    CloseUpgradeModal,
    AppendUpgradeChar(char),
    DeleteUpgradeChar,
    UpgradeContinue,
    UpgradeBack,

    // Assistant screen
    AppendChatChar(char),
    DeleteChatChar,
    SubmitChatMessage,
    ScrollChat { up: bool },

    // Hydration screen
    AddWater { amount_ml: u32 },
    ResetWater,

    // Log screen
    ScrollLogsUp,
    ScrollLogsDown,
    ScrollLogsPageUp,
    ScrollLogsPageDown,
    ScrollLogsToTop,
    ScrollLogsToBottom,

    // Key sequence state
    SetPendingKey(char),
    ClearPendingKey,

    // System
    Quit,
}

/// Events from background tasks (responses to commands). Modal events
/// carry the generation they were spawned under so stale results can be
/// discarded after the modal was closed or reopened.
#[derive(Debug, Clone)]
pub enum DataEvent {
    PlanLoaded {
        plan: NutritionPlan,
    },

    DeliveryOptionsLoaded {
        generation: u64,
        options: Vec<MealDeliveryOption>,
    },
    DeliveryPaymentCompleted {
        generation: u64,
        success: bool,
    },
    DeliveryAutoClose {
        generation: u64,
    },

    UpgradeCompleted {
        generation: u64,
        success: bool,
    },
    UpgradeAutoClose {
        generation: u64,
    },

    EventRecommendationsLoaded {
        categories: Vec<EventRecommendationCategory>,
    },
    EventGuidanceLoaded {
        text: String,
    },
    EventRecommendationsFailed {
        error_key: &'static str,
    },

    ChatResponseReceived {
        text: String,
    },
    ChatFailed {
        error_key: &'static str,
    },

    TipAudioSaved {
        path: PathBuf,
    },
    TipAudioFailed,
}
