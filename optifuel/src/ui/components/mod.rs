pub mod delivery_modal;
pub mod empty_state;
pub mod help_bar;
pub mod help_popup;
pub mod loading_indicator;
pub mod meal_detail;
pub mod notification_panel;
pub mod popup;
pub mod tab_bar;
pub mod upgrade_modal;
