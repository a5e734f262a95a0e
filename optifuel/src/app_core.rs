use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::input::KeyEvent;
use crate::state::{AppState, reducer};

/// Seam between input handling and command side effects.
///
/// Production wires in the background task manager and data loader;
/// tests plug in a handler that applies commands synchronously without
/// touching the payment gateway or the AI service.
pub trait DataEventHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Application core without terminal dependencies.
///
/// Key presses are translated to commands and handed to `H`; data
/// events from finished tasks go straight through the reducer. Both
/// the real event loop and `TestApp` drive the app through this type.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self {
            ui_state: AppState::new(),
            handler,
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.handler
                .execute_with_context(command, &mut self.ui_state);
        }
    }

    /// Apply a data event. Tests inject these directly to stand in for
    /// finished background tasks.
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
