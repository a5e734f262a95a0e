use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::input::{Key, KeyEvent};
use crate::state::AppState;
use crate::ui::screens::Screen;

/// Handler for tests: applies commands synchronously through
/// `execute_command_sync`, so no background tasks are spawned and the
/// payment gateway and AI service are never contacted.
pub struct MockDataHandler;

impl MockDataHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockDataHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        executor::execute_command_sync(command, state);
    }
}

/// Drives the full app through `AppCore` the way the event loop does,
/// minus the terminal. Async results are injected as `DataEvent`s.
pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    /// Send a single key event
    pub fn send_key(&mut self, key: Key) {
        self.core.handle_key(KeyEvent::new(key));
    }

    /// Send a key event with modifiers
    pub fn send_key_event(&mut self, event: KeyEvent) {
        self.core.handle_key(event);
    }

    /// Send multiple keys in sequence
    pub fn send_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.send_key(*key);
        }
    }

    /// Type a string one character at a time
    pub fn send_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(Key::Char(c));
        }
    }

    /// Inject a data event (simulate a background task result)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    /// Get read-only access to current state
    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Assert that the app is on a specific screen type
    ///
    /// Uses discriminant comparison to check screen type without
    /// requiring full equality of state.
    pub fn assert_screen_type(&self, expected_discriminant: std::mem::Discriminant<Screen>) {
        let current = self.state().current_screen();
        assert_eq!(
            std::mem::discriminant(current),
            expected_discriminant,
            "Expected different screen. Current: {:?}",
            current
        );
    }

    /// Assert that the app should quit
    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    /// Assert that the app should NOT quit
    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
