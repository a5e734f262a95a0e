use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::sync::Arc;

use crate::background::{BackgroundTaskManager, data_loader::DataLoader};
use crate::commands::{executor, handlers};
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging;
use crate::state::AppState;
use crate::ui::screens::Screen;
use optifuel_ai::Client;

pub struct App;

impl App {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        // Create log buffer before initializing logging
        let log_buffer = LogBuffer::new(5000);
        let _log_path = init_logging(log_buffer.clone())?;

        tracing::info!("optifuel starting");

        let mut terminal = self.init()?;

        let (data_tx, mut data_rx) = tokio::sync::mpsc::unbounded_channel();

        let mut ui_state = AppState::new();
        let mut task_manager = BackgroundTaskManager::new();

        // Without a GEMINI_API_KEY every AI-backed feature degrades to
        // fixtures, so the app stays fully usable offline.
        let ai_client = Client::from_env().map(Arc::new);
        if ai_client.is_none() {
            tracing::info!("no API key configured, AI features run on fixtures");
        }
        let data_loader = DataLoader::new(ai_client, data_tx.clone());

        let mut event_stream = EventStream::new();

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            // Update total_entries for logs screen if active
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, &log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    match event {
                        Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => {
                            // Don't log when on logs screen to avoid feedback loop
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if !on_logs_screen {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                if !on_logs_screen {
                                    tracing::info!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                        _ => {
                            // Ignore other events
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            // Check if we should quit
            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");

        // Cancel all background data loading tasks
        task_manager.cancel_all();

        self.exit(terminal)?;

        Ok(())
    }

    fn init(&self) -> Result<Terminal<CrosstermBackend<std::io::Stdout>>, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(
        &self,
        mut terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
