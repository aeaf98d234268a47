//! Main TUI application state machine.
//!
//! Handles screen navigation, input events, and the synchronous
//! submit-and-predict flow. One submission runs to completion before the
//! next event is processed; the model scores in microseconds, so there is
//! nothing to run in the background.

use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::linear::LinearModel;
use crate::adapters::minmax::MinMaxScaler;
use crate::application::PredictionService;
use crate::domain::Assessment;

use super::ui::{
    outcome::render_outcome,
    patient::{render_patient_form, PatientFormState},
    render_disclaimer,
};

/// Current screen/view in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    PatientForm,
    Outcome,
}

/// Main application state.
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Prediction context: loaded once, read-only thereafter
    service: PredictionService<LinearModel, MinMaxScaler>,

    /// Patient form state
    form_state: PatientFormState,

    /// Most recent screening outcome (for the outcome screen)
    last_assessment: Option<Assessment>,
}

impl App {
    /// Create a new application instance, loading artifacts from the
    /// configured directory.
    ///
    /// # Errors
    /// Returns error if the artifact directory is missing or either
    /// artifact fails to load; the process cannot proceed without them.
    pub fn new() -> Result<Self> {
        let model_path =
            std::env::var("CARDIOSCREEN_MODEL_PATH").unwrap_or_else(|_| "models".to_string());
        let model_dir = std::path::Path::new(&model_path);

        if !model_dir.exists() {
            return Err(anyhow!(
                "Artifact path not found at {:?}. Set CARDIOSCREEN_MODEL_PATH to a directory containing model.json and scaler.json.",
                model_dir
            ));
        }

        let service = PredictionService::from_artifact_dir(model_dir)
            .map_err(|e| anyhow!("Failed to load artifacts from {:?}: {}", model_dir, e))?;

        Ok(Self::with_service(service))
    }

    /// Create the application with an injected prediction service.
    #[must_use]
    pub fn with_service(service: PredictionService<LinearModel, MinMaxScaler>) -> Self {
        Self {
            screen: Screen::PatientForm,
            should_quit: false,
            service,
            form_state: PatientFormState::default(),
            last_assessment: None,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(2)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::PatientForm => {
                        render_patient_form(f, content_area, &self.form_state);
                    }
                    Screen::Outcome => {
                        if let Some(assessment) = &self.last_assessment {
                            render_outcome(f, content_area, assessment);
                        }
                    }
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::PatientForm => self.handle_patient_form_key(key),
            Screen::Outcome => self.handle_outcome_key(key),
        }
    }

    fn handle_patient_form_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_patient_form();
            }
            _ => {}
        }
    }

    fn handle_outcome_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.form_state = PatientFormState::default();
                self.last_assessment = None;
                self.screen = Screen::PatientForm;
            }
            KeyCode::Enter | KeyCode::Esc => {
                // Back to the form with values intact.
                self.screen = Screen::PatientForm;
            }
            _ => {}
        }
    }

    fn submit_patient_form(&mut self) {
        let record = match self.form_state.to_patient_record() {
            Ok(record) => record,
            Err(e) => {
                self.form_state.error_message = Some(e);
                return;
            }
        };

        match self.service.assess(&record) {
            Ok(assessment) => {
                self.last_assessment = Some(assessment);
                self.screen = Screen::Outcome;
                self.form_state.error_message = None;
            }
            Err(e) => {
                self.form_state.error_message = Some(e.to_string());
            }
        }
    }
}
