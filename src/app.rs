//! Application state management for clima
//!
//! This module contains the presenter: the two-screen state machine, keyboard
//! handling and the bookkeeping around one in-flight lookup. Network work is
//! not done here; `main` drains [`App::take_pending_search`] into a
//! [`SearchRunner`](crate::search::SearchRunner) and feeds results back through
//! [`App::apply_search_result`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::conditions::Theme;
use crate::data::WeatherReport;
use crate::i18n::Language;
use crate::search::SearchError;

/// Application state enum representing the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Search form, optionally showing an error banner
    Search,
    /// Weather card for the last successful lookup
    Result,
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Text typed into the city field
    pub input: String,
    /// Localized error banner shown under the search field
    pub error: Option<String>,
    /// Report shown on the Result screen
    pub report: Option<WeatherReport>,
    /// City of the lookup currently running, if any
    pub in_flight: Option<String>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Display language
    pub language: Language,
    /// Lookup requested but not yet handed to the runner
    pending_search: Option<String>,
}

impl App {
    /// Creates a new App on the search screen
    pub fn new(language: Language) -> Self {
        Self {
            state: AppState::Search,
            input: String::new(),
            error: None,
            report: None,
            in_flight: None,
            show_help: false,
            should_quit: false,
            language,
            pending_search: None,
        }
    }

    /// Creates an App that submits `city` as soon as the loop starts
    pub fn with_initial_city(language: Language, city: Option<String>) -> Self {
        let mut app = Self::new(language);
        if let Some(city) = city {
            app.input = city;
            app.submit();
        }
        app
    }

    /// True while a lookup is running
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Theme and night flag for the current report, if one is shown
    pub fn theme(&self) -> Option<(Theme, bool)> {
        if self.state != AppState::Result {
            return None;
        }
        self.report.as_ref().map(|r| {
            (
                Theme::from_wmo_code(r.snapshot.weather_code),
                !r.snapshot.is_daytime,
            )
        })
    }

    /// Handles keyboard input
    ///
    /// Key mappings:
    /// - `Ctrl+C`: Quit from anywhere
    /// - `F1`: Toggle help from anywhere
    /// - Search: characters edit the city, `Backspace` deletes, `Enter`
    ///   searches, `Esc` quits
    /// - Result: `Esc`/`h`/`Backspace` go back to the search form, `q` quits,
    ///   `?` toggles help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        if key_event.code == KeyCode::F(1) {
            self.show_help = !self.show_help;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Search => match key_event.code {
                KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Enter => {
                    self.submit();
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c)
                    if !key_event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    self.input.push(c);
                }
                _ => {}
            },
            AppState::Result => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Backspace => {
                    self.go_home();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Submits the current input
    ///
    /// Ignored while another lookup is running. Blank input shows the
    /// validation message and requests nothing.
    pub fn submit(&mut self) {
        if self.in_flight.is_some() {
            tracing::debug!("search already in flight; ignoring submit");
            return;
        }

        let city = self.input.trim();
        if city.is_empty() {
            self.error = Some(self.language.empty_city());
            return;
        }

        let city = city.to_string();
        self.error = None;
        self.in_flight = Some(city.clone());
        self.pending_search = Some(city);
    }

    /// Takes the city that should be looked up next, if any
    pub fn take_pending_search(&mut self) -> Option<String> {
        self.pending_search.take()
    }

    /// Applies a finished lookup
    ///
    /// Success switches to the Result screen; failure stays on the search
    /// form with the localized message.
    pub fn apply_search_result(&mut self, city: &str, result: Result<WeatherReport, SearchError>) {
        if self.in_flight.as_deref() != Some(city) {
            tracing::debug!(city, "dropping result for a search that is no longer pending");
            return;
        }
        self.in_flight = None;

        match result {
            Ok(report) => {
                self.error = None;
                self.report = Some(report);
                self.state = AppState::Result;
            }
            Err(e) => {
                tracing::warn!(city, error = %e, "search failed");
                self.error = Some(e.user_message(self.language));
                self.report = None;
                self.state = AppState::Search;
            }
        }
    }

    /// Returns to the search form, clearing the banner, card and theme
    pub fn go_home(&mut self) {
        self.state = AppState::Search;
        self.error = None;
        self.report = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
