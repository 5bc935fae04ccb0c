//! UI rendering module for clima
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod search_form;
pub mod theme;
pub mod weather_card;

pub use theme::Palette;
pub use weather_card::WeatherCard;

use ratatui::Frame;

use crate::app::{App, AppState};

/// Renders the UI based on the current application state
pub fn render(frame: &mut Frame, app: &App) {
    match (app.state, app.report.as_ref()) {
        (AppState::Result, Some(report)) => weather_card::render(frame, report, app.language),
        _ => search_form::render(frame, app),
    }

    if app.show_help {
        help_overlay::render(frame, app.language);
    }
}
