//! Search screen rendering
//!
//! Renders the city field with its cursor, the error banner and the loading
//! hint while a lookup is running.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::Palette;
use crate::app::App;

/// Renders the search form
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::neutral();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(1), // Title
            Constraint::Length(1),
            Constraint::Length(3), // Input
            Constraint::Length(2), // Status: error or loading
            Constraint::Min(0),
            Constraint::Length(1), // Help text
        ])
        .split(area);

    let form_area = centered_column(chunks[3], 50);

    render_title(frame, app, &palette, chunks[1]);
    render_input(frame, app, &palette, form_area);
    render_status(frame, app, centered_column(chunks[4], 50));
    render_help(frame, app, chunks[6]);
}

fn render_title(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        app.language.labels().app_title,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_input(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let border_color = if app.error.is_some() {
        Color::Red
    } else {
        palette.border
    };

    let block = Block::default()
        .title(format!(" {} ", app.language.labels().input_title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(palette.text))
        .block(block);
    frame.render_widget(input, area);

    // Place the cursor after the typed text while the field is editable
    if !app.is_loading() && !app.show_help {
        frame.set_cursor_position((cursor_x(area, &app.input), area.y + 1));
    }
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let line = if app.is_loading() {
        Line::from(Span::styled(
            app.language.labels().searching,
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(ref error) = app.error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help = Paragraph::new(app.language.labels().input_hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, area);
}

/// Column just after the typed text, measured in display cells and kept inside the border
fn cursor_x(area: Rect, input: &str) -> u16 {
    let typed = u16::try_from(Line::from(input).width()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    area.x.saturating_add(1).saturating_add(typed).min(max_x)
}

/// Horizontally centers a column of at most `width` cells
fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}
