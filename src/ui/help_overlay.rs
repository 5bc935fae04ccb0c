//! Help overlay showing all keybindings
//!
//! Renders a centered modal overlay with keyboard shortcuts.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::i18n::Language;

struct HelpText {
    title: &'static str,
    heading: &'static str,
    search: &'static str,
    result: &'static str,
    anywhere: &'static str,
    bindings_search: [(&'static str, &'static str); 3],
    bindings_result: [(&'static str, &'static str); 3],
    bindings_anywhere: [(&'static str, &'static str); 2],
    close: &'static str,
}

const HELP_PT: HelpText = HelpText {
    title: " Ajuda ",
    heading: "Atalhos de teclado",
    search: "Busca",
    result: "Resultado",
    anywhere: "Em qualquer tela",
    bindings_search: [
        ("Enter", "Buscar a cidade digitada"),
        ("Backspace", "Apagar um caractere"),
        ("Esc", "Sair"),
    ],
    bindings_result: [
        ("Esc/h/⌫", "Voltar para a busca"),
        ("q", "Sair"),
        ("?", "Mostrar esta ajuda"),
    ],
    bindings_anywhere: [("F1", "Mostrar/ocultar ajuda"), ("Ctrl+C", "Sair")],
    close: "Pressione Esc ou F1 para fechar",
};

const HELP_EN: HelpText = HelpText {
    title: " Help ",
    heading: "Keyboard Shortcuts",
    search: "Search",
    result: "Result",
    anywhere: "Anywhere",
    bindings_search: [
        ("Enter", "Search for the typed city"),
        ("Backspace", "Delete a character"),
        ("Esc", "Quit application"),
    ],
    bindings_result: [
        ("Esc/h/⌫", "Back to search"),
        ("q", "Quit application"),
        ("?", "Toggle this help"),
    ],
    bindings_anywhere: [("F1", "Toggle this help"), ("Ctrl+C", "Quit application")],
    close: "Press Esc or F1 to close",
};

/// Renders the help overlay on top of the current view
pub fn render(frame: &mut Frame, language: Language) {
    let text = match language {
        Language::Portuguese => &HELP_PT,
        Language::English => &HELP_EN,
    };

    let area = frame.area();
    let overlay_area = centered_rect(50, 20, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let mut lines = vec![
        Line::from(Span::styled(
            text.heading,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let sections: [(&str, &[(&str, &str)]); 3] = [
        (text.search, &text.bindings_search),
        (text.result, &text.bindings_result),
        (text.anywhere, &text.bindings_anywhere),
    ];
    for (heading, bindings) in sections {
        lines.push(Line::from(Span::styled(
            heading,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.extend(bindings.iter().map(|(key, desc)| help_line(key, desc)));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        text.close,
        Style::default().fg(Color::DarkGray),
    )));

    let block = Block::default()
        .title(text.title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, overlay_area);
}

/// Creates a help line with key and description
fn help_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(Color::Yellow)),
        Span::raw(description.to_string()),
    ])
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
