//! Result screen: the weather card
//!
//! [`WeatherCard`] is the formatted view of a [`WeatherReport`]; both the
//! terminal renderer and `--plain` output read from it.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::theme::Palette;
use crate::conditions::{classify, Theme};
use crate::data::WeatherReport;
use crate::i18n::Language;

/// Display-ready strings for one report
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub title: &'static str,
    pub glyph: &'static str,
    pub icon_name: &'static str,
    pub temperature: String,
    pub location: String,
    pub description: &'static str,
    pub date: String,
    pub max_label: &'static str,
    pub max: String,
    pub min_label: &'static str,
    pub min: String,
    pub humidity_label: &'static str,
    pub humidity: String,
    pub wind_label: &'static str,
    pub wind: String,
    pub precipitation_label: &'static str,
    pub precipitation: String,
    pub theme: Theme,
    pub night: bool,
}

impl WeatherCard {
    pub fn from_report(report: &WeatherReport, language: Language) -> Self {
        let snapshot = &report.snapshot;
        let presentation = classify(snapshot.weather_code, snapshot.is_daytime, language);
        let labels = language.labels();

        Self {
            title: labels.card_title,
            glyph: presentation.icon.glyph(),
            icon_name: presentation.icon.name(),
            temperature: degrees(snapshot.current_temperature_c),
            location: report.location_name.clone(),
            description: presentation.description,
            date: language.format_full_date(&snapshot.observation_time),
            max_label: labels.max,
            max: degrees(snapshot.daily_max_c),
            min_label: labels.min,
            min: degrees(snapshot.daily_min_c),
            humidity_label: labels.humidity,
            humidity: snapshot
                .humidity_percent
                .map(|h| format!("{}%", h))
                .unwrap_or_else(|| "--%".to_string()),
            wind_label: labels.wind,
            wind: format!("{} km/h", snapshot.wind_speed_kmh.round() as i64),
            precipitation_label: labels.precipitation,
            precipitation: format!("{:.1} mm", snapshot.precipitation_mm),
            theme: presentation.theme,
            night: !snapshot.is_daytime,
        }
    }

    /// The card as plain text lines
    pub fn plain_lines(&self) -> Vec<String> {
        vec![
            self.title.to_string(),
            format!("{}  {}", self.glyph, self.temperature),
            self.location.clone(),
            self.description.to_string(),
            self.date.clone(),
            format!(
                "{} {}  {} {}",
                self.max_label, self.max, self.min_label, self.min
            ),
            format!("{}: {}", self.humidity_label, self.humidity),
            format!("{}: {}", self.wind_label, self.wind),
            format!("{}: {}", self.precipitation_label, self.precipitation),
        ]
    }
}

/// Rounded to whole degrees, e.g. `"27°"`
fn degrees(celsius: f64) -> String {
    format!("{}°", celsius.round() as i64)
}

/// Renders the card for `report`
pub fn render(frame: &mut Frame, report: &WeatherReport, language: Language) {
    let card = WeatherCard::from_report(report, language);
    let palette = Palette::for_theme(card.theme, card.night);
    let area = frame.area();

    // Paint the whole screen with the theme background
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(12),   // Card
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_card(frame, &card, &palette, chunks[0]);
    render_help(frame, language, &palette, chunks[1]);
}

fn render_card(frame: &mut Frame, card: &WeatherCard, palette: &Palette, area: Rect) {
    let text_style = Style::default().fg(palette.text);
    let accent_bold = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(palette.accent);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{}  ", card.glyph)),
            Span::styled(card.temperature.clone(), accent_bold),
        ]),
        Line::from(Span::styled(
            card.location.clone(),
            text_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.description, text_style)),
        Line::from(Span::styled(card.date.clone(), text_style)),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", card.max_label), label_style),
            Span::styled(card.max.clone(), text_style),
            Span::raw("   "),
            Span::styled(format!("{} ", card.min_label), label_style),
            Span::styled(card.min.clone(), text_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("{} ", card.humidity_label), label_style),
            Span::styled(card.humidity.clone(), text_style),
            Span::raw("   "),
            Span::styled(format!("{} ", card.wind_label), label_style),
            Span::styled(card.wind.clone(), text_style),
            Span::raw("   "),
            Span::styled(format!("{} ", card.precipitation_label), label_style),
            Span::styled(card.precipitation.clone(), text_style),
        ]),
    ];

    let block = Block::default()
        .title(format!(" {} ", card.title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame, language: Language, palette: &Palette, area: Rect) {
    let help = Paragraph::new(language.labels().back)
        .style(Style::default().fg(palette.text))
        .alignment(Alignment::Center);
    frame.render_widget(help, area);
}
