//! Colour palette for the result view
//!
//! The theme picks the accent and background; night darkens both.

use ratatui::style::Color;

use crate::conditions::Theme;

/// Colours used to paint one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub border: Color,
    pub accent: Color,
    pub background: Color,
    pub text: Color,
}

impl Palette {
    /// Palette for the search form, which has no weather theme
    pub fn neutral() -> Self {
        Self {
            border: Color::Cyan,
            accent: Color::Cyan,
            background: Color::Reset,
            text: Color::White,
        }
    }

    /// Palette for a weather theme, darkened at night
    pub fn for_theme(theme: Theme, night: bool) -> Self {
        let (accent, background) = match theme {
            Theme::Clear => (Color::Yellow, Color::Rgb(33, 105, 170)),
            Theme::Cloudy => (Color::Gray, Color::Rgb(96, 108, 120)),
            Theme::Raining => (Color::LightBlue, Color::Rgb(52, 73, 94)),
            Theme::Snowing => (Color::White, Color::Rgb(150, 170, 190)),
            Theme::Thunder => (Color::LightMagenta, Color::Rgb(44, 36, 66)),
        };

        if night {
            Self {
                border: Color::DarkGray,
                accent,
                background: darken(background),
                text: Color::Gray,
            }
        } else {
            Self {
                border: accent,
                accent,
                background,
                text: Color::White,
            }
        }
    }
}

fn darken(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(r / 3, g / 3, b / 3),
        other => other,
    }
}
