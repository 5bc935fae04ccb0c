//! Weather-code classification
//!
//! Maps a WMO weather code plus the day/night flag to what the card shows:
//! a localized description, an icon, and a coarse background theme. Every
//! code is enumerated explicitly so the theme partition never depends on
//! range ordering.
//!
//! Weather codes from WMO (World Meteorological Organization):
//! - 0: Clear sky
//! - 1-3: Mainly clear, partly cloudy, overcast
//! - 45, 48: Fog
//! - 51-57: Drizzle (56-57 freezing)
//! - 61-67: Rain (66-67 freezing)
//! - 71-77: Snow
//! - 80-82: Rain showers
//! - 85-86: Snow showers
//! - 95-99: Thunderstorm

use serde::{Deserialize, Serialize};

use crate::i18n::Language;

/// Background theme category for the result view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    Clear,
    Cloudy,
    Raining,
    Snowing,
    Thunder,
}

impl Theme {
    /// Classifies a WMO code; codes outside the WMO set fall back to `Clear`
    pub fn from_wmo_code(code: u8) -> Self {
        match code {
            0 | 1 => Theme::Clear,
            2 | 3 | 45 | 48 => Theme::Cloudy,
            51 | 53 | 55 | 56 | 57 => Theme::Raining,
            61 | 63 | 65 | 66 | 67 => Theme::Raining,
            80 | 81 | 82 => Theme::Raining,
            71 | 73 | 75 | 77 => Theme::Snowing,
            85 | 86 => Theme::Snowing,
            95 | 96 | 99 => Theme::Thunder,
            _ => Theme::Clear,
        }
    }

    /// Style class name (`is-clear`, ...)
    pub fn class_name(&self) -> &'static str {
        match self {
            Theme::Clear => "is-clear",
            Theme::Cloudy => "is-cloudy",
            Theme::Raining => "is-raining",
            Theme::Snowing => "is-snowing",
            Theme::Thunder => "is-thunder",
        }
    }
}

/// Weather icon, named after the Weather Icons set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    DaySunny,
    NightClear,
    DayCloudy,
    NightAltCloudy,
    Cloudy,
    DayFog,
    NightFog,
    DayRain,
    DayShowers,
    DaySnow,
    DayThunderstorm,
}

impl Icon {
    /// Picks the icon for a code. Only clear, partly cloudy and fog have
    /// night variants; unknown codes get the sunny icon.
    pub fn from_wmo_code(code: u8, is_day: bool) -> Self {
        match (code, is_day) {
            (0, true) => Icon::DaySunny,
            (0, false) => Icon::NightClear,
            (1 | 2, true) => Icon::DayCloudy,
            (1 | 2, false) => Icon::NightAltCloudy,
            (3, _) => Icon::Cloudy,
            (45 | 48, true) => Icon::DayFog,
            (45 | 48, false) => Icon::NightFog,
            (51 | 53 | 55 | 56 | 57, _) => Icon::DayRain,
            (61 | 63 | 65 | 66 | 67, _) => Icon::DayShowers,
            (71 | 73 | 75 | 77, _) => Icon::DaySnow,
            (80 | 81 | 82, _) => Icon::DayRain,
            (85 | 86, _) => Icon::DaySnow,
            (95 | 96 | 99, _) => Icon::DayThunderstorm,
            _ => Icon::DaySunny,
        }
    }

    /// Weather Icons identifier (`wi-day-sunny`, ...)
    pub fn name(&self) -> &'static str {
        match self {
            Icon::DaySunny => "wi-day-sunny",
            Icon::NightClear => "wi-night-clear",
            Icon::DayCloudy => "wi-day-cloudy",
            Icon::NightAltCloudy => "wi-night-alt-cloudy",
            Icon::Cloudy => "wi-cloudy",
            Icon::DayFog => "wi-day-fog",
            Icon::NightFog => "wi-night-fog",
            Icon::DayRain => "wi-day-rain",
            Icon::DayShowers => "wi-day-showers",
            Icon::DaySnow => "wi-day-snow",
            Icon::DayThunderstorm => "wi-day-thunderstorm",
        }
    }

    /// Terminal glyph for the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::DaySunny => "\u{2600}",
            Icon::NightClear => "\u{1F319}",
            Icon::DayCloudy => "\u{26C5}",
            Icon::NightAltCloudy => "\u{2601}",
            Icon::Cloudy => "\u{2601}",
            Icon::DayFog | Icon::NightFog => "\u{1F32B}",
            Icon::DayRain => "\u{1F327}",
            Icon::DayShowers => "\u{1F326}",
            Icon::DaySnow => "\u{2744}",
            Icon::DayThunderstorm => "\u{26C8}",
        }
    }
}

/// Everything the presenter needs to show for one weather code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub description: &'static str,
    pub icon: Icon,
    pub theme: Theme,
}

/// Classifies a weather code for display. Never fails: unknown codes resolve
/// to the "unknown condition" description, the sunny icon and the clear theme.
pub fn classify(code: u8, is_day: bool, language: Language) -> Presentation {
    Presentation {
        description: language.describe_weather_code(code),
        icon: Icon::from_wmo_code(code, is_day),
        theme: Theme::from_wmo_code(code),
    }
}
