//! Display language and all user-facing text
//!
//! Every string the user can read lives here so that the presenter, the card
//! renderer and the error taxonomy stay language-agnostic.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

/// Languages the interface can be displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    /// Brazilian Portuguese
    #[default]
    Portuguese,
    /// English
    English,
}

impl Language {
    /// Parses a language code (`pt`, `pt-br`, `en`, ...) case-insensitively
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" | "portuguese" | "portugues" | "português" => {
                Some(Language::Portuguese)
            }
            "en" | "en-us" | "en_us" | "english" => Some(Language::English),
            _ => None,
        }
    }

    /// ISO 639-1 code, as sent to the geocoding service
    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => "pt",
            Language::English => "en",
        }
    }

    pub fn empty_city(&self) -> String {
        match self {
            Language::Portuguese => "Digite o nome de uma cidade.".to_string(),
            Language::English => "Please enter a city name.".to_string(),
        }
    }

    pub fn city_not_found(&self, city: &str) -> String {
        match self {
            Language::Portuguese => format!("Cidade não encontrada: {}", city),
            Language::English => format!("City not found: {}", city),
        }
    }

    pub fn geocoding_unavailable(&self) -> String {
        match self {
            Language::Portuguese => {
                "Não foi possível buscar a cidade. Verifique sua conexão.".to_string()
            }
            Language::English => {
                "Could not reach the city search service. Check your connection.".to_string()
            }
        }
    }

    pub fn weather_unavailable(&self) -> String {
        match self {
            Language::Portuguese => {
                "Não foi possível obter os dados do clima. Tente novamente mais tarde.".to_string()
            }
            Language::English => {
                "Could not retrieve weather data. Please try again later.".to_string()
            }
        }
    }

    /// Static labels for the search form and result card
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::Portuguese => &PT_LABELS,
            Language::English => &EN_LABELS,
        }
    }

    /// Describes a WMO weather code, falling back to "unknown condition"
    pub fn describe_weather_code(&self, code: u8) -> &'static str {
        match self {
            Language::Portuguese => describe_pt(code),
            Language::English => describe_en(code),
        }
    }

    /// Formats a long, capitalised date such as "Domingo, 2 de novembro de 2025"
    pub fn format_full_date(&self, time: &NaiveDateTime) -> String {
        let date = time.date();
        let formatted = match self {
            Language::Portuguese => format!(
                "{}, {} de {} de {}",
                weekday_pt(date.weekday()),
                date.day(),
                MONTHS_PT[date.month0() as usize],
                date.year()
            ),
            Language::English => format!(
                "{}, {} {}, {}",
                weekday_en(date.weekday()),
                MONTHS_EN[date.month0() as usize],
                date.day(),
                date.year()
            ),
        };
        capitalize(&formatted)
    }
}

/// Fixed labels shown around the weather data
#[derive(Debug)]
pub struct Labels {
    pub app_title: &'static str,
    pub card_title: &'static str,
    pub input_title: &'static str,
    pub input_hint: &'static str,
    pub searching: &'static str,
    pub max: &'static str,
    pub min: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub precipitation: &'static str,
    pub back: &'static str,
}

static PT_LABELS: Labels = Labels {
    app_title: "Clima",
    card_title: "Previsão do Tempo",
    input_title: "Cidade",
    input_hint: "Enter: buscar  Esc: sair  F1: ajuda",
    searching: "Buscando...",
    max: "MÁXIMA",
    min: "MÍNIMA",
    humidity: "UMIDADE",
    wind: "VENTO",
    precipitation: "PRECIPITAÇÃO",
    back: "Esc: voltar  q: sair  ?: ajuda",
};

static EN_LABELS: Labels = Labels {
    app_title: "Clima",
    card_title: "Weather Forecast",
    input_title: "City",
    input_hint: "Enter: search  Esc: quit  F1: help",
    searching: "Searching...",
    max: "MAX",
    min: "MIN",
    humidity: "HUMIDITY",
    wind: "WIND",
    precipitation: "PRECIPITATION",
    back: "Esc: back  q: quit  ?: help",
};

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

fn weekday_pt(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn weekday_en(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn describe_pt(code: u8) -> &'static str {
    match code {
        0 => "Céu limpo",
        1 => "Principalmente limpo",
        2 => "Parcialmente nublado",
        3 => "Nublado",
        45 => "Nevoeiro",
        48 => "Nevoeiro depositado",
        51 => "Chuvisco leve",
        53 => "Chuvisco moderado",
        55 => "Chuvisco forte",
        56 => "Chuvisco congelante leve",
        57 => "Chuvisco congelante forte",
        61 => "Chuva leve",
        63 => "Chuva moderada",
        65 => "Chuva forte",
        66 => "Chuva congelante leve",
        67 => "Chuva congelante forte",
        71 => "Neve leve",
        73 => "Neve moderada",
        75 => "Neve forte",
        77 => "Grãos de neve",
        80 => "Aguaceiros leves",
        81 => "Aguaceiros moderados",
        82 => "Aguaceiros violentos",
        85 => "Aguaceiros de neve leves",
        86 => "Aguaceiros de neve fortes",
        95 => "Trovoada",
        96 => "Trovoada com granizo leve",
        99 => "Trovoada com granizo forte",
        _ => "Condição desconhecida",
    }
}

fn describe_en(code: u8) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snowfall",
        73 => "Moderate snowfall",
        75 => "Heavy snowfall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with light hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown condition",
    }
}

/// Uppercases the first character, leaving the rest untouched
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
