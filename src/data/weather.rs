//! Open-Meteo weather API client
//!
//! This module provides functionality to fetch weather data from the Open-Meteo API
//! and parse it into our WeatherSnapshot structure.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{ForecastSource, Location, WeatherSnapshot};

/// Base URL for the Open-Meteo API
pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Stored when the response has no usable weather code; outside the WMO set,
/// so it classifies as an unknown condition
pub const UNKNOWN_WEATHER_CODE: u8 = u8::MAX;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Forecast service returned HTTP {0}")]
    HttpStatus(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching weather data from Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient against the public endpoint
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, OPEN_METEO_BASE_URL)
    }

    /// Create a new WeatherClient against a custom endpoint
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn forecast_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}?latitude={}&longitude={}&current=temperature_2m,is_day,weather_code,wind_speed_10m&hourly=relative_humidity_2m&daily=temperature_2m_max,temperature_2m_min,precipitation_sum&temperature_unit=celsius&timezone=auto",
            self.base_url, lat, lon
        )
    }

    /// Fetch the weather snapshot for a location
    ///
    /// # Returns
    /// * `Ok(WeatherSnapshot)` - Current conditions and today's summary
    /// * `Err(WeatherError)` - If the request fails, the status is not a success,
    ///   or the response does not have the expected shape
    pub async fn fetch_weather(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.forecast_url(location.latitude, location.longitude);
        tracing::debug!(
            lat = location.latitude,
            lon = location.longitude,
            "forecast request"
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "forecast request failed");
            return Err(WeatherError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await?;
        let api_response: OpenMeteoResponse = serde_json::from_str(&text)?;

        parse_response(api_response)
    }
}

#[async_trait]
impl ForecastSource for WeatherClient {
    async fn fetch_forecast(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        self.fetch_weather(location).await
    }
}

/// Parse the Open-Meteo API response into a WeatherSnapshot
fn parse_response(response: OpenMeteoResponse) -> Result<WeatherSnapshot, WeatherError> {
    let current = response.current;
    let daily = response.daily;

    let observation_time = parse_datetime(&current.time)?;

    // Today is the first daily entry
    let daily_max_c = first_value(&daily.temperature_2m_max)
        .ok_or_else(|| WeatherError::MissingField("temperature_2m_max".to_string()))?;
    let daily_min_c = first_value(&daily.temperature_2m_min)
        .ok_or_else(|| WeatherError::MissingField("temperature_2m_min".to_string()))?;
    let precipitation_mm = first_value(&daily.precipitation_sum).unwrap_or(0.0);

    let humidity_percent = humidity_at(&response.hourly, &current.time, observation_time);

    Ok(WeatherSnapshot {
        current_temperature_c: current.temperature_2m,
        is_daytime: current.is_day != 0,
        weather_code: weather_code(current.weather_code),
        observation_time,
        daily_max_c,
        daily_min_c,
        humidity_percent,
        wind_speed_kmh: current.wind_speed_10m,
        precipitation_mm,
    })
}

/// Narrows the raw code; absent or out-of-range values become `UNKNOWN_WEATHER_CODE`
fn weather_code(raw: Option<i64>) -> u8 {
    raw.and_then(|code| u8::try_from(code).ok())
        .unwrap_or(UNKNOWN_WEATHER_CODE)
}

fn first_value(values: &[Option<f64>]) -> Option<f64> {
    values.first().copied().flatten()
}

/// Finds the hourly humidity for the observation time.
///
/// Uses the sample whose timestamp equals the observation timestamp; when the
/// current block is not on the hour, falls back to the latest sample at or
/// before it. Returns `None` when neither exists.
fn humidity_at(hourly: &HourlyWeather, time: &str, observation: NaiveDateTime) -> Option<u8> {
    let index = hourly.time.iter().position(|t| t == time).or_else(|| {
        hourly
            .time
            .iter()
            .enumerate()
            .filter_map(|(i, t)| parse_datetime(t).ok().map(|dt| (i, dt)))
            .filter(|(_, dt)| *dt <= observation)
            .max_by_key(|(_, dt)| *dt)
            .map(|(i, _)| i)
    })?;

    let value = hourly.relative_humidity_2m.get(index).copied().flatten()?;
    Some(value.round().clamp(0.0, 100.0) as u8)
}

/// Parse a datetime string in ISO 8601 format (e.g., "2024-07-15T05:30") to NaiveDateTime
fn parse_datetime(datetime_str: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M")
        .map_err(|_| WeatherError::InvalidTimeFormat(datetime_str.to_string()))
}

/// Open-Meteo API response structure
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: CurrentWeather,
    hourly: HourlyWeather,
    daily: DailyWeather,
}

/// Current weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct CurrentWeather {
    time: String,
    temperature_2m: f64,
    is_day: u8,
    #[serde(default)]
    weather_code: Option<i64>,
    wind_speed_10m: f64,
}

/// Hourly weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct HourlyWeather {
    time: Vec<String>,
    relative_humidity_2m: Vec<Option<f64>>,
}

/// Daily weather data from Open-Meteo
#[derive(Debug, Deserialize)]
struct DailyWeather {
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}
