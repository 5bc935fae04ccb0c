//! Core data models for Clima
//!
//! This module contains the types passed between the geocoder, the forecast
//! client, the cache and the presenter, plus the async ports the orchestrator
//! depends on.

pub mod geocode;
pub mod weather;

pub use geocode::{GeocodeError, GeocodingClient, GEOCODING_BASE_URL};
pub use weather::{WeatherClient, WeatherError, OPEN_METEO_BASE_URL};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A geocoded place, taken from the first search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// "Name, Country" as shown on the card
    pub display_name: String,
}

/// Current conditions plus today's summary for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current temperature in Celsius
    pub current_temperature_c: f64,
    /// Whether the observation falls in daytime at the location
    pub is_daytime: bool,
    /// WMO weather code
    pub weather_code: u8,
    /// Observation time in the location's local timezone
    pub observation_time: NaiveDateTime,
    /// Today's maximum temperature in Celsius
    pub daily_max_c: f64,
    /// Today's minimum temperature in Celsius
    pub daily_min_c: f64,
    /// Relative humidity percentage (0-100), `None` when unavailable
    pub humidity_percent: Option<u8>,
    /// Wind speed in km/h
    pub wind_speed_kmh: f64,
    /// Today's precipitation sum in mm
    pub precipitation_mm: f64,
}

/// A snapshot together with the place it belongs to; this is what gets cached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Display name of the resolved location
    pub location_name: String,
    /// Weather for that location
    pub snapshot: WeatherSnapshot,
}

/// Resolves a free-text city name to coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, city: &str) -> Result<Location, GeocodeError>;
}

/// Fetches a weather snapshot for coordinates
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError>;
}
