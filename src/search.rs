//! City lookup orchestration
//!
//! `WeatherService` runs one lookup end to end (cache, geocoder, forecast,
//! cache write). `SearchRunner` runs lookups on background tasks and hands the
//! results back to the UI loop over a tokio channel.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::cache::CacheManager;
use crate::data::{ForecastSource, GeocodeError, Geocoder, WeatherError, WeatherReport};
use crate::i18n::Language;

/// Why a lookup produced no report
#[derive(Debug, Error)]
pub enum SearchError {
    /// Input was empty or whitespace; nothing was requested
    #[error("Empty city name")]
    EmptyCity,

    /// The geocoder has no match for the city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// The geocoder could not be reached or answered badly
    #[error("Geocoding failed: {0}")]
    GeocodingFailed(#[source] GeocodeError),

    /// The forecast request failed or returned an unexpected shape
    #[error("Weather unavailable: {0}")]
    WeatherUnavailable(#[from] WeatherError),
}

impl SearchError {
    /// Short message for the error banner
    pub fn user_message(&self, language: Language) -> String {
        match self {
            SearchError::EmptyCity => language.empty_city(),
            SearchError::CityNotFound(city) => language.city_not_found(city),
            SearchError::GeocodingFailed(_) => language.geocoding_unavailable(),
            SearchError::WeatherUnavailable(_) => language.weather_unavailable(),
        }
    }
}

/// Looks up weather for a city, consulting the cache first
pub struct WeatherService {
    geocoder: Arc<dyn Geocoder>,
    forecasts: Arc<dyn ForecastSource>,
    cache: Option<CacheManager>,
}

impl WeatherService {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecasts: Arc<dyn ForecastSource>,
        cache: Option<CacheManager>,
    ) -> Self {
        Self {
            geocoder,
            forecasts,
            cache,
        }
    }

    /// Runs one lookup for `city`
    ///
    /// # Behavior
    /// - Blank input fails with `EmptyCity` without touching cache or network
    /// - A fresh cache entry is returned as-is
    /// - Otherwise geocodes, fetches the forecast, stores the result and returns it
    /// - A failed fetch never writes to the cache
    pub async fn lookup(&self, city: &str) -> Result<WeatherReport, SearchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(SearchError::EmptyCity);
        }

        if let Some(ref cache) = self.cache {
            if let Some(report) = cache.get(city) {
                tracing::info!(city, "serving cached report");
                return Ok(report);
            }
        }

        let location = self.geocoder.resolve(city).await.map_err(|e| match e {
            GeocodeError::EmptyQuery => SearchError::EmptyCity,
            GeocodeError::NotFound { .. } => SearchError::CityNotFound(city.to_string()),
            other => SearchError::GeocodingFailed(other),
        })?;
        tracing::debug!(city, location = %location.display_name, "city resolved");

        let snapshot = self.forecasts.fetch_forecast(&location).await?;
        let report = WeatherReport {
            location_name: location.display_name,
            snapshot,
        };

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.put(city, &report) {
                tracing::warn!(city, error = %e, "failed to write cache entry");
            }
        }

        tracing::info!(city, location = %report.location_name, "fetched fresh report");
        Ok(report)
    }
}

/// Messages sent from a background lookup to the UI loop
#[derive(Debug)]
pub enum SearchMessage {
    /// A lookup finished
    Completed {
        city: String,
        result: Result<WeatherReport, SearchError>,
    },
}

/// Spawns lookups and collects their results
pub struct SearchRunner {
    service: Arc<WeatherService>,
    sender: mpsc::Sender<SearchMessage>,
    /// Channel for receiving finished lookups
    pub receiver: mpsc::Receiver<SearchMessage>,
}

impl SearchRunner {
    pub fn new(service: Arc<WeatherService>) -> Self {
        let (sender, receiver) = mpsc::channel(8);
        Self {
            service,
            sender,
            receiver,
        }
    }

    /// Starts a lookup on the tokio runtime; the result arrives on `receiver`
    pub fn spawn(&self, city: String) {
        let service = Arc::clone(&self.service);
        let tx = self.sender.clone();

        tokio::spawn(async move {
            let result = service.lookup(&city).await;
            let _ = tx.send(SearchMessage::Completed { city, result }).await;
        });
    }

    /// Checks for a finished lookup without blocking
    pub fn try_recv(&mut self) -> Option<SearchMessage> {
        self.receiver.try_recv().ok()
    }
}
