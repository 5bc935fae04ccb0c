//! Open-Meteo geocoding client
//!
//! Resolves a free-text city name to the coordinates of the best match.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{Geocoder, Location};
use crate::i18n::Language;

/// Base URL for the Open-Meteo geocoding API
pub const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Errors that can occur when resolving a city name
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The query was empty after trimming; no request was made
    #[error("Empty city name")]
    EmptyQuery,

    /// The service answered but had no match
    #[error("No location found for '{query}'")]
    NotFound { query: String },

    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Geocoding service returned HTTP {0}")]
    HttpStatus(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl GeocodeError {
    /// True when the service was reached and simply has no such city
    pub fn is_not_found(&self) -> bool {
        matches!(self, GeocodeError::NotFound { .. })
    }
}

/// Client for the Open-Meteo geocoding API
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
    language: Language,
}

impl GeocodingClient {
    /// Creates a client against the public endpoint
    pub fn new(client: Client, language: Language) -> Self {
        Self::with_base_url(client, GEOCODING_BASE_URL, language)
    }

    /// Creates a client against a custom endpoint (mirrors, tests)
    pub fn with_base_url(client: Client, base_url: impl Into<String>, language: Language) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            language,
        }
    }

    /// Builds the search URL for a city, asking for exactly one match
    fn search_url(&self, city: &str) -> String {
        format!(
            "{}?name={}&count=1&language={}&format=json",
            self.base_url,
            urlencoding::encode(city),
            self.language.code()
        )
    }

    /// Resolves a city name to the first matching location
    ///
    /// # Returns
    /// * `Ok(Location)` - Coordinates and "Name, Country" of the first result
    /// * `Err(GeocodeError::EmptyQuery)` - Blank input, nothing was sent
    /// * `Err(GeocodeError::NotFound)` - The service has no match
    /// * `Err(_)` - Transport, status or parse failure
    pub async fn resolve_city(&self, city: &str) -> Result<Location, GeocodeError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let url = self.search_url(query);
        tracing::debug!(city = query, "geocoding request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(city = query, status = status.as_u16(), "geocoding failed");
            return Err(GeocodeError::HttpStatus(status.as_u16()));
        }

        let text = response.text().await?;
        let api_response: GeocodingResponse = serde_json::from_str(&text)?;

        parse_response(api_response, query)
    }
}

#[async_trait]
impl Geocoder for GeocodingClient {
    async fn resolve(&self, city: &str) -> Result<Location, GeocodeError> {
        self.resolve_city(city).await
    }
}

/// Turns the API response into a Location from its first result
fn parse_response(response: GeocodingResponse, query: &str) -> Result<Location, GeocodeError> {
    let first = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| GeocodeError::NotFound {
            query: query.to_string(),
        })?;

    let display_name = match first.country.as_deref().map(str::trim) {
        Some(country) if !country.is_empty() => format!("{}, {}", first.name, country),
        _ => first.name,
    };

    Ok(Location {
        latitude: first.latitude,
        longitude: first.longitude,
        display_name,
    })
}

/// Open-Meteo geocoding response; `results` is omitted when nothing matches
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    latitude: f64,
    longitude: f64,
    name: String,
    #[serde(default)]
    country: Option<String>,
}
