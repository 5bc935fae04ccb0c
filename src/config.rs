//! Runtime configuration resolved from the command line

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{default_cache_dir, CacheManager};
use crate::cli::Cli;
use crate::data::{GeocodingClient, WeatherClient, GEOCODING_BASE_URL, OPEN_METEO_BASE_URL};
use crate::i18n::Language;
use crate::search::WeatherService;

/// Default HTTP timeout for every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where cached reports go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSetting {
    /// The platform cache directory (`~/.cache/clima` on Linux)
    Default,
    /// A caller-chosen directory
    Dir(PathBuf),
    /// No caching at all
    Disabled,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub language: Language,
    pub initial_city: Option<String>,
    pub cache: CacheSetting,
    pub timeout: Duration,
    pub plain: bool,
    pub log_file: Option<PathBuf>,
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: Language::default(),
            initial_city: None,
            cache: CacheSetting::Default,
            timeout: DEFAULT_TIMEOUT,
            plain: false,
            log_file: None,
            geocoding_url: GEOCODING_BASE_URL.to_string(),
            forecast_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let defaults = Self::default();

        let cache = if cli.no_cache {
            CacheSetting::Disabled
        } else if let Some(ref dir) = cli.cache_dir {
            CacheSetting::Dir(dir.clone())
        } else {
            CacheSetting::Default
        };

        let initial_city = cli
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Self {
            language: cli.lang,
            initial_city,
            cache,
            timeout: Duration::from_secs(cli.timeout),
            plain: cli.plain,
            log_file: cli.log_file.clone(),
            geocoding_url: cli.geocoding_url.clone().unwrap_or(defaults.geocoding_url),
            forecast_url: cli.forecast_url.clone().unwrap_or(defaults.forecast_url),
        }
    }

    /// Builds the shared HTTP client with the configured timeout
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("clima/", env!("CARGO_PKG_VERSION")))
            .build()
    }

    /// Opens the cache, or `None` when disabled or no cache directory exists
    pub fn cache_manager(&self) -> Option<CacheManager> {
        match self.cache {
            CacheSetting::Disabled => None,
            CacheSetting::Dir(ref dir) => Some(CacheManager::with_dir(dir.clone())),
            CacheSetting::Default => {
                let manager = default_cache_dir().map(CacheManager::with_dir);
                if manager.is_none() {
                    tracing::warn!("no cache directory available; caching disabled");
                }
                manager
            }
        }
    }

    /// Wires the HTTP clients and cache into a lookup service
    pub fn weather_service(&self) -> reqwest::Result<WeatherService> {
        let client = self.http_client()?;
        let geocoder = GeocodingClient::with_base_url(
            client.clone(),
            self.geocoding_url.clone(),
            self.language,
        );
        let forecasts = WeatherClient::with_base_url(client, self.forecast_url.clone());

        Ok(WeatherService::new(
            Arc::new(geocoder),
            Arc::new(forecasts),
            self.cache_manager(),
        ))
    }
}
