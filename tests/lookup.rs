//! Integration tests for the lookup flow against mocked Open-Meteo endpoints
//!
//! Each test starts a wiremock server standing in for both the geocoding and
//! the forecast API, then drives `WeatherService` through the real HTTP
//! clients.

use std::sync::Arc;
use std::time::Duration;

use clima::cache::{CacheManager, MemoryStorage, Storage};
use clima::data::{GeocodingClient, WeatherClient, WeatherReport, WeatherSnapshot};
use clima::i18n::Language;
use clima::search::{SearchError, WeatherService};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoding_body() -> serde_json::Value {
    json!({
        "results": [{
            "id": 3448439,
            "name": "São Paulo",
            "latitude": -23.55,
            "longitude": -46.63,
            "country": "Brasil"
        }],
        "generationtime_ms": 0.5
    })
}

fn forecast_body() -> serde_json::Value {
    json!({
        "latitude": -23.5,
        "longitude": -46.625,
        "current": {
            "time": "2025-11-02T14:15",
            "interval": 900,
            "temperature_2m": 27.4,
            "is_day": 1,
            "weather_code": 61,
            "wind_speed_10m": 12.6
        },
        "hourly": {
            "time": ["2025-11-02T13:00", "2025-11-02T14:00", "2025-11-02T15:00"],
            "relative_humidity_2m": [68, 65, 61]
        },
        "daily": {
            "time": ["2025-11-02"],
            "temperature_2m_max": [30.1],
            "temperature_2m_min": [18.4],
            "precipitation_sum": [2.3]
        }
    })
}

fn service(server: &MockServer, storage: Arc<MemoryStorage>) -> WeatherService {
    service_with_client(server, storage, reqwest::Client::new())
}

fn service_with_client(
    server: &MockServer,
    storage: Arc<MemoryStorage>,
    client: reqwest::Client,
) -> WeatherService {
    let geocoder = GeocodingClient::with_base_url(
        client.clone(),
        format!("{}/v1/search", server.uri()),
        Language::Portuguese,
    );
    let forecasts = WeatherClient::with_base_url(client, format!("{}/v1/forecast", server.uri()));
    WeatherService::new(
        Arc::new(geocoder),
        Arc::new(forecasts),
        Some(CacheManager::with_storage(storage)),
    )
}

fn cached_report(name: &str) -> WeatherReport {
    WeatherReport {
        location_name: name.to_string(),
        snapshot: WeatherSnapshot {
            current_temperature_c: 11.0,
            is_daytime: false,
            weather_code: 3,
            observation_time: chrono::NaiveDateTime::parse_from_str(
                "2025-11-01T22:00",
                "%Y-%m-%dT%H:%M",
            )
            .unwrap(),
            daily_max_c: 15.0,
            daily_min_c: 9.0,
            humidity_percent: None,
            wind_speed_kmh: 4.0,
            precipitation_mm: 0.0,
        },
    }
}

#[tokio::test]
async fn test_lookup_geocodes_fetches_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "São Paulo"))
        .and(query_param("count", "1"))
        .and(query_param("language", "pt"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-23.55"))
        .and(query_param("longitude", "-46.63"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let svc = service(&server, storage.clone());

    let report = svc.lookup("São Paulo").await.expect("lookup should succeed");
    assert_eq!(report.location_name, "São Paulo, Brasil");
    assert_eq!(report.snapshot.weather_code, 61);
    assert!(report.snapshot.is_daytime);
    // 14:15 is off the hour, so the 14:00 sample is used
    assert_eq!(report.snapshot.humidity_percent, Some(65));
    assert!((report.snapshot.precipitation_mm - 2.3).abs() < 1e-9);

    let raw = storage
        .get_item("weather_são paulo")
        .expect("report should be cached");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value["timestamp"].is_i64());
    assert_eq!(value["data"]["location_name"], "São Paulo, Brasil");

    // A second lookup within the window is served from the cache
    let again = svc.lookup("são paulo").await.unwrap();
    assert_eq!(again, report);
}

#[tokio::test]
async fn test_empty_results_is_city_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"generationtime_ms": 0.2})))
        .mount(&server)
        .await;

    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStorage::new()));
    let err = svc.lookup("Atlantis").await.unwrap_err();

    assert!(matches!(err, SearchError::CityNotFound(ref c) if c == "Atlantis"));
    assert_eq!(
        err.user_message(Language::Portuguese),
        "Cidade não encontrada: Atlantis"
    );
}

#[tokio::test]
async fn test_geocoder_outage_is_not_reported_as_not_found() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStorage::new()));
    let err = svc.lookup("Recife").await.unwrap_err();

    assert!(matches!(err, SearchError::GeocodingFailed(_)));
    assert_eq!(
        err.user_message(Language::Portuguese),
        "Não foi possível buscar a cidade. Verifique sua conexão."
    );
}

#[tokio::test]
async fn test_forecast_failure_leaves_cache_untouched() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body()))
        .mount(&server)
        .await;

    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    // An expired entry from long ago
    CacheManager::with_storage(storage.clone())
        .put_at("São Paulo", &cached_report("stale"), 0)
        .unwrap();
    let before = storage.get_item("weather_são paulo");

    let svc = service(&server, storage.clone());
    let err = svc.lookup("São Paulo").await.unwrap_err();

    assert!(matches!(err, SearchError::WeatherUnavailable(_)));
    assert_eq!(storage.get_item("weather_são paulo"), before);
}

#[tokio::test]
async fn test_malformed_forecast_is_weather_unavailable() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body()))
        .mount(&server)
        .await;

    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let svc = service(&server, storage.clone());

    let err = svc.lookup("São Paulo").await.unwrap_err();
    assert!(matches!(err, SearchError::WeatherUnavailable(_)));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_fresh_cache_entry_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    CacheManager::with_storage(storage.clone())
        .put("Porto", &cached_report("Porto, Portugal"))
        .unwrap();

    let svc = service(&server, storage);
    let report = svc.lookup("PORTO").await.unwrap();
    assert_eq!(report, cached_report("Porto, Portugal"));
}

#[tokio::test]
async fn test_blank_input_makes_no_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let svc = service(&server, Arc::new(MemoryStorage::new()));
    let err = svc.lookup("  \t ").await.unwrap_err();
    assert!(matches!(err, SearchError::EmptyCity));
    assert_eq!(
        err.user_message(Language::English),
        "Please enter a city name."
    );
}

fn short_timeout_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn test_slow_forecast_times_out_as_weather_unavailable() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocoding_body()))
        .mount(&server)
        .await;

    Mock::given(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(forecast_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let svc = service_with_client(&server, storage.clone(), short_timeout_client());

    let started = std::time::Instant::now();
    let err = svc.lookup("São Paulo").await.unwrap_err();

    assert!(matches!(err, SearchError::WeatherUnavailable(_)), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_slow_geocoder_times_out_as_geocoding_failed() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(geocoding_body())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(0)
        .mount(&server)
        .await;

    let storage = Arc::new(MemoryStorage::new());
    let svc = service_with_client(&server, storage.clone(), short_timeout_client());

    let err = svc.lookup("São Paulo").await.unwrap_err();

    assert!(matches!(err, SearchError::GeocodingFailed(_)), "got {:?}", err);
    assert!(storage.is_empty());
}
