//! Integration tests for CLI argument handling
//!
//! Runs the built binary for flag validation and `--plain` output. The plain
//! mode tests point the binary at a wiremock server through the hidden
//! endpoint flags.

use std::process::Command;

use serde_json::json;
use wiremock::matchers::path;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_clima"))
        .args(args)
        .env_remove("CLIMA_GEOCODING_URL")
        .env_remove("CLIMA_FORECAST_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute clima")
}

/// Async variant for tests that keep a mock server alive meanwhile
async fn run_cli_async(args: Vec<String>) -> std::process::Output {
    tokio::process::Command::new(env!("CARGO_BIN_EXE_clima"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .await
        .expect("Failed to execute clima")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("clima"), "Help should mention clima");
    assert!(stdout.contains("--lang"), "Help should mention --lang flag");
    assert!(stdout.contains("--plain"), "Help should mention --plain flag");
    assert!(
        !stdout.contains("--geocoding-url"),
        "Endpoint overrides should be hidden"
    );
}

#[test]
fn test_invalid_language_prints_error_and_exits() {
    let output = run_cli(&["--lang", "klingon", "Lisboa"]);
    assert!(!output.status.success(), "Expected invalid language to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid language") || stderr.contains("invalid"),
        "Should print error message about invalid language: {}",
        stderr
    );
}

#[test]
fn test_plain_without_city_is_rejected() {
    let output = run_cli(&["--plain"]);
    assert!(!output.status.success());
}

#[test]
fn test_plain_blank_city_prints_validation_message() {
    let output = run_cli(&["--plain", "--no-cache", "--lang", "en", "   "]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter a city name."), "stderr: {}", stderr);
}

#[tokio::test]
async fn test_plain_prints_card() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "name": "Lisboa",
                "latitude": 38.72,
                "longitude": -9.13,
                "country": "Portugal"
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current": {
                "time": "2024-07-15T12:00",
                "temperature_2m": 24.6,
                "is_day": 1,
                "weather_code": 0,
                "wind_speed_10m": 9.5
            },
            "hourly": {
                "time": ["2024-07-15T11:00", "2024-07-15T12:00"],
                "relative_humidity_2m": [55, 52]
            },
            "daily": {
                "temperature_2m_max": [28.2],
                "temperature_2m_min": [17.9],
                "precipitation_sum": [0.0]
            }
        })))
        .mount(&server)
        .await;

    let output = run_cli_async(vec![
        "--plain".into(),
        "--no-cache".into(),
        "--lang".into(),
        "en".into(),
        "--geocoding-url".into(),
        format!("{}/v1/search", server.uri()),
        "--forecast-url".into(),
        format!("{}/v1/forecast", server.uri()),
        "Lisboa".into(),
    ])
    .await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Weather Forecast"));
    assert!(stdout.contains("Lisboa, Portugal"));
    assert!(stdout.contains("Clear sky"));
    assert!(stdout.contains("Monday, July 15, 2024"));
    assert!(stdout.contains("MAX 28°  MIN 18°"));
    assert!(stdout.contains("HUMIDITY: 52%"));
    assert!(stdout.contains("WIND: 10 km/h"));
}

#[tokio::test]
async fn test_plain_not_found_exits_with_failure() {
    let server = MockServer::start().await;

    Mock::given(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let output = run_cli_async(vec![
        "--plain".into(),
        "--no-cache".into(),
        "--geocoding-url".into(),
        format!("{}/v1/search", server.uri()),
        "--forecast-url".into(),
        format!("{}/v1/forecast", server.uri()),
        "Atlantis".into(),
    ])
    .await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cidade não encontrada: Atlantis"), "stderr: {}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use clima::cli::{parse_language_arg, Cli};
    use clima::config::{CacheSetting, Config};
    use clima::i18n::Language;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::parse_from(["clima"]);
        assert!(cli.city.is_none());
        assert_eq!(cli.lang, Language::Portuguese);
    }

    #[test]
    fn test_cli_city_positional() {
        let cli = Cli::parse_from(["clima", "Rio de Janeiro"]);
        assert_eq!(cli.city.as_deref(), Some("Rio de Janeiro"));
    }

    #[test]
    fn test_parse_language_arg_public() {
        assert_eq!(parse_language_arg("en").unwrap(), Language::English);
        assert!(parse_language_arg("de").is_err());
    }

    #[test]
    fn test_config_from_cli_with_cache_dir() {
        let cli = Cli::parse_from(["clima", "--cache-dir", "/tmp/clima-cache", "Natal"]);
        let config = Config::from_cli(&cli);
        assert_eq!(
            config.cache,
            CacheSetting::Dir(std::path::PathBuf::from("/tmp/clima-cache"))
        );
        assert_eq!(config.initial_city.as_deref(), Some("Natal"));
    }
}
