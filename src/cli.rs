//! Command-line interface parsing for clima
//!
//! This module handles parsing of CLI arguments using clap. Everything here is
//! turned into a [`Config`](crate::config::Config) before the app starts.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::i18n::Language;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified language code is not recognized
    #[error("Invalid language: '{0}'. Valid languages: pt, en")]
    InvalidLanguage(String),
}

/// clima - current weather for any city, in the terminal
#[derive(Parser, Debug)]
#[command(name = "clima")]
#[command(about = "Current weather and today's forecast for any city")]
#[command(version)]
pub struct Cli {
    /// City to look up on startup
    ///
    /// Examples:
    ///   clima                    # Open the search form
    ///   clima Lisboa             # Search Lisboa immediately
    ///   clima --plain "São Paulo" # Print the card and exit
    #[arg(value_name = "CITY")]
    pub city: Option<String>,

    /// Interface language (pt, en)
    #[arg(long, value_name = "LANG", default_value = "pt", value_parser = parse_language_arg)]
    pub lang: Language,

    /// Always fetch fresh data and never write the cache
    #[arg(long)]
    pub no_cache: bool,

    /// Directory for cached reports (defaults to the XDG cache directory)
    #[arg(long, value_name = "DIR", conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Print the result as text instead of opening the interface
    #[arg(long, requires = "city")]
    pub plain: bool,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Alternate geocoding endpoint
    #[arg(long, value_name = "URL", env = "CLIMA_GEOCODING_URL", hide = true)]
    pub geocoding_url: Option<String>,

    /// Alternate forecast endpoint
    #[arg(long, value_name = "URL", env = "CLIMA_FORECAST_URL", hide = true)]
    pub forecast_url: Option<String>,
}

/// Parses a language argument into a Language.
///
/// # Returns
/// * `Ok(Language)` if the string matches a supported language
/// * `Err(CliError::InvalidLanguage)` otherwise
pub fn parse_language_arg(s: &str) -> Result<Language, CliError> {
    Language::from_code(s).ok_or_else(|| CliError::InvalidLanguage(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_arg_aliases() {
        assert_eq!(parse_language_arg("pt").unwrap(), Language::Portuguese);
        assert_eq!(parse_language_arg("pt-BR").unwrap(), Language::Portuguese);
        assert_eq!(parse_language_arg("en").unwrap(), Language::English);
        assert_eq!(parse_language_arg("EN").unwrap(), Language::English);
    }

    #[test]
    fn test_parse_language_arg_invalid() {
        let err = parse_language_arg("fr").unwrap_err();
        assert!(err.to_string().contains("Invalid language"));
        assert!(err.to_string().contains("fr"));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["clima"]).unwrap();
        assert!(cli.city.is_none());
        assert_eq!(cli.lang, Language::Portuguese);
        assert!(!cli.no_cache);
        assert!(!cli.plain);
        assert_eq!(cli.timeout, 5);
    }

    #[test]
    fn test_cli_parse_city_and_lang() {
        let cli = Cli::try_parse_from(["clima", "São Paulo", "--lang", "en"]).unwrap();
        assert_eq!(cli.city.as_deref(), Some("São Paulo"));
        assert_eq!(cli.lang, Language::English);
    }

    #[test]
    fn test_cli_parse_invalid_lang() {
        assert!(Cli::try_parse_from(["clima", "--lang", "xx"]).is_err());
    }

    #[test]
    fn test_cli_plain_requires_city() {
        assert!(Cli::try_parse_from(["clima", "--plain"]).is_err());
        assert!(Cli::try_parse_from(["clima", "--plain", "Recife"]).is_ok());
    }

    #[test]
    fn test_cli_no_cache_conflicts_with_cache_dir() {
        assert!(Cli::try_parse_from(["clima", "--no-cache", "--cache-dir", "/tmp/x"]).is_err());
    }

    #[test]
    fn test_cli_timeout_must_be_positive() {
        assert!(Cli::try_parse_from(["clima", "--timeout", "0"]).is_err());
        let cli = Cli::try_parse_from(["clima", "--timeout", "12"]).unwrap();
        assert_eq!(cli.timeout, 12);
    }
}
