//! clima library
//!
//! Looks up a city's current weather through Open-Meteo, caches it for ten
//! minutes and presents it in a terminal UI. The binary in `main.rs` wires
//! these modules to a real terminal; integration tests use them directly.

pub mod app;
pub mod cache;
pub mod cli;
pub mod conditions;
pub mod config;
pub mod data;
pub mod i18n;
pub mod search;
pub mod ui;
