//! Core library for the `weather` report CLI.
//!
//! This crate defines:
//! - Configuration resolution (`.env`, environment, user config file)
//! - The WeatherAPI.com client behind the `WeatherProvider` trait
//! - The decoded response model and its text rendering
//! - The error taxonomy shared with the binary
//!
//! It is used by `weather-report`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{FileConfig, Settings};
pub use error::WeatherError;
pub use model::{Condition, CurrentConditions, Location, WeatherReport};
pub use provider::{WeatherApiProvider, WeatherProvider};
