use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, model::WeatherReport};

pub mod weatherapi;

pub use weatherapi::WeatherApiProvider;

/// A source of current weather conditions.
///
/// Implementations issue exactly one upstream request per call and never
/// retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &str) -> Result<WeatherReport>;
}
