use serde::Deserialize;

/// Full decoded body of a WeatherAPI.com `current.json` response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    /// Provider-formatted, e.g. `2024-05-01 14:30`.
    pub localtime: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    pub humidity: f64,
    pub cloud: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub text: String,
}

/// Error payload WeatherAPI.com returns instead of a report, e.g. for an
/// unknown location or a rejected key.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderErrorBody {
    pub error: ProviderError,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProviderError {
    pub code: i64,
    pub message: String,
}
