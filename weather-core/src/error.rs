use thiserror::Error;

/// Every way a single weather report run can fail.
///
/// None of these are retried; the binary turns any of them into a
/// diagnostic on stderr and a non-zero exit code.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "Weather API key is not provided.\n\
         Hint: set WEATHER_API_KEY in the environment or in a local .env file."
    )]
    MissingApiKey,

    #[error(transparent)]
    ConfigFile(anyhow::Error),

    /// The wrapped error never carries the request URL, which holds the key.
    #[error("Failed to request current weather from WeatherAPI.com")]
    Request(#[source] reqwest::Error),

    #[error("Failed to decode WeatherAPI.com response (status {status}){}", fmt_detail(.detail))]
    Decode {
        status: u16,
        detail: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write weather report")]
    Output(#[from] std::io::Error),
}

fn fmt_detail(detail: &Option<String>) -> String {
    match detail {
        Some(msg) => format!(": {msg}"),
        None => String::new(),
    }
}

impl WeatherError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        WeatherError::Request(err.without_url())
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
