use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

use crate::error::{Result, WeatherError};

/// Environment variable holding the WeatherAPI.com key.
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Environment variable holding the location used when no argument is given.
pub const LOCATION_VAR: &str = "DEFAULT_LOCATION";

/// Location queried when neither the argument, the environment nor the
/// config file name one.
pub const FALLBACK_LOCATION: &str = "Hyderabad";

/// Optional per-user configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_location = "Paris"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub default_location: Option<String>,
}

impl FileConfig {
    /// Load config from the platform config directory, or return an empty
    /// default if it doesn't exist or no config directory can be determined.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_file_path() else {
            debug!("could not determine platform config directory, skipping user config");
            return Ok(Self::default());
        };

        Self::load_from(&path).map_err(WeatherError::ConfigFile)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no user config file");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded user config file");
        Ok(cfg)
    }

    /// Path to the config file, if the platform has a config directory.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "weather-report", "weather")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

/// Outcome of looking for a `.env` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFile {
    Loaded,
    Missing,
    /// Present but unreadable or malformed.
    Ignored,
}

/// Load `./.env` (or the first one found in a parent directory) into the
/// process environment.
///
/// Variables already present in the environment keep their values. A
/// malformed file is reported and otherwise ignored.
pub fn load_dotenv() -> EnvFile {
    env_file_outcome(dotenvy::dotenv().map(|path| debug!(path = %path.display(), "loaded .env")))
}

/// Same as [`load_dotenv`] for an explicit file.
pub fn load_dotenv_from(path: &Path) -> EnvFile {
    env_file_outcome(dotenvy::from_path(path))
}

fn env_file_outcome(result: dotenvy::Result<()>) -> EnvFile {
    match result {
        Ok(()) => EnvFile::Loaded,
        Err(err) if err.not_found() => {
            debug!("no .env file found");
            EnvFile::Missing
        }
        Err(err) => {
            warn!(error = %err, "ignoring unreadable .env file");
            EnvFile::Ignored
        }
    }
}

/// Everything one run needs, resolved once before any network activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub location: String,
}

impl Settings {
    /// Apply precedence rules over the given sources. Blank values are
    /// treated as absent.
    ///
    /// - API key: environment, then config file; required.
    /// - Location: argument, then environment, then config file, then
    ///   [`FALLBACK_LOCATION`].
    pub fn resolve<F>(env: F, file: &FileConfig, location_arg: Option<String>) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = non_blank(env(API_KEY_VAR))
            .or_else(|| non_blank(file.api_key.clone()))
            .ok_or(WeatherError::MissingApiKey)?;

        let location = if let Some(arg) = non_blank(location_arg) {
            debug!("location taken from command line");
            arg
        } else if let Some(env_loc) = non_blank(env(LOCATION_VAR)) {
            debug!("location taken from {LOCATION_VAR}");
            env_loc
        } else if let Some(file_loc) = non_blank(file.default_location.clone()) {
            debug!("location taken from config file");
            file_loc
        } else {
            debug!("using built-in default location");
            FALLBACK_LOCATION.to_string()
        };

        Ok(Self { api_key, location })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
