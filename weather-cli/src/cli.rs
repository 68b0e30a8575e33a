use std::io::{self, Write};

use clap::Parser;
use tracing::debug;
use weather_core::{
    FileConfig, Settings, WeatherApiProvider, WeatherError, WeatherProvider, config::load_dotenv,
    report::render,
};

/// Print the current weather for a location.
///
/// Takes at most one positional argument and no flags.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    about = "Weather report CLI",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Location to query; overrides DEFAULT_LOCATION.
    pub location: Option<String>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        load_dotenv();
        let file = FileConfig::load()?;

        run_with(
            |name| std::env::var(name).ok(),
            &file,
            self.location,
            |settings| Box::new(WeatherApiProvider::new(settings.api_key.clone())),
            &mut io::stdout(),
        )
        .await?;

        Ok(())
    }
}

/// Resolve settings from the given sources, then build a provider and
/// report. The provider is only built once settings resolve, so a missing
/// key never reaches the network.
pub async fn run_with<E, P, W>(
    env: E,
    file: &FileConfig,
    location_arg: Option<String>,
    make_provider: P,
    out: &mut W,
) -> Result<(), WeatherError>
where
    E: Fn(&str) -> Option<String>,
    P: FnOnce(&Settings) -> Box<dyn WeatherProvider>,
    W: Write,
{
    let settings = Settings::resolve(env, file, location_arg)?;
    debug!(location = %settings.location, "settings resolved");

    let provider = make_provider(&settings);
    report_with(&*provider, &settings, out).await
}

/// One fetch followed by rendering. Nothing is written unless the fetch
/// and decode succeed.
pub async fn report_with<W: Write>(
    provider: &dyn WeatherProvider,
    settings: &Settings,
    out: &mut W,
) -> Result<(), WeatherError> {
    let report = provider.current(&settings.location).await?;

    render(&report, &settings.location, out)?;
    out.flush()?;

    Ok(())
}
