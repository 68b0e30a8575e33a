use std::io::Write;

use crate::model::WeatherReport;

const BANNER: &str = "-- CLI for Weather report --";
const SEPARATOR: &str = "------------------------------";

/// Write the human-readable report for `location` to `out`.
pub fn render<W: Write>(
    report: &WeatherReport,
    location: &str,
    out: &mut W,
) -> std::io::Result<()> {
    let WeatherReport { location: place, current } = report;

    writeln!(out, "{BANNER}")?;
    writeln!(out, "Weather report of {location}")?;
    writeln!(out, "City: {}", place.name)?;
    writeln!(out, "Country: {}", place.country)?;
    writeln!(out, "Local Time: {}", place.localtime)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Temperature (Celsius): {}", current.temp_c)?;
    writeln!(out, "Temperature (Fahrenheit): {}", current.temp_f)?;
    writeln!(out, "Humidity: {}", current.humidity)?;
    writeln!(out, "Cloud: {}", current.cloud)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out, "Condition: {}", current.condition.text)?;

    Ok(())
}
