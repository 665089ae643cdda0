use std::fmt;

use chrono::NaiveDateTime;
use skyview_core::{
    Dashboard, FetchState, Severity, Units, UvLevel, WeatherData, classify,
    units::{format_temperature, format_wind_speed},
};

/// Text rendering of a [`Dashboard`].
pub struct DashboardView<'a>(pub &'a Dashboard);

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dash = self.0;
        let background = dash.background();
        writeln!(f, "[theme: {:?} | {}]", background, background.css_class())?;

        match dash.state() {
            FetchState::Idle => {
                writeln!(f, "Enter a city name or use your current location to get started")
            }
            FetchState::Loading(_) => writeln!(f, "Fetching weather data..."),
            FetchState::Failed(message) => writeln!(f, "! {message}"),
            FetchState::Ready(data) => {
                if let Some(alert) = dash.alert() {
                    writeln!(f, "{} {}", severity_tag(alert.severity), alert.message)?;
                }
                write_current(f, data, dash.units())?;
                write_hourly(f, data, dash.units())?;
                write_daily(f, data, dash.units())
            }
        }
    }
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[INFO]",
        Severity::Warning => "[WARNING]",
        Severity::Danger => "[DANGER]",
    }
}

pub fn format_clock(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

fn write_current(f: &mut fmt::Formatter<'_>, data: &WeatherData, units: Units) -> fmt::Result {
    let current = &data.current;
    let condition = classify(current.weather_code);

    writeln!(f)?;
    writeln!(f, "📍 {}", data.location.display_name())?;
    writeln!(f, "   {}", current.time.format("%a %-d %b %Y, %-I:%M %p"))?;
    writeln!(
        f,
        "   {} {}  {}",
        condition.icon.glyph(),
        format_temperature(current.temperature_c, units.temperature),
        condition.label
    )?;
    if let Some(feels_like) = current.feels_like_c {
        writeln!(f, "   Feels like {}", format_temperature(feels_like, units.temperature))?;
    }

    if let Some((Some(sunrise), Some(sunset))) =
        data.daily.first().map(|today| (today.sunrise, today.sunset))
    {
        writeln!(f, "   Sunrise {}  Sunset {}", format_clock(sunrise), format_clock(sunset))?;
    }

    write!(f, "   Wind {}", format_wind_speed(current.wind_speed_kmh, units.speed))?;
    if let Some(humidity) = current.humidity_pct {
        write!(f, "  Humidity {humidity:.0}%")?;
    }
    if let Some(precipitation) = current.precipitation_mm {
        write!(f, "  Precipitation {precipitation} mm")?;
    }
    writeln!(f)?;

    if let Some(uv) = current.uv_index {
        writeln!(f, "   UV index {uv:.1} ({})", UvLevel::from_index(uv).label())?;
    }
    Ok(())
}

fn write_hourly(f: &mut fmt::Formatter<'_>, data: &WeatherData, units: Units) -> fmt::Result {
    if data.hourly.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "Next {} hours", data.hourly.len())?;
    for (i, hour) in data.hourly.iter().enumerate() {
        let label = if i == 0 { "Now".to_string() } else { hour.time.format("%H:%M").to_string() };
        write!(
            f,
            "  {label:>5}  {}  {:>5}",
            classify(hour.weather_code).icon.glyph(),
            format_temperature(hour.temperature_c, units.temperature)
        )?;
        match hour.precipitation_probability {
            Some(p) if p > 0.0 => writeln!(f, "  💧{p:.0}%")?,
            _ => writeln!(f)?,
        }
    }
    Ok(())
}

fn write_daily(f: &mut fmt::Formatter<'_>, data: &WeatherData, units: Units) -> fmt::Result {
    if data.daily.is_empty() {
        return Ok(());
    }

    writeln!(f)?;
    writeln!(f, "{}-Day Forecast", data.daily.len())?;
    for (i, day) in data.daily.iter().enumerate() {
        let label = if i == 0 { "Today".to_string() } else { day.date.format("%a").to_string() };
        writeln!(
            f,
            "  {label:<5}  {}  {:>5} {:>5}  {}",
            classify(day.weather_code).icon.glyph(),
            format_temperature(day.temperature_max_c, units.temperature),
            format_temperature(day.temperature_min_c, units.temperature),
            classify(day.weather_code).label
        )?;
    }
    Ok(())
}
