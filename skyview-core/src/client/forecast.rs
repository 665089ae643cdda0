use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use super::WeatherClient;
use crate::{
    error::WeatherError,
    model::{Coordinates, CurrentWeather, DailyForecast, HourlyForecast, LocationInfo, WeatherData},
};

const SERVICE: &str = "forecast";

pub const MAX_HOURLY: usize = 24;

const CURRENT_FIELDS: &str = "temperature_2m,weathercode,windspeed_10m,relativehumidity_2m,\
                              precipitation,apparent_temperature,uv_index";
const HOURLY_FIELDS: &str = "temperature_2m,weathercode,precipitation_probability,uv_index";
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,sunrise,sunset,\
                            precipitation_probability_max,uv_index_max";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: RawCurrent,
    hourly: RawHourly,
    daily: RawDaily,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    time: String,
    temperature_2m: f64,
    #[serde(alias = "weather_code")]
    weathercode: i32,
    #[serde(alias = "wind_speed_10m")]
    windspeed_10m: f64,
    #[serde(alias = "relative_humidity_2m")]
    relativehumidity_2m: Option<f64>,
    precipitation: Option<f64>,
    apparent_temperature: Option<f64>,
    uv_index: Option<f64>,
}

/// Column-oriented: every vector is indexed by `time`.
#[derive(Debug, Deserialize)]
struct RawHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    #[serde(alias = "weather_code")]
    weathercode: Vec<i32>,
    #[serde(default)]
    precipitation_probability: Vec<Option<f64>>,
    #[serde(default)]
    uv_index: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    time: Vec<String>,
    #[serde(alias = "weather_code")]
    weathercode: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    #[serde(default)]
    sunrise: Vec<Option<String>>,
    #[serde(default)]
    sunset: Vec<Option<String>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<f64>>,
    #[serde(default)]
    uv_index_max: Vec<Option<f64>>,
}

impl WeatherClient {
    /// Fetch current, hourly and daily data in one request and attach
    /// `location` to the result.
    pub async fn fetch_forecast(
        &self,
        coordinates: Coordinates,
        location: LocationInfo,
    ) -> Result<WeatherData, WeatherError> {
        let url = format!("{}/forecast", self.endpoints.forecast_url);
        let raw: ForecastResponse = self
            .get_json(
                SERVICE,
                &url,
                &[
                    ("latitude", coordinates.latitude.to_string()),
                    ("longitude", coordinates.longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("hourly", HOURLY_FIELDS.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        let data = normalize(raw, location)?;
        tracing::debug!(
            location = %data.location.name,
            hourly = data.hourly.len(),
            daily = data.daily.len(),
            "forecast normalized"
        );
        Ok(data)
    }
}

fn normalize(raw: ForecastResponse, location: LocationInfo) -> Result<WeatherData, WeatherError> {
    Ok(WeatherData {
        current: current_from(raw.current)?,
        hourly: hourly_rows(raw.hourly)?,
        daily: daily_rows(raw.daily)?,
        location,
    })
}

fn current_from(raw: RawCurrent) -> Result<CurrentWeather, WeatherError> {
    Ok(CurrentWeather {
        temperature_c: raw.temperature_2m,
        weather_code: raw.weathercode,
        wind_speed_kmh: raw.windspeed_10m,
        humidity_pct: raw.relativehumidity_2m,
        precipitation_mm: raw.precipitation,
        time: parse_local_time("current.time", &raw.time)?,
        feels_like_c: raw.apparent_temperature,
        uv_index: raw.uv_index,
    })
}

fn hourly_rows(raw: RawHourly) -> Result<Vec<HourlyForecast>, WeatherError> {
    let len = raw.time.len();
    require_len("hourly.temperature_2m", raw.temperature_2m.len(), len)?;
    require_len("hourly.weathercode", raw.weathercode.len(), len)?;

    raw.time
        .iter()
        .take(MAX_HOURLY)
        .enumerate()
        .map(|(i, time)| -> Result<HourlyForecast, WeatherError> {
            Ok(HourlyForecast {
                time: parse_local_time("hourly.time", time)?,
                temperature_c: raw.temperature_2m[i],
                weather_code: raw.weathercode[i],
                precipitation_probability: optional_at(&raw.precipitation_probability, i),
                uv_index: optional_at(&raw.uv_index, i),
            })
        })
        .collect()
}

fn daily_rows(raw: RawDaily) -> Result<Vec<DailyForecast>, WeatherError> {
    let len = raw.time.len();
    require_len("daily.weathercode", raw.weathercode.len(), len)?;
    require_len("daily.temperature_2m_max", raw.temperature_2m_max.len(), len)?;
    require_len("daily.temperature_2m_min", raw.temperature_2m_min.len(), len)?;

    raw.time
        .iter()
        .enumerate()
        .map(|(i, date)| -> Result<DailyForecast, WeatherError> {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| WeatherError::malformed(SERVICE, format!("daily.time '{date}': {e}")))?;
            Ok(DailyForecast {
                date,
                weather_code: raw.weathercode[i],
                temperature_max_c: raw.temperature_2m_max[i],
                temperature_min_c: raw.temperature_2m_min[i],
                sunrise: optional_time("daily.sunrise", &raw.sunrise, i)?,
                sunset: optional_time("daily.sunset", &raw.sunset, i)?,
                precipitation_probability: optional_at(&raw.precipitation_probability_max, i),
                uv_index: optional_at(&raw.uv_index_max, i),
            })
        })
        .collect()
}

fn require_len(field: &str, actual: usize, expected: usize) -> Result<(), WeatherError> {
    if actual == expected {
        Ok(())
    } else {
        Err(WeatherError::malformed(
            SERVICE,
            format!("{field} has {actual} entries, expected {expected}"),
        ))
    }
}

fn optional_at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

fn optional_time(
    field: &str,
    column: &[Option<String>],
    i: usize,
) -> Result<Option<NaiveDateTime>, WeatherError> {
    column
        .get(i)
        .and_then(Option::as_deref)
        .map(|s| parse_local_time(field, s))
        .transpose()
}

/// Open-Meteo returns local ISO-8601 times without an offset, usually
/// without seconds.
fn parse_local_time(field: &str, value: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::malformed(SERVICE, format!("{field} '{value}': {e}")))
}
