use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Geographic position in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A named place, as produced by geocoding or geolocation.
///
/// `(name, country)` identifies an entry in the recent-search list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub coordinates: Coordinates,
}

impl LocationInfo {
    pub const CURRENT_LOCATION: &'static str = "Current Location";

    /// Location produced by the "use my location" action.
    pub fn current(coordinates: Coordinates) -> Self {
        Self {
            name: Self::CURRENT_LOCATION.to_string(),
            country: String::new(),
            coordinates,
        }
    }

    pub fn same_place(&self, other: &LocationInfo) -> bool {
        self.name == other.name && self.country == other.country
    }

    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }
}

/// Conditions at the observation time. All values are metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub weather_code: i32,
    pub wind_speed_kmh: f64,
    pub humidity_pct: Option<f64>,
    pub precipitation_mm: Option<f64>,
    /// Local time at the location.
    pub time: NaiveDateTime,
    pub feels_like_c: Option<f64>,
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub time: NaiveDateTime,
    pub temperature_c: f64,
    pub weather_code: i32,
    /// Probability in percent.
    pub precipitation_probability: Option<f64>,
    pub uv_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_max_c: f64,
    pub temperature_min_c: f64,
    pub sunrise: Option<NaiveDateTime>,
    pub sunset: Option<NaiveDateTime>,
    pub precipitation_probability: Option<f64>,
    pub uv_index: Option<f64>,
}

/// One complete forecast for one location.
///
/// Built in a single step from one forecast response and replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub current: CurrentWeather,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
    pub location: LocationInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    #[default]
    Kmh,
    Mph,
}

/// Display projection. Stored values stay metric regardless of this choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Units {
    pub temperature: TemperatureUnit,
    pub speed: SpeedUnit,
}

impl Units {
    pub const METRIC: Units = Units {
        temperature: TemperatureUnit::Celsius,
        speed: SpeedUnit::Kmh,
    };

    pub const IMPERIAL: Units = Units {
        temperature: TemperatureUnit::Fahrenheit,
        speed: SpeedUnit::Mph,
    };

    pub fn from_metric_flag(is_metric: bool) -> Self {
        if is_metric { Self::METRIC } else { Self::IMPERIAL }
    }

    pub fn is_metric(&self) -> bool {
        self.temperature == TemperatureUnit::Celsius
    }

    /// Both units flip together, keyed off the temperature unit.
    pub fn toggled(self) -> Self {
        Self::from_metric_flag(!self.is_metric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_both_units() {
        assert_eq!(Units::METRIC.toggled(), Units::IMPERIAL);
        assert_eq!(Units::IMPERIAL.toggled(), Units::METRIC);
    }

    #[test]
    fn mixed_units_toggle_by_temperature() {
        let mixed = Units {
            temperature: TemperatureUnit::Fahrenheit,
            speed: SpeedUnit::Kmh,
        };
        assert_eq!(mixed.toggled(), Units::METRIC);
    }

    #[test]
    fn same_place_ignores_coordinates() {
        let a = LocationInfo {
            name: "Paris".into(),
            country: "France".into(),
            coordinates: Coordinates::new(48.85, 2.35),
        };
        let mut b = a.clone();
        b.coordinates = Coordinates::new(0.0, 0.0);
        assert!(a.same_place(&b));

        b.country = "United States".into();
        assert!(!a.same_place(&b));
    }

    #[test]
    fn location_without_country_deserializes() {
        let loc: LocationInfo = serde_json::from_str(
            r#"{"name":"Current Location","coordinates":{"latitude":1.0,"longitude":2.0}}"#,
        )
        .expect("country should default");
        assert_eq!(loc.country, "");
        assert_eq!(loc.display_name(), "Current Location");
    }
}
