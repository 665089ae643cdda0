//! Unit conversion and display formatting.
//!
//! Conversions keep full `f64` precision; rounding only happens in the
//! `format_*` helpers.

use crate::model::{SpeedUnit, TemperatureUnit};

const KMH_TO_MPH: f64 = 0.621371;

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn to_mph(kmh: f64) -> f64 {
    kmh * KMH_TO_MPH
}

pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => to_fahrenheit(celsius),
    }
}

pub fn convert_speed(kmh: f64, unit: SpeedUnit) -> f64 {
    match unit {
        SpeedUnit::Kmh => kmh,
        SpeedUnit::Mph => to_mph(kmh),
    }
}

impl TemperatureUnit {
    pub fn glyph(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl SpeedUnit {
    pub fn glyph(&self) -> &'static str {
        match self {
            SpeedUnit::Kmh => "km/h",
            SpeedUnit::Mph => "mph",
        }
    }
}

/// Nearest integer, halves rounded up; never yields `-0`.
fn display_round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    let value = display_round(convert_temperature(celsius, unit));
    format!("{value}{}", unit.glyph())
}

pub fn format_wind_speed(kmh: f64, unit: SpeedUnit) -> String {
    let value = display_round(convert_speed(kmh, unit));
    format!("{value} {}", unit.glyph())
}
