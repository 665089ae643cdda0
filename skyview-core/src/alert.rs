//! Severe-weather advisories and UV levels.

use serde::Serialize;

use crate::{condition, model::CurrentWeather};

pub const HEAT_THRESHOLD_C: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Heat,
    Thunderstorm,
    Snow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: Severity,
    pub message: &'static str,
}

const HEAT: Alert = Alert {
    kind: AlertKind::Heat,
    severity: Severity::Warning,
    message: "Extreme heat warning! Stay hydrated and avoid direct sunlight.",
};

const THUNDERSTORM: Alert = Alert {
    kind: AlertKind::Thunderstorm,
    severity: Severity::Danger,
    message: "Severe thunderstorm warning! Seek shelter immediately.",
};

const SNOW: Alert = Alert {
    kind: AlertKind::Snow,
    severity: Severity::Info,
    message: "Snow advisory! Drive carefully and stay warm.",
};

/// First matching rule only: heat, then thunderstorm, then snow.
pub fn evaluate(current: &CurrentWeather) -> Option<Alert> {
    if current.temperature_c > HEAT_THRESHOLD_C {
        Some(HEAT)
    } else if condition::is_thunderstorm(current.weather_code) {
        Some(THUNDERSTORM)
    } else if condition::is_snow(current.weather_code) {
        Some(SNOW)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn from_index(uv: f64) -> Self {
        if uv <= 2.0 {
            UvLevel::Low
        } else if uv <= 5.0 {
            UvLevel::Moderate
        } else if uv <= 7.0 {
            UvLevel::High
        } else if uv <= 10.0 {
            UvLevel::VeryHigh
        } else {
            UvLevel::Extreme
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UvLevel::Low => "Low",
            UvLevel::Moderate => "Moderate",
            UvLevel::High => "High",
            UvLevel::VeryHigh => "Very High",
            UvLevel::Extreme => "Extreme",
        }
    }
}
