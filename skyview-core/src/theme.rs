//! Background selection from time of day and weather.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Buckets: [5,10) morning, [10,17) day, [17,20) evening, otherwise night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=9 => TimeOfDay::Morning,
            10..=16 => TimeOfDay::Day,
            17..=19 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn of(local: NaiveDateTime) -> Self {
        Self::from_hour(local.hour())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gradient {
    Morning,
    Day,
    Evening,
    Night,
    Thunderstorm,
    Snow,
    Rain,
    Fog,
    /// No forecast loaded yet.
    Idle,
    IdleDark,
}

impl Gradient {
    pub fn css_class(&self) -> &'static str {
        match self {
            Gradient::Morning => "from-blue-300 to-yellow-200",
            Gradient::Day => "from-blue-400 to-blue-200",
            Gradient::Evening => "from-orange-400 to-purple-500",
            Gradient::Night => "from-blue-900 to-purple-900",
            Gradient::Thunderstorm => "from-gray-800 to-purple-700",
            Gradient::Snow => "from-gray-300 to-blue-100",
            Gradient::Rain => "from-gray-600 to-blue-400",
            Gradient::Fog => "from-gray-400 to-gray-300",
            Gradient::Idle => "from-blue-400 to-blue-200",
            Gradient::IdleDark => "from-gray-900 to-blue-900",
        }
    }
}

impl From<TimeOfDay> for Gradient {
    fn from(value: TimeOfDay) -> Self {
        match value {
            TimeOfDay::Morning => Gradient::Morning,
            TimeOfDay::Day => Gradient::Day,
            TimeOfDay::Evening => Gradient::Evening,
            TimeOfDay::Night => Gradient::Night,
        }
    }
}

/// Weather overrides win over time of day: thunderstorm, snow, rain, fog.
pub fn select_gradient(weather_code: i32, time_of_day: TimeOfDay) -> Gradient {
    if condition::is_thunderstorm(weather_code) {
        Gradient::Thunderstorm
    } else if condition::is_snow(weather_code) {
        Gradient::Snow
    } else if condition::is_rain(weather_code) {
        Gradient::Rain
    } else if condition::is_fog(weather_code) {
        Gradient::Fog
    } else {
        time_of_day.into()
    }
}

/// Background for the dashboard. Dark mode forces the night bucket.
pub fn background(current: Option<(i32, NaiveDateTime)>, dark: bool) -> Gradient {
    match current {
        Some((code, local)) => {
            let tod = if dark { TimeOfDay::Night } else { TimeOfDay::of(local) };
            select_gradient(code, tod)
        }
        None if dark => Gradient::IdleDark,
        None => Gradient::Idle,
    }
}
