//! WMO weather code classification.
//!
//! See <https://open-meteo.com/en/docs#weathervariables> for the code table.

use serde::Serialize;

/// Icon identifiers. Every descriptor points at one of these, so there is no
/// string lookup that can miss at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    Sun,
    CloudSun,
    Cloud,
    CloudFog,
    CloudDrizzle,
    CloudRain,
    CloudSnow,
    CloudLightning,
    HelpCircle,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sun => "sun",
            Icon::CloudSun => "cloud-sun",
            Icon::Cloud => "cloud",
            Icon::CloudFog => "cloud-fog",
            Icon::CloudDrizzle => "cloud-drizzle",
            Icon::CloudRain => "cloud-rain",
            Icon::CloudSnow => "cloud-snow",
            Icon::CloudLightning => "cloud-lightning",
            Icon::HelpCircle => "help-circle",
        }
    }

    /// Single-glyph rendering for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Sun => "☀",
            Icon::CloudSun => "⛅",
            Icon::Cloud => "☁",
            Icon::CloudFog => "🌫",
            Icon::CloudDrizzle => "🌦",
            Icon::CloudRain => "🌧",
            Icon::CloudSnow => "🌨",
            Icon::CloudLightning => "⛈",
            Icon::HelpCircle => "?",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherCondition {
    /// WMO code, or -1 for the unknown descriptor.
    pub code: i32,
    pub label: &'static str,
    pub icon: Icon,
    pub gradient: &'static str,
}

const fn condition(
    code: i32,
    label: &'static str,
    icon: Icon,
    gradient: &'static str,
) -> WeatherCondition {
    WeatherCondition { code, label, icon, gradient }
}

pub const UNKNOWN: WeatherCondition =
    condition(-1, "Unknown", Icon::HelpCircle, "from-gray-400 to-gray-300");

/// Sorted by code.
static CONDITIONS: [WeatherCondition; 28] = [
    condition(0, "Clear sky", Icon::Sun, "from-blue-400 to-cyan-300"),
    condition(1, "Mainly clear", Icon::Sun, "from-blue-400 to-cyan-300"),
    condition(2, "Partly cloudy", Icon::CloudSun, "from-blue-400 to-gray-300"),
    condition(3, "Overcast", Icon::Cloud, "from-gray-400 to-gray-300"),
    condition(45, "Fog", Icon::CloudFog, "from-gray-400 to-gray-500"),
    condition(48, "Depositing rime fog", Icon::CloudFog, "from-gray-400 to-gray-500"),
    condition(51, "Light drizzle", Icon::CloudDrizzle, "from-gray-400 to-blue-300"),
    condition(53, "Moderate drizzle", Icon::CloudDrizzle, "from-gray-400 to-blue-300"),
    condition(55, "Dense drizzle", Icon::CloudDrizzle, "from-gray-400 to-blue-300"),
    condition(56, "Light freezing drizzle", Icon::CloudDrizzle, "from-gray-400 to-blue-300"),
    condition(57, "Dense freezing drizzle", Icon::CloudDrizzle, "from-gray-400 to-blue-300"),
    condition(61, "Slight rain", Icon::CloudRain, "from-gray-600 to-blue-400"),
    condition(63, "Moderate rain", Icon::CloudRain, "from-gray-600 to-blue-400"),
    condition(65, "Heavy rain", Icon::CloudRain, "from-gray-700 to-blue-500"),
    condition(66, "Light freezing rain", Icon::CloudSnow, "from-gray-600 to-blue-300"),
    condition(67, "Heavy freezing rain", Icon::CloudSnow, "from-gray-700 to-blue-400"),
    condition(71, "Slight snow fall", Icon::CloudSnow, "from-gray-400 to-blue-200"),
    condition(73, "Moderate snow fall", Icon::CloudSnow, "from-gray-500 to-blue-200"),
    condition(75, "Heavy snow fall", Icon::CloudSnow, "from-gray-600 to-blue-100"),
    condition(77, "Snow grains", Icon::CloudSnow, "from-gray-500 to-blue-200"),
    condition(80, "Slight rain showers", Icon::CloudDrizzle, "from-gray-600 to-blue-400"),
    condition(81, "Moderate rain showers", Icon::CloudRain, "from-gray-600 to-blue-400"),
    condition(82, "Violent rain showers", Icon::CloudRain, "from-gray-700 to-blue-500"),
    condition(85, "Slight snow showers", Icon::CloudSnow, "from-gray-500 to-blue-200"),
    condition(86, "Heavy snow showers", Icon::CloudSnow, "from-gray-600 to-blue-100"),
    condition(95, "Thunderstorm", Icon::CloudLightning, "from-gray-800 to-purple-400"),
    condition(96, "Thunderstorm with slight hail", Icon::CloudLightning, "from-gray-800 to-purple-400"),
    condition(99, "Thunderstorm with heavy hail", Icon::CloudLightning, "from-gray-900 to-purple-500"),
];

pub const SNOW_CODES: [i32; 6] = [71, 73, 75, 77, 85, 86];
pub const RAIN_CODES: [i32; 13] = [51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 80, 81, 82];
pub const FOG_CODES: [i32; 2] = [45, 48];

pub fn is_thunderstorm(code: i32) -> bool {
    code >= 95
}

pub fn is_snow(code: i32) -> bool {
    SNOW_CODES.contains(&code)
}

pub fn is_rain(code: i32) -> bool {
    RAIN_CODES.contains(&code)
}

pub fn is_fog(code: i32) -> bool {
    FOG_CODES.contains(&code)
}

/// Descriptor for any code. Codes outside the table map to [`UNKNOWN`].
pub fn classify(code: i32) -> &'static WeatherCondition {
    CONDITIONS
        .binary_search_by_key(&code, |c| c.code)
        .map(|idx| &CONDITIONS[idx])
        .unwrap_or(&UNKNOWN)
}

/// All defined descriptors in code order.
pub fn defined() -> &'static [WeatherCondition] {
    &CONDITIONS
}
