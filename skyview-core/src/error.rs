use reqwest::StatusCode;
use thiserror::Error;

/// Failures from the geocoding and forecast endpoints.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No location found for '{0}'")]
    NotFound(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{service} request failed with status {status}: {reason}")]
    Status {
        service: &'static str,
        status: StatusCode,
        reason: String,
    },

    #[error("Malformed {service} response: {detail}")]
    Malformed {
        service: &'static str,
        detail: String,
    },
}

impl WeatherError {
    pub(crate) fn malformed(service: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed { service, detail: detail.into() }
    }

    /// Message shown inline in the dashboard.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(_) => "Location not found. Please try another search.".to_string(),
            Self::Transport(_) => {
                "Network error. Check your connection and try again.".to_string()
            }
            Self::Status { .. } | Self::Malformed { .. } => {
                "Unable to fetch weather data. Please try again.".to_string()
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Failures from the host position query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
}

impl LocationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => "Permission denied. Please allow location access.".to_string(),
            Self::Unavailable | Self::Timeout => "Unable to retrieve your location".to_string(),
        }
    }
}
