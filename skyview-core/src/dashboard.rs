//! View state for one dashboard and the transitions between its states.

use serde::Serialize;

use crate::{
    alert::{self, Alert},
    model::{Units, WeatherData},
    theme::{self, Gradient},
};

/// Identifies one fetch cycle. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FetchState {
    Idle,
    Loading(RequestToken),
    Ready(Box<WeatherData>),
    Failed(String),
}

/// Whether a completed request changed the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Completion {
    Applied,
    /// A newer request was issued after this one; its result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    state: FetchState,
    units: Units,
    dark: bool,
    last_issued: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(Units::default())
    }
}

impl Dashboard {
    pub fn new(units: Units) -> Self {
        Self { state: FetchState::Idle, units, dark: false, last_issued: 0 }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading(_))
    }

    pub fn weather(&self) -> Option<&WeatherData> {
        match &self.state {
            FetchState::Ready(data) => Some(&**data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Start a new fetch cycle. Any request issued earlier becomes stale.
    pub fn begin(&mut self) -> RequestToken {
        self.last_issued += 1;
        let token = RequestToken(self.last_issued);
        self.state = FetchState::Loading(token);
        token
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.last_issued
    }

    pub fn succeed(&mut self, token: RequestToken, data: WeatherData) -> Completion {
        self.finish(token, FetchState::Ready(Box::new(data)))
    }

    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> Completion {
        self.finish(token, FetchState::Failed(message.into()))
    }

    fn finish(&mut self, token: RequestToken, next: FetchState) -> Completion {
        if !self.is_current(token) {
            tracing::warn!(?token, latest = self.last_issued, "discarding stale response");
            return Completion::Stale;
        }
        self.state = next;
        Completion::Applied
    }

    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn toggle_units(&mut self) -> Units {
        self.units = self.units.toggled();
        self.units
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.dark = !self.dark;
        self.dark
    }

    pub fn alert(&self) -> Option<Alert> {
        self.weather().and_then(|data| alert::evaluate(&data.current))
    }

    pub fn background(&self) -> Gradient {
        let current = self.weather().map(|d| (d.current.weather_code, d.current.time));
        theme::background(current, self.dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, CurrentWeather, LocationInfo};
    use chrono::NaiveDate;

    fn data(name: &str, temperature_c: f64, weather_code: i32) -> WeatherData {
        WeatherData {
            current: CurrentWeather {
                temperature_c,
                weather_code,
                wind_speed_kmh: 3.0,
                humidity_pct: Some(60.0),
                precipitation_mm: Some(0.0),
                time: NaiveDate::from_ymd_opt(2024, 1, 15)
                    .and_then(|d| d.and_hms_opt(8, 0, 0))
                    .expect("valid time"),
                feels_like_c: None,
                uv_index: None,
            },
            hourly: Vec::new(),
            daily: Vec::new(),
            location: LocationInfo {
                name: name.into(),
                country: String::new(),
                coordinates: Coordinates::new(0.0, 0.0),
            },
        }
    }

    #[test]
    fn idle_to_loading_to_ready() {
        let mut dash = Dashboard::default();
        assert_eq!(dash.state(), &FetchState::Idle);
        assert_eq!(dash.background(), Gradient::Idle);

        let token = dash.begin();
        assert!(dash.is_loading());

        assert_eq!(dash.succeed(token, data("Oslo", 4.0, 0)), Completion::Applied);
        assert_eq!(dash.weather().map(|d| d.location.name.as_str()), Some("Oslo"));
        assert_eq!(dash.background(), Gradient::Morning);
    }

    #[test]
    fn failure_carries_message() {
        let mut dash = Dashboard::default();
        let token = dash.begin();
        assert_eq!(dash.fail(token, "Location not found."), Completion::Applied);
        assert_eq!(dash.error(), Some("Location not found."));
        assert!(dash.weather().is_none());
    }

    #[test]
    fn late_response_from_older_request_is_discarded() {
        let mut dash = Dashboard::default();
        let tokyo = dash.begin();
        let oslo = dash.begin();
        assert!(tokyo < oslo);

        assert_eq!(dash.succeed(oslo, data("Oslo", 4.0, 0)), Completion::Applied);
        assert_eq!(dash.succeed(tokyo, data("Tokyo", 28.0, 0)), Completion::Stale);
        assert_eq!(dash.weather().map(|d| d.location.name.as_str()), Some("Oslo"));
    }

    #[test]
    fn stale_failure_does_not_hide_newer_loading() {
        let mut dash = Dashboard::default();
        let first = dash.begin();
        let second = dash.begin();

        assert_eq!(dash.fail(first, "boom"), Completion::Stale);
        assert_eq!(dash.state(), &FetchState::Loading(second));
    }

    #[test]
    fn alert_follows_loaded_data() {
        let mut dash = Dashboard::default();
        assert_eq!(dash.alert(), None);

        let token = dash.begin();
        let _ = dash.succeed(token, data("Phoenix", 40.0, 96));
        assert_eq!(dash.alert().map(|a| a.kind), Some(alert::AlertKind::Heat));
    }

    #[test]
    fn toggles() {
        let mut dash = Dashboard::new(Units::METRIC);
        assert_eq!(dash.toggle_units(), Units::IMPERIAL);
        assert!(dash.toggle_theme());
        assert_eq!(dash.background(), Gradient::IdleDark);

        let token = dash.begin();
        let _ = dash.succeed(token, data("Oslo", 4.0, 0));
        assert_eq!(dash.background(), Gradient::Night);
    }
}
