//! Core library for the `skyview` weather dashboard.
//!
//! This crate defines:
//! - The forecast data model and its Open-Meteo client
//! - Pure presentation decisions: condition descriptors, unit formatting,
//!   background theme, severe-weather alerts
//! - Recent searches and unit preference persistence
//! - Dashboard state and the session that drives it
//!
//! It is used by `skyview-cli`, but the derivations are independent of any
//! particular front end.

pub mod alert;
pub mod client;
pub mod condition;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod location;
pub mod model;
pub mod session;
pub mod store;
pub mod theme;
pub mod units;

pub use alert::{Alert, AlertKind, Severity, UvLevel};
pub use client::WeatherClient;
pub use condition::{Icon, WeatherCondition, classify};
pub use config::{Config, Endpoints, LocationSettings};
pub use dashboard::{Completion, Dashboard, FetchState, RequestToken};
pub use error::{LocationError, WeatherError};
pub use location::{ConfiguredGeolocator, FixedGeolocator, Geolocator};
pub use model::{
    Coordinates, CurrentWeather, DailyForecast, HourlyForecast, LocationInfo, SpeedUnit,
    TemperatureUnit, Units, WeatherData,
};
pub use session::Session;
pub use store::{PreferenceStore, RecentSearches};
pub use theme::{Gradient, TimeOfDay};
