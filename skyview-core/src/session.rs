//! Drives user actions through the client and into the dashboard.

use parking_lot::Mutex;

use crate::{
    client::WeatherClient,
    dashboard::{Completion, Dashboard, RequestToken},
    error::WeatherError,
    location::{self, Geolocator},
    model::{LocationInfo, Units},
    store::{PreferenceStore, RecentSearches},
};

/// One dashboard plus the collaborators that feed it.
///
/// Actions may overlap; each takes a fresh [`RequestToken`] and only the most
/// recently issued one is allowed to update the dashboard.
#[derive(Debug)]
pub struct Session {
    client: WeatherClient,
    store: Option<PreferenceStore>,
    dashboard: Mutex<Dashboard>,
}

impl Session {
    pub fn new(client: WeatherClient, store: Option<PreferenceStore>) -> Self {
        let units = store.as_ref().map(PreferenceStore::units).unwrap_or_default();
        Self { client, store, dashboard: Mutex::new(Dashboard::new(units)) }
    }

    /// Copy of the current view state.
    pub fn dashboard(&self) -> Dashboard {
        self.dashboard.lock().clone()
    }

    pub fn recent_searches(&self) -> RecentSearches {
        self.store.as_ref().map(PreferenceStore::recent_searches).unwrap_or_default()
    }

    /// Geocode `query`, then fetch its forecast.
    pub async fn search(&self, query: &str) -> Completion {
        let token = self.dashboard.lock().begin();

        match self.client.geocode(query).await {
            Ok(location) => self.load(token, location).await,
            Err(e) => self.reject(token, &e),
        }
    }

    /// Fetch the forecast for an already resolved location, e.g. a recent search.
    pub async fn select(&self, location: LocationInfo) -> Completion {
        let token = self.dashboard.lock().begin();
        self.load(token, location).await
    }

    /// Ask `geolocator` for a position and fetch the forecast there.
    pub async fn locate(&self, geolocator: &dyn Geolocator) -> Completion {
        let token = self.dashboard.lock().begin();

        match location::locate(geolocator).await {
            Ok(coordinates) => self.load(token, LocationInfo::current(coordinates)).await,
            Err(e) => {
                tracing::warn!(error = %e, "position query failed");
                self.dashboard.lock().fail(token, e.user_message())
            }
        }
    }

    pub fn set_units(&self, units: Units) {
        self.dashboard.lock().set_units(units);
        self.persist_units(units);
    }

    pub fn toggle_units(&self) -> Units {
        let units = self.dashboard.lock().toggle_units();
        self.persist_units(units);
        units
    }

    pub fn set_dark(&self, dark: bool) {
        self.dashboard.lock().set_dark(dark);
    }

    pub fn toggle_theme(&self) -> bool {
        self.dashboard.lock().toggle_theme()
    }

    async fn load(&self, token: RequestToken, location: LocationInfo) -> Completion {
        if !self.dashboard.lock().is_current(token) {
            tracing::debug!(?token, "superseded before forecast request");
            return Completion::Stale;
        }

        let coordinates = location.coordinates;
        let result = self.client.fetch_forecast(coordinates, location).await;

        match result {
            Ok(data) => {
                let recorded = data.location.clone();
                let completion = self.dashboard.lock().succeed(token, data);
                if completion == Completion::Applied {
                    self.record_recent(&recorded);
                }
                completion
            }
            Err(e) => self.reject(token, &e),
        }
    }

    fn reject(&self, token: RequestToken, error: &WeatherError) -> Completion {
        tracing::warn!(%error, "weather request failed");
        self.dashboard.lock().fail(token, error.user_message())
    }

    fn record_recent(&self, location: &LocationInfo) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_recent_search(location) {
                tracing::warn!(error = %e, "failed to save recent search");
            }
        }
    }

    fn persist_units(&self, units: Units) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save_units(units) {
                tracing::warn!(error = %e, "failed to save unit preference");
            }
        }
    }
}
