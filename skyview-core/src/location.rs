//! One-shot position queries for "use my location".

use async_trait::async_trait;
use std::{fmt::Debug, time::Duration};

use crate::{config::LocationSettings, error::LocationError, model::Coordinates};

/// Upper bound on a single position query.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Host-provided position source.
///
/// Each call is a fresh query; implementations must not hand back a
/// previously cached fix.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// Position taken from the `[location]` section of the config file.
#[derive(Debug, Clone)]
pub struct ConfiguredGeolocator {
    settings: LocationSettings,
}

impl ConfiguredGeolocator {
    pub fn new(settings: LocationSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Geolocator for ConfiguredGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        if !self.settings.enabled {
            return Err(LocationError::PermissionDenied);
        }
        self.settings.coordinates().ok_or(LocationError::Unavailable)
    }
}

/// Position given explicitly, e.g. on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Query `geolocator`, giving up after [`GEOLOCATION_TIMEOUT`].
pub async fn locate(geolocator: &dyn Geolocator) -> Result<Coordinates, LocationError> {
    locate_within(geolocator, GEOLOCATION_TIMEOUT).await
}

pub async fn locate_within(
    geolocator: &dyn Geolocator,
    limit: Duration,
) -> Result<Coordinates, LocationError> {
    match tokio::time::timeout(limit, geolocator.current_position()).await {
        Ok(result) => result,
        Err(_) => {
            tracing::debug!(?limit, "position query timed out");
            Err(LocationError::Timeout)
        }
    }
}
