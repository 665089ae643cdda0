use serde::Deserialize;

use super::WeatherClient;
use crate::{
    error::WeatherError,
    model::{Coordinates, LocationInfo},
};

const SERVICE: &str = "geocoding";

#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    #[serde(default)]
    country: String,
    latitude: f64,
    longitude: f64,
}

impl From<GeoResult> for LocationInfo {
    fn from(r: GeoResult) -> Self {
        LocationInfo {
            name: r.name,
            country: r.country,
            coordinates: Coordinates::new(r.latitude, r.longitude),
        }
    }
}

impl WeatherClient {
    /// Resolve a free-text place name to its best match.
    ///
    /// An empty result set is [`WeatherError::NotFound`]; network and
    /// decoding problems keep their own variants.
    pub async fn geocode(&self, city: &str) -> Result<LocationInfo, WeatherError> {
        let query = city.trim();
        if query.is_empty() {
            return Err(WeatherError::NotFound(city.to_string()));
        }

        let url = format!("{}/search", self.endpoints.geocoding_url);
        let parsed: GeoResponse = self
            .get_json(
                SERVICE,
                &url,
                &[
                    ("name", query.to_string()),
                    ("count", "1".to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let location: LocationInfo = parsed
            .results
            .into_iter()
            .next()
            .map(Into::into)
            .ok_or_else(|| WeatherError::NotFound(query.to_string()))?;

        tracing::debug!(query, name = %location.name, country = %location.country, "geocoded");
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_results_key_is_empty() {
        let parsed: GeoResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#)
            .expect("results should default");
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn result_without_country_maps_to_empty_country() {
        let parsed: GeoResponse = serde_json::from_str(
            r#"{"results":[{"id":1,"name":"Null Island","latitude":0.0,"longitude":0.0}]}"#,
        )
        .expect("parse");
        let loc: LocationInfo = parsed.results.into_iter().next().expect("one").into();
        assert_eq!(loc.name, "Null Island");
        assert_eq!(loc.country, "");
    }

    #[tokio::test]
    async fn blank_query_is_not_found_without_request() {
        let client = WeatherClient::new(
            crate::config::Endpoints::single("http://127.0.0.1:1"),
            None,
        )
        .expect("client");
        let err = client.geocode("   ").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
