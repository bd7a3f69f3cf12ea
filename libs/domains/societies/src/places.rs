//! Places provider boundary.
//!
//! The provider answers loosely-typed JSON; [`NearbySearchResponse`] pins the
//! fields we rely on and [`Place`] is what survives validation.

use async_trait::async_trait;
use observability::ProviderOutcome;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::PlacesConfig;
use crate::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
}

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("places request timed out")]
    Timeout,

    #[error("places request failed: {0}")]
    Transport(String),

    #[error("places provider answered {status}: {message}")]
    Rejected { status: String, message: String },

    #[error("places response could not be decoded: {0}")]
    Decode(String),
}

impl PlacesError {
    pub fn outcome(&self) -> ProviderOutcome {
        match self {
            PlacesError::Timeout => ProviderOutcome::TimedOut,
            PlacesError::Rejected { .. } => ProviderOutcome::Rejected,
            PlacesError::Transport(_) | PlacesError::Decode(_) => ProviderOutcome::Failed,
        }
    }
}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlacesError::Timeout
        } else if err.is_decode() {
            PlacesError::Decode(err.to_string())
        } else {
            PlacesError::Transport(err.to_string())
        }
    }
}

/// Nearby-place lookup by a single provider place type
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn nearby(
        &self,
        location: GeoPoint,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<Place>, PlacesError>;
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    name: Option<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl NearbySearchResponse {
    fn into_places(self) -> Result<Vec<Place>, PlacesError> {
        match self.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            _ => {
                return Err(PlacesError::Rejected {
                    message: self.error_message.unwrap_or_default(),
                    status: self.status,
                });
            }
        }

        // Entries without a name or coordinates can't be placed on the map
        let places = self
            .results
            .into_iter()
            .filter_map(|r| {
                let name = r.name.filter(|n| !n.trim().is_empty())?;
                let geometry = r.geometry?;
                Some(Place {
                    name,
                    address: r.vicinity.or(r.formatted_address).unwrap_or_default(),
                    location: GeoPoint::new(geometry.location.lat, geometry.location.lng),
                })
            })
            .collect();
        Ok(places)
    }
}

/// Google Places nearby search over reqwest
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        Self::with_timeout(&config.base_url, &config.api_key, config.timeout)
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlacesError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby(
        &self,
        location: GeoPoint,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("location", format!("{},{}", location.lat, location.lng)),
                ("radius", radius_m.to_string()),
                ("type", place_type.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::Rejected {
                status: response.status().to_string(),
                message: format!("HTTP error for place type '{place_type}'"),
            });
        }

        let body: NearbySearchResponse = response.json().await?;
        body.into_places()
    }
}
