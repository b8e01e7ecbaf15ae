// src/services/geocoder.rs
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};

use crate::config::MapTilerConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Http(reqwest::Error),
    #[error("geocoder returned {0}")]
    Status(u16),
    #[error("invalid geocoder url: {0}")]
    InvalidUrl(String),
    #[error("geocoder feature has no usable coordinates")]
    MalformedGeometry,
}

// The lookup url carries the api key, so it never goes into the error.
impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err.without_url())
    }
}

/// Resolves a free-text place name to a coordinate pair.
///
/// Every failure, including "nothing matched", comes back as `None`.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, location: &str) -> Option<Coordinates>;
}

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

pub struct MapTilerGeocoder {
    http: Client,
    api_url: String,
    api_key: String,
}

impl MapTilerGeocoder {
    pub fn new(http: Client, cfg: &MapTilerConfig) -> Self {
        Self {
            http,
            api_url: cfg.api_url.clone(),
            api_key: cfg.api_key.clone(),
        }
    }

    fn lookup_url(&self, location: &str) -> Result<Url, GeocodeError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| GeocodeError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| GeocodeError::InvalidUrl(self.api_url.clone()))?
            .pop_if_empty()
            .push(&format!("{location}.json"));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn try_locate(&self, location: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let response = self.http.get(self.lookup_url(location)?).send().await?;
        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let collection: FeatureCollection = response.json().await?;
        let Some(first) = collection.features.into_iter().next() else {
            return Ok(None);
        };

        // GeoJSON order is [longitude, latitude]
        match first.geometry.coordinates.as_slice() {
            [longitude, latitude, ..] => Ok(Some(Coordinates {
                latitude: *latitude,
                longitude: *longitude,
            })),
            _ => Err(GeocodeError::MalformedGeometry),
        }
    }
}

#[async_trait]
impl Geocoder for MapTilerGeocoder {
    async fn locate(&self, location: &str) -> Option<Coordinates> {
        match self.try_locate(location).await {
            Ok(Some(coords)) => Some(coords),
            Ok(None) => {
                info!(location, "geocoder found no match");
                None
            }
            Err(err) => {
                error!(location, error = %err, "Error getting coordinates");
                None
            }
        }
    }
}
