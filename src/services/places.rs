// src/services/places.rs
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::geocoder::Coordinates;
use crate::config::FoursquareConfig;

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("places request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("places service returned {status} for {endpoint}")]
    Status { endpoint: String, status: u16 },
}

#[derive(Debug, Clone)]
pub struct SearchParams {
    pub query: String,
    pub near: Coordinates,
    pub radius: u32,
    pub limit: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceCandidate {
    pub fsq_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub categories: Vec<PlaceCategory>,
    pub location: Option<PlaceLocation>,
    pub rating: Option<f64>,
    pub geocodes: Option<Geocodes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceCategory {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceLocation {
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geocodes {
    pub main: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub price: Option<Value>,
    pub capacity: Option<i64>,
}

impl PlaceDetails {
    /// Price is a tier number on some records and free text on others.
    pub fn price_label(&self) -> Option<String> {
        match self.price.as_ref()? {
            Value::String(text) => Some(text.clone()),
            Value::Number(tier) => Some(tier.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    pub prefix: String,
    pub suffix: String,
}

impl Photo {
    pub fn original_url(&self) -> String {
        format!("{}original{}", self.prefix, self.suffix)
    }
}

/// The places directory: a rating-sorted search plus two per-place lookups.
#[async_trait]
pub trait PlacesDirectory: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceCandidate>, PlacesError>;
    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
    async fn photos(&self, place_id: &str) -> Result<Vec<Photo>, PlacesError>;
}

#[derive(Deserialize)]
struct SearchResults {
    results: Vec<PlaceCandidate>,
}

pub struct FoursquareClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl FoursquareClient {
    pub fn new(http: Client, cfg: &FoursquareConfig) -> Self {
        Self {
            http,
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.api_url, path))
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, &self.api_key)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, PlacesError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PlacesError::Status {
                endpoint: path.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl PlacesDirectory for FoursquareClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let path = "/places/search";
        let ll = format!("{},{}", params.near.latitude, params.near.longitude);
        let query = [
            ("query", params.query.clone()),
            ("ll", ll),
            ("radius", params.radius.to_string()),
            ("limit", params.limit.to_string()),
            ("sort", "RATING".to_string()),
        ];
        let found: SearchResults = self.fetch(path, self.get(path).query(&query)).await?;
        Ok(found.results)
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let path = format!("/places/{place_id}");
        self.fetch(&path, self.get(&path)).await
    }

    async fn photos(&self, place_id: &str) -> Result<Vec<Photo>, PlacesError> {
        let path = format!("/places/{place_id}/photos");
        self.fetch(&path, self.get(&path)).await
    }
}
