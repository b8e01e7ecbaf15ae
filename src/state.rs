// src/state.rs
use std::sync::Arc;

use reqwest::Client;

use crate::config::AppConfig;
use crate::services::geocoder::MapTilerGeocoder;
use crate::services::intent::RefusalPhraseClassifier;
use crate::services::llm::GeminiClient;
use crate::services::places::FoursquareClient;
use crate::services::venue_finder::VenueFinder;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub finder: VenueFinder,
}

impl AppState {
    pub fn new(finder: VenueFinder) -> Self {
        Self { finder }
    }

    /// Wires the production clients around one shared HTTP client.
    pub fn from_config(config: &AppConfig) -> Self {
        let http = Client::new();
        Self::new(VenueFinder {
            model: Arc::new(GeminiClient::new(http.clone(), &config.gemini)),
            classifier: Arc::new(RefusalPhraseClassifier),
            geocoder: Arc::new(MapTilerGeocoder::new(http.clone(), &config.maptiler)),
            places: Arc::new(FoursquareClient::new(http, &config.foursquare)),
            enrichment: config.enrichment,
        })
    }
}
