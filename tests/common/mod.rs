#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use venue_finder::config::AssetConfig;
use venue_finder::routes::create_router;
use venue_finder::services::geocoder::{Coordinates, Geocoder};
use venue_finder::services::intent::RefusalPhraseClassifier;
use venue_finder::services::llm::{LanguageModel, LlmError, Role, Turn};
use venue_finder::services::places::{
    Photo, PlaceCandidate, PlaceDetails, PlacesDirectory, PlacesError, SearchParams,
};
use venue_finder::services::venue_finder::VenueFinder;
use venue_finder::services::venue_search::EnrichmentPolicy;
use venue_finder::state::AppState;

/// Answers the intent prompt with `intent_reply` and the location prompt
/// with `location_reply`, or fails the location prompt when it is `None`.
pub struct ScriptedModel {
    pub intent_reply: String,
    pub location_reply: Option<String>,
}

impl ScriptedModel {
    pub fn new(intent_reply: &str, location_reply: &str) -> Self {
        Self {
            intent_reply: intent_reply.into(),
            location_reply: Some(location_reply.into()),
        }
    }

    pub fn failing_location(intent_reply: &str) -> Self {
        Self {
            intent_reply: intent_reply.into(),
            location_reply: None,
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn generate(&self, history: &[Turn]) -> Result<String, LlmError> {
        let user_turns = history.iter().filter(|t| t.role == Role::User).count();
        match (user_turns, &self.location_reply) {
            (1, _) => Ok(self.intent_reply.clone()),
            (_, Some(reply)) => Ok(reply.clone()),
            (_, None) => Err(LlmError::Status {
                status: 500,
                body: "location prompt exploded".into(),
            }),
        }
    }
}

pub struct FailingModel;

#[async_trait]
impl LanguageModel for FailingModel {
    async fn generate(&self, _history: &[Turn]) -> Result<String, LlmError> {
        Err(LlmError::Status {
            status: 503,
            body: "overloaded".into(),
        })
    }
}

#[derive(Default)]
pub struct FixedGeocoder {
    pub answer: Option<Coordinates>,
    pub calls: AtomicUsize,
}

impl FixedGeocoder {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            answer: Some(Coordinates {
                latitude,
                longitude,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn nowhere() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn locate(&self, _location: &str) -> Option<Coordinates> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

#[derive(Default)]
pub struct FakePlaces {
    pub candidates: Vec<PlaceCandidate>,
    pub details: HashMap<String, PlaceDetails>,
    pub photos: HashMap<String, Vec<Photo>>,
    pub failing: HashSet<String>,
    pub fail_search: bool,
    pub search_calls: AtomicUsize,
    pub enrich_calls: AtomicUsize,
    pub last_params: Mutex<Option<SearchParams>>,
}

impl FakePlaces {
    pub fn with_candidates(candidates: Vec<PlaceCandidate>) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    fn check(&self, place_id: &str, endpoint: &str) -> Result<(), PlacesError> {
        self.enrich_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(place_id) {
            return Err(PlacesError::Status {
                endpoint: endpoint.to_string(),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PlacesDirectory for FakePlaces {
    async fn search(&self, params: &SearchParams) -> Result<Vec<PlaceCandidate>, PlacesError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());
        if self.fail_search {
            return Err(PlacesError::Status {
                endpoint: "/places/search".to_string(),
                status: 502,
            });
        }
        Ok(self.candidates.clone())
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        self.check(place_id, "details")?;
        Ok(self.details.get(place_id).cloned().unwrap_or_default())
    }

    async fn photos(&self, place_id: &str) -> Result<Vec<Photo>, PlacesError> {
        self.check(place_id, "photos")?;
        Ok(self.photos.get(place_id).cloned().unwrap_or_default())
    }
}

pub fn candidate(id: &str, name: &str, rating: f64) -> PlaceCandidate {
    serde_json::from_value(json!({
        "fsq_id": id,
        "name": name,
        "categories": [{ "name": "Basketball Court" }],
        "location": { "formatted_address": "100 Court St, Boston, MA" },
        "rating": rating,
        "geocodes": { "main": { "latitude": 42.36, "longitude": -71.06 } }
    }))
    .unwrap()
}

pub fn photo(prefix: &str, suffix: &str) -> Photo {
    Photo {
        prefix: prefix.into(),
        suffix: suffix.into(),
    }
}

pub fn finder(
    model: impl LanguageModel + 'static,
    geocoder: Arc<FixedGeocoder>,
    places: Arc<FakePlaces>,
    enrichment: EnrichmentPolicy,
) -> VenueFinder {
    VenueFinder {
        model: Arc::new(model),
        classifier: Arc::new(RefusalPhraseClassifier),
        geocoder,
        places,
        enrichment,
    }
}

pub fn app(finder: VenueFinder) -> axum::Router {
    let state = Arc::new(AppState::new(finder));
    create_router(&AssetConfig::default()).with_state(state)
}
