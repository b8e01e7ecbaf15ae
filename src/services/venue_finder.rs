// src/services/venue_finder.rs
use std::sync::Arc;

use tracing::{error, info};

use super::extractor::{VenueCategory, extract_location, infer_category};
use super::geocoder::Geocoder;
use super::intent::{Intent, IntentClassifier, REFUSAL_REPLY, classify_intent};
use super::llm::{ChatSession, LanguageModel};
use super::places::PlacesDirectory;
use super::venue_search::{EnrichmentPolicy, search_venues};
use crate::error::AppError;
use crate::message::ChatResponse;

/// Runs one chat message through intent check, extraction, geocoding and
/// venue search.
#[derive(Clone)]
pub struct VenueFinder {
    pub model: Arc<dyn LanguageModel>,
    pub classifier: Arc<dyn IntentClassifier>,
    pub geocoder: Arc<dyn Geocoder>,
    pub places: Arc<dyn PlacesDirectory>,
    pub enrichment: EnrichmentPolicy,
}

pub fn venue_reply(category: VenueCategory, location: &str) -> String {
    format!(
        "I found some {category} venues in {location} that might interest you. \
         Here are the top recommendations based on ratings and reviews:"
    )
}

impl VenueFinder {
    pub async fn respond(&self, message: &str) -> Result<ChatResponse, AppError> {
        let result = self.run(message).await;
        if let Err(err) = &result {
            error!(error = %err, status = %err.status(), "Error processing chat");
        }
        result
    }

    async fn run(&self, message: &str) -> Result<ChatResponse, AppError> {
        let mut chat = ChatSession::start(self.model.as_ref());

        let intent = classify_intent(&mut chat, self.classifier.as_ref(), message).await?;
        if intent == Intent::Unrelated {
            return Ok(ChatResponse::text(REFUSAL_REPLY));
        }

        let category = infer_category(message);
        let location = extract_location(&mut chat, message).await?;
        info!(%category, location = %location, "searching venues");

        let Some(near) = self.geocoder.locate(&location).await else {
            return Err(AppError::LocationNotFound(location));
        };

        let venues = search_venues(self.places.as_ref(), message, near, self.enrichment).await?;

        Ok(ChatResponse {
            response: venue_reply(category, &location),
            venues: Some(venues),
        })
    }
}
