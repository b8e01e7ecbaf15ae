// src/services/venue_search.rs
use futures::future::{join_all, try_join_all};
use thiserror::Error;
use tracing::{error, warn};

use super::geocoder::Coordinates;
use super::places::{
    Photo, PlaceCandidate, PlaceDetails, PlacesDirectory, PlacesError, SearchParams,
};
use crate::message::Venue;

pub const SEARCH_RADIUS: u32 = 5000;
pub const MAX_VENUES: usize = 5;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("venue search failed: {0}")]
    Search(#[source] PlacesError),
    #[error("enriching venue {place_id} failed: {source}")]
    Enrichment {
        place_id: String,
        #[source]
        source: PlacesError,
    },
}

/// What to do when the detail or photo lookup for one venue fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnrichmentPolicy {
    /// Fail the whole search.
    #[default]
    AllOrNothing,
    /// Drop the affected venue and keep the rest.
    SkipFailed,
}

impl EnrichmentPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "all-or-nothing" => Some(Self::AllOrNothing),
            "skip-failed" => Some(Self::SkipFailed),
            _ => None,
        }
    }
}

/// Finds up to [`MAX_VENUES`] venues near `near`, best rated first, and
/// enriches each with details and a photo.
///
/// Ordering comes from the places service. Detail and photo lookups for the
/// batch run concurrently but results are assembled in search order.
pub async fn search_venues(
    places: &dyn PlacesDirectory,
    query: &str,
    near: Coordinates,
    policy: EnrichmentPolicy,
) -> Result<Vec<Venue>, SearchError> {
    let params = SearchParams {
        query: query.to_string(),
        near,
        radius: SEARCH_RADIUS,
        limit: MAX_VENUES,
    };

    let mut candidates = places.search(&params).await.map_err(|err| {
        error!(error = %err, "venue search failed");
        SearchError::Search(err)
    })?;
    candidates.truncate(MAX_VENUES);

    let lookups = candidates.iter().map(|candidate| enrich(places, candidate));

    match policy {
        EnrichmentPolicy::AllOrNothing => try_join_all(lookups).await,
        EnrichmentPolicy::SkipFailed => Ok(join_all(lookups)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(venue) => Some(venue),
                Err(err) => {
                    warn!(error = %err, "dropping venue that could not be enriched");
                    None
                }
            })
            .collect()),
    }
}

async fn enrich(
    places: &dyn PlacesDirectory,
    candidate: &PlaceCandidate,
) -> Result<Venue, SearchError> {
    let place_id = candidate.fsq_id.as_str();
    let (details, photos) = tokio::try_join!(places.details(place_id), places.photos(place_id))
        .map_err(|source| {
            error!(place_id, error = %source, "venue lookup failed");
            SearchError::Enrichment {
                place_id: place_id.to_string(),
                source,
            }
        })?;
    Ok(assemble_venue(candidate, &details, &photos))
}

pub fn assemble_venue(
    candidate: &PlaceCandidate,
    details: &PlaceDetails,
    photos: &[Photo],
) -> Venue {
    let kind = candidate
        .categories
        .first()
        .and_then(|category| category.name.clone())
        .unwrap_or_else(|| "Venue".to_string());

    let address = candidate
        .location
        .as_ref()
        .and_then(|location| location.formatted_address.clone())
        .unwrap_or_default();

    let main = candidate.geocodes.as_ref().and_then(|geocodes| geocodes.main);

    Venue {
        name: candidate.name.clone(),
        kind,
        address,
        rating: candidate.rating,
        price: details.price_label(),
        capacity: details.capacity,
        image: photos.first().map(Photo::original_url),
        latitude: main.map(|m| m.latitude),
        longitude: main.map(|m| m.longitude),
    }
}
