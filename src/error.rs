// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;
use crate::services::llm::LlmError;
use crate::services::venue_search::SearchError;

/// Everything a chat request can fail with. Only the variant decides what
/// the caller sees; the wrapped cause stays in the server logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("location {0:?} could not be geocoded")]
    LocationNotFound(String),
    #[error(transparent)]
    VenueSearch(#[from] SearchError),
    #[error(transparent)]
    Model(#[from] LlmError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::LocationNotFound(_) => StatusCode::BAD_REQUEST,
            AppError::VenueSearch(_) | AppError::Model(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::LocationNotFound(_) => "Location not found",
            AppError::VenueSearch(_) => "Error searching venues",
            AppError::Model(_) => "Error processing request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.public_message().to_string(),
        });
        (self.status(), body).into_response()
    }
}
