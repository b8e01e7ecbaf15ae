// src/services/extractor.rs
use std::fmt;

use super::llm::{ChatSession, LlmError};

const SPORTS_KEYWORDS: [&str; 6] = ["sports", "stadium", "arena", "field", "court", "gym"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueCategory {
    Sports,
    Personal,
}

impl VenueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            VenueCategory::Sports => "sports",
            VenueCategory::Personal => "personal",
        }
    }
}

impl fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn infer_category(message: &str) -> VenueCategory {
    let msg_lower = message.to_lowercase();

    if SPORTS_KEYWORDS.iter().any(|keyword| msg_lower.contains(keyword)) {
        VenueCategory::Sports
    } else {
        VenueCategory::Personal
    }
}

/// Asks the model for the place name in `message`. Whatever it answers is
/// taken as the location; only geocoding will tell if it was one.
pub async fn extract_location(
    chat: &mut ChatSession<'_>,
    message: &str,
) -> Result<String, LlmError> {
    let prompt = format!("Extract only the location/city name from this query: {message}");
    let reply = chat.send_message(prompt).await?;
    Ok(reply.trim().to_string())
}
