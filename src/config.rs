// src/config.rs
use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::services::venue_search::EnrichmentPolicy;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_FOURSQUARE_API_URL: &str = "https://api.foursquare.com/v3";
pub const DEFAULT_MAPTILER_API_URL: &str = "https://api.maptiler.com/geocoding";

/// Process-wide settings, read once at startup and never reloaded.
///
/// API keys are not validated here; a missing key only shows up when the
/// corresponding upstream call is made.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub gemini: GeminiConfig,
    pub foursquare: FoursquareConfig,
    pub maptiler: MapTilerConfig,
    pub assets: AssetConfig,
    pub enrichment: EnrichmentPolicy,
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct FoursquareConfig {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct MapTilerConfig {
    pub api_key: String,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub static_dir: PathBuf,
    pub index_file: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("static"),
            index_file: PathBuf::from("templates/index.html"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests don't have to
    /// touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var_or =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8000);

        let enrichment = match lookup("VENUE_ENRICHMENT") {
            Some(value) => EnrichmentPolicy::parse(&value).unwrap_or_else(|| {
                let fallback = EnrichmentPolicy::default();
                warn!(
                    value = %value,
                    ?fallback,
                    "unknown VENUE_ENRICHMENT, expected all-or-nothing or skip-failed"
                );
                fallback
            }),
            None => EnrichmentPolicy::default(),
        };

        Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            gemini: GeminiConfig {
                api_key: var_or("GEMINI_API_KEY", ""),
                api_url: var_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
                model: var_or("GEMINI_MODEL", "gemini-2.0-flash"),
            },
            foursquare: FoursquareConfig {
                api_key: var_or("FOURSQUARE_API_KEY", ""),
                api_url: var_or("FOURSQUARE_API_URL", DEFAULT_FOURSQUARE_API_URL),
            },
            maptiler: MapTilerConfig {
                api_key: var_or("MAPTILER_API_KEY", ""),
                api_url: var_or("MAPTILER_API_URL", DEFAULT_MAPTILER_API_URL),
            },
            assets: AssetConfig {
                static_dir: PathBuf::from(var_or("STATIC_DIR", "static")),
                index_file: PathBuf::from(var_or("INDEX_FILE", "templates/index.html")),
            },
            enrichment,
        }
    }
}
