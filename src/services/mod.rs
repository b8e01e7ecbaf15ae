pub mod extractor;
pub mod geocoder;
pub mod intent;
pub mod llm;
pub mod places;
pub mod venue_finder;
pub mod venue_search;
