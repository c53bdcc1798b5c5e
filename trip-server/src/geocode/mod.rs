//! Place search for search-as-you-type input.
//!
//! Wraps the Nominatim search API (OpenStreetMap) behind a debounced,
//! latest-wins geocoder. Characteristics of the service:
//! - Results are ranked by relevance and capped by a `limit` parameter
//! - Positions are returned as decimal strings (`lat`, `lon`)
//! - The usage policy requires an identifying User-Agent

mod client;
mod debounce;
mod error;

pub use client::{
    DEFAULT_BASE_URL, NominatimClient, NominatimConfig, NominatimPlace, PlaceSearch,
    parse_search_response,
};
pub use debounce::{DEFAULT_DEBOUNCE, DEFAULT_LIMIT, Geocoder};
pub use error::GeocodeError;
