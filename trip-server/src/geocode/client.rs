//! Nominatim place search client.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, trace};

use crate::domain::{Coordinate, PlaceSuggestion};

use super::error::GeocodeError;

/// Default base URL for the public Nominatim instance.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const DEFAULT_USER_AGENT: &str = concat!("trip-server/", env!("CARGO_PKG_VERSION"));

/// Free-text place search.
///
/// Implemented by the Nominatim client and by test doubles.
pub trait PlaceSearch {
    /// Search for places matching `query`, most relevant first, returning
    /// at most `limit` results.
    fn search_places(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<PlaceSuggestion>, GeocodeError>> + Send;
}

/// One search result as returned by Nominatim.
///
/// Positions arrive as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl NominatimPlace {
    /// Convert to a suggestion, validating the position.
    pub fn into_suggestion(self) -> Result<PlaceSuggestion, GeocodeError> {
        let coordinate = match (self.lat.trim().parse(), self.lon.trim().parse()) {
            (Ok(lat), Ok(lng)) => Coordinate::new(lat, lng).ok(),
            _ => None,
        };

        match coordinate {
            Some(coordinate) => Ok(PlaceSuggestion::new(self.display_name, coordinate)),
            None => Err(GeocodeError::InvalidPosition {
                label: self.display_name,
                lat: self.lat,
                lon: self.lon,
            }),
        }
    }
}

/// Parse a Nominatim search response body.
///
/// Any malformed result fails the whole response.
pub fn parse_search_response(body: &str) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })?;

    places
        .into_iter()
        .map(NominatimPlace::into_suggestion)
        .collect()
}

/// Configuration for the Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL for the API
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How long search results stay cached
    pub cache_ttl: Duration,
    /// Maximum number of cached queries
    pub cache_capacity: u64,
}

impl NominatimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing or a self-hosted instance).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            cache_ttl: Duration::from_secs(3600),
            cache_capacity: 1000,
        }
    }
}

/// Client for the Nominatim search API.
///
/// Successful results are cached per lowercased query and limit.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    base_url: String,
    cache: MokaCache<(String, usize), Arc<Vec<PlaceSuggestion>>>,
}

impl NominatimClient {
    /// Create a new Nominatim client.
    pub fn new(config: NominatimConfig) -> Result<Self, GeocodeError> {
        let mut headers = HeaderMap::new();

        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| GeocodeError::Config("invalid user agent format".to_string()))?;
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = MokaCache::builder()
            .time_to_live(config.cache_ttl)
            .max_capacity(config.cache_capacity)
            .build();

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    /// Search for places matching `query`.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
        let key = (query.to_lowercase(), limit);
        if let Some(cached) = self.cache.get(&key).await {
            trace!(%query, "Geocode cache hit");
            return Ok(cached.as_ref().clone());
        }

        let url = format!("{}/search", self.base_url);
        debug!(%query, limit, "Searching places");

        let limit_param = limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("format", "json"),
                ("q", query),
                ("limit", limit_param.as_str()),
                ("addressdetails", "1"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let mut suggestions = parse_search_response(&body)?;
        suggestions.truncate(limit);

        self.cache.insert(key, Arc::new(suggestions.clone())).await;

        Ok(suggestions)
    }
}

impl PlaceSearch for NominatimClient {
    async fn search_places(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<PlaceSuggestion>, GeocodeError> {
        self.search(query, limit).await
    }
}
