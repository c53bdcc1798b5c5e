//! OSRM HTTP client.
//!
//! Provides async route queries against an OSRM-compatible routing service.
//! Handles concurrency limiting, status mapping, and conversion to a
//! decoded live route.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Coordinate, TransportProfile};
use crate::planner::RouteSource;

use super::convert::{LiveRoute, convert_route_response};
use super::error::RouteFetchError;
use super::types::RouteResponse;

/// Default base URL. The public openstreetmap.de deployment runs one OSRM
/// instance per profile, so the profile key is substituted into the host
/// path.
pub const DEFAULT_BASE_URL: &str = "https://routing.openstreetmap.de/routed-{profile}";

/// Placeholder replaced by the profile key in the base URL.
const PROFILE_PLACEHOLDER: &str = "{profile}";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default user agent; the public instances reject anonymous clients.
const DEFAULT_USER_AGENT: &str = concat!("trip-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL, optionally containing `{profile}`
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config pointing at the public per-profile instances.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (self-hosted instance, or a mock server in tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// OSRM route API client.
///
/// Uses a semaphore to limit concurrent requests so a burst of plans does
/// not get the client rate limited.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, RouteFetchError> {
        let mut headers = HeaderMap::new();

        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|_| RouteFetchError::ApiError {
                status: 0,
                message: "Invalid user agent format".to_string(),
            })?;
        headers.insert(USER_AGENT, user_agent);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Build the route URL for a profile and coordinate pair.
    ///
    /// OSRM takes `lng,lat` order.
    fn route_url(&self, profile_key: &str, start: Coordinate, dest: Coordinate) -> String {
        let base = self.base_url.replace(PROFILE_PLACEHOLDER, profile_key);
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            base,
            profile_key,
            start.lng(),
            start.lat(),
            dest.lng(),
            dest.lat()
        )
    }

    /// Fetch the best route between two points for a profile.
    ///
    /// Requests the full-resolution overview geometry in polyline form and
    /// decodes it.
    pub async fn route(
        &self,
        profile_key: &str,
        start: Coordinate,
        dest: Coordinate,
    ) -> Result<LiveRoute, RouteFetchError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RouteFetchError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.route_url(profile_key, start, dest);
        debug!(profile = profile_key, %url, "Requesting route");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "polyline")])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RouteFetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RouteFetchError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: RouteResponse =
            serde_json::from_str(&body).map_err(|e| RouteFetchError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        convert_route_response(&parsed)
    }
}

impl RouteSource for OsrmClient {
    async fn fetch_live(
        &self,
        profile: &TransportProfile,
        start: Coordinate,
        dest: Coordinate,
    ) -> Result<LiveRoute, RouteFetchError> {
        self.route(profile.key(), start, dest).await
    }
}
