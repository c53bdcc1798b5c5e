//! Caching layer for live routes.
//!
//! Routes between the same two points rarely change within minutes, and the
//! public routing services are rate limited. We cache successful live routes
//! keyed by profile and endpoints.
//!
//! Endpoints are quantized to the 1e-5 degree precision of the encoded
//! geometry, so requests that differ only below that precision share an
//! entry. Failures are never cached: the next request retries the service.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Coordinate, TransportProfile};
use crate::osrm::{LiveRoute, OsrmClient, RouteFetchError};
use crate::planner::RouteSource;

/// Cache key: (profile key, quantized start, quantized destination).
type RouteKey = (String, (i32, i32), (i32, i32));

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Route source with caching.
///
/// Wraps another `RouteSource` (normally the OSRM client) and caches its
/// successful responses.
pub struct CachedRouteClient<S = OsrmClient> {
    inner: S,
    routes: MokaCache<RouteKey, Arc<LiveRoute>>,
}

impl<S> CachedRouteClient<S> {
    /// Create a new cached client.
    pub fn new(inner: S, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, routes }
    }

    fn key(profile: &TransportProfile, start: Coordinate, dest: Coordinate) -> RouteKey {
        (
            profile.key().to_string(),
            start.quantized(),
            dest.quantized(),
        )
    }

    /// Access the underlying source for requests that bypass the cache.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: RouteSource + Sync> RouteSource for CachedRouteClient<S> {
    async fn fetch_live(
        &self,
        profile: &TransportProfile,
        start: Coordinate,
        dest: Coordinate,
    ) -> Result<LiveRoute, RouteFetchError> {
        let key = Self::key(profile, start, dest);

        if let Some(cached) = self.routes.get(&key).await {
            trace!(profile = profile.key(), %start, %dest, "Route cache hit");
            return Ok(cached.as_ref().clone());
        }

        let route = self.inner.fetch_live(profile, start, dest).await?;
        self.routes.insert(key, Arc::new(route.clone())).await;

        Ok(route)
    }
}
