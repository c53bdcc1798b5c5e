//! Per-mode route retrieval with straight-line fallback.

use std::future::Future;

use tracing::{debug, warn};

use crate::domain::{Coordinate, RouteResult, TransportProfile};
use crate::geo;
use crate::osrm::{LiveRoute, RouteFetchError};

/// Source of live routes for a transport profile.
///
/// This abstraction allows the planner to run against the OSRM client, a
/// cached client, an offline source, or test doubles.
pub trait RouteSource {
    /// Fetch the best live route between two points.
    fn fetch_live(
        &self,
        profile: &TransportProfile,
        start: Coordinate,
        dest: Coordinate,
    ) -> impl Future<Output = Result<LiveRoute, RouteFetchError>> + Send;
}

/// A source with no live routing: every request fails with
/// `NotConfigured`, so every route is the straight-line estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSource;

impl RouteSource for OfflineSource {
    async fn fetch_live(
        &self,
        profile: &TransportProfile,
        _start: Coordinate,
        _dest: Coordinate,
    ) -> Result<LiveRoute, RouteFetchError> {
        Err(RouteFetchError::NotConfigured(format!(
            "live routing disabled for {}",
            profile.key()
        )))
    }
}

/// Fetches one mode's route, degrading to an estimate on any failure.
#[derive(Debug)]
pub struct RouteProvider<'a, S: RouteSource> {
    source: &'a S,
}

impl<'a, S: RouteSource> RouteProvider<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch the route for `profile` from `start` to `dest`.
    ///
    /// Never fails. If the live route cannot be obtained (network error,
    /// error status, no route, undecodable geometry) the result is a
    /// straight-line estimate: great-circle distance at the profile's
    /// fallback speed, with empty geometry.
    pub async fn fetch_route(
        &self,
        profile: &TransportProfile,
        start: Coordinate,
        dest: Coordinate,
    ) -> RouteResult {
        match self.source.fetch_live(profile, start, dest).await {
            Ok(live) => {
                let distance_km = live.distance_km;
                if let Some(result) =
                    RouteResult::live(profile, distance_km, live.duration_min, live.geometry)
                {
                    debug!(
                        profile = profile.key(),
                        distance_km, "Live route retrieved"
                    );
                    return result;
                }
                warn!(
                    profile = profile.key(),
                    "Routing service returned an unusable route, using straight-line estimate"
                );
            }
            Err(RouteFetchError::NotConfigured(reason)) => {
                debug!(profile = profile.key(), %reason, "Using straight-line estimate");
            }
            Err(e) => {
                warn!(
                    profile = profile.key(),
                    error = %e,
                    "Routing failed, using straight-line estimate"
                );
            }
        }

        fallback_route(profile, start, dest)
    }
}

/// The straight-line estimate for a profile.
pub fn fallback_route(
    profile: &TransportProfile,
    start: Coordinate,
    dest: Coordinate,
) -> RouteResult {
    RouteResult::fallback(profile, geo::distance_km(start, dest))
}
