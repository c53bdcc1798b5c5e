//! Multi-mode route planning.
//!
//! One planning call fetches a route for every requested transport profile
//! concurrently and returns them in the order the profiles were given.

use std::collections::HashSet;

use futures::future::join_all;
use tracing::debug;

use crate::domain::{Coordinate, OptimizationInputError, RouteResult, TransportProfile};

use super::config::PlannerConfig;
use super::estimate::TripSummary;
use super::provider::{RouteProvider, RouteSource};

/// Routes for one start/destination pair, one per requested profile.
///
/// Always holds at least one route. Exactly one route is active; it starts
/// as the first and can be changed with [`RoutePlan::select`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    routes: Vec<RouteResult>,
    active: usize,
}

impl RoutePlan {
    /// Routes in the order their profiles were requested.
    pub fn routes(&self) -> &[RouteResult] {
        &self.routes
    }

    pub fn active(&self) -> &RouteResult {
        &self.routes[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Make the route for `profile_key` the active one.
    ///
    /// Returns `false`, leaving the selection unchanged, if no route in the
    /// plan has that key.
    pub fn select(&mut self, profile_key: &str) -> bool {
        match self
            .routes
            .iter()
            .position(|r| r.profile_key() == profile_key)
        {
            Some(index) => {
                self.active = index;
                true
            }
            None => false,
        }
    }

    /// Number of routes that are straight-line estimates.
    pub fn fallback_count(&self) -> usize {
        self.routes.iter().filter(|r| r.is_fallback()).count()
    }

    /// Headline figures for the active route.
    pub fn summary(&self, config: &PlannerConfig) -> TripSummary {
        let active = self.active();
        TripSummary::new(
            active.distance_km(),
            active.duration_min(),
            config.car_factor_kg_per_km,
            config.baseline_factor_kg_per_km,
        )
    }
}

/// Build a coordinate from untrusted input, naming its role on failure.
pub fn input_coordinate(
    role: &'static str,
    lat: f64,
    lng: f64,
) -> Result<Coordinate, OptimizationInputError> {
    Coordinate::new(lat, lng)
        .map_err(|source| OptimizationInputError::InvalidCoordinate { role, source })
}

fn validate_profiles(
    profiles: &[TransportProfile],
    config: &PlannerConfig,
) -> Result<(), OptimizationInputError> {
    if profiles.is_empty() {
        return Err(OptimizationInputError::NoProfiles);
    }
    if profiles.len() > config.max_profiles {
        return Err(OptimizationInputError::TooManyProfiles {
            count: profiles.len(),
            max: config.max_profiles,
        });
    }

    let mut seen = HashSet::with_capacity(profiles.len());
    for profile in profiles {
        if !seen.insert(profile.key()) {
            return Err(OptimizationInputError::DuplicateProfile(
                profile.key().to_string(),
            ));
        }
    }

    Ok(())
}

/// Plan a route for every profile between `start` and `dest`.
///
/// Inputs are validated before any request is made; an invalid profile
/// list fails the whole call. After that the call cannot fail: each mode
/// that cannot be routed live gets a straight-line estimate, independently
/// of the others. All fetches run concurrently and the results are bound
/// to their profile's position, so `routes()[i]` always belongs to
/// `profiles[i]` whatever order the fetches complete in.
pub async fn plan_routes<S: RouteSource>(
    source: &S,
    config: &PlannerConfig,
    start: Coordinate,
    dest: Coordinate,
    profiles: &[TransportProfile],
) -> Result<RoutePlan, OptimizationInputError> {
    validate_profiles(profiles, config)?;

    let provider = RouteProvider::new(source);
    let fetches = profiles
        .iter()
        .map(|profile| provider.fetch_route(profile, start, dest));
    let routes = join_all(fetches).await;

    let plan = RoutePlan { routes, active: 0 };
    debug!(
        %start,
        %dest,
        routes = plan.routes.len(),
        fallbacks = plan.fallback_count(),
        "Route planning complete"
    );

    Ok(plan)
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
