//! Conversion from OSRM DTOs to a live route.

use crate::domain::Coordinate;
use crate::polyline;

use super::error::RouteFetchError;
use super::types::RouteResponse;

/// A route as reported by the routing service, in domain units.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveRoute {
    pub distance_km: f64,
    pub duration_min: f64,
    /// Decoded path; never empty.
    pub geometry: Vec<Coordinate>,
}

/// Convert a route response into a live route.
///
/// Takes the first (best) route. A non-`Ok` code, a missing route, missing
/// or empty geometry, or non-finite/negative figures are all errors, so the
/// caller can fall back uniformly.
pub fn convert_route_response(response: &RouteResponse) -> Result<LiveRoute, RouteFetchError> {
    let no_route = |message: &str| RouteFetchError::NoRoute {
        code: response.code.clone(),
        message: message.to_string(),
    };

    if response.code != "Ok" {
        return Err(no_route(response.message.as_deref().unwrap_or_default()));
    }

    let route = response
        .routes
        .first()
        .ok_or_else(|| no_route("response contained no routes"))?;

    if !route.distance.is_finite()
        || route.distance < 0.0
        || !route.duration.is_finite()
        || route.duration < 0.0
    {
        return Err(no_route("route has invalid distance or duration"));
    }

    let encoded = route
        .geometry
        .as_deref()
        .ok_or_else(|| no_route("route has no geometry"))?;
    let geometry = polyline::decode(encoded)?;
    if geometry.is_empty() {
        return Err(no_route("route geometry is empty"));
    }

    Ok(LiveRoute {
        distance_km: route.distance / 1000.0,
        duration_min: route.duration / 60.0,
        geometry,
    })
}
