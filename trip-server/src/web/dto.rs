//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, OptimizedPath, PlaceSuggestion, RouteResult, TransportProfile};
use crate::places::NamedPlace;
use crate::planner::{TripSummary, relay_savings, savings_vs_car};

/// A location in a request: either raw coordinates or the name of a
/// built-in place.
///
/// Raw coordinates are validated by the handler, so an out-of-range value
/// is reported with the role it played in the request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LocationInput {
    Point { lat: f64, lng: f64 },
    Named { place: String },
}

/// Query for place search.
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    /// Free-text query
    #[serde(default)]
    pub q: String,

    /// Which input the query is typed into (`start` or `dest`). Each input
    /// is debounced independently.
    pub field: Option<String>,

    /// Client-chosen id scoping latest-wins to one client. Without it the
    /// query is debounced but never superseded.
    pub session: Option<String>,
}

/// Place search results.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeResponse {
    pub suggestions: Vec<PlaceSuggestion>,

    /// Set when a newer query on the same input of the same session
    /// superseded this one
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stale: bool,
}

/// Request to plan routes for several modes.
#[derive(Debug, Deserialize, Serialize)]
pub struct PlanRoutesRequest {
    pub start: LocationInput,
    pub dest: LocationInput,

    /// Profile keys to plan for, in display order. Defaults to every
    /// configured profile.
    pub profiles: Option<Vec<String>>,

    /// Profile key to make active. Defaults to the first.
    pub active: Option<String>,
}

/// One mode's route.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteView {
    pub profile: String,
    pub label: String,
    pub distance_km: f64,
    pub duration_min: f64,
    pub emissions_kg: f64,
    pub saved_vs_car_kg: f64,
    pub is_fallback: bool,
    pub geometry: Vec<Coordinate>,
}

impl RouteView {
    /// View of `route`, with savings measured against a car emitting
    /// `car_factor_kg_per_km`.
    pub fn from_route(
        route: &RouteResult,
        profile: &TransportProfile,
        car_factor_kg_per_km: f64,
    ) -> Self {
        Self {
            profile: route.profile_key().to_string(),
            label: profile.label().to_string(),
            distance_km: route.distance_km(),
            duration_min: route.duration_min(),
            emissions_kg: route.emissions_kg(),
            saved_vs_car_kg: savings_vs_car(
                route.distance_km(),
                profile.emission_factor_kg_per_km(),
                car_factor_kg_per_km,
            ),
            is_fallback: route.is_fallback(),
            geometry: route.geometry().to_vec(),
        }
    }
}

/// Planned routes.
#[derive(Debug, Serialize)]
pub struct PlanRoutesResponse {
    /// Routes in requested profile order
    pub routes: Vec<RouteView>,

    /// Key of the active route
    pub active: String,

    /// Headline figures for the active route
    pub summary: TripSummary,
}

/// Request for hub-relay optimization.
#[derive(Debug, Deserialize, Serialize)]
pub struct OptimizeRequest {
    pub start: LocationInput,
    pub dest: LocationInput,

    /// Candidate relay hubs. Defaults to the built-in hubs.
    pub hubs: Option<Vec<LocationInput>>,
}

/// Result of hub-relay optimization.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub distance_km: f64,
    pub path: Vec<Coordinate>,
    pub via_hub: Option<Coordinate>,

    /// Name of the relay hub, when it is a named place
    pub via_hub_name: Option<String>,

    /// CO₂ saved compared with driving the same distance
    pub co2_saved_kg: f64,
}

impl OptimizeResponse {
    pub fn from_path(path: OptimizedPath, via_hub_name: Option<String>) -> Self {
        Self {
            co2_saved_kg: relay_savings(path.distance_km),
            distance_km: path.distance_km,
            path: path.path,
            via_hub: path.via_hub,
            via_hub_name,
        }
    }
}

/// Query for polyline decoding.
#[derive(Debug, Deserialize)]
pub struct DecodeQuery {
    #[serde(default)]
    pub encoded: String,
}

/// Decoded path.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub points: Vec<Coordinate>,
}

/// Built-in places.
#[derive(Debug, Serialize)]
pub struct PlacesResponse {
    pub places: Vec<NamedPlace>,
    pub hubs: Vec<NamedPlace>,
}

/// Configured transport profiles.
#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<TransportProfile>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
