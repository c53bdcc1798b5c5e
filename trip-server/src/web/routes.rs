//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{Coordinate, OptimizationInputError, TransportProfile};
use crate::planner::{self, input_coordinate, optimize_hub_route};
use crate::polyline::{self, DecodeError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/geocode", get(geocode))
        .route("/api/routes/plan", post(plan_routes))
        .route("/api/routes/optimize", post(optimize_route))
        .route("/api/polyline/decode", get(decode_polyline))
        .route("/api/places", get(list_places))
        .route("/api/profiles", get(list_profiles))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Debounced place search for one form input.
async fn geocode(
    State(state): State<AppState>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let field = req.field.as_deref().unwrap_or("start");
    let geocoder = state
        .geocoders
        .for_field(req.session.as_deref(), field)
        .await
        .ok_or_else(|| AppError::BadRequest {
            message: format!("Unknown field: {field} (expected start or dest)"),
        })?;

    let response = match geocoder.search(&req.q).await {
        Some(suggestions) => GeocodeResponse {
            suggestions,
            stale: false,
        },
        None => GeocodeResponse {
            suggestions: Vec::new(),
            stale: true,
        },
    };

    Ok(Json(response))
}

/// Plan a route for each requested mode.
async fn plan_routes(
    State(state): State<AppState>,
    Json(req): Json<PlanRoutesRequest>,
) -> Result<Json<PlanRoutesResponse>, AppError> {
    let start = resolve_location(&state, "start", &req.start)?;
    let dest = resolve_location(&state, "dest", &req.dest)?;

    let profiles: Vec<TransportProfile> = match &req.profiles {
        Some(keys) => keys
            .iter()
            .map(|key| {
                state
                    .profile(key)
                    .cloned()
                    .ok_or_else(|| OptimizationInputError::UnknownProfile(key.clone()))
            })
            .collect::<Result<_, _>>()?,
        None => state.profiles.as_ref().clone(),
    };

    let mut plan =
        planner::plan_routes(state.routing.as_ref(), &state.config, start, dest, &profiles)
            .await?;

    if let Some(active) = &req.active {
        if !plan.select(active) {
            return Err(AppError::BadRequest {
                message: format!("Active profile {active} is not in the plan"),
            });
        }
    }

    let routes = plan
        .routes()
        .iter()
        .zip(&profiles)
        .map(|(route, profile)| {
            RouteView::from_route(route, profile, state.config.car_factor_kg_per_km)
        })
        .collect();

    Ok(Json(PlanRoutesResponse {
        routes,
        active: plan.active().profile_key().to_string(),
        summary: plan.summary(&state.config),
    }))
}

/// Compare the direct path with relaying through a hub.
async fn optimize_route(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let start = resolve_location(&state, "start", &req.start)?;
    let dest = resolve_location(&state, "dest", &req.dest)?;

    // (name, coordinate) per candidate, in request order
    let hubs: Vec<(Option<String>, Coordinate)> = match &req.hubs {
        Some(inputs) => inputs
            .iter()
            .map(|input| {
                let name = match input {
                    LocationInput::Named { place } => Some(place.trim().to_string()),
                    LocationInput::Point { .. } => None,
                };
                resolve_location(&state, "hub", input).map(|c| (name, c))
            })
            .collect::<Result<_, _>>()?,
        None => state
            .hubs
            .places()
            .iter()
            .map(|p| (Some(p.name.clone()), p.coordinate))
            .collect(),
    };

    let coordinates: Vec<Coordinate> = hubs.iter().map(|(_, c)| *c).collect();
    let path = optimize_hub_route(start, dest, &coordinates);

    let via_hub_name = path.via_hub.and_then(|via| {
        hubs.iter()
            .find(|(_, c)| *c == via)
            .and_then(|(name, _)| name.clone())
    });
    debug!(distance_km = path.distance_km, via = ?via_hub_name, "Hub optimization complete");

    Ok(Json(OptimizeResponse::from_path(path, via_hub_name)))
}

/// Decode an encoded polyline.
async fn decode_polyline(
    Query(req): Query<DecodeQuery>,
) -> Result<Json<DecodeResponse>, AppError> {
    let points = polyline::decode(&req.encoded)?;
    Ok(Json(DecodeResponse { points }))
}

/// Built-in places and default hubs.
async fn list_places(State(state): State<AppState>) -> Json<PlacesResponse> {
    Json(PlacesResponse {
        places: state.places.places().to_vec(),
        hubs: state.hubs.places().to_vec(),
    })
}

/// Configured transport profiles.
async fn list_profiles(State(state): State<AppState>) -> Json<ProfilesResponse> {
    Json(ProfilesResponse {
        profiles: state.profiles.as_ref().clone(),
    })
}

/// Resolve a request location to a coordinate.
///
/// Named places are looked up among the default hubs, then the built-in
/// places.
fn resolve_location(
    state: &AppState,
    role: &'static str,
    input: &LocationInput,
) -> Result<Coordinate, AppError> {
    match input {
        LocationInput::Point { lat, lng } => Ok(input_coordinate(role, *lat, *lng)?),
        LocationInput::Named { place } => state
            .hubs
            .coordinate(place)
            .or_else(|| state.places.coordinate(place))
            .ok_or_else(|| AppError::NotFound {
                message: format!("Unknown {role} place: {}", place.trim()),
            }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<OptimizationInputError> for AppError {
    fn from(e: OptimizationInputError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<DecodeError> for AppError {
    fn from(e: DecodeError) -> Self {
        AppError::BadRequest {
            message: format!("Invalid encoded path: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
