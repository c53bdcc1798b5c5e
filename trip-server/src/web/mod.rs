//! Web layer for the trip planner.
//!
//! Provides JSON endpoints for place search, multi-mode route planning,
//! hub-relay optimization and polyline decoding.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, Geocoders, RoutingBackend};
