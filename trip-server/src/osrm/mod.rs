//! OSRM routing client.
//!
//! This module provides an HTTP client for OSRM-compatible routing
//! services, which return per-mode road routes between coordinates.
//!
//! Key characteristics of the service:
//! - Coordinates are given in `lng,lat` order in the URL path
//! - Distances are metres and durations seconds
//! - Geometry is returned as a compact encoded polyline
//! - "No route" is reported in the body `code`, not always via HTTP status

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, OsrmClient, OsrmConfig};
pub use convert::{LiveRoute, convert_route_response};
pub use error::RouteFetchError;
pub use types::{OsrmRoute, RouteResponse};
