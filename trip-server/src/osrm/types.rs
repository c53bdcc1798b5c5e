//! OSRM route service response DTOs.
//!
//! These types map directly to the `/route/v1` JSON response. Only the
//! fields we consume are modelled; everything else is ignored.

use serde::Deserialize;

/// Top-level response from `/route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// `"Ok"` on success, otherwise an error code such as `"NoRoute"`.
    pub code: String,

    /// Optional human-readable explanation for a non-`Ok` code.
    pub message: Option<String>,

    /// Alternative routes, best first. Absent on error.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route in the response.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Length in metres.
    pub distance: f64,

    /// Travel time in seconds.
    pub duration: f64,

    /// Encoded polyline (requested with `geometries=polyline`).
    pub geometry: Option<String>,
}
