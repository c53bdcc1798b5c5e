//! Route planning results.
//!
//! These types are produced once per request and never mutated. Derived
//! quantities (emissions) are computed at construction from their inputs
//! so they can never disagree with the distance they were derived from.

use serde::{Deserialize, Serialize};

use super::{Coordinate, TransportProfile};

/// A ranked candidate place returned by geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    /// Human-readable name as reported by the search service.
    pub label: String,

    /// Where the place is.
    pub coordinate: Coordinate,
}

impl PlaceSuggestion {
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            label: label.into(),
            coordinate,
        }
    }
}

/// One transport mode's route between two points.
///
/// Either a live route (non-empty geometry from the routing service) or a
/// straight-line fallback estimate (empty geometry). `is_fallback` is true
/// exactly when the geometry is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    profile_key: String,
    distance_km: f64,
    duration_min: f64,
    geometry: Vec<Coordinate>,
    emissions_kg: f64,
    is_fallback: bool,
}

impl RouteResult {
    /// Build a result from a live route.
    ///
    /// Returns `None` if the geometry is empty or the distance/duration are
    /// negative or non-finite; callers treat that like any other routing
    /// failure.
    pub fn live(
        profile: &TransportProfile,
        distance_km: f64,
        duration_min: f64,
        geometry: Vec<Coordinate>,
    ) -> Option<Self> {
        if geometry.is_empty() || !is_non_negative(distance_km) || !is_non_negative(duration_min)
        {
            return None;
        }

        Some(Self {
            profile_key: profile.key().to_string(),
            distance_km,
            duration_min,
            geometry,
            emissions_kg: profile.emissions_for(distance_km),
            is_fallback: false,
        })
    }

    /// Build a straight-line estimate from a distance and the profile's
    /// fallback speed.
    pub fn fallback(profile: &TransportProfile, distance_km: f64) -> Self {
        let distance_km = distance_km.max(0.0);
        Self {
            profile_key: profile.key().to_string(),
            distance_km,
            duration_min: distance_km / profile.fallback_speed_kmh() * 60.0,
            geometry: Vec::new(),
            emissions_kg: profile.emissions_for(distance_km),
            is_fallback: true,
        }
    }

    pub fn profile_key(&self) -> &str {
        &self.profile_key
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.duration_min
    }

    pub fn geometry(&self) -> &[Coordinate] {
        &self.geometry
    }

    pub fn emissions_kg(&self) -> f64 {
        self.emissions_kg
    }

    pub fn is_fallback(&self) -> bool {
        self.is_fallback
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Result of hub-relay optimization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizedPath {
    /// Great-circle length of `path` in kilometres.
    pub distance_km: f64,

    /// Start, optional hub, destination. Always at least two points.
    pub path: Vec<Coordinate>,

    /// The relay hub, if relaying beat the direct path.
    pub via_hub: Option<Coordinate>,
}

impl OptimizedPath {
    pub fn direct(start: Coordinate, dest: Coordinate, distance_km: f64) -> Self {
        Self {
            distance_km,
            path: vec![start, dest],
            via_hub: None,
        }
    }

    pub fn via(start: Coordinate, hub: Coordinate, dest: Coordinate, distance_km: f64) -> Self {
        Self {
            distance_km,
            path: vec![start, hub, dest],
            via_hub: Some(hub),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn car() -> TransportProfile {
        TransportProfile::new("car", "Car", 0.21, 70.0).unwrap()
    }

    #[test]
    fn live_result_computes_emissions() {
        let r = RouteResult::live(&car(), 100.0, 75.0, vec![coord(0.0, 0.0), coord(0.0, 1.0)])
            .unwrap();
        assert_eq!(r.profile_key(), "car");
        assert!(!r.is_fallback());
        assert_eq!(r.geometry().len(), 2);
        assert!((r.emissions_kg() - 21.0).abs() < 1e-9);
    }

    #[test]
    fn live_result_requires_geometry() {
        assert!(RouteResult::live(&car(), 10.0, 8.0, Vec::new()).is_none());
    }

    #[test]
    fn live_result_rejects_bad_numbers() {
        let geometry = vec![coord(0.0, 0.0)];
        assert!(RouteResult::live(&car(), -1.0, 8.0, geometry.clone()).is_none());
        assert!(RouteResult::live(&car(), 1.0, f64::NAN, geometry).is_none());
    }

    #[test]
    fn fallback_uses_profile_speed() {
        let r = RouteResult::fallback(&car(), 35.0);
        assert!(r.is_fallback());
        assert!(r.geometry().is_empty());
        assert!((r.duration_min() - 30.0).abs() < 1e-9);
        assert!((r.emissions_kg() - 7.35).abs() < 1e-9);
    }

    #[test]
    fn fallback_zero_distance() {
        let r = RouteResult::fallback(&car(), 0.0);
        assert_eq!(r.distance_km(), 0.0);
        assert_eq!(r.duration_min(), 0.0);
        assert_eq!(r.emissions_kg(), 0.0);
    }

    #[test]
    fn optimized_path_shapes() {
        let a = coord(0.0, 0.0);
        let h = coord(1.0, 1.0);
        let b = coord(0.0, 2.0);

        let direct = OptimizedPath::direct(a, b, 222.0);
        assert_eq!(direct.path, vec![a, b]);
        assert!(direct.via_hub.is_none());

        let via = OptimizedPath::via(a, h, b, 300.0);
        assert_eq!(via.path, vec![a, h, b]);
        assert_eq!(via.via_hub, Some(h));
    }
}
