//! Configuration for route planning.

use super::estimate::CAR_FACTOR_KG_PER_KM;

/// Parameters for planning and for the derived estimates.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum number of profiles accepted in one planning call.
    pub max_profiles: usize,

    /// Emission factor of a private car, used as the comparison baseline
    /// for "CO₂ saved" figures (kg per km).
    pub car_factor_kg_per_km: f64,

    /// Emission factor credited to the planned trip when reporting savings
    /// against the car (kg per km). Defaults to a bus-like transit figure.
    pub baseline_factor_kg_per_km: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        max_profiles: usize,
        car_factor_kg_per_km: f64,
        baseline_factor_kg_per_km: f64,
    ) -> Self {
        Self {
            max_profiles,
            car_factor_kg_per_km,
            baseline_factor_kg_per_km,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_profiles: 8,
            car_factor_kg_per_km: CAR_FACTOR_KG_PER_KM,
            baseline_factor_kg_per_km: 0.08,
        }
    }
}
