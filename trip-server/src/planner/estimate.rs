//! Fare and emissions estimates.
//!
//! Rough per-mode figures used to annotate a planned trip. These are
//! display estimates, not quotes.

use serde::Serialize;

/// Default emission factor of a private car in kg CO₂ per km.
pub const CAR_FACTOR_KG_PER_KM: f64 = 0.21;

/// CO₂ credited per km of a hub-optimized trip when comparing it with
/// driving.
pub const RELAY_SAVINGS_KG_PER_KM: f64 = 0.12;

/// Static fare parameters for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareRate {
    pub mode: &'static str,
    pub base_fare: f64,
    pub per_km: f64,
    pub co2_kg_per_km: f64,
}

/// Built-in fare table.
pub const FARE_TABLE: [FareRate; 5] = [
    FareRate {
        mode: "bus",
        base_fare: 0.5,
        per_km: 0.18,
        co2_kg_per_km: 0.08,
    },
    FareRate {
        mode: "metro",
        base_fare: 0.8,
        per_km: 0.22,
        co2_kg_per_km: 0.05,
    },
    FareRate {
        mode: "rideshare",
        base_fare: 1.5,
        per_km: 0.7,
        co2_kg_per_km: 0.18,
    },
    FareRate {
        mode: "bike",
        base_fare: 0.0,
        per_km: 0.0,
        co2_kg_per_km: 0.0,
    },
    FareRate {
        mode: "walk",
        base_fare: 0.0,
        per_km: 0.0,
        co2_kg_per_km: 0.0,
    },
];

/// Estimated cost of one mode over a given distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FareCard {
    pub mode: &'static str,
    pub fare: f64,
    pub co2_kg: f64,
}

impl FareRate {
    pub fn card(&self, distance_km: f64) -> FareCard {
        let distance_km = distance_km.max(0.0);
        FareCard {
            mode: self.mode,
            fare: self.base_fare + self.per_km * distance_km,
            co2_kg: self.co2_kg_per_km * distance_km,
        }
    }
}

/// Fare cards for every mode in the table, cheapest first.
///
/// Modes with equal fares keep their table order.
pub fn fare_cards(distance_km: f64) -> Vec<FareCard> {
    let mut cards: Vec<FareCard> = FARE_TABLE.iter().map(|r| r.card(distance_km)).collect();
    cards.sort_by(|a, b| a.fare.total_cmp(&b.fare));
    cards
}

/// CO₂ saved by travelling `distance_km` at `factor` kg/km instead of by
/// a car emitting `car_factor` kg/km. Never negative.
pub fn savings_vs_car(distance_km: f64, factor_kg_per_km: f64, car_factor_kg_per_km: f64) -> f64 {
    (distance_km * car_factor_kg_per_km - distance_km * factor_kg_per_km).max(0.0)
}

/// CO₂ saved by making a hub-optimized trip of `distance_km` instead of
/// driving it.
pub fn relay_savings(distance_km: f64) -> f64 {
    distance_km.max(0.0) * RELAY_SAVINGS_KG_PER_KM
}

/// Headline figures for a planned trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSummary {
    pub distance_km: f64,
    pub duration_min: f64,
    pub co2_saved_kg: f64,
    pub fares: Vec<FareCard>,
}

impl TripSummary {
    /// Summarize a trip, crediting it with `baseline_factor` kg/km against
    /// a car emitting `car_factor` kg/km.
    pub fn new(distance_km: f64, duration_min: f64, car_factor: f64, baseline_factor: f64) -> Self {
        Self {
            distance_km,
            duration_min,
            co2_saved_kg: savings_vs_car(distance_km, baseline_factor, car_factor),
            fares: fare_cards(distance_km),
        }
    }
}
