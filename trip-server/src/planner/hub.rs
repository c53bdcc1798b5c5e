//! Hub-relay route optimization.
//!
//! A simplified two-point optimizer that needs no routing service: it
//! compares the great-circle direct path against relaying through each
//! candidate hub and keeps the shorter.

use crate::domain::{Coordinate, OptimizedPath};
use crate::geo::distance_km;

/// Differences smaller than this (in km) are treated as ties.
///
/// A hub lying exactly on the great circle gives a via-distance equal to the
/// direct distance, but rounding in the haversine terms can land either
/// side of it.
const TIE_TOLERANCE_KM: f64 = 1e-9;

/// Pick the shorter of the direct path and the best single-hub relay,
/// measured by great-circle distance.
///
/// Among hubs with equal via-distance the first one wins. Ties between
/// the best relay and the direct path favour the direct path, as does an
/// empty hub list.
pub fn optimize_hub_route(start: Coordinate, dest: Coordinate, hubs: &[Coordinate]) -> OptimizedPath {
    optimize_hub_route_with(start, dest, hubs, distance_km)
}

/// Hub-relay optimization under an arbitrary leg cost.
///
/// `leg_km` gives the cost of travelling between two points. With a true
/// metric such as great-circle distance the direct path can never lose;
/// a cost that penalises some legs (a closed road, a water crossing) is
/// what makes relaying worthwhile.
pub fn optimize_hub_route_with<F>(
    start: Coordinate,
    dest: Coordinate,
    hubs: &[Coordinate],
    leg_km: F,
) -> OptimizedPath
where
    F: Fn(Coordinate, Coordinate) -> f64,
{
    let direct = leg_km(start, dest);

    let best = hubs
        .iter()
        .map(|&hub| (hub, leg_km(start, hub) + leg_km(hub, dest)))
        .fold(None, |best: Option<(Coordinate, f64)>, (hub, via)| match best {
            Some((_, best_via)) if best_via <= via => best,
            _ => Some((hub, via)),
        });

    match best {
        Some((hub, via)) if via + TIE_TOLERANCE_KM < direct => {
            OptimizedPath::via(start, hub, dest, via)
        }
        _ => OptimizedPath::direct(start, dest, direct),
    }
}
