//! Domain types for the trip planner.
//!
//! This module contains the core value types shared by geocoding, routing
//! and optimization. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod coordinate;
mod error;
mod profile;
mod route;

pub use coordinate::{Coordinate, InvalidCoordinate};
pub use error::OptimizationInputError;
pub use profile::{InvalidProfile, TransportProfile, default_profiles};
pub use route::{OptimizedPath, PlaceSuggestion, RouteResult};
