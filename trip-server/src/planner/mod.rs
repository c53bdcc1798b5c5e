//! Route planning.
//!
//! Answers "how do I get from here to there, by each mode?" by fanning out
//! one routing request per transport profile, degrading each failed mode to
//! a straight-line estimate. Also hosts the hub-relay optimizer and the
//! fare/emissions estimates shown alongside a plan.

mod config;
pub mod estimate;
mod hub;
mod orchestrator;
mod provider;

pub use config::PlannerConfig;
pub use estimate::{FareCard, TripSummary, fare_cards, relay_savings, savings_vs_car};
pub use hub::{optimize_hub_route, optimize_hub_route_with};
pub use orchestrator::{RoutePlan, input_coordinate, plan_routes};
pub use provider::{OfflineSource, RouteProvider, RouteSource, fallback_route};
