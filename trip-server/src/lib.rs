//! Multi-modal trip planner server.
//!
//! Answers: "how far, how long and how much CO₂ is this trip by car, bike
//! or on foot?" Routes come from an OSRM-compatible service and degrade to
//! straight-line estimates when it is unavailable; place names are resolved
//! with debounced Nominatim search.

pub mod cache;
pub mod config;
pub mod domain;
pub mod geo;
pub mod geocode;
pub mod osrm;
pub mod places;
pub mod planner;
pub mod polyline;
pub mod profiles;
pub mod web;
