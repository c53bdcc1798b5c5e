//! Domain error types.
//!
//! These errors represent invalid inputs to the planning layer. They are
//! distinct from service/IO errors, which are recovered locally.

use super::InvalidCoordinate;

/// Invalid input to route planning or hub optimization.
///
/// This is the only error that fails a whole planning call; per-mode
/// routing failures are absorbed by the fallback estimate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimizationInputError {
    /// A start, destination, or hub coordinate is out of range or not finite
    #[error("invalid {role} coordinate: {source}")]
    InvalidCoordinate {
        role: &'static str,
        #[source]
        source: InvalidCoordinate,
    },

    /// No transport profiles were requested
    #[error("at least one transport profile is required")]
    NoProfiles,

    /// The same profile key appears more than once
    #[error("duplicate transport profile: {0}")]
    DuplicateProfile(String),

    /// More profiles than a single planning call accepts
    #[error("too many transport profiles: {count} (maximum {max})")]
    TooManyProfiles { count: usize, max: usize },

    /// A requested profile key is not configured
    #[error("unknown transport profile: {0}")]
    UnknownProfile(String),
}
