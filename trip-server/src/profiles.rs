//! Loading transport profiles from a file.
//!
//! The file is a JSON array of profiles:
//!
//! ```json
//! [
//!   {"key": "car", "label": "Car", "emission_factor_kg_per_km": 0.21, "fallback_speed_kmh": 70},
//!   {"key": "bike", "label": "Bike", "emission_factor_kg_per_km": 0, "fallback_speed_kmh": 15}
//! ]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::TransportProfile;

/// Errors from loading a profile file.
#[derive(Debug, thiserror::Error)]
pub enum ProfilesError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid profile list (includes invalid profiles)
    #[error("invalid profile file: {0}")]
    Parse(#[from] serde_json::Error),

    /// The file lists no profiles
    #[error("profile file lists no profiles")]
    Empty,

    /// Two profiles share a key
    #[error("duplicate profile key: {0}")]
    DuplicateKey(String),

    /// More profiles than one plan may request
    #[error("profile file lists {count} profiles (maximum {max})")]
    TooMany { count: usize, max: usize },
}

/// Parse a JSON profile list, validating every profile and key uniqueness.
///
/// The list becomes the default set for every plan, so it may hold at most
/// `max_profiles` entries.
pub fn parse_profiles(
    json: &str,
    max_profiles: usize,
) -> Result<Vec<TransportProfile>, ProfilesError> {
    let profiles: Vec<TransportProfile> = serde_json::from_str(json)?;

    if profiles.is_empty() {
        return Err(ProfilesError::Empty);
    }
    if profiles.len() > max_profiles {
        return Err(ProfilesError::TooMany {
            count: profiles.len(),
            max: max_profiles,
        });
    }

    let mut seen = HashSet::new();
    for profile in &profiles {
        if !seen.insert(profile.key()) {
            return Err(ProfilesError::DuplicateKey(profile.key().to_string()));
        }
    }

    Ok(profiles)
}

/// Load profiles from a JSON file.
pub fn load_profiles(
    path: impl AsRef<Path>,
    max_profiles: usize,
) -> Result<Vec<TransportProfile>, ProfilesError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| ProfilesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profiles(&json, max_profiles)
}
