//! Transport profile configuration.

use serde::{Deserialize, Serialize};

/// Error returned when a transport profile has invalid parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid transport profile {key:?}: {reason}")]
pub struct InvalidProfile {
    key: String,
    reason: &'static str,
}

/// Static parameters for one transport mode.
///
/// The `key` doubles as the routing-service profile name (e.g. `car`,
/// `bike`, `foot`), so it must be a short URL-safe identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile")]
pub struct TransportProfile {
    key: String,
    label: String,
    emission_factor_kg_per_km: f64,
    fallback_speed_kmh: f64,
}

impl TransportProfile {
    /// Create a validated profile.
    ///
    /// The emission factor must be finite and non-negative, the fallback
    /// speed finite and strictly positive.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        emission_factor_kg_per_km: f64,
        fallback_speed_kmh: f64,
    ) -> Result<Self, InvalidProfile> {
        let key = key.into();
        let invalid = |reason| InvalidProfile {
            key: key.clone(),
            reason,
        };

        if key.is_empty()
            || !key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(invalid("key must be non-empty ASCII alphanumerics, '-' or '_'"));
        }
        if !emission_factor_kg_per_km.is_finite() || emission_factor_kg_per_km < 0.0 {
            return Err(invalid("emission factor must be finite and >= 0"));
        }
        if !fallback_speed_kmh.is_finite() || fallback_speed_kmh <= 0.0 {
            return Err(invalid("fallback speed must be finite and > 0"));
        }

        Ok(Self {
            key,
            label: label.into(),
            emission_factor_kg_per_km,
            fallback_speed_kmh,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn emission_factor_kg_per_km(&self) -> f64 {
        self.emission_factor_kg_per_km
    }

    pub fn fallback_speed_kmh(&self) -> f64 {
        self.fallback_speed_kmh
    }

    /// Emissions for travelling `distance_km` with this mode.
    pub fn emissions_for(&self, distance_km: f64) -> f64 {
        distance_km * self.emission_factor_kg_per_km
    }
}

#[derive(Deserialize)]
struct RawProfile {
    key: String,
    label: String,
    emission_factor_kg_per_km: f64,
    fallback_speed_kmh: f64,
}

impl TryFrom<RawProfile> for TransportProfile {
    type Error = InvalidProfile;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        TransportProfile::new(
            raw.key,
            raw.label,
            raw.emission_factor_kg_per_km,
            raw.fallback_speed_kmh,
        )
    }
}

/// The default set of modes: car, bike and walking.
///
/// Keys match the public OSRM profile names.
pub fn default_profiles() -> Vec<TransportProfile> {
    [
        ("car", "Car", 0.21, 70.0),
        ("bike", "Bike", 0.0, 15.0),
        ("foot", "Walk", 0.0, 5.0),
    ]
    .into_iter()
    .filter_map(|(key, label, factor, speed)| TransportProfile::new(key, label, factor, speed).ok())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_profile() {
        let p = TransportProfile::new("car", "Car", 0.21, 70.0).unwrap();
        assert_eq!(p.key(), "car");
        assert_eq!(p.label(), "Car");
        assert_eq!(p.emission_factor_kg_per_km(), 0.21);
        assert_eq!(p.fallback_speed_kmh(), 70.0);
    }

    #[test]
    fn zero_emission_factor_allowed() {
        assert!(TransportProfile::new("bike", "Bike", 0.0, 15.0).is_ok());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(TransportProfile::new("car", "Car", -0.1, 70.0).is_err());
        assert!(TransportProfile::new("car", "Car", f64::NAN, 70.0).is_err());
        assert!(TransportProfile::new("car", "Car", 0.21, 0.0).is_err());
        assert!(TransportProfile::new("car", "Car", 0.21, -5.0).is_err());
        assert!(TransportProfile::new("car", "Car", 0.21, f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_bad_keys() {
        assert!(TransportProfile::new("", "Empty", 0.0, 5.0).is_err());
        assert!(TransportProfile::new("a/b", "Slash", 0.0, 5.0).is_err());
        assert!(TransportProfile::new("car pool", "Space", 0.0, 5.0).is_err());
        assert!(TransportProfile::new("e-bike_2", "E-bike", 0.0, 20.0).is_ok());
    }

    #[test]
    fn error_display() {
        let err = TransportProfile::new("car", "Car", 0.21, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid transport profile \"car\": fallback speed must be finite and > 0"
        );
    }

    #[test]
    fn emissions_scale_with_distance() {
        let p = TransportProfile::new("car", "Car", 0.21, 70.0).unwrap();
        assert!((p.emissions_for(10.0) - 2.1).abs() < 1e-12);
        assert_eq!(p.emissions_for(0.0), 0.0);
    }

    #[test]
    fn default_profiles_in_order() {
        let profiles = default_profiles();
        let keys: Vec<_> = profiles.iter().map(|p| p.key()).collect();
        assert_eq!(keys, ["car", "bike", "foot"]);
        assert_eq!(profiles[2].label(), "Walk");
    }

    #[test]
    fn deserialize_validates() {
        let ok: TransportProfile = serde_json::from_str(
            r#"{"key":"bus","label":"Bus","emission_factor_kg_per_km":0.08,"fallback_speed_kmh":25}"#,
        )
        .unwrap();
        assert_eq!(ok.key(), "bus");

        let bad: Result<TransportProfile, _> = serde_json::from_str(
            r#"{"key":"bus","label":"Bus","emission_factor_kg_per_km":0.08,"fallback_speed_kmh":0}"#,
        );
        assert!(bad.is_err());
    }
}
