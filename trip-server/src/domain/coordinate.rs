//! Geographic coordinate type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when constructing an invalid coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Latitude is always within `-90..=90` and longitude within `-180..=180`.
/// Both are finite. This type guarantees that any `Coordinate` value is
/// valid by construction, including values produced by deserialization.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
///
/// let paris = Coordinate::new(48.8566, 2.3522).unwrap();
/// assert_eq!(paris.lat(), 48.8566);
///
/// // Out of range is rejected
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// assert!(Coordinate::new(0.0, -180.5).is_err());
///
/// // NaN is rejected
/// assert!(Coordinate::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(InvalidCoordinate {
                reason: "latitude and longitude must be finite",
            });
        }

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                reason: "latitude must be within -90..=90",
            });
        }

        if !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate {
                reason: "longitude must be within -180..=180",
            });
        }

        Ok(Coordinate { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Quantize to integer units of 1e-5 degrees.
    ///
    /// This is the precision of the compact polyline format, so two
    /// coordinates with the same quantized value are indistinguishable
    /// to the routing service.
    pub fn quantized(&self) -> (i32, i32) {
        (
            (self.lat * 1e5).round() as i32,
            (self.lng * 1e5).round() as i32,
        )
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinate({}, {})", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}

/// Unvalidated wire form of a coordinate.
#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(90.0001, 0.0).is_err());
        assert!(Coordinate::new(-90.0001, 0.0).is_err());
        assert!(Coordinate::new(0.0, 180.0001).is_err());
        assert!(Coordinate::new(0.0, -180.0001).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
        assert!(Coordinate::new(f64::INFINITY, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn error_display() {
        let err = Coordinate::new(100.0, 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid coordinate: latitude must be within -90..=90"
        );
    }

    #[test]
    fn quantized_matches_polyline_precision() {
        let c = Coordinate::new(38.5, -120.2).unwrap();
        assert_eq!(c.quantized(), (3_850_000, -12_020_000));

        let c = Coordinate::new(12.345_674, 0.000_004).unwrap();
        assert_eq!(c.quantized(), (1_234_567, 0));
    }

    #[test]
    fn display_and_debug() {
        let c = Coordinate::new(12.9716, 77.5946).unwrap();
        assert_eq!(c.to_string(), "12.97160,77.59460");
        assert_eq!(format!("{:?}", c), "Coordinate(12.9716, 77.5946)");
    }

    #[test]
    fn serde_roundtrip() {
        let c = Coordinate::new(37.7749, -122.4194).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"lat":37.7749,"lng":-122.4194}"#);

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn deserialize_validates() {
        let result: Result<Coordinate, _> = serde_json::from_str(r#"{"lat":95.0,"lng":0.0}"#);
        assert!(result.is_err());
    }
}
