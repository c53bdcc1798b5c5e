//! Great-circle geometry.

use crate::domain::Coordinate;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometres.
///
/// Symmetric in its arguments and zero for identical points.
///
/// # Examples
///
/// ```
/// use trip_server::domain::Coordinate;
/// use trip_server::geo::distance_km;
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(0.0, 1.0).unwrap();
/// assert!((distance_km(a, b) - 111.195).abs() < 0.01);
/// ```
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let d_lat = (b.lat() - a.lat()).to_radians();
    let d_lng = (b.lng() - a.lng()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let a = coord(12.9903, 80.1709);
        assert_eq!(distance_km(a, a), 0.0);
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 1.0));
        assert!((d - 111.19).abs() < 0.01, "got {d}");
    }

    #[test]
    fn chennai_to_bengaluru() {
        let chennai_airport = coord(12.9903, 80.1709);
        let bengaluru = coord(12.9716, 77.5946);
        let d = distance_km(chennai_airport, bengaluru);
        assert!((d - 279.3).abs() < 1.0, "got {d}");
    }

    #[test]
    fn antipodal_points() {
        let d = distance_km(coord(0.0, 0.0), coord(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((d - half_circumference).abs() < 1e-6);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coordinate() -> impl Strategy<Value = Coordinate> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lng)| Coordinate::new(lat, lng).unwrap())
    }

    proptest! {
        /// Distance from a point to itself is zero
        #[test]
        fn identity(a in coordinate()) {
            prop_assert_eq!(distance_km(a, a), 0.0);
        }

        /// Distance is symmetric
        #[test]
        fn symmetric(a in coordinate(), b in coordinate()) {
            let ab = distance_km(a, b);
            let ba = distance_km(b, a);
            prop_assert!((ab - ba).abs() < 1e-9, "{} vs {}", ab, ba);
        }

        /// Distance never exceeds half the circumference
        #[test]
        fn bounded(a in coordinate(), b in coordinate()) {
            let d = distance_km(a, b);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }

        /// Triangle inequality holds for any relay point
        #[test]
        fn triangle_inequality(a in coordinate(), b in coordinate(), c in coordinate()) {
            prop_assert!(distance_km(a, c) <= distance_km(a, b) + distance_km(b, c) + 1e-6);
        }
    }
}
