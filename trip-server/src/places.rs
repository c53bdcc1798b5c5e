//! Built-in named places and relay hubs.
//!
//! A small fixed catalog that resolves well-known place names to
//! coordinates without any network call, plus the default hubs the relay
//! optimizer considers when a request names none.

use serde::Serialize;

use crate::domain::Coordinate;

/// A place with a display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPlace {
    pub name: String,
    pub coordinate: Coordinate,
}

/// An ordered collection of named places.
///
/// Lookup by name ignores ASCII case. Names are unique under that
/// comparison; adding an existing name replaces its coordinate in place.
#[derive(Debug, Clone, Default)]
pub struct PlaceCatalog {
    places: Vec<NamedPlace>,
}

impl PlaceCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place, or move an existing one with the same name.
    pub fn add(&mut self, name: impl Into<String>, coordinate: Coordinate) {
        let name = name.into();
        match self
            .places
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.coordinate = coordinate,
            None => self.places.push(NamedPlace { name, coordinate }),
        }
    }

    /// Look up a place by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&NamedPlace> {
        let name = name.trim();
        self.places
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Coordinates of a named place.
    pub fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.get(name).map(|p| p.coordinate)
    }

    /// All places, in insertion order.
    pub fn places(&self) -> &[NamedPlace] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Builder for creating place catalogs.
///
/// Provides a fluent API for adding places. Entries with an invalid
/// coordinate are skipped.
#[derive(Debug, Default)]
pub struct PlaceCatalogBuilder {
    inner: PlaceCatalog,
}

impl PlaceCatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place.
    pub fn add(mut self, name: &str, lat: f64, lng: f64) -> Self {
        if let Ok(coordinate) = Coordinate::new(lat, lng) {
            self.inner.add(name, coordinate);
        }
        self
    }

    /// Build the catalog.
    pub fn build(self) -> PlaceCatalog {
        self.inner
    }
}

/// The built-in catalog of named places around San Francisco.
pub fn bay_area_places() -> PlaceCatalog {
    PlaceCatalogBuilder::new()
        .add("Eco Park", 37.7749, -122.4194)
        .add("City Center", 37.784, -122.409)
        .add("University", 37.8715, -122.273)
        .add("River Walk", 37.768, -122.45)
        .add("Transit Hub", 37.8079, -122.4177)
        .add("Innovation Lab", 37.789, -122.391)
        .build()
}

/// Relay hubs considered when a request names none.
pub fn default_hubs() -> PlaceCatalog {
    PlaceCatalogBuilder::new()
        .add("City Hub", 37.784, -122.409) // City Center
        .add("Transit Hub", 37.8079, -122.4177)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn empty_catalog() {
        let catalog = PlaceCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
        assert!(catalog.get("Eco Park").is_none());
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let catalog = bay_area_places();

        let park = catalog.get("  eco PARK ").unwrap();
        assert_eq!(park.name, "Eco Park");
        assert_eq!(park.coordinate, coord(37.7749, -122.4194));

        assert_eq!(
            catalog.coordinate("innovation lab"),
            Some(coord(37.789, -122.391))
        );
        assert!(catalog.get("Downtown").is_none());
    }

    #[test]
    fn builtin_catalog_order() {
        let names: Vec<_> = bay_area_places()
            .places()
            .iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(
            names,
            vec![
                "Eco Park",
                "City Center",
                "University",
                "River Walk",
                "Transit Hub",
                "Innovation Lab"
            ]
        );
    }

    #[test]
    fn adding_existing_name_replaces() {
        let mut catalog = PlaceCatalog::new();
        catalog.add("Depot", coord(1.0, 1.0));
        catalog.add("Yard", coord(2.0, 2.0));
        catalog.add("DEPOT", coord(3.0, 3.0));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.places()[0].name, "Depot");
        assert_eq!(catalog.coordinate("depot"), Some(coord(3.0, 3.0)));
    }

    #[test]
    fn builder_skips_invalid_coordinates() {
        let catalog = PlaceCatalogBuilder::new()
            .add("Valid", 10.0, 10.0)
            .add("Too far north", 91.0, 0.0)
            .add("Not a number", f64::NAN, 0.0)
            .build();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("Valid").is_some());
    }

    #[test]
    fn default_hubs_match_catalog() {
        let places = bay_area_places();
        let hubs = default_hubs();

        assert_eq!(hubs.len(), 2);
        assert_eq!(hubs.coordinate("City Hub"), places.coordinate("City Center"));
        assert_eq!(hubs.coordinate("Transit Hub"), places.coordinate("Transit Hub"));
    }
}
