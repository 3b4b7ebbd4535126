use geo::geometry::{Coord, Point};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

/// A geographic coordinate in degrees.
///
/// Equality and hashing compare the exact bit patterns of both
/// components, so a `Location` can key a `HashSet` and survive a round
/// trip through clipping unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub lng: f64,
    pub lat: f64,
}

impl Location {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.lng.to_bits() == other.lng.to_bits() && self.lat.to_bits() == other.lat.to_bits()
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lng.to_bits().hash(state);
        self.lat.to_bits().hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl From<Location> for Coord<f64> {
    fn from(Location { lng, lat }: Location) -> Self {
        Coord { x: lng, y: lat }
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Point::from(Coord::from(location))
    }
}

impl From<Coord<f64>> for Location {
    fn from(Coord { x, y }: Coord<f64>) -> Self {
        Self { lng: x, lat: y }
    }
}
