use crate::{constants::METERS_PER_DEGREE_LAT, geodesy::distance, Location};

/// Smallest lat/lng aligned envelope around a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum longitude and minimum latitude.
    pub south_west: Location,

    /// Maximum longitude and maximum latitude.
    pub north_east: Location,
}

impl BoundingBox {
    /// Returns the envelope of `route`, or `None` if `route` is empty.
    pub fn from_route(route: &[Location]) -> Option<Self> {
        let (first, rest) = route.split_first()?;
        let (mut south_west, mut north_east) = (*first, *first);
        for point in rest {
            south_west.lng = south_west.lng.min(point.lng);
            south_west.lat = south_west.lat.min(point.lat);
            north_east.lng = north_east.lng.max(point.lng);
            north_east.lat = north_east.lat.max(point.lat);
        }
        Some(Self {
            south_west,
            north_east,
        })
    }

    /// Returns `true` if `location` lies within this box, edges
    /// included.
    pub fn contains(&self, location: Location) -> bool {
        (self.south_west.lng..=self.north_east.lng).contains(&location.lng)
            && (self.south_west.lat..=self.north_east.lat).contains(&location.lat)
    }

    /// Returns the side length, in meters, of a square lattice large
    /// enough to cover this box.
    ///
    /// The north-south extent uses a fixed meters-per-degree factor and
    /// the east-west extent is the remaining leg of a right triangle
    /// whose hypotenuse is the box diagonal. Good enough for local and
    /// regional routes; drifts for very large or near-polar ones.
    pub fn extent(&self) -> f64 {
        let diagonal = distance(self.south_west, self.north_east);
        let north_south = METERS_PER_DEGREE_LAT * (self.north_east.lat - self.south_west.lat);
        let east_west = (diagonal.powi(2) - north_south.powi(2)).max(0.0).sqrt();
        north_south.max(east_west)
    }

    /// Returns [`extent`](Self::extent) truncated to whole meters.
    pub fn side_length(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let side = self.extent().floor() as u32;
        side
    }
}
