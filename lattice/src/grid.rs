use crate::{
    bbox::BoundingBox,
    constants::METERS_PER_DEGREE_LAT,
    geodesy::{bearing, destination},
    Location,
};
use std::iter::successors;

/// Square grid of candidate sample points covering a bounding box.
///
/// Row 0 is `offset` meters north of the box's southwest corner and
/// rows advance northward; column 0 sits on the box's west edge and
/// columns advance eastward.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    offset: u32,
    rows: Vec<Vec<Location>>,
}

impl Lattice {
    /// Builds a lattice with one row and one column per multiple of
    /// `offset` in `offset..side_length`.
    ///
    /// Longitude steps are corrected through a bearing/destination
    /// projection so that neighbors in a row are `offset` meters apart
    /// at any latitude.
    pub fn generate(offset: u32, side_length: u32, bbox: &BoundingBox) -> Self {
        if offset == 0 {
            return Self {
                offset,
                rows: Vec::new(),
            };
        }

        let steps = || (offset..side_length).step_by(offset as usize);
        let columns = steps().len();
        let offset_m = f64::from(offset);
        let origin = bbox.south_west;

        let rows = steps()
            .map(|north_m| {
                let lat = origin.lat + f64::from(north_m) / METERS_PER_DEGREE_LAT;
                successors(Some(Location::new(origin.lng, lat)), |prev| {
                    Some(step_east(*prev, offset_m))
                })
                .take(columns)
                .collect()
            })
            .collect();

        Self { offset, rows }
    }

    #[cfg(test)]
    pub(crate) fn from_rows(offset: u32, rows: Vec<Vec<Location>>) -> Self {
        Self { offset, rows }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn rows(&self) -> &[Vec<Location>] {
        &self.rows
    }

    /// Number of columns in every row.
    pub fn columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Location> + '_ {
        self.rows.iter().flatten().copied()
    }
}

/// Returns the point `offset_m` meters east of `prev` on the same
/// parallel.
fn step_east(prev: Location, offset_m: f64) -> Location {
    let lng_estimate = offset_m / (METERS_PER_DEGREE_LAT * prev.lat.to_radians().cos());
    let estimate = Location::new(prev.lng + lng_estimate, prev.lat);
    let bearing = bearing(prev, estimate);
    Location::new(destination(prev, offset_m, bearing).lng, prev.lat)
}
