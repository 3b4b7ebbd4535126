//! Fixed values shared by every stage of the pipeline.
//!
//! Spacing decisions in the restorer and validator compare distances
//! produced by the generator, so all of them must agree on these.

/// Mean earth radius in meters.
pub const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

/// Approximate length of one degree of latitude, in meters.
pub const METERS_PER_DEGREE_LAT: f64 = 111_111.0;

/// Slack added to the lattice offset when deciding whether two points
/// are neighbors.
pub const MAX_OFFSET_MARGIN: f64 = 0.5;

/// Largest disagreement, in meters, tolerated between the 90 m source
/// and either 30 m source before the 90 m reading is ignored.
pub const OUTLIER_THRESHOLD: f64 = 2.0;

/// Fewest vertices that describe a closed contour.
pub const MIN_ROUTE_POINTS: usize = 3;

/// Lattice offsets accepted from callers, in meters.
pub const ALLOWED_OFFSETS: [u32; 2] = [5, 15];

/// Offset used when a caller asks for anything not in
/// [`ALLOWED_OFFSETS`].
pub const DEFAULT_OFFSET: u32 = 5;

/// Maximum distance between two neighboring lattice points.
pub fn max_offset(offset: u32) -> f64 {
    f64::from(offset) + MAX_OFFSET_MARGIN
}

/// Maps a requested offset onto one the pipeline supports.
pub fn normalize_offset(requested: u32) -> u32 {
    if ALLOWED_OFFSETS.contains(&requested) {
        requested
    } else {
        DEFAULT_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::{max_offset, normalize_offset};

    #[test]
    fn test_normalize_offset() {
        assert_eq!(normalize_offset(5), 5);
        assert_eq!(normalize_offset(15), 15);
        assert_eq!(normalize_offset(0), 5);
        assert_eq!(normalize_offset(10), 5);
        assert_eq!(normalize_offset(100), 5);
    }

    #[test]
    fn test_max_offset() {
        assert_eq!(max_offset(5), 5.5);
        assert_eq!(max_offset(15), 15.5);
    }
}
