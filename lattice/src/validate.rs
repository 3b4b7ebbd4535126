use crate::{
    constants::max_offset, geodesy::distance, restore::RestoredLattice, LatticeError, Location,
};
use log::{debug, warn};

/// Checks neighbor spacing row by row and flattens `lattice` into the
/// final, row-major list of sample points.
///
/// Consecutive points in a row must be within `offset + 0.5` meters. A
/// wider gap is tolerated away from the row's ends when some later
/// pair in the row is back within range; the isolated points between
/// the gap and that pair are left out.
///
/// The first and last rows are skipped when they hold fewer than two
/// points. Any other row that sparse fails validation.
///
/// # Errors
///
/// Fails when no row has two or more points, when a sparse row is not
/// the first or last row, or when a gap cannot be bridged.
pub fn validate(offset: u32, lattice: &RestoredLattice) -> Result<Vec<Location>, LatticeError> {
    let max = max_offset(offset);
    let rows = lattice.rows();
    if rows.iter().all(|row| row.len() <= 1) {
        return Err(LatticeError::Empty);
    }

    let mut points = Vec::with_capacity(lattice.len());
    for (i, row) in rows.iter().enumerate() {
        if row.len() <= 1 {
            if i == 0 || i + 1 == rows.len() {
                continue;
            }
            warn!("lattice row {i} has {} points", row.len());
            return Err(LatticeError::SparseRow { row: i });
        }
        validate_row(i, row, max, &mut points)?;
    }

    debug!("validate; points: {} of {}", points.len(), lattice.len());
    Ok(points)
}

fn validate_row(
    i: usize,
    row: &[Location],
    max: f64,
    points: &mut Vec<Location>,
) -> Result<(), LatticeError> {
    let mut j = 0;
    while j + 1 < row.len() {
        let current = row[j];
        if distance(current, row[j + 1]) <= max {
            points.push(current);
            j += 1;
            continue;
        }

        if j == 0 || j + 2 == row.len() {
            warn!("edge point {j} of lattice row {i} is out of reach");
            return Err(LatticeError::EdgeGap { row: i, col: j });
        }

        let rejoin = bridge(row, j, max).ok_or_else(|| {
            warn!("gap after point {j} of lattice row {i} is never bridged");
            LatticeError::UnbridgedGap { row: i, col: j }
        })?;
        debug!(
            "lattice row {i}: bridged gap after point {j}, skipping {}",
            rejoin - j - 1
        );
        points.push(current);
        j = rejoin;
    }

    if let Some(last) = row.last() {
        points.push(*last);
    }
    Ok(())
}

/// Looks past the gap following `row[j]` for the first pair of
/// consecutive points that are back within `max` of each other.
///
/// Returns the index of the first point of that pair.
fn bridge(row: &[Location], j: usize, max: f64) -> Option<usize> {
    (j + 1..row.len() - 1).find(|&k| distance(row[k], row[k + 1]) <= max)
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::{
        bbox::BoundingBox, geodesy::destination, grid::Lattice, restore::RestoredLattice,
        LatticeError, Location,
    };

    /// A single row of points spaced `gaps` meters apart, walking east.
    fn row(gaps: &[f64]) -> Vec<Location> {
        let mut row = vec![Location::new(14.5, 46.05)];
        for gap in gaps {
            let prev = *row.last().unwrap();
            row.push(Location::new(destination(prev, *gap, 90.0).lng, prev.lat));
        }
        row
    }

    fn lattice(rows: Vec<Vec<Location>>) -> RestoredLattice {
        RestoredLattice::from(rows)
    }

    #[test]
    fn test_evenly_spaced_row_passes_through() {
        let row = row(&[5.0, 5.0, 5.0, 5.0]);
        let points = validate(5, &lattice(vec![row.clone()])).unwrap();
        assert_eq!(points, row);
    }

    #[test]
    fn test_tolerates_max_offset() {
        let row = row(&[5.49, 5.45, 4.0]);
        assert_eq!(validate(5, &lattice(vec![row.clone()])).unwrap(), row);
        let row = self::row(&[5.0, 5.0, 5.6]);
        assert!(matches!(
            validate(5, &lattice(vec![row])),
            Err(LatticeError::EdgeGap { row: 0, col: 2 })
        ));
    }

    #[test]
    fn test_rows_are_concatenated() {
        let generated = Lattice::generate(
            5,
            40,
            &BoundingBox {
                south_west: Location::new(14.5, 46.05),
                north_east: Location::new(14.5005, 46.0504),
            },
        );
        let points = validate(5, &lattice(generated.rows().to_vec())).unwrap();
        assert_eq!(points, generated.points().collect::<Vec<_>>());
    }

    #[test]
    fn test_sparse_first_and_last_rows_are_skipped() {
        let full = row(&[5.0, 5.0, 5.0]);
        let rows = vec![vec![full[1]], full.clone(), full.clone(), vec![]];
        let points = validate(5, &lattice(rows)).unwrap();
        assert_eq!(points.len(), 8);
        assert_eq!(&points[..4], &full[..]);
    }

    #[test]
    fn test_sparse_second_row_fails() {
        let full = row(&[5.0, 5.0, 5.0]);
        let rows = vec![vec![], vec![full[1]], full.clone(), full.clone()];
        assert!(matches!(
            validate(5, &lattice(rows)),
            Err(LatticeError::SparseRow { row: 1 })
        ));

        let rows = vec![full.clone(), full.clone(), vec![full[2]], vec![]];
        assert!(matches!(
            validate(5, &lattice(rows)),
            Err(LatticeError::SparseRow { row: 2 })
        ));
    }

    #[test]
    fn test_sparse_interior_row_fails() {
        let full = row(&[5.0, 5.0, 5.0]);
        let rows = vec![full.clone(), vec![full[0]], full];
        let err = validate(5, &lattice(rows)).unwrap_err();
        assert!(matches!(err, LatticeError::SparseRow { row: 1 }));
        assert!(err.is_generation_failure());
    }

    #[test]
    fn test_empty_fails() {
        assert!(matches!(
            validate(5, &RestoredLattice::default()),
            Err(LatticeError::Empty)
        ));
        let rows = vec![vec![], vec![Location::new(14.5, 46.05)], vec![]];
        assert!(matches!(
            validate(5, &lattice(rows)),
            Err(LatticeError::Empty)
        ));
    }

    #[test]
    fn test_gap_at_row_start_fails() {
        let row = row(&[20.0, 5.0, 5.0, 5.0]);
        assert!(matches!(
            validate(5, &lattice(vec![row])),
            Err(LatticeError::EdgeGap { row: 0, col: 0 })
        ));
    }

    #[test]
    fn test_gap_at_row_end_fails() {
        let row = row(&[5.0, 5.0, 5.0, 20.0]);
        assert!(matches!(
            validate(5, &lattice(vec![row])),
            Err(LatticeError::EdgeGap { row: 0, col: 3 })
        ));
    }

    #[test]
    fn test_interior_gap_is_bridged() {
        // Two runs of the same row separated by a 40 m hole.
        let row = row(&[5.0, 5.0, 40.0, 5.0, 5.0]);
        let points = validate(5, &lattice(vec![row.clone()])).unwrap();
        assert_eq!(points, row);
    }

    #[test]
    fn test_isolated_points_in_gap_are_skipped() {
        // Point 3 has no neighbor within reach on either side.
        let row = row(&[5.0, 5.0, 20.0, 20.0, 5.0, 5.0]);
        let points = validate(5, &lattice(vec![row.clone()])).unwrap();
        let expected: Vec<Location> = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != 3)
            .map(|(_, p)| *p)
            .collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_long_run_of_isolated_points() {
        let row = row(&[5.0, 5.0, 20.0, 20.0, 20.0, 20.0, 5.0, 5.0]);
        let points = validate(5, &lattice(vec![row.clone()])).unwrap();
        let expected: Vec<Location> = [0, 1, 2, 6, 7, 8].iter().map(|&j| row[j]).collect();
        assert_eq!(points, expected);
    }

    #[test]
    fn test_unbridged_gap_fails() {
        let row = row(&[5.0, 5.0, 20.0, 20.0, 20.0]);
        assert!(matches!(
            validate(5, &lattice(vec![row])),
            Err(LatticeError::UnbridgedGap { row: 0, col: 2 })
        ));
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let full = row(&[5.0, 5.0, 40.0, 5.0, 5.0]);
        let second: Vec<Location> = full.iter().map(|p| destination(*p, 5.0, 0.0)).collect();
        let points = validate(5, &lattice(vec![full, second])).unwrap();
        let again = validate(5, &lattice(vec![points.clone()])).unwrap();
        assert_eq!(again, points);
    }
}
