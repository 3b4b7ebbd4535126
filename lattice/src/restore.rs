//! Re-gridding of clipped points and repair of row edges.
//!
//! Clipping flattens the lattice into a bare list of survivors. The
//! restorer maps each survivor back to its generation row and column,
//! drops rows that collapsed at the top or bottom of the grid, and
//! removes edge points that have no nearby continuation.
//!
//! Each repair decision is a pure predicate over an immutable snapshot
//! of the re-gridded rows, so dropping one point never changes the
//! outcome for another.

use crate::{constants::max_offset, geodesy::distance, grid::Lattice, LatticeError, Location};
use log::debug;
use std::collections::HashSet;

/// Clipped lattice, re-aligned to generation rows.
///
/// Rows may be shorter than the generation grid and need not share a
/// length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoredLattice {
    rows: Vec<Vec<Location>>,
}

impl RestoredLattice {
    pub fn rows(&self) -> &[Vec<Location>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Location>> {
        self.rows
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<Vec<Location>>> for RestoredLattice {
    fn from(rows: Vec<Vec<Location>>) -> Self {
        Self { rows }
    }
}

/// A surviving point and the generation column it came from.
#[derive(Debug, Clone, Copy)]
struct Cell {
    col: usize,
    location: Location,
}

/// Rebuilds `lattice` from the points in `clipped` and repairs its
/// edges.
///
/// # Errors
///
/// [`LatticeError::Empty`] if no row keeps two or more points, and
/// [`LatticeError::SparseRow`] if a row between two populated rows
/// keeps one or none.
pub fn restore(lattice: &Lattice, clipped: &[Location]) -> Result<RestoredLattice, LatticeError> {
    let members: HashSet<Location> = clipped.iter().copied().collect();
    let regridded = lattice
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .filter(|(_, location)| members.contains(*location))
                .map(|(col, &location)| Cell { col, location })
                .collect()
        })
        .collect();

    let (first_row, snapshot) = trim_sparse_rows(regridded)?;
    debug!(
        "restore; rows: {} of {}, first: {first_row}",
        snapshot.len(),
        lattice.rows().len()
    );

    let last_col = lattice.columns().saturating_sub(1);
    let max = max_offset(lattice.offset());
    let rows = (0..snapshot.len())
        .map(|i| repair_row(&snapshot, i, last_col, max))
        .collect();
    Ok(RestoredLattice { rows })
}

fn is_populated(row: &[Cell]) -> bool {
    row.len() > 1
}

/// Drops leading and trailing rows with fewer than two points.
///
/// Returns the generation index of the first kept row along with the
/// kept rows.
fn trim_sparse_rows(rows: Vec<Vec<Cell>>) -> Result<(usize, Vec<Vec<Cell>>), LatticeError> {
    let first = rows
        .iter()
        .position(|row| is_populated(row))
        .ok_or(LatticeError::Empty)?;
    let last = rows
        .iter()
        .rposition(|row| is_populated(row))
        .unwrap_or(first);

    if let Some(gap) = rows[first..=last].iter().position(|row| !is_populated(row)) {
        return Err(LatticeError::SparseRow { row: first + gap });
    }

    let kept = rows.into_iter().skip(first).take(last - first + 1).collect();
    Ok((first, kept))
}

fn repair_row(rows: &[Vec<Cell>], i: usize, last_col: usize, max: f64) -> Vec<Location> {
    let row = rows[i].as_slice();
    let is_last_row = i + 1 == rows.len();
    let south = i.checked_sub(1).map(|s| rows[s].as_slice());
    let north = rows.get(i + 1).map(Vec::as_slice);

    row.iter()
        .enumerate()
        .filter(|&(j, cell)| {
            // First points lean on the row to the north, last points on
            // the row to the south. The top row has no north.
            let edge = if j == 0 {
                row.get(1).map(|next| (next, if is_last_row { south } else { north }))
            } else if j + 1 == row.len() {
                row.get(j - 1).map(|prev| (prev, south))
            } else {
                None
            };
            if let Some((row_neighbor, continuation)) = edge {
                if is_separated(cell, row_neighbor, max)
                    && !continues_into(row, continuation, cell, max)
                {
                    return false;
                }
            }
            if !is_last_row && (cell.col == 0 || cell.col == last_col) {
                return is_vertically_connected(cell, south, north, max);
            }
            true
        })
        .map(|(_, cell)| cell.location)
        .collect()
}

fn cell_at(row: &[Cell], col: usize) -> Option<&Cell> {
    row.binary_search_by_key(&col, |cell| cell.col)
        .ok()
        .map(|idx| &row[idx])
}

fn is_separated(a: &Cell, b: &Cell, max: f64) -> bool {
    distance(a.location, b.location) > max
}

/// A separated row-edge point is worth keeping only when the
/// neighboring row is longer and has a point right next to it.
fn continues_into(row: &[Cell], neighbor: Option<&[Cell]>, cell: &Cell, max: f64) -> bool {
    neighbor.map_or(false, |neighbor| {
        neighbor.len() > row.len()
            && cell_at(neighbor, cell.col).map_or(false, |other| !is_separated(cell, other, max))
    })
}

/// Points on the outer grid columns must be close to both vertical
/// neighbors. A missing neighbor keeps the point.
fn is_vertically_connected(
    cell: &Cell,
    south: Option<&[Cell]>,
    north: Option<&[Cell]>,
    max: f64,
) -> bool {
    let south = south.and_then(|row| cell_at(row, cell.col));
    let north = north.and_then(|row| cell_at(row, cell.col));
    match (south, north) {
        (Some(south), Some(north)) => {
            distance(cell.location, south.location) < max
                && distance(cell.location, north.location) < max
        }
        _ => true,
    }
}
