//! Elevation sample lattices for closed-contour routes.
//!
//! Given a route whose last point connects back to its first, this
//! crate lays a square grid of points over the route's bounding box,
//! keeps the points inside the route, repairs the grid's ragged edges,
//! and checks that every kept point has a neighbor within reach. The
//! resulting points can then be looked up in three elevation rasters
//! whose readings are reconciled into a single elevation per point.
//!
//! ```no_run
//! use lattice::{DemSet, Location, Sampler};
//!
//! # fn main() -> Result<(), lattice::LatticeError> {
//! let route = vec![
//!     Location::new(14.500, 46.050),
//!     Location::new(14.503, 46.050),
//!     Location::new(14.503, 46.052),
//!     Location::new(14.500, 46.052),
//! ];
//! let sampler = Sampler::builder().offset(5).route(route).build()?;
//! let dems = DemSet::open(
//!     "data/srtm30".into(),
//!     "data/srtm90".into(),
//!     "data/aw3d30".into(),
//! )?;
//! let elevations = sampler.elevations(&dems);
//! # Ok(())
//! # }
//! ```

pub mod bbox;
pub mod clip;
pub mod constants;
mod elevation;
mod error;
pub mod geodesy;
pub mod grid;
mod location;
pub mod reconcile;
pub mod restore;
mod sampler;
mod tiles;
pub mod validate;

pub use crate::{
    bbox::BoundingBox,
    clip::clip,
    elevation::{DemSet, DemSource, ElevationSource},
    error::LatticeError,
    grid::Lattice,
    location::Location,
    reconcile::{reconcile, ElevationSample},
    restore::{restore, RestoredLattice},
    sampler::{Sampler, SamplerBuilder},
    tiles::Tiles,
    validate::validate,
};
pub use geo;
pub use hgt;
