use crate::{
    bbox::BoundingBox, clip::clip, constants::MIN_ROUTE_POINTS, elevation::DemSet, grid::Lattice,
    restore::restore, validate::validate, ElevationSource, LatticeError, Location,
};
use log::debug;
use std::time::Instant;

/// Validated sample points covering the interior of a closed route.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampler {
    /// Requested spacing between neighboring points, in meters.
    pub offset: u32,

    /// Box enclosing the route.
    pub bbox: BoundingBox,

    /// Side of the generated lattice, in meters.
    pub side_length: u32,

    /// Sample points in row-major order, south to north and west to
    /// east.
    pub points: Vec<Location>,
}

impl Sampler {
    pub fn builder() -> SamplerBuilder {
        SamplerBuilder {
            offset: None,
            route: None,
        }
    }

    /// Looks up every sample point in all three sources and reconciles
    /// the readings into one elevation per point.
    pub fn elevations<S: ElevationSource>(&self, dems: &DemSet<S>) -> Vec<f64> {
        let now = Instant::now();
        let elevations = dems.elevations(&self.points);
        debug!(
            "elevations; len: {}, exec: {:?}",
            elevations.len(),
            now.elapsed()
        );
        elevations
    }
}

pub struct SamplerBuilder {
    /// Lattice spacing (meters).
    offset: Option<u32>,

    /// Closed contour; the last point connects back to the first.
    route: Option<Vec<Location>>,
}

impl SamplerBuilder {
    pub fn offset(mut self, meters: u32) -> Self {
        self.offset = Some(meters);
        self
    }

    pub fn route(mut self, route: Vec<Location>) -> Self {
        self.route = Some(route);
        self
    }

    /// Generates, clips, restores, and validates the lattice.
    ///
    /// # Errors
    ///
    /// Fails on a missing parameter, a zero offset, or a route with
    /// fewer than three points. Otherwise fails with one of the errors
    /// for which [`LatticeError::is_generation_failure`] holds when the
    /// route and offset admit no usable lattice.
    pub fn build(&self) -> Result<Sampler, LatticeError> {
        let offset = self.offset.ok_or(LatticeError::Builder("offset"))?;
        let route = self.route.as_deref().ok_or(LatticeError::Builder("route"))?;
        if offset == 0 {
            return Err(LatticeError::Offset);
        }
        let bbox = match BoundingBox::from_route(route) {
            Some(bbox) if route.len() >= MIN_ROUTE_POINTS => bbox,
            _ => return Err(LatticeError::InsufficientInput(route.len())),
        };

        let now = Instant::now();
        let side_length = bbox.side_length();
        let lattice = Lattice::generate(offset, side_length, &bbox);
        let generate_runtime = now.elapsed();

        let now = Instant::now();
        let clipped = clip(route, lattice.points());
        let clip_runtime = now.elapsed();

        let now = Instant::now();
        let restored = restore(&lattice, &clipped)?;
        let restore_runtime = now.elapsed();

        let now = Instant::now();
        let points = validate(offset, &restored)?;
        let validate_runtime = now.elapsed();

        debug!(
            "sampler; side: {side_length}, generated: {}, clipped: {}, restored: {}, \
             validated: {}, generate_exec: {:?}, clip_exec: {:?}, restore_exec: {:?}, \
             validate_exec: {:?}",
            lattice.len(),
            clipped.len(),
            restored.len(),
            points.len(),
            generate_runtime,
            clip_runtime,
            restore_runtime,
            validate_runtime,
        );

        Ok(Sampler {
            offset,
            bbox,
            side_length,
            points,
        })
    }
}
