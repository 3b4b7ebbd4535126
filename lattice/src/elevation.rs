use crate::{reconcile::reconcile, tiles::Tiles, ElevationSample, LatticeError, Location};
use log::warn;
use std::{fmt, path::PathBuf};

/// Something that can report ground elevation at a location.
pub trait ElevationSource {
    /// Returns the elevation at `location`, in meters.
    fn elevation(&self, location: Location) -> Result<f64, LatticeError>;

    /// Returns one elevation per point, in order.
    ///
    /// A failed read is logged and reported as 0.0.
    fn lookup(&self, points: &[Location]) -> Vec<f64> {
        points
            .iter()
            .map(|&location| {
                self.elevation(location).unwrap_or_else(|e| {
                    warn!("elevation at {location}: {e}, using 0");
                    0.0
                })
            })
            .collect()
    }
}

/// The three rasters consulted for every point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemSource {
    /// SRTM, 1 arc-second (~30 m).
    Srtm30,
    /// SRTM, 3 arc-second (~90 m).
    Srtm90,
    /// ALOS World 3D, 1 arc-second (~30 m).
    Aw3d30,
}

impl DemSource {
    pub const ALL: [Self; 3] = [Self::Srtm30, Self::Srtm90, Self::Aw3d30];

    pub fn name(self) -> &'static str {
        match self {
            Self::Srtm30 => "srtm30m",
            Self::Srtm90 => "srtm90m",
            Self::Aw3d30 => "aw3d30m",
        }
    }
}

impl fmt::Display for DemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One elevation source per [`DemSource`].
pub struct DemSet<S = Tiles> {
    pub srtm30: S,
    pub srtm90: S,
    pub aw3d30: S,
}

impl DemSet<Tiles> {
    /// Opens the tile directories of all three sources.
    pub fn open(srtm30: PathBuf, srtm90: PathBuf, aw3d30: PathBuf) -> Result<Self, LatticeError> {
        Ok(Self {
            srtm30: Tiles::new(srtm30)?,
            srtm90: Tiles::new(srtm90)?,
            aw3d30: Tiles::new(aw3d30)?,
        })
    }
}

impl<S: ElevationSource> DemSet<S> {
    pub fn source(&self, id: DemSource) -> &S {
        match id {
            DemSource::Srtm30 => &self.srtm30,
            DemSource::Srtm90 => &self.srtm90,
            DemSource::Aw3d30 => &self.aw3d30,
        }
    }

    /// Looks up `points` in a single source.
    pub fn lookup(&self, id: DemSource, points: &[Location]) -> Vec<f64> {
        self.source(id).lookup(points)
    }

    /// Returns all three readings for each point, in order.
    pub fn samples(&self, points: &[Location]) -> Vec<ElevationSample> {
        let srtm30 = self.lookup(DemSource::Srtm30, points);
        let srtm90 = self.lookup(DemSource::Srtm90, points);
        let aw3d30 = self.lookup(DemSource::Aw3d30, points);
        srtm30
            .into_iter()
            .zip(srtm90)
            .zip(aw3d30)
            .map(|((srtm30, srtm90), aw3d30)| ElevationSample {
                srtm30,
                srtm90,
                aw3d30,
            })
            .collect()
    }

    /// Returns one reconciled elevation per point.
    pub fn elevations(&self, points: &[Location]) -> Vec<f64> {
        reconcile(&self.samples(points))
    }
}
