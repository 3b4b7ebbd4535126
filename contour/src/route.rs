use anyhow::{Context, Error as AnyError};
use lattice::Location;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

/// A route vertex as it appears in route files.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoutePoint {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

impl From<RoutePoint> for Location {
    fn from(RoutePoint { lat, lng }: RoutePoint) -> Self {
        Self::new(lng, lat)
    }
}

pub fn read_route(path: &Path) -> Result<Vec<Location>, AnyError> {
    let rdr = BufReader::new(File::open(path).with_context(|| format!("opening {path:?}"))?);
    let points: Vec<RoutePoint> =
        serde_json::from_reader(rdr).with_context(|| format!("parsing {path:?}"))?;
    Ok(points.into_iter().map(Location::from).collect())
}
