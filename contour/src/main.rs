mod options;
mod route;

use anyhow::Error as AnyError;
use clap::Parser;
use lattice::{constants::normalize_offset, DemSet, ElevationSource, Location, Sampler};
use log::{info, warn};
use options::{Cli, Command as CliCmd};
use rayon::prelude::*;
use route::read_route;
use serde::Serialize;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

const GENERATION_FAILURE: &str =
    "cannot generate lattice, please try again with another route or offset";

fn main() -> Result<(), AnyError> {
    let Cli {
        srtm30,
        srtm90,
        aw3d30,
        offset: requested_offset,
        linear,
        routes,
        cmd,
    } = Cli::parse();

    env_logger::init();

    let offset = normalize_offset(requested_offset);
    if offset != requested_offset {
        info!("unsupported offset {requested_offset} m, using {offset} m");
    }

    let dems = DemSet::open(srtm30, srtm90, aw3d30)?;
    let reports = routes
        .par_iter()
        .map(|path| sample(path, offset, linear, &dems))
        .collect::<Result<Vec<Report>, AnyError>>()?;

    let mut stdout = std::io::stdout().lock();
    match cmd {
        CliCmd::Csv => print_csv(&mut stdout, &reports)?,
        CliCmd::Json => print_json(&mut stdout, &reports)?,
    };
    Ok(())
}

/// Outcome of sampling a single route.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Report {
    route: PathBuf,
    samples: Vec<Sample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct Sample {
    lat: f64,
    lng: f64,
    elevation: f64,
}

/// Samples one route file.
///
/// Route files that cannot be read are fatal. Routes that cannot be
/// sampled are reported as such so that other routes still complete.
fn sample<S: ElevationSource>(
    path: &Path,
    offset: u32,
    linear: bool,
    dems: &DemSet<S>,
) -> Result<Report, AnyError> {
    let route = read_route(path)?;
    let points = if linear {
        Ok(route)
    } else {
        Sampler::builder()
            .offset(offset)
            .route(route)
            .build()
            .map(|sampler| sampler.points)
    };

    let report = match points {
        Ok(points) => Report {
            route: path.to_owned(),
            samples: samples(&points, &dems.elevations(&points)),
            error: None,
        },
        Err(e) => {
            warn!("{path:?}: {e}");
            let error = if e.is_generation_failure() {
                GENERATION_FAILURE.to_owned()
            } else {
                e.to_string()
            };
            Report {
                route: path.to_owned(),
                samples: Vec::new(),
                error: Some(error),
            }
        }
    };
    Ok(report)
}

fn samples(points: &[Location], elevations: &[f64]) -> Vec<Sample> {
    points
        .iter()
        .zip(elevations)
        .map(|(point, elevation)| Sample {
            lat: point.lat,
            lng: point.lng,
            elevation: *elevation,
        })
        .collect()
}

/// Writes one line per sample. Failed routes go to stderr.
fn print_csv<W: Write>(out: &mut W, reports: &[Report]) -> Result<(), AnyError> {
    writeln!(out, "Route,Latitude,Longitude,Elevation")?;
    for report in reports {
        let route = report.route.display();
        if let Some(error) = &report.error {
            eprintln!("{route}: {error}");
        }
        for Sample {
            lat,
            lng,
            elevation,
        } in &report.samples
        {
            writeln!(out, "{route},{lat},{lng},{elevation}")?;
        }
    }
    Ok(())
}

fn print_json<W: Write>(out: &mut W, reports: &[Report]) -> Result<(), AnyError> {
    serde_json::to_writer(&mut *out, reports)?;
    writeln!(out)?;
    Ok(())
}
