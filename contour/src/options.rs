use clap::{Parser, Subcommand};
use lattice::constants::DEFAULT_OFFSET;
use std::path::PathBuf;

/// Sample terrain elevation inside closed-contour routes.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Directory of SRTM 1 arc-second (30 m) tiles.
    #[arg(long)]
    pub srtm30: PathBuf,

    /// Directory of SRTM 3 arc-second (90 m) tiles.
    #[arg(long)]
    pub srtm90: PathBuf,

    /// Directory of AW3D30 tiles.
    #[arg(long)]
    pub aw3d30: PathBuf,

    /// Spacing between sample points, in meters. Only 5 and 15 are
    /// supported; anything else falls back to 5.
    #[arg(short, long, default_value_t = DEFAULT_OFFSET)]
    pub offset: u32,

    /// Look up the route's own points instead of sampling its
    /// interior.
    #[arg(short, long, default_value_t = false)]
    pub linear: bool,

    /// Route file, a JSON array of `{"lat": .., "lng": ..}` objects.
    /// May be repeated.
    #[arg(short, long = "route", required = true)]
    pub routes: Vec<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print samples to stdout as CSV.
    Csv,

    /// Print samples to stdout as JSON.
    Json,
}
