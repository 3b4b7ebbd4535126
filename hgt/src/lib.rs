//! SRTM-style elevation (`.hgt`) tiles.
//!
//! A tile covers one degree by one degree and is named after its
//! southwest corner, e.g. `N46E014.hgt`. Samples are big-endian `i16`
//! meters, stored row by row from the northernmost row down. SRTM 30 m,
//! SRTM 90 m, and AW3D30 rasters all ship (or convert losslessly) to
//! this layout; only the sample spacing differs.
//!
//! # References
//!
//! 1. [SRTM Collection User Guide](https://lpdaac.usgs.gov/documents/179/SRTM_User_Guide_V3.pdf)
//! 1. [Archive Team](http://fileformats.archiveteam.org/index.php?title=HGT&oldid=17250)

mod error;

pub use crate::error::HgtError;
use byteorder::{BigEndian as BE, ReadBytesExt};
use geo::geometry::Coord;
use std::{fs::File, io::BufReader, mem::size_of, path::Path};

/// Floating point type used for tile coordinates.
pub type C = f64;

/// Sample value SRTM uses to mark missing data.
pub const VOID: i16 = i16::MIN;

const ARCSEC_PER_DEG: C = 3600.0;

pub struct Tile {
    /// Center of the southwest-most sample, which sits exactly on the
    /// integer degree named by the file.
    sw_corner: Coord<C>,

    /// Arcseconds between samples.
    resolution: u8,

    /// Samples per side; tiles are square.
    side: usize,

    samples: Samples,
}

enum Samples {
    /// Stand-in for a tile that does not exist on disk (ocean, or
    /// outside the dataset). Every lookup yields 0.
    Tombstone,
    Loaded(Box<[i16]>),
}

impl Tile {
    /// Reads the tile at `path` into memory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HgtError> {
        let path = path.as_ref();
        let (resolution, side) = extract_resolution(path)?;
        let Coord { x, y } = parse_sw_corner(path)?;

        let mut rdr = BufReader::new(File::open(path)?);
        let mut samples = Vec::with_capacity(side * side);
        for _ in 0..(side * side) {
            samples.push(rdr.read_i16::<BE>()?);
        }

        Ok(Self {
            sw_corner: Coord {
                x: C::from(x),
                y: C::from(y),
            },
            resolution,
            side,
            samples: Samples::Loaded(samples.into_boxed_slice()),
        })
    }

    pub fn tombstone(sw_corner: Coord<i16>) -> Self {
        Self {
            sw_corner: Coord {
                x: C::from(sw_corner.x),
                y: C::from(sw_corner.y),
            },
            resolution: 3,
            side: 1201,
            samples: Samples::Tombstone,
        }
    }

    pub fn is_tombstone(&self) -> bool {
        matches!(self.samples, Samples::Tombstone)
    }

    pub fn sw_corner(&self) -> Coord<C> {
        self.sw_corner
    }

    /// Returns this tile's resolution in arcseconds per sample.
    pub fn resolution(&self) -> u8 {
        self.resolution
    }

    /// Returns the number of samples in this tile.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.side * self.side
    }

    /// Returns the sample nearest to `coord`, or `None` if `coord`
    /// falls outside this tile.
    ///
    /// Void samples are returned as-is; compare against [`VOID`].
    pub fn get(&self, coord: Coord<C>) -> Option<i16> {
        let (x, y) = self.coord_to_xy(coord)?;
        match &self.samples {
            Samples::Tombstone => Some(0),
            Samples::Loaded(samples) => samples.get(self.xy_to_linear_index((x, y))).copied(),
        }
    }
}

/// Private API
impl Tile {
    fn samples_per_deg(&self) -> C {
        ARCSEC_PER_DEG / C::from(self.resolution)
    }

    /// Nearest sample column (west to east) and row (south to north).
    fn coord_to_xy(&self, coord: Coord<C>) -> Option<(usize, usize)> {
        let spd = self.samples_per_deg();
        let x = ((coord.x - self.sw_corner.x) * spd).round();
        let y = ((coord.y - self.sw_corner.y) * spd).round();
        #[allow(clippy::cast_precision_loss)]
        let max = (self.side - 1) as C;
        if (0.0..=max).contains(&x) && (0.0..=max).contains(&y) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            Some((x as usize, y as usize))
        } else {
            None
        }
    }

    /// Rows are stored north first.
    fn xy_to_linear_index(&self, (x, y): (usize, usize)) -> usize {
        self.side * (self.side - 1 - y) + x
    }
}

/// Returns the integer southwest corner of the tile containing `coord`.
pub fn sw_corner(Coord { x, y }: Coord<C>) -> Coord<i16> {
    #[allow(clippy::cast_possible_truncation)]
    Coord {
        x: x.floor() as i16,
        y: y.floor() as i16,
    }
}

/// Returns the conventional file name for the tile with the given
/// southwest corner.
pub fn file_name(Coord { x, y }: Coord<i16>) -> String {
    let n_s = if y.is_negative() { 'S' } else { 'N' };
    let e_w = if x.is_negative() { 'W' } else { 'E' };
    format!("{n_s}{:02}{e_w}{:03}.hgt", y.abs(), x.abs())
}

fn extract_resolution(path: &Path) -> Result<(u8, usize), HgtError> {
    const ONE_ARCSEC_LEN: u64 = 3601 * 3601 * size_of::<i16>() as u64;
    const THREE_ARCSEC_LEN: u64 = 1201 * 1201 * size_of::<i16>() as u64;
    match path.metadata()?.len() {
        ONE_ARCSEC_LEN => Ok((1, 3601)),
        THREE_ARCSEC_LEN => Ok((3, 1201)),
        len => Err(HgtError::TileLen(len, path.to_owned())),
    }
}

fn parse_sw_corner(path: &Path) -> Result<Coord<i16>, HgtError> {
    let mk_err = || HgtError::TileName(path.to_owned());
    let name = path
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .ok_or_else(mk_err)?;
    if name.len() != 7 || !name.is_ascii() {
        return Err(mk_err());
    }
    let lat_sign = match &name[0..1] {
        "N" | "n" => 1,
        "S" | "s" => -1,
        _ => return Err(mk_err()),
    };
    let lon_sign = match &name[3..4] {
        "E" | "e" => 1,
        "W" | "w" => -1,
        _ => return Err(mk_err()),
    };
    let lat = name[1..3].parse::<i16>().map_err(|_| mk_err())?;
    let lon = name[4..7].parse::<i16>().map_err(|_| mk_err())?;
    Ok(Coord {
        x: lon_sign * lon,
        y: lat_sign * lat,
    })
}
