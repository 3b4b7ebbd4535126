//! On-demand `.hgt` tile cache for a single DEM source.

use crate::{ElevationSource, LatticeError, Location};
use dashmap::DashMap;
use geo::geometry::Coord;
use hgt::{file_name, sw_corner, HgtError, Tile, C, VOID};
use log::debug;
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

pub struct Tiles {
    /// Directory containing HGT tile files.
    tile_dir: PathBuf,

    /// Tiles which have been loaded on demand.
    tiles: DashMap<Coord<i16>, Arc<Tile>>,
}

impl Tiles {
    /// Fails early if `tile_dir` holds no `hgt` file at all.
    pub fn new(tile_dir: PathBuf) -> Result<Self, LatticeError> {
        let mut has_height_files = false;
        for entry in std::fs::read_dir(&tile_dir)? {
            let path = entry?.path();
            if Some("hgt") == path.extension().and_then(std::ffi::OsStr::to_str) {
                has_height_files = true;
                break;
            }
        }

        if has_height_files {
            Ok(Self {
                tile_dir,
                tiles: DashMap::new(),
            })
        } else {
            Err(LatticeError::Path(tile_dir))
        }
    }

    /// Returns the tile containing `coord`.
    ///
    /// Tiles are read from disk the first time they are needed. A tile
    /// missing from disk is cached as a tombstone that reads 0
    /// everywhere.
    pub fn get(&self, coord: Coord<C>) -> Result<Arc<Tile>, LatticeError> {
        let sw_corner = sw_corner(coord);
        self.tiles
            .entry(sw_corner)
            .or_try_insert_with(|| match self.load_tile(sw_corner) {
                Ok(tile) => Ok(Arc::new(tile)),
                Err(LatticeError::Hgt(HgtError::Io(e))) if e.kind() == ErrorKind::NotFound => {
                    debug!("loading tombstone in lieu of missing tile for {sw_corner:?}");
                    Ok(Arc::new(Tile::tombstone(sw_corner)))
                }
                Err(e) => Err(e),
            })
            .map(|tile| Arc::clone(&tile))
    }

    /// Number of tiles, tombstones included, currently cached.
    pub fn cached(&self) -> usize {
        self.tiles.len()
    }

    fn load_tile(&self, sw_corner: Coord<i16>) -> Result<Tile, LatticeError> {
        let tile_path = {
            let file_name = file_name(sw_corner);
            let tile_path = self.tile_dir.join(Path::new(&file_name));
            if tile_path.exists() {
                tile_path
            } else {
                self.tile_dir.join(file_name.to_lowercase())
            }
        };
        debug!("loading {tile_path:?}");
        Ok(Tile::load(tile_path)?)
    }
}

impl ElevationSource for Tiles {
    fn elevation(&self, location: Location) -> Result<f64, LatticeError> {
        let coord = Coord::from(location);
        let tile = self.get(coord)?;
        match tile.get(coord) {
            Some(sample) if sample != VOID => Ok(f64::from(sample)),
            _ => Err(LatticeError::Void(location)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tiles;
    use crate::{ElevationSource, LatticeError, Location};
    use byteorder::{BigEndian as BE, WriteBytesExt};
    use geo::geometry::Coord;
    use hgt::VOID;
    use std::{fs::File, io::BufWriter, path::Path};
    use tempfile::TempDir;

    /// Writes a 3 arc-second tile reading `elevation` everywhere except
    /// its southwest sample, which is void.
    fn write_tile(dir: &Path, name: &str, elevation: i16) {
        let mut wtr = BufWriter::new(File::create(dir.join(name)).unwrap());
        for y in (0..1201).rev() {
            for x in 0..1201 {
                let sample = if (x, y) == (0, 0) { VOID } else { elevation };
                wtr.write_i16::<BE>(sample).unwrap();
            }
        }
    }

    #[test]
    fn test_dir_without_tiles_fails() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README"), "nothing here").unwrap();
        assert!(matches!(
            Tiles::new(dir.path().to_owned()),
            Err(LatticeError::Path(_))
        ));
    }

    #[test]
    fn test_elevation() {
        let dir = TempDir::new().unwrap();
        write_tile(dir.path(), "N46E014.hgt", 295);
        let tiles = Tiles::new(dir.path().to_owned()).unwrap();
        let ljubljana = Location::new(14.5058, 46.0569);
        assert_eq!(tiles.elevation(ljubljana).unwrap(), 295.0);
        assert_eq!(tiles.cached(), 1);

        // Served from cache.
        let tile = tiles.get(Coord::from(ljubljana)).unwrap();
        assert!(!tile.is_tombstone());
        assert_eq!(tiles.cached(), 1);
    }

    #[test]
    fn test_lowercase_file_name() {
        let dir = TempDir::new().unwrap();
        write_tile(dir.path(), "s34e018.hgt", 12);
        let tiles = Tiles::new(dir.path().to_owned()).unwrap();
        assert_eq!(tiles.elevation(Location::new(18.42, -33.92)).unwrap(), 12.0);
    }

    #[test]
    fn test_missing_tile_reads_zero() {
        let dir = TempDir::new().unwrap();
        write_tile(dir.path(), "N46E014.hgt", 295);
        let tiles = Tiles::new(dir.path().to_owned()).unwrap();
        let south_pole = Location::new(0.0, -89.5);
        assert_eq!(tiles.elevation(south_pole).unwrap(), 0.0);
        assert!(tiles.get(Coord::from(south_pole)).unwrap().is_tombstone());
    }

    #[test]
    fn test_void_sample() {
        let dir = TempDir::new().unwrap();
        write_tile(dir.path(), "N46E014.hgt", 295);
        let tiles = Tiles::new(dir.path().to_owned()).unwrap();
        let corner = Location::new(14.0, 46.0);
        assert!(matches!(
            tiles.elevation(corner),
            Err(LatticeError::Void(location)) if location == corner
        ));
        assert_eq!(tiles.lookup(&[corner, Location::new(14.5, 46.5)]), vec![0.0, 295.0]);
    }
}
