//! Slippy-map tile coordinates.
//!
//! Uses the OpenStreetMap Slippy Map tile naming convention:
//! - `z` is the zoom level (0-19)
//! - `x` is the column (0 to 2^z - 1, from west to east)
//! - `y` is the row (0 to 2^z - 1, from north to south)
//!
//! At zoom level 14 a tile covers about 0.022° of longitude, so many nearby
//! points share a tile.

use crate::{Result, TileError};
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

/// Minimum valid zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum valid zoom level for the OSM standard tile layer.
pub const MAX_ZOOM: u8 = 19;

/// Web-Mercator latitude limit, arctan(sinh(π)) truncated.
const MAX_MERCATOR_LAT: f64 = 85.0511;

/// OSM-style tile coordinates (z, x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Zoom level (0-19).
    pub z: u8,
    /// X coordinate (column, 0 at 180°W, increases eastward).
    pub x: u32,
    /// Y coordinate (row, 0 at ~85.05°N, increases southward).
    pub y: u32,
}

/// Check that a zoom level is within the supported range.
pub fn check_zoom(z: u8) -> Result<()> {
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&z) {
        return Err(TileError::InvalidZoomLevel(z));
    }
    Ok(())
}

impl TileCoord {
    /// Create a new tile coordinate.
    ///
    /// # Panics
    /// Panics if coordinates are out of range for the zoom level.
    pub fn new(z: u8, x: u32, y: u32) -> Self {
        let n = tiles_per_axis(z);
        assert!(u64::from(x) < n, "x={} out of range for zoom {}", x, z);
        assert!(u64::from(y) < n, "y={} out of range for zoom {}", y, z);
        Self { z, x, y }
    }

    /// Convert latitude/longitude to tile coordinates.
    ///
    /// Uses the OpenStreetMap Slippy Map tiling formula:
    /// - x = floor((lon + 180) / 360 * 2^z)
    /// - y = floor((1 - asinh(tan(lat)) / π) / 2 * 2^z)
    ///
    /// Latitudes beyond the Web-Mercator limit are clamped, and the result
    /// is clamped into the tile grid so that ±180° and the poles still map
    /// to a valid tile.
    pub fn from_lat_lon(lat: f64, lon: f64, z: u8) -> Result<Self> {
        check_zoom(z)?;

        let lat_clamped = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
        let n = tiles_per_axis(z) as f64;

        let x = ((lon + 180.0) / 360.0 * n).floor();

        let lat_rad = lat_clamped.to_radians();
        let y = ((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor();

        let max_coord = n - 1.0;
        let x = x.clamp(0.0, max_coord) as u32;
        let y = y.clamp(0.0, max_coord) as u32;

        Ok(Self { z, x, y })
    }

    /// Latitude/longitude of the tile's north-west corner.
    pub fn north_west(&self) -> (f64, f64) {
        corner(self.z, self.x, self.y)
    }

    /// Get the bounding box for this tile.
    ///
    /// Returns (min_lat, max_lat, min_lon, max_lon).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (max_lat, min_lon) = corner(self.z, self.x, self.y);
        let (min_lat, max_lon) = corner(self.z, self.x + 1, self.y + 1);
        (min_lat, max_lat, min_lon, max_lon)
    }

    /// Path of this tile below a region directory: `base/z/x/y.png`.
    pub fn tile_path(&self, base: &Path) -> PathBuf {
        base.join(self.z.to_string())
            .join(self.x.to_string())
            .join(format!("{}.png", self.y))
    }

    /// Expand a tile server URL template containing `{z}`, `{x}` and `{y}`.
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

/// Number of tiles along one axis at the given zoom.
pub fn tiles_per_axis(z: u8) -> u64 {
    1u64 << z
}

// Grid corners may sit one past the last tile (x = 2^z), so this works on
// raw indices rather than on a TileCoord.
fn corner(z: u8, x: u32, y: u32) -> (f64, f64) {
    let n = tiles_per_axis(z) as f64;
    let lon = x as f64 / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y as f64 / n)).sinh().atan().to_degrees();
    (lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tile_coord_equator() {
        let coord = TileCoord::from_lat_lon(0.0, 0.0, 12).unwrap();
        assert_eq!(coord, TileCoord::new(12, 2048, 2048));
    }

    #[test]
    fn test_tile_coord_paris() {
        // Central Paris.
        let coord = TileCoord::from_lat_lon(48.8566, 2.3522, 12).unwrap();
        assert_eq!((coord.x, coord.y), (2074, 1409));
    }

    #[test]
    fn test_zoom_zero_is_single_tile() {
        for (lat, lon) in [(85.0, -179.9), (-85.0, 179.9), (0.0, 0.0)] {
            let coord = TileCoord::from_lat_lon(lat, lon, 0).unwrap();
            assert_eq!(coord, TileCoord::new(0, 0, 0));
        }
    }

    #[test]
    fn test_edges_clamp_into_grid() {
        let coord = TileCoord::from_lat_lon(90.0, 180.0, 10).unwrap();
        assert_eq!(coord.x, 1023);
        assert_eq!(coord.y, 0);

        let coord = TileCoord::from_lat_lon(-90.0, -180.0, 10).unwrap();
        assert_eq!(coord.x, 0);
        assert_eq!(coord.y, 1023);
    }

    #[test]
    fn test_tile_contains_point() {
        let test_points = [
            (48.8566, 2.3522),    // Paris
            (45.7640, 4.8357),    // Lyon
            (43.2965, 5.3698),    // Marseille
            (-33.8688, 151.2093), // Sydney
            (0.0, 0.0),           // Null Island
        ];

        for zoom in [6, 10, 14, 19] {
            for (lat, lon) in test_points {
                let coord = TileCoord::from_lat_lon(lat, lon, zoom).unwrap();
                let (min_lat, max_lat, min_lon, max_lon) = coord.bounds();

                assert!(
                    lat >= min_lat && lat <= max_lat,
                    "lat {} not in [{}, {}] for tile {:?}",
                    lat,
                    min_lat,
                    max_lat,
                    coord
                );
                assert!(
                    lon >= min_lon && lon <= max_lon,
                    "lon {} not in [{}, {}] for tile {:?}",
                    lon,
                    min_lon,
                    max_lon,
                    coord
                );
            }
        }
    }

    #[test]
    fn test_north_west_roundtrip_within_one_tile() {
        for zoom in [1u8, 8, 12, 16] {
            let n = tiles_per_axis(zoom) as u32;
            for (x, y) in [(0, 0), (n / 3, n / 2), (n - 1, n - 1)] {
                let coord = TileCoord::new(zoom, x, y);
                let (lat, lon) = coord.north_west();
                let back = TileCoord::from_lat_lon(lat, lon, zoom).unwrap();
                assert!(back.x.abs_diff(x) <= 1, "{:?} -> {:?}", coord, back);
                assert!(back.y.abs_diff(y) <= 1, "{:?} -> {:?}", coord, back);
            }
        }
    }

    #[test]
    fn test_north_west_of_origin() {
        let (lat, lon) = TileCoord::new(3, 0, 0).north_west();
        assert_relative_eq!(lon, -180.0);
        assert_relative_eq!(lat, 85.0511287798, epsilon = 1e-6);
    }

    #[test]
    fn test_tile_url() {
        let coord = TileCoord::new(12, 2074, 1408);
        assert_eq!(
            coord.url("https://tile.openstreetmap.org/{z}/{x}/{y}.png"),
            "https://tile.openstreetmap.org/12/2074/1408.png"
        );
    }

    #[test]
    fn test_tile_path() {
        let coord = TileCoord::new(12, 2074, 1408);
        let path = coord.tile_path(Path::new("./tiles/IDF"));
        assert_eq!(path, PathBuf::from("./tiles/IDF/12/2074/1408.png"));
    }

    #[test]
    fn test_invalid_zoom() {
        assert!(TileCoord::from_lat_lon(0.0, 0.0, 20).is_err());
        assert!(TileCoord::from_lat_lon(0.0, 0.0, 19).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_new_out_of_range_panics() {
        TileCoord::new(2, 4, 0);
    }
}
