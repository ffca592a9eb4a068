//! Download plans: which tiles a run will touch.

use crate::{BoundingBox, Result, TileRange};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Average OSM tile size used for size estimates, in KiB.
pub const AVG_TILE_SIZE_KB: f64 = 30.0;

/// Tiles to fetch for one zoom level.
#[derive(Debug, Clone)]
pub struct ZoomTiles {
    /// Zoom level.
    pub zoom: u8,
    /// Tiles in download order.
    pub tiles: TileRange,
}

/// The full set of tiles for a region, grouped by zoom level.
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    /// Region code, used as the output subdirectory.
    pub region: String,
    /// Area covered.
    pub bbox: BoundingBox,
    /// Tiles per zoom level, in the order the zooms were requested.
    pub zooms: Vec<ZoomTiles>,
}

impl DownloadPlan {
    /// Compute the tiles covering `bbox` at each of `zooms`.
    ///
    /// Only the corner tiles are computed; tiles are produced on demand.
    pub fn new(region: impl Into<String>, bbox: BoundingBox, zooms: &[u8]) -> Result<Self> {
        let zooms = zooms
            .iter()
            .map(|&zoom| {
                Ok(ZoomTiles {
                    zoom,
                    tiles: bbox.tiles(zoom)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            region: region.into(),
            bbox,
            zooms,
        })
    }

    /// Total number of tiles across all zoom levels.
    pub fn total_tiles(&self) -> u64 {
        self.zooms.iter().map(|z| z.tiles.len()).sum()
    }

    /// Rough download size in MiB.
    pub fn estimated_size_mb(&self) -> f64 {
        self.total_tiles() as f64 * AVG_TILE_SIZE_KB / 1024.0
    }

    /// Lower bound on run time when every tile has to be fetched.
    pub fn estimated_duration(&self, request_delay: Duration) -> Duration {
        request_delay.saturating_mul(self.total_tiles().min(u64::from(u32::MAX)) as u32)
    }

    /// Directory the region's tiles are written to.
    pub fn region_dir(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(&self.region)
    }
}
