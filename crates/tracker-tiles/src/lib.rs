//! # tracker-tiles
//!
//! Offline map tiles for the LoRa APRS tracker.
//!
//! This crate provides:
//! - Slippy-map tile math ([`TileCoord`]) using the Web-Mercator formulas
//! - Bounding box and zoom list parsing ([`BoundingBox`], [`parse_zoom_levels`])
//! - Region presets ([`RegionCatalog`])
//! - Download planning ([`DownloadPlan`]) and a rate-limited downloader
//!   ([`TileDownloader`]) that writes `REGION/zoom/x/y.png`
//!
//! ## Example
//!
//! ```no_run
//! use tracker_tiles::{
//!     DownloadPlan, DownloaderConfig, HttpTileSource, RegionCatalog, TileDownloader,
//! };
//!
//! let catalog = RegionCatalog::builtin();
//! let region = catalog.require("IDF")?;
//! let plan = DownloadPlan::new(&region.code, region.bbox, &[10, 12])?;
//! println!("{} tiles (~{:.1} MB)", plan.total_tiles(), plan.estimated_size_mb());
//!
//! let downloader = TileDownloader::new(HttpTileSource::new()?, DownloaderConfig::default());
//! let stats = downloader.run(&plan, None);
//! println!("Downloaded: {}, skipped: {}", stats.downloaded, stats.skipped);
//! # Ok::<(), tracker_tiles::TileError>(())
//! ```

mod bbox;
mod coord;
mod error;
mod fetcher;
mod plan;
mod region;

pub use bbox::{parse_zoom_levels, BoundingBox, TileRange, TileRangeIter, DEFAULT_ZOOM_LEVELS};
pub use coord::{check_zoom, tiles_per_axis, TileCoord, MAX_ZOOM, MIN_ZOOM};
pub use error::TileError;
pub use fetcher::{
    DownloadCallback, DownloadStats, DownloaderConfig, FetchStatus, HttpTileSource,
    TileDownloader, TileProgress, TileSource, DEFAULT_REQUEST_DELAY, DEFAULT_TILE_URL,
    REQUEST_TIMEOUT, USER_AGENT,
};
pub use plan::{DownloadPlan, ZoomTiles, AVG_TILE_SIZE_KB};
pub use region::{Region, RegionCatalog};

/// Result type for tile operations.
pub type Result<T> = std::result::Result<T, TileError>;
