//! Tile fetching from an OpenStreetMap-compatible tile server.
//!
//! Tiles are written verbatim to `output/REGION/z/x/y.png`. A tile whose
//! file already exists is never fetched again, so re-running a download
//! against a populated directory only fills the gaps.
//!
//! ## Usage policy
//!
//! The OSM tile servers ask bulk downloaders to identify themselves with a
//! User-Agent and to stay under one request per second. The downloader is
//! therefore single threaded and sleeps for [`DEFAULT_REQUEST_DELAY`] after
//! every tile it actually fetched. There is no retry: a failed tile is
//! reported and the run moves on.

use crate::{DownloadPlan, Result, TileCoord, TileError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default tile server URL template.
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// User agent sent with every request.
pub const USER_AGENT: &str = "LoRa_APRS_Tracker_TileDownloader/1.0";

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Delay after each downloaded tile (max 1 request per second).
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Something that can produce the bytes of a tile.
pub trait TileSource {
    /// Fetch the encoded image for one tile.
    fn fetch(&self, coord: &TileCoord) -> Result<Vec<u8>>;
}

/// Fetches tiles over HTTP from a URL template.
pub struct HttpTileSource {
    /// URL template with `{z}`, `{x}` and `{y}` placeholders.
    url_template: String,
    /// HTTP client for downloading tiles.
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for HttpTileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTileSource")
            .field("url_template", &self.url_template)
            .finish()
    }
}

impl HttpTileSource {
    /// Create a source for the default OSM tile server.
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_TILE_URL)
    }

    /// Create a source for a custom URL template.
    pub fn with_url(url_template: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            url_template: url_template.into(),
            client,
        })
    }

    /// The URL template in use.
    pub fn url_template(&self) -> &str {
        &self.url_template
    }
}

impl TileSource for HttpTileSource {
    fn fetch(&self, coord: &TileCoord) -> Result<Vec<u8>> {
        let url = coord.url(&self.url_template);
        tracing::debug!(%url, "fetching tile");

        let response = self.client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(TileError::TileDownloadFailed {
                z: coord.z,
                x: coord.x,
                y: coord.y,
                reason: format!("HTTP {}", response.status()),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// What happened to a single tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The file was already on disk; nothing was requested.
    Exists,
    /// The tile was fetched; carries the number of bytes written.
    Downloaded(u64),
}

/// Outcome of one tile, passed to the progress callback.
#[derive(Debug)]
pub struct TileProgress<'a> {
    /// Tile that was processed.
    pub coord: TileCoord,
    /// Position of this tile within its zoom level (1-based).
    pub index: u64,
    /// Number of tiles at this zoom level.
    pub total: u64,
    /// What happened.
    pub result: std::result::Result<&'a FetchStatus, &'a TileError>,
}

/// Callback for tile download progress.
pub type DownloadCallback = Box<dyn Fn(&TileProgress<'_>) + Send + Sync>;

/// Counters for one download run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Tiles fetched from the source.
    pub downloaded: u64,
    /// Tiles that were already on disk.
    pub skipped: u64,
    /// Tiles that failed.
    pub errors: u64,
    /// Total bytes written.
    pub bytes_downloaded: u64,
}

/// Downloader settings.
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Root output directory; tiles go to `output_dir/REGION/z/x/y.png`.
    pub output_dir: PathBuf,
    /// Pause after each downloaded tile.
    pub request_delay: Duration,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        DownloaderConfig {
            output_dir: PathBuf::from("./tiles"),
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Serial, rate-limited tile downloader.
#[derive(Debug)]
pub struct TileDownloader<S> {
    source: S,
    config: DownloaderConfig,
}

impl<S: TileSource> TileDownloader<S> {
    /// Create a downloader pulling tiles from `source`.
    pub fn new(source: S, config: DownloaderConfig) -> Self {
        Self { source, config }
    }

    /// The tile source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Downloader settings.
    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    /// Fetch one tile into `region_dir` unless it is already there.
    pub fn download_tile(&self, coord: &TileCoord, region_dir: &Path) -> Result<FetchStatus> {
        let path = coord.tile_path(region_dir);

        if path.exists() {
            return Ok(FetchStatus::Exists);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let bytes = self.source.fetch(coord)?;

        let mut file = fs::File::create(&path)?;
        file.write_all(&bytes)?;

        Ok(FetchStatus::Downloaded(bytes.len() as u64))
    }

    /// Download every tile in `plan`, zoom level by zoom level.
    ///
    /// Failures are counted and reported through `callback`; they never
    /// stop the run.
    pub fn run(&self, plan: &DownloadPlan, callback: Option<&DownloadCallback>) -> DownloadStats {
        let region_dir = plan.region_dir(&self.config.output_dir);
        let mut stats = DownloadStats::default();

        tracing::info!(
            region = %plan.region,
            tiles = plan.total_tiles(),
            dir = %region_dir.display(),
            "starting tile download"
        );

        for zoom in &plan.zooms {
            let total = zoom.tiles.len();
            for (index, coord) in (1..).zip(zoom.tiles.iter()) {
                let result = self.download_tile(&coord, &region_dir);

                match &result {
                    Ok(FetchStatus::Exists) => stats.skipped += 1,
                    Ok(FetchStatus::Downloaded(bytes)) => {
                        stats.downloaded += 1;
                        stats.bytes_downloaded += bytes;
                    }
                    Err(e) => {
                        stats.errors += 1;
                        tracing::warn!(tile = %coord, error = %e, "tile download failed");
                    }
                }

                if let Some(cb) = callback {
                    cb(&TileProgress {
                        coord,
                        index,
                        total,
                        result: result.as_ref(),
                    });
                }

                if matches!(result, Ok(FetchStatus::Downloaded(_)))
                    && !self.config.request_delay.is_zero()
                {
                    std::thread::sleep(self.config.request_delay);
                }
            }
        }

        tracing::info!(
            downloaded = stats.downloaded,
            skipped = stats.skipped,
            errors = stats.errors,
            "tile download finished"
        );

        stats
    }
}
