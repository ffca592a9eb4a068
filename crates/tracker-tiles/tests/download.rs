//! Downloader behaviour against an in-memory tile source.
//!
//! No network access is needed: the source counts requests and can be told
//! to fail for selected tiles.

use std::collections::HashSet;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracker_tiles::{
    BoundingBox, DownloadPlan, DownloaderConfig, Result, TileCoord, TileDownloader, TileError,
    TileSource,
};

#[derive(Default)]
struct CountingSource {
    requests: AtomicUsize,
    failing: HashSet<TileCoord>,
}

impl TileSource for CountingSource {
    fn fetch(&self, coord: &TileCoord) -> Result<Vec<u8>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(coord) {
            return Err(TileError::TileDownloadFailed {
                z: coord.z,
                x: coord.x,
                y: coord.y,
                reason: "HTTP 503 Service Unavailable".to_string(),
            });
        }
        Ok(vec![0x89, b'P', b'N', b'G'])
    }
}

fn corsica_plan() -> DownloadPlan {
    let bbox: BoundingBox = "41.3,8.5,43.1,9.6".parse().unwrap();
    DownloadPlan::new("COR", bbox, &[7, 8, 9]).unwrap()
}

fn config(dir: &std::path::Path, delay: Duration) -> DownloaderConfig {
    DownloaderConfig {
        output_dir: dir.to_path_buf(),
        request_delay: delay,
    }
}

#[test]
fn test_rerun_downloads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let plan = corsica_plan();
    let downloader = TileDownloader::new(
        CountingSource::default(),
        config(dir.path(), Duration::ZERO),
    );

    let first = downloader.run(&plan, None);
    assert_eq!(first.downloaded, plan.total_tiles());
    assert_eq!(first.skipped, 0);
    assert_eq!(first.errors, 0);
    assert_eq!(first.bytes_downloaded, 4 * plan.total_tiles());

    let second = downloader.run(&plan, None);
    assert_eq!(second.downloaded, 0);
    assert_eq!(second.skipped, plan.total_tiles());

    // Only the first run reached the source.
    assert_eq!(
        downloader.source().requests.load(Ordering::SeqCst) as u64,
        plan.total_tiles()
    );
}

#[test]
fn test_layout_is_region_zoom_x_y() {
    let dir = tempfile::tempdir().unwrap();
    let plan = corsica_plan();
    let downloader = TileDownloader::new(
        CountingSource::default(),
        config(dir.path(), Duration::ZERO),
    );
    downloader.run(&plan, None);

    for zoom in &plan.zooms {
        for tile in &zoom.tiles {
            let path = dir
                .path()
                .join("COR")
                .join(tile.z.to_string())
                .join(tile.x.to_string())
                .join(format!("{}.png", tile.y));
            assert!(path.is_file(), "missing {}", path.display());
        }
    }
}

#[test]
fn test_failures_are_counted_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let plan = corsica_plan();
    let bad = plan.zooms[0].tiles.north_west();

    let source = CountingSource {
        failing: HashSet::from([bad]),
        ..Default::default()
    };
    let downloader = TileDownloader::new(source, config(dir.path(), Duration::ZERO));

    let stats = downloader.run(&plan, None);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.downloaded, plan.total_tiles() - 1);
    assert!(!bad.tile_path(&dir.path().join("COR")).exists());

    // The failed tile is retried on the next run, nothing else is.
    let stats = downloader.run(&plan, None);
    assert_eq!(stats.errors, 1);
    assert_eq!(stats.downloaded, 0);
    assert_eq!(stats.skipped, plan.total_tiles() - 1);
}

#[test]
fn test_skipped_tiles_are_not_delayed() {
    let dir = tempfile::tempdir().unwrap();
    let plan = corsica_plan();

    // Pre-populate every tile so nothing needs fetching.
    for zoom in &plan.zooms {
        for tile in &zoom.tiles {
            let path = tile.tile_path(&dir.path().join("COR"));
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"x").unwrap();
        }
    }

    let downloader = TileDownloader::new(
        CountingSource::default(),
        config(dir.path(), Duration::from_secs(5)),
    );
    let start = Instant::now();
    let stats = downloader.run(&plan, None);

    assert_eq!(stats.skipped, plan.total_tiles());
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_delay_applies_after_each_download() {
    let dir = tempfile::tempdir().unwrap();
    let bbox = BoundingBox::new(48.85, 2.35, 48.851, 2.351).unwrap();
    let plan = DownloadPlan::new("IDF", bbox, &[10, 11]).unwrap();
    assert_eq!(plan.total_tiles(), 2);

    let downloader = TileDownloader::new(
        CountingSource::default(),
        config(dir.path(), Duration::from_millis(50)),
    );
    let start = Instant::now();
    let stats = downloader.run(&plan, None);

    assert_eq!(stats.downloaded, 2);
    assert!(start.elapsed() >= Duration::from_millis(100));
}
