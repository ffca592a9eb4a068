//! `download-tiles`: fetch OSM tiles for a region.
//!
//! Structure created: `OUTPUT/REGION/zoom/x/y.png`, ready to be copied to
//! `/LoRa_Tracker/Maps/REGION/` on the tracker's SD card.

use crate::report::{self, tile_marker};
use crate::Result;
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracker_tiles::{
    parse_zoom_levels, BoundingBox, DownloadCallback, DownloadPlan, DownloaderConfig,
    HttpTileSource, RegionCatalog, TileDownloader, TileProgress, DEFAULT_TILE_URL,
    DEFAULT_ZOOM_LEVELS,
};

/// Download OSM tiles for offline use on the tracker.
#[derive(Debug, Parser)]
#[command(name = "download-tiles", version, about)]
pub struct DownloadArgs {
    /// Region name (e.g. IDF, ARA, PACA); also the output subdirectory
    #[arg(long, required_unless_present = "list")]
    pub region: Option<String>,

    /// Bounding box: min_lat,min_lon,max_lat,max_lon (defaults to the region preset)
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<String>,

    /// Zoom levels (comma-separated)
    #[arg(long, default_value = DEFAULT_ZOOM_LEVELS)]
    pub zoom: String,

    /// Output directory
    #[arg(long, default_value = "./tiles")]
    pub output: PathBuf,

    /// Show what would be downloaded
    #[arg(long)]
    pub dry_run: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Show predefined regions and exit
    #[arg(long)]
    pub list: bool,

    /// YAML file with additional region presets
    #[arg(long, value_name = "FILE")]
    pub regions_file: Option<PathBuf>,

    /// Tile server URL template
    #[arg(long, default_value = DEFAULT_TILE_URL)]
    pub url: String,

    /// Delay after each downloaded tile, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl DownloadArgs {
    /// Pause applied after each downloaded tile.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn load_catalog(args: &DownloadArgs) -> Result<RegionCatalog> {
    let mut catalog = RegionCatalog::builtin();
    if let Some(path) = &args.regions_file {
        catalog.load_yaml(path)?;
    }
    Ok(catalog)
}

/// Print the region presets.
pub fn list_regions(catalog: &RegionCatalog) {
    println!("\n=== Predefined Regions ===\n");
    for region in catalog.iter() {
        let b = region.bbox;
        println!("  {:4} - {}", region.code, region.name);
        println!(
            "         --bbox {},{},{},{}",
            b.min_lat, b.min_lon, b.max_lat, b.max_lon
        );
        println!();
    }
}

/// Work out what to download from the arguments.
///
/// An explicit `--bbox` wins; otherwise the region must be a known preset.
pub fn build_plan(args: &DownloadArgs, catalog: &RegionCatalog) -> Result<DownloadPlan> {
    let region = args.region.as_deref().unwrap_or_default();

    let bbox: BoundingBox = match &args.bbox {
        Some(text) => text.parse()?,
        None => catalog.require(region)?.bbox,
    };
    let zooms = parse_zoom_levels(&args.zoom)?;

    Ok(DownloadPlan::new(region, bbox, &zooms)?)
}

fn print_plan(plan: &DownloadPlan, delay: Duration) {
    let b = plan.bbox;
    println!("\n=== OSM Tile Downloader ===");
    println!("Region: {}", plan.region);
    println!(
        "Bounding box: {:.4}, {:.4} to {:.4}, {:.4}",
        b.min_lat, b.min_lon, b.max_lat, b.max_lon
    );
    let zooms: Vec<String> = plan.zooms.iter().map(|z| z.zoom.to_string()).collect();
    println!("Zoom levels: {}", zooms.join(", "));
    println!();

    for zoom in &plan.zooms {
        println!("  Zoom {:2}: {:6} tiles", zoom.zoom, zoom.tiles.len());
    }

    println!(
        "\n  Total: {} tiles (~{:.1} MB)",
        plan.total_tiles(),
        plan.estimated_size_mb()
    );
    println!(
        "  Estimated time: ~{:.1} minutes",
        plan.estimated_duration(delay).as_secs_f64() / 60.0
    );
}

/// Run the downloader.
pub fn run(args: &DownloadArgs) -> Result<()> {
    let catalog = load_catalog(args)?;

    if args.list {
        list_regions(&catalog);
        return Ok(());
    }

    let plan = build_plan(args, &catalog)?;
    let delay = args.request_delay();
    print_plan(&plan, delay);

    if args.dry_run {
        println!("\n[Dry run - no files downloaded]");
        return Ok(());
    }

    println!();
    if !args.yes && !report::confirm("Proceed with download?")? {
        println!("Aborted.");
        return Ok(());
    }

    let region_dir = plan.region_dir(&args.output);
    println!("\nDownloading to: {}\n", region_dir.display());

    let downloader = TileDownloader::new(
        HttpTileSource::with_url(args.url.as_str())?,
        DownloaderConfig {
            output_dir: args.output.clone(),
            request_delay: delay,
        },
    );

    let callback: DownloadCallback = Box::new(|progress: &TileProgress<'_>| {
        if progress.index == 1 {
            println!("Zoom {}:", progress.coord.z);
        }
        print!("{}", tile_marker(progress));
        if progress.index == progress.total {
            println!();
        }
        let _ = io::stdout().flush();
    });

    let stats = downloader.run(&plan, Some(&callback));

    println!("\n=== Complete ===");
    println!("Downloaded: {}", stats.downloaded);
    println!("Skipped (existing): {}", stats.skipped);
    println!("Errors: {}", stats.errors);
    println!(
        "\nCopy '{}' to SD card: /LoRa_Tracker/Maps/{}/",
        region_dir.display(),
        plan.region
    );
    Ok(())
}
