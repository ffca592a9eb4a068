//! `convert-to-raw`: turn a PNG tile tree into RGB565 raw tiles.

use crate::report::{mib, percent};
use crate::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracker_convert::{
    convert_png_to_raw, find_files, should_report, total_size, BatchProgress, BatchRunner,
    ProgressCallback, RawOptions,
};

/// Print progress every this many tiles.
const PROGRESS_EVERY: usize = 100;

/// Convert PNG map tiles to RGB565 raw format.
#[derive(Debug, Parser)]
#[command(name = "convert-to-raw", version, about)]
pub struct RawArgs {
    /// Path to atlas directory containing PNG tiles
    pub path: PathBuf,

    /// Delete PNG files after conversion
    #[arg(long)]
    pub delete_png: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl RawArgs {
    /// Conversion options selected by the flags.
    pub fn options(&self) -> RawOptions {
        RawOptions {
            keep_source: !self.delete_png,
        }
    }
}

/// Run the converter.
pub fn run(args: &RawArgs) -> Result<()> {
    let opts = args.options();

    let files = find_files(&args.path, "png")?;
    let total = files.len();
    if total == 0 {
        println!("No PNG files found in {}", args.path.display());
        return Ok(());
    }

    println!("Found {total} PNG tiles to convert");
    println!("Keep PNG files: {}", opts.keep_source);
    println!();

    let progress: ProgressCallback = Box::new(|p: &BatchProgress<'_>| {
        if let Some(e) = p.error {
            println!("  Error converting {}: {}", p.path.display(), e);
        }
        if should_report(p.done, p.total, PROGRESS_EVERY) {
            println!("Converted {}/{} ({}%)", p.done, p.total, percent(p.done, p.total));
        }
    });

    let report = BatchRunner::sequential().run(
        &files,
        |p| convert_png_to_raw(p, &opts),
        Some(&progress),
    )?;

    println!();
    println!("Done! Converted: {}, Errors: {}", report.converted, report.errors);

    let png_size = total_size(&args.path, "png")?;
    let raw_size = total_size(&args.path, "raw")?;
    println!("PNG total: {:.1} MB", mib(png_size));
    println!("RAW total: {:.1} MB", mib(raw_size));
    if png_size > 0 {
        println!("Ratio: {:.1}x", raw_size as f64 / png_size as f64);
    }
    Ok(())
}
