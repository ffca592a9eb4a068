//! `convert-to-jpeg`: re-encode a PNG tile tree as JPEG.

use crate::report::{mib, percent};
use crate::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracker_convert::{
    convert_png_to_jpeg, find_files, should_report, total_size, BatchProgress, BatchRunner,
    JpegOptions, ProgressCallback, DEFAULT_JOBS, DEFAULT_JPEG_QUALITY,
};

/// Print progress every this many tiles.
const PROGRESS_EVERY: usize = 500;

/// Convert PNG map tiles to JPEG format.
#[derive(Debug, Parser)]
#[command(name = "convert-to-jpeg", version, about)]
pub struct JpegArgs {
    /// Path to directory containing PNG tiles
    pub path: PathBuf,

    /// JPEG quality (1-100)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Number of parallel conversion jobs
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Keep PNG files after conversion
    #[arg(long)]
    pub keep_png: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl JpegArgs {
    /// Conversion options selected by the flags.
    pub fn options(&self) -> JpegOptions {
        JpegOptions {
            quality: self.quality,
            keep_source: self.keep_png,
        }
    }
}

/// Run the converter.
pub fn run(args: &JpegArgs) -> Result<()> {
    let opts = args.options();
    opts.validate()?;
    let runner = BatchRunner::new(args.jobs)?;

    let files = find_files(&args.path, "png")?;
    let total = files.len();
    if total == 0 {
        println!("No PNG files found in {}", args.path.display());
        return Ok(());
    }

    println!("Found {total} PNG tiles to convert");
    println!("JPEG quality: {}", opts.quality);
    println!("Keep PNG files: {}", opts.keep_source);
    println!("Parallel jobs: {}", runner.jobs());
    println!();

    let progress: ProgressCallback = Box::new(|p: &BatchProgress<'_>| {
        if let Some(e) = p.error {
            println!("  Error: {}: {}", p.path.display(), e);
        }
        if should_report(p.done, p.total, PROGRESS_EVERY) {
            println!("Progress: {}/{} ({}%)", p.done, p.total, percent(p.done, p.total));
        }
    });

    let report = runner.run(&files, |p| convert_png_to_jpeg(p, &opts), Some(&progress))?;

    println!();
    println!("Done! Converted: {}, Errors: {}", report.converted, report.errors);

    if opts.keep_source {
        let png_size = total_size(&args.path, "png")?;
        println!("PNG total: {:.1} MB", mib(png_size));
    }
    let jpeg_size = total_size(&args.path, "jpg")?;
    println!("JPEG total: {:.1} MB", mib(jpeg_size));
    Ok(())
}
