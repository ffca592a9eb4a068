//! Convert a PNG tile tree to JPEG.
//!
//! Usage: convert-to-jpeg tiles/IDF -q 80 -j 8 [--keep-png]

use clap::Parser;
use std::process::ExitCode;
use tracker_tools::{jpeg::{self, JpegArgs}, exit_code, logging};

fn main() -> ExitCode {
    let args = JpegArgs::parse();
    logging::init(args.verbose);
    exit_code(jpeg::run(&args))
}
