//! Download OSM tiles for offline use on the tracker.
//!
//! Usage:
//!     download-tiles --region IDF --bbox 48.1,1.4,49.2,3.6 --zoom 10,12,14
//!     download-tiles --region ARA --dry-run
//!     download-tiles --list

use clap::Parser;
use std::process::ExitCode;
use tracker_tools::{download::{self, DownloadArgs}, exit_code, logging};

fn main() -> ExitCode {
    let args = DownloadArgs::parse();
    logging::init(args.verbose);
    exit_code(download::run(&args))
}
