//! Convert a PNG tile tree to RGB565 raw tiles.
//!
//! Usage: convert-to-raw tiles/IDF [--delete-png]

use clap::Parser;
use std::process::ExitCode;
use tracker_tools::{raw::{self, RawArgs}, exit_code, logging};

fn main() -> ExitCode {
    let args = RawArgs::parse();
    logging::init(args.verbose);
    exit_code(raw::run(&args))
}
