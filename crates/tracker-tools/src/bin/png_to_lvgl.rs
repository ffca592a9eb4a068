//! Convert an image to an LVGL C array.
//!
//! Usage: png-to-lvgl input.png output.c variable_name

use clap::Parser;
use std::process::ExitCode;
use tracker_tools::{lvgl::{self, LvglArgs}, exit_code, logging};

fn main() -> ExitCode {
    let args = LvglArgs::parse();
    logging::init(args.verbose);
    exit_code(lvgl::run(&args))
}
