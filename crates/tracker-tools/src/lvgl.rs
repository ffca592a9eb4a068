//! `png-to-lvgl`: turn an image into an LVGL C array.

use crate::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracker_convert::convert_image_to_lvgl;

/// Convert a PNG image to an LVGL C array (RGB565 with alpha).
#[derive(Debug, Parser)]
#[command(name = "png-to-lvgl", version, about)]
pub struct LvglArgs {
    /// Input image
    pub input: PathBuf,

    /// Output C source file
    pub output: PathBuf,

    /// C variable name of the image descriptor
    pub var_name: String,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Run the converter.
pub fn run(args: &LvglArgs) -> Result<()> {
    let info = convert_image_to_lvgl(&args.input, &args.output, &args.var_name)?;

    println!(
        "Converted {} -> {}",
        args.input.display(),
        args.output.display()
    );
    println!("Size: {}x{}, {} bytes", info.width, info.height, info.data_size);
    Ok(())
}
