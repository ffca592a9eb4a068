//! # tracker-tools
//!
//! Command-line front ends for preparing the LoRa APRS tracker's offline
//! maps. Each binary is a thin `main` around one module here:
//!
//! | Binary | Module |
//! |--------|--------|
//! | `download-tiles` | [`download`] |
//! | `convert-to-jpeg` | [`jpeg`] |
//! | `convert-to-raw` | [`raw`] |
//! | `png-to-lvgl` | [`lvgl`] |
//!
//! Typical workflow: download a region, then convert it, then copy the
//! region directory to `/LoRa_Tracker/Maps/` on the SD card.

pub mod download;
mod error;
pub mod jpeg;
pub mod logging;
pub mod lvgl;
pub mod raw;
pub mod report;

pub use error::{Result, ToolError};

use std::process::ExitCode;

/// Turn a run result into the process exit code, printing fatal errors.
pub fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
