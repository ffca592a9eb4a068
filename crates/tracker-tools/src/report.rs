//! Console output helpers.

use std::io::{self, BufRead, Write};
use tracker_tiles::{FetchStatus, TileProgress};

/// Print a tile-count row every this many tiles.
pub const TILE_PROGRESS_EVERY: u64 = 50;

/// Bytes as MiB.
pub fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Integer percentage of `done` over `total`.
pub fn percent(done: usize, total: usize) -> usize {
    if total == 0 {
        return 100;
    }
    100 * done / total
}

/// Console output for one downloaded tile.
///
/// Most tiles print a single marker (`.` skipped, `+` downloaded, `X`
/// failed) without a newline; every [`TILE_PROGRESS_EVERY`]th tile prints a
/// `[i/n]` row instead. Failures additionally print the error on its own
/// line.
pub fn tile_marker(progress: &TileProgress<'_>) -> String {
    let mut out = String::new();
    let marker = match progress.result {
        Ok(FetchStatus::Exists) => ".",
        Ok(FetchStatus::Downloaded(_)) => "+",
        Err(e) => {
            out.push_str(&format!(
                "\n  Error downloading {}: {}\n",
                progress.coord, e
            ));
            "X"
        }
    };

    if progress.index % TILE_PROGRESS_EVERY == 0 {
        out.push_str(&format!("  [{}/{}]\n", progress.index, progress.total));
    } else {
        out.push_str(marker);
    }
    out
}

/// Whether a yes/no answer means yes.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Ask a `[y/N]` question on the terminal.
pub fn confirm(question: &str) -> io::Result<bool> {
    print!("{question} [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(is_yes(&line))
}
