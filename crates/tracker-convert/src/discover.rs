//! Finding input files in a tile tree.

use crate::{ConvertError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// All regular files below `base` with the given extension, sorted.
///
/// The extension is matched case-sensitively and without the leading dot,
/// so `find_files(dir, "png")` picks `3/4/5.png` but not `5.PNG`.
pub fn find_files(base: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !base.exists() {
        return Err(ConvertError::MissingInput(base.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(base) {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Combined size in bytes of the files [`find_files`] would return.
pub fn total_size(base: &Path, extension: &str) -> Result<u64> {
    let mut total = 0;
    for path in find_files(base, extension)? {
        total += path.metadata()?.len();
    }
    Ok(total)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}
