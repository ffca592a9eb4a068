//! Batch conversion over many files.
//!
//! Every file is handed to the conversion function exactly once. With more
//! than one job the work runs on a dedicated rayon pool of exactly that many
//! threads; conversions share nothing, so the only coordination is an atomic
//! completion counter used for progress reporting.

use crate::{ConvertError, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of parallel conversion jobs.
pub const DEFAULT_JOBS: usize = 4;

/// Outcome of one file, passed to the progress callback.
#[derive(Debug)]
pub struct BatchProgress<'a> {
    /// File that was just processed.
    pub path: &'a Path,
    /// Files completed so far, this one included.
    pub done: usize,
    /// Number of input files.
    pub total: usize,
    /// Why the file failed, if it did.
    pub error: Option<&'a ConvertError>,
}

/// Progress callback, called after every file.
///
/// With several jobs it is called from worker threads and completions
/// arrive in no particular file order.
pub type ProgressCallback = Box<dyn Fn(&BatchProgress<'_>) + Send + Sync>;

/// A file that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Input file.
    pub path: PathBuf,
    /// Rendered error.
    pub error: String,
}

/// Totals for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of input files.
    pub total: usize,
    /// Files converted successfully.
    pub converted: usize,
    /// Files that failed.
    pub errors: usize,
    /// Details of each failure, in input order.
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    fn record(&mut self, path: &Path, result: Result<()>) {
        match result {
            Ok(()) => self.converted += 1,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "conversion failed");
                self.errors += 1;
                self.failures.push(BatchFailure {
                    path: path.to_path_buf(),
                    error: e.to_string(),
                });
            }
        }
    }
}

/// Whether progress should be printed after `done` of `total` items:
/// the first item, every `every`th item, and the last one.
pub fn should_report(done: usize, total: usize, every: usize) -> bool {
    done == 1 || done == total || (every > 0 && done % every == 0)
}

/// Runs a conversion over a list of files.
#[derive(Debug, Clone, Copy)]
pub struct BatchRunner {
    jobs: usize,
}

impl Default for BatchRunner {
    fn default() -> Self {
        BatchRunner { jobs: DEFAULT_JOBS }
    }
}

impl BatchRunner {
    /// Create a runner using `jobs` worker threads.
    pub fn new(jobs: usize) -> Result<Self> {
        if jobs == 0 {
            return Err(ConvertError::InvalidJobs);
        }
        Ok(Self { jobs })
    }

    /// Single-threaded runner.
    pub fn sequential() -> Self {
        Self { jobs: 1 }
    }

    /// Number of worker threads.
    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Apply `op` to every file.
    ///
    /// Per-file errors are logged and collected in the report; only a
    /// failure to start the worker pool is returned as an error.
    pub fn run<T, F>(
        &self,
        files: &[PathBuf],
        op: F,
        progress: Option<&ProgressCallback>,
    ) -> Result<BatchReport>
    where
        F: Fn(&Path) -> Result<T> + Sync,
    {
        let total = files.len();
        let done = AtomicUsize::new(0);

        let convert_one = |path: &PathBuf| {
            let result = op(path.as_path()).map(|_| ());
            let n = done.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(cb) = progress {
                cb(&BatchProgress {
                    path: path.as_path(),
                    done: n,
                    total,
                    error: result.as_ref().err(),
                });
            }
            result
        };

        let results: Vec<Result<()>> = if self.jobs == 1 {
            files.iter().map(convert_one).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()?;
            pool.install(|| files.par_iter().map(convert_one).collect())
        };

        let mut report = BatchReport {
            total,
            ..Default::default()
        };
        for (path, result) in files.iter().zip(results) {
            report.record(path, result);
        }
        Ok(report)
    }
}
