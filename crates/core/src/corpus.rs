//! Corpus discovery and aggregation.
//!
//! The aggregator folds the per-file counts of many container files into one
//! corpus-wide [`KindCounts`]. Totals are integer sums, so the result does not
//! depend on the order files are visited in; discovery still sorts paths so
//! logs and errors come out the same on every run.
//!
//! A file that fails to decode aborts the whole run. The totals are left
//! exactly as they were before that file.

use crate::decoder::decode_bytes;
use crate::error::{Error, Result};
use crate::grammar::Grammar;
use crate::metrics::ScanMetrics;
use crate::stats::KindCounts;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Does `path` carry the container extension?
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext == extension)
}

/// Recursively find container files under `root`, sorted by path.
///
/// # Errors
/// `Error::Walk` if a directory cannot be read.
pub fn find_container_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if has_extension(entry.path(), extension) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Expand command-line inputs into the list of files to scan.
///
/// Directories are walked for container files; anything else is taken as a
/// file path as-is, whatever its extension. Paths naming the same file
/// (`corpus/a.bpe` and `./corpus/a.bpe`) are kept once, under the spelling
/// seen first.
///
/// # Errors
/// `Error::Walk` if a directory cannot be read, `Error::Io` if a path cannot
/// be resolved.
pub fn collect_inputs(inputs: &[PathBuf], extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let found = find_container_files(input, extension)?;
            if found.is_empty() {
                warn!(dir = %input.display(), extension, "no container files found");
            }
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(files.len());
    for path in files {
        let resolved = fs::canonicalize(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;
        if seen.insert(resolved) {
            unique.push(path);
        } else {
            debug!(path = %path.display(), "skipping duplicate input");
        }
    }
    Ok(unique)
}

/// Read and decode a single container file.
///
/// Returns the file's counts and its size in bytes.
pub fn scan_file(path: &Path, grammar: &Grammar) -> Result<(KindCounts, u64)> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let counts = decode_bytes(&bytes, grammar).map_err(|source| Error::Format {
        path: path.to_path_buf(),
        source,
    })?;

    Ok((counts, bytes.len() as u64))
}

/// Folds per-file counts into corpus totals.
#[derive(Debug)]
pub struct Aggregator {
    grammar: Grammar,
    totals: KindCounts,
    metrics: ScanMetrics,
}

impl Aggregator {
    pub fn new(grammar: Grammar) -> Self {
        Self {
            grammar,
            totals: KindCounts::new(),
            metrics: ScanMetrics::new(),
        }
    }

    /// Decode one file and add its counts to the totals.
    ///
    /// # Errors
    /// The file's I/O or format error, tagged with its path. Totals are not
    /// touched on error.
    pub fn add_file(&mut self, path: &Path) -> Result<KindCounts> {
        info!(path = %path.display(), "processing container file");

        let (counts, bytes) = scan_file(path, &self.grammar)?;
        debug!(
            path = %path.display(),
            bytes,
            fields = counts.total(),
            "decoded container file"
        );

        self.totals += &counts;
        self.metrics.record_file(bytes, counts.total());
        Ok(counts)
    }

    /// Add every file in order, stopping at the first error.
    pub fn add_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        for path in paths {
            self.add_file(path.as_ref())?;
        }
        Ok(())
    }

    pub fn totals(&self) -> &KindCounts {
        &self.totals
    }

    pub fn metrics(&self) -> &ScanMetrics {
        &self.metrics
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Stop the clock and hand back totals and metrics.
    pub fn finish(mut self) -> (KindCounts, ScanMetrics) {
        self.metrics.complete();
        (self.totals, self.metrics)
    }
}

/// Aggregate a list of files in one go.
pub fn aggregate<P: AsRef<Path>>(paths: &[P], grammar: &Grammar) -> Result<KindCounts> {
    let mut aggregator = Aggregator::new(grammar.clone());
    aggregator.add_files(paths)?;
    Ok(aggregator.finish().0)
}
