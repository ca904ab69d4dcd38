//! Metrics collection and reporting for a corpus scan.
//!
//! Tracks how much input the aggregator went through:
//! - Files and bytes read
//! - Fields decoded
//! - Timing information
//!
//! # Thread Safety
//!
//! `ScanMetrics` is NOT thread-safe. Scans are single-threaded, so the
//! aggregator owns one instance and updates it after each file.

use std::time::{Duration, Instant};

/// Counters and timing for one scan.
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    // === Timing ===
    /// When the scan started
    pub start_time: Instant,

    /// When the scan ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Container files decoded successfully
    pub files_scanned: u64,

    /// Total bytes read across those files
    pub bytes_scanned: u64,

    /// Fields decoded across those files
    pub fields_decoded: u64,

    /// Largest single file, in bytes
    pub largest_file_bytes: u64,
}

impl ScanMetrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            files_scanned: 0,
            bytes_scanned: 0,
            fields_decoded: 0,
            largest_file_bytes: 0,
        }
    }

    /// Record one successfully decoded file.
    pub fn record_file(&mut self, bytes: u64, fields: u64) {
        self.files_scanned += 1;
        self.bytes_scanned += bytes;
        self.fields_decoded += fields;
        self.largest_file_bytes = self.largest_file_bytes.max(bytes);
    }

    /// Mark the scan as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Average fields per file (0.0 if no files).
    pub fn fields_per_file(&self) -> f64 {
        if self.files_scanned == 0 {
            0.0
        } else {
            self.fields_decoded as f64 / self.files_scanned as f64
        }
    }

    /// Compute throughput in bytes/second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.bytes_scanned as f64 / duration_secs
        }
    }

    /// Human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "=== Scan Summary ===\n\
             Duration: {} ms\n\
             Files: {}\n\
             Bytes: {} ({:.2} KiB, largest file {} bytes)\n\
             Fields: {} ({:.1} per file)\n\
             Throughput: {:.2} MB/s\n",
            self.duration().as_millis(),
            self.files_scanned,
            self.bytes_scanned,
            self.bytes_scanned as f64 / 1024.0,
            self.largest_file_bytes,
            self.fields_decoded,
            self.fields_per_file(),
            self.throughput_bps() / 1_000_000.0,
        )
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             files_scanned={}\n\
             bytes_scanned={}\n\
             fields_decoded={}\n\
             largest_file_bytes={}\n",
            self.duration().as_millis(),
            self.files_scanned,
            self.bytes_scanned,
            self.fields_decoded,
            self.largest_file_bytes,
        )
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}
