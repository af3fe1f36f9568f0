// Aggregation Logic
// Accumulates per-file results into a directory-level ScanResult and drives
// directory scans (sequential, cancellable, parallel).

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use super::detector::{DetectionError, Detector};
use crate::models::{DetectionResult, ScanResult};

/// Incremental ScanResult builder. Results keep insertion order.
#[derive(Debug, Default)]
pub struct ScanAggregator {
    result: ScanResult,
    total_ai_lines: usize,
    total_lines: usize,
}

impl ScanAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, r: DetectionResult) {
        self.result.files_scanned += 1;
        if r.is_ai_generated {
            self.result.ai_detected += 1;
            self.total_ai_lines += r.lines_of_code;
        } else {
            self.result.human_written += 1;
        }
        self.total_lines += r.lines_of_code;
        if r.ai_confidence > self.result.max_ai_confidence {
            self.result.max_ai_confidence = r.ai_confidence;
        }
        self.result.results.push(r);
    }

    pub fn files_scanned(&self) -> usize {
        self.result.files_scanned
    }

    /// Line-weighted AI percentage; 0 when no lines were seen
    pub fn finish(mut self) -> ScanResult {
        self.result.ai_percentage = if self.total_lines > 0 {
            self.total_ai_lines as f64 / self.total_lines as f64 * 100.0
        } else {
            0.0
        };
        self.result
    }
}

impl Detector {
    /// Wrap a single analyzed file in a ScanResult
    pub fn single_file_scan(&self, result: DetectionResult) -> ScanResult {
        let mut agg = ScanAggregator::new();
        agg.push(result);
        agg.finish()
    }

    /// Best-effort recursive scan. Unreadable files are left out; a missing root
    /// produces an empty result.
    pub fn scan_directory(&self, root: &Path) -> ScanResult {
        // Only cancellation fails a scan, and this flag is never raised
        let never = AtomicBool::new(false);
        self.scan_directory_cancellable(root, &never)
            .unwrap_or_default()
    }

    /// Recursive scan that checks `stop` before each file
    pub fn scan_directory_cancellable(
        &self,
        root: &Path,
        stop: &AtomicBool,
    ) -> Result<ScanResult, DetectionError> {
        let files = self.candidate_files(root);

        let mut agg = ScanAggregator::new();
        for path in &files {
            if stop.load(Ordering::Relaxed) {
                warn!("[SCAN] cancelled after {} file(s)", agg.files_scanned());
                return Err(DetectionError::Cancelled {
                    files_scanned: agg.files_scanned(),
                });
            }
            match self.analyze_file(path) {
                Ok(r) => agg.push(r),
                Err(e) => debug!("[SCAN] skipped: {}", e),
            }
        }

        let result = agg.finish();
        log_summary(root, &result);
        Ok(result)
    }

    /// Analyze candidate files on the rayon pool. Results are aggregated in walk
    /// order, so the output matches `scan_directory_cancellable`.
    pub fn scan_directory_parallel(
        &self,
        root: &Path,
        stop: &AtomicBool,
    ) -> Result<ScanResult, DetectionError> {
        let files = self.candidate_files(root);

        let analyzed: Vec<Option<DetectionResult>> = files
            .par_iter()
            .map(|path| {
                if stop.load(Ordering::Relaxed) {
                    return None;
                }
                match self.analyze_file(path) {
                    Ok(r) => Some(r),
                    Err(e) => {
                        debug!("[SCAN] skipped: {}", e);
                        None
                    }
                }
            })
            .collect();

        if stop.load(Ordering::Relaxed) {
            let done = analyzed.iter().filter(|r| r.is_some()).count();
            warn!("[SCAN] cancelled after {} file(s)", done);
            return Err(DetectionError::Cancelled { files_scanned: done });
        }

        let mut agg = ScanAggregator::new();
        for r in analyzed.into_iter().flatten() {
            agg.push(r);
        }

        let result = agg.finish();
        log_summary(root, &result);
        Ok(result)
    }

    /// Walk `root`, warning when it does not exist
    fn candidate_files(&self, root: &Path) -> Vec<PathBuf> {
        if !root.exists() {
            warn!("[SCAN] root does not exist: {}", root.display());
        }
        let files = self.config().scan.collect_files(root);
        debug!("[SCAN] {} candidate file(s) under {}", files.len(), root.display());
        files
    }
}

fn log_summary(root: &Path, result: &ScanResult) {
    info!(
        root = %root.display(),
        files = result.files_scanned,
        ai = result.ai_detected,
        human = result.human_written,
        ai_percentage = result.ai_percentage,
        "scan.completed"
    );
}
