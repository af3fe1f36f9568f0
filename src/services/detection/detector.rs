// Detector
// Combines stylometry and pattern evidence into one per-file verdict.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use super::catalog::DetectionCatalog;
use super::patterns::PatternDetector;
use super::stylometry::StyleAnalyzer;
use super::threshold::DetectionThreshold;
use super::walker::ScanOptions;
use crate::models::{ConfidenceLevel, DetectionResult};
use crate::services::text_processor::count_lines;

/// Style evidence weight in the combined score
pub const STYLE_WEIGHT: f64 = 0.45;
/// Pattern evidence weight in the combined score
pub const PATTERN_WEIGHT: f64 = 0.55;

#[derive(Error, Debug)]
pub enum DetectionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scan cancelled after {files_scanned} file(s)")]
    Cancelled { files_scanned: usize },
}

/// Immutable per-invocation settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectorConfig {
    pub threshold: DetectionThreshold,
    pub scan: ScanOptions,
}

#[derive(Debug, Clone)]
pub struct Detector {
    style: StyleAnalyzer,
    patterns: PatternDetector,
    config: DetectorConfig,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl Detector {
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_catalog(DetectionCatalog::shared(), config)
    }

    pub fn with_catalog(catalog: Arc<DetectionCatalog>, config: DetectorConfig) -> Self {
        Self {
            style: StyleAnalyzer::new(catalog.clone()),
            patterns: PatternDetector::new(catalog),
            config,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn threshold(&self) -> DetectionThreshold {
        self.config.threshold
    }

    /// Analyze text. The label is carried into the result and never scored.
    pub fn analyze_code(&self, text: &str, label: &str) -> DetectionResult {
        let style_score = clamp_score(self.style.analyze(text).ai_confidence());
        let (patterns, pattern_score) = self.patterns.detect(text);
        let pattern_score = clamp_score(pattern_score);

        let combined = combine_scores(style_score, pattern_score);

        DetectionResult {
            file_path: label.to_string(),
            ai_confidence: combined,
            confidence_level: ConfidenceLevel::from_score(combined),
            style_score,
            pattern_score,
            patterns,
            is_ai_generated: self.config.threshold.is_ai(combined),
            lines_of_code: count_lines(text),
        }
    }

    /// Read and analyze one file. Extension filtering does not apply here.
    pub fn analyze_file(&self, path: &Path) -> Result<DetectionResult, DetectionError> {
        let bytes = fs::read(path).map_err(|source| DetectionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let result = self.analyze_code(&text, &path.to_string_lossy());
        debug!(
            file = %result.file_path,
            confidence = result.ai_confidence,
            ai = result.is_ai_generated,
            "detect.file"
        );
        Ok(result)
    }
}

/// Weighted combination of the two clamped sub-scores
#[inline]
pub fn combine_scores(style_score: f64, pattern_score: f64) -> f64 {
    style_score * STYLE_WEIGHT + pattern_score * PATTERN_WEIGHT
}

#[inline]
fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
