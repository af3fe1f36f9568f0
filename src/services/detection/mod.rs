// Detection Module
// AI-generated code detection organized into specialized submodules:
// - catalog: Shared, immutable pattern and boilerplate tables
// - stylometry: Formatting statistics and style confidence
// - patterns: Generator idiom matching and pattern confidence
// - threshold: Decision threshold (percent at the boundary, fraction inside)
// - detector: Combines both signals into a per-file result
// - walker: Directory traversal with skip-list and extension filter
// - aggregation: Directory-level ScanResult accumulation and scans
// - summary: Terminal rendering of scan results

pub mod catalog;
pub mod stylometry;
pub mod patterns;
pub mod threshold;
pub mod detector;
pub mod walker;
pub mod aggregation;
pub mod summary;

// Re-export commonly used items
pub use catalog::{CatalogSpec, CompiledPattern, DetectionCatalog, PatternSpec};
pub use stylometry::{StyleAnalyzer, StyleMetrics};
pub use patterns::PatternDetector;
pub use threshold::{DetectionThreshold, DEFAULT_THRESHOLD_PERCENT};
pub use detector::{combine_scores, DetectionError, Detector, DetectorConfig};
pub use walker::{ScanOptions, DEFAULT_EXTENSIONS, DEFAULT_SKIP_DIRS};
pub use aggregation::ScanAggregator;
pub use summary::{render_text, sorted_by_confidence};
