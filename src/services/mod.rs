// CodeSniff Core Services

pub mod text_processor;
pub mod config_store;
pub mod detection;

pub use config_store::*;

// Re-export detection engine entry points
pub use detection::{
    render_text,
    sorted_by_confidence,
    DetectionCatalog,
    DetectionError,
    DetectionThreshold,
    Detector,
    DetectorConfig,
    PatternDetector,
    ScanAggregator,
    ScanOptions,
    StyleAnalyzer,
    StyleMetrics,
};
