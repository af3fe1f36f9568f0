// CodeSniff Data Models
// Serialized shapes consumed by CLI/JSON output and editor integrations

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Pattern Match ============

/// One occurrence of a catalog pattern in the analyzed text.
/// Keys are PascalCase in JSON (`Name`, `LineStart`, ...), unlike the enclosing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PatternMatch {
    pub name: String,
    /// Weight this occurrence contributed to the pattern score
    pub confidence: f64,
    /// 1-based line of the first matched byte
    pub line_start: usize,
    /// 1-based line of the end of the match
    pub line_end: usize,
    pub snippet: String,
}

// ============ Confidence Level ============

/// Discretized bucket of a continuous confidence score.
/// Boundaries are exclusive-lower / inclusive-upper.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.85 {
            Self::VeryHigh
        } else if score > 0.70 {
            Self::High
        } else if score > 0.50 {
            Self::Medium
        } else if score > 0.30 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============ Per-file Result ============

/// Detection outcome for a single file or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub file_path: String,
    /// Combined confidence in [0, 1]; text UIs multiply by 100
    pub ai_confidence: f64,
    pub confidence_level: ConfidenceLevel,
    pub style_score: f64,
    pub pattern_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PatternMatch>,
    pub is_ai_generated: bool,
    pub lines_of_code: usize,
}

// ============ Directory / Batch Result ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScanResult {
    pub files_scanned: usize,
    pub ai_detected: usize,
    pub human_written: usize,
    pub max_ai_confidence: f64,
    /// Line-weighted share of AI-flagged code, 0-100
    pub ai_percentage: f64,
    /// Filesystem-walk order; callers sort for display
    pub results: Vec<DetectionResult>,
}
