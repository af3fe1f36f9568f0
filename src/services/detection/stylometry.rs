// Stylometry Analyzer
// Extracts normalized formatting statistics from source text and reduces them
// to a single style confidence.

use regex::Regex;
use std::sync::{Arc, OnceLock};

use super::catalog::DetectionCatalog;
use crate::models::ConfidenceLevel;
use crate::services::text_processor::{
    is_blank, is_comment_line, leading_whitespace_width, split_lines,
};

/// Returned when a feature has too little input to say anything
const NEUTRAL: f64 = 0.5;
/// Below this many identifiers naming consistency is neutral
const MIN_NAMING_TOKENS: usize = 5;

// Calibration constants for the "sweet spot" signals
const COMMENT_DENSITY_TARGET: f64 = 0.15;
const EMPTY_LINE_TARGET: f64 = 0.15;
const AVG_LINE_LEN_TARGET: f64 = 45.0;
const LINE_VARIANCE_SCALE: f64 = 30.0;
const SWEET_SPOT_SLOPE: f64 = 5.0;

// Feature weights (sum to 1.0)
const W_NAMING: f64 = 0.20;
const W_INDENTATION: f64 = 0.20;
const W_BOILERPLATE: f64 = 0.20;
const W_COMMENT: f64 = 0.10;
const W_LINE_VARIANCE: f64 = 0.15;
const W_EMPTY_LINE: f64 = 0.10;
const W_LINE_LENGTH: f64 = 0.05;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?-u:\b)([a-z][a-zA-Z0-9_]*)(?-u:\b)").expect("identifier regex"))
}

fn camel_case_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z]+([A-Z][a-z]*)*$").expect("camelCase regex"))
}

/// Style features of one text. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleMetrics {
    pub naming_consistency: f64,
    pub indentation_consistency: f64,
    pub comment_density: f64,
    pub avg_line_length: f64,
    /// Population standard deviation of non-blank line lengths
    pub line_length_variance: f64,
    pub boilerplate_ratio: f64,
    pub empty_line_ratio: f64,
}

impl StyleMetrics {
    /// Weighted combination of the shaped feature signals, in [0, 1]
    pub fn ai_confidence(&self) -> f64 {
        let signals = [
            (self.naming_consistency, W_NAMING),
            (self.indentation_consistency, W_INDENTATION),
            (self.boilerplate_ratio, W_BOILERPLATE),
            (sweet_spot(self.comment_density, COMMENT_DENSITY_TARGET), W_COMMENT),
            (
                (1.0 - self.line_length_variance / LINE_VARIANCE_SCALE).max(0.0),
                W_LINE_VARIANCE,
            ),
            (sweet_spot(self.empty_line_ratio, EMPTY_LINE_TARGET), W_EMPTY_LINE),
            (
                1.0 - (self.avg_line_length - AVG_LINE_LEN_TARGET).abs() / AVG_LINE_LEN_TARGET,
                W_LINE_LENGTH,
            ),
        ];

        signals
            .iter()
            .map(|(signal, weight)| clamp_unit(*signal) * weight)
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_score(self.ai_confidence())
    }
}

#[inline]
fn sweet_spot(value: f64, target: f64) -> f64 {
    1.0 - (value - target).abs() * SWEET_SPOT_SLOPE
}

#[inline]
fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Stateless analyzer holding a reference to the shared boilerplate catalog
#[derive(Debug, Clone)]
pub struct StyleAnalyzer {
    catalog: Arc<DetectionCatalog>,
}

impl Default for StyleAnalyzer {
    fn default() -> Self {
        Self::new(DetectionCatalog::shared())
    }
}

impl StyleAnalyzer {
    pub fn new(catalog: Arc<DetectionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn analyze(&self, text: &str) -> StyleMetrics {
        let lines = split_lines(text);
        let non_blank: Vec<&str> = lines.iter().copied().filter(|l| !is_blank(l)).collect();

        StyleMetrics {
            naming_consistency: naming_consistency(text),
            indentation_consistency: indentation_consistency(&non_blank),
            comment_density: comment_density(&lines),
            avg_line_length: avg_line_length(&non_blank),
            line_length_variance: line_length_std_dev(&non_blank),
            boilerplate_ratio: self.boilerplate_ratio(text, lines.len()),
            empty_line_ratio: empty_line_ratio(&lines),
        }
    }

    fn boilerplate_ratio(&self, text: &str, line_count: usize) -> f64 {
        if line_count == 0 {
            return 0.0;
        }
        let matches: usize = self
            .catalog
            .boilerplate()
            .iter()
            .map(|re| re.find_iter(text).count())
            .sum();
        let ratio = matches as f64 / (line_count as f64 / 10.0);
        ratio.min(1.0)
    }
}

fn naming_consistency(text: &str) -> f64 {
    let tokens: Vec<&str> = identifier_re().find_iter(text).map(|m| m.as_str()).collect();
    if tokens.len() < MIN_NAMING_TOKENS {
        return NEUTRAL;
    }

    let camel = tokens.iter().filter(|t| camel_case_re().is_match(t)).count();
    let snake = tokens
        .iter()
        .filter(|t| t.contains('_') && t.to_lowercase() == **t)
        .count();

    camel.max(snake) as f64 / tokens.len() as f64
}

fn indentation_consistency(non_blank: &[&str]) -> f64 {
    let indents: Vec<usize> = non_blank.iter().map(|l| leading_whitespace_width(l)).collect();
    if indents.is_empty() {
        return NEUTRAL;
    }

    let unit = if indents.iter().any(|i| i % 2 == 0 && i % 4 != 0) { 2 } else { 4 };
    let consistent = indents.iter().filter(|i| *i % unit == 0).count();
    consistent as f64 / indents.len() as f64
}

fn comment_density(lines: &[&str]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    lines.iter().filter(|l| is_comment_line(l)).count() as f64 / lines.len() as f64
}

fn avg_line_length(non_blank: &[&str]) -> f64 {
    if non_blank.is_empty() {
        return 0.0;
    }
    non_blank.iter().map(|l| l.len()).sum::<usize>() as f64 / non_blank.len() as f64
}

fn line_length_std_dev(non_blank: &[&str]) -> f64 {
    if non_blank.len() < 2 {
        return 0.0;
    }
    let mean = avg_line_length(non_blank);
    let sum_sq: f64 = non_blank
        .iter()
        .map(|l| {
            let d = l.len() as f64 - mean;
            d * d
        })
        .sum();
    (sum_sq / non_blank.len() as f64).sqrt()
}

fn empty_line_ratio(lines: &[&str]) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    lines.iter().filter(|l| is_blank(l)).count() as f64 / lines.len() as f64
}
