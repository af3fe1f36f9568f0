// Pattern Detector
// Scans text for known generator idioms and sums their weights into a capped score.

use std::sync::Arc;

use super::catalog::DetectionCatalog;
use crate::models::PatternMatch;
use crate::services::text_processor::{line_number_at, truncate_snippet};

#[derive(Debug, Clone)]
pub struct PatternDetector {
    catalog: Arc<DetectionCatalog>,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(DetectionCatalog::shared())
    }
}

impl PatternDetector {
    pub fn new(catalog: Arc<DetectionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn active_pattern_count(&self) -> usize {
        self.catalog.active_pattern_count()
    }

    /// Find every non-overlapping occurrence of every catalog pattern.
    /// Weights add up across patterns and repeats; the score is capped at 1.0.
    pub fn detect(&self, text: &str) -> (Vec<PatternMatch>, f64) {
        let mut matches = Vec::new();
        let mut total_weight = 0.0;

        for pattern in self.catalog.patterns() {
            for m in pattern.regex.find_iter(text) {
                matches.push(PatternMatch {
                    name: pattern.name.clone(),
                    confidence: pattern.weight,
                    line_start: line_number_at(text, m.start()),
                    line_end: line_number_at(text, m.end()),
                    snippet: truncate_snippet(m.as_str()),
                });
                total_weight += pattern.weight;
            }
        }

        (matches, total_weight.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::detection::catalog::{CatalogSpec, PatternSpec};

    #[test]
    fn test_no_matches_scores_zero() {
        let (matches, score) = PatternDetector::default().detect("");
        assert!(matches.is_empty());
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_go_error_check_lines() {
        let text = "package main\n\nfunc run() error {\n\tif err != nil {\n\t\treturn err\n\t}\n\treturn nil\n}\n";
        let (matches, score) = PatternDetector::default().detect(text);
        let m = matches
            .iter()
            .find(|m| m.name == "go_error_check")
            .expect("go_error_check match");
        assert_eq!(m.line_start, 4);
        assert_eq!(m.line_end, 6);
        assert_eq!(m.confidence, 0.12);
        assert!(score >= 0.12);
    }

    #[test]
    fn test_repeats_are_additive_and_capped() {
        let line = "if err != nil { return err }\n";
        let (matches, score) = PatternDetector::default().detect(&line.repeat(3));
        let hits = matches.iter().filter(|m| m.name == "go_error_check").count();
        assert_eq!(hits, 3);
        assert!((score - 0.36).abs() < 1e-9);

        let (_, capped) = PatternDetector::default().detect(&line.repeat(20));
        assert_eq!(capped, 1.0);
    }

    #[test]
    fn test_react_idioms() {
        let text = "const [count, setCount] = useState(0);\nexport default function App() {}\n";
        let (matches, score) = PatternDetector::default().detect(text);
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"use_state_destructure"));
        assert!(names.contains(&"export_default_function"));
        assert!((score - 0.14).abs() < 1e-9);
    }

    #[test]
    fn test_python_docstring_and_hints() {
        let text = "def load(path: str) -> dict:\n    \"\"\"Load a file.\n\n    Args:\n        path: location\n    \"\"\"\n";
        let (matches, _) = PatternDetector::default().detect(text);
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert!(names.contains(&"python_type_hints"));
        assert!(names.contains(&"python_docstring"));
    }

    #[test]
    fn test_snippet_truncated() {
        let spec = CatalogSpec {
            patterns: vec![PatternSpec::new("long", r"x+", 0.1)],
            boilerplate: vec![],
        };
        let detector = PatternDetector::new(Arc::new(DetectionCatalog::compile(&spec)));
        let (matches, _) = detector.detect(&"x".repeat(200));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].snippet.len(), 83);
        assert!(matches[0].snippet.ends_with("..."));
    }

    #[test]
    fn test_alternate_catalog() {
        let spec = CatalogSpec {
            patterns: vec![PatternSpec::new("unsafe_block", r"unsafe\s*\{", 0.4)],
            boilerplate: vec![],
        };
        let detector = PatternDetector::new(Arc::new(DetectionCatalog::compile(&spec)));
        assert_eq!(detector.active_pattern_count(), 1);
        let (matches, score) = detector.detect("unsafe { a }\nunsafe{ b }");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].line_start, 2);
        assert!((score - 0.8).abs() < 1e-9);
    }
}
