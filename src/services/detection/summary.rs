// Text Summary
// Human-readable rendering of a ScanResult for terminal output

use std::cmp::Ordering;
use std::fmt::Write;

use crate::models::{DetectionResult, ScanResult};
use crate::services::text_processor::truncate_path_left;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const PATH_WIDTH: usize = 45;

/// Results ordered by confidence, highest first. Ties keep walk order.
pub fn sorted_by_confidence(results: &[DetectionResult]) -> Vec<&DetectionResult> {
    let mut sorted: Vec<&DetectionResult> = results.iter().collect();
    sorted.sort_by(|a, b| {
        b.ai_confidence
            .partial_cmp(&a.ai_confidence)
            .unwrap_or(Ordering::Equal)
    });
    sorted
}

pub fn render_text(result: &ScanResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, result);
    out
}

fn write_report(out: &mut String, result: &ScanResult) -> std::fmt::Result {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  AI Code Detection")?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "  Files scanned:     {}", result.files_scanned)?;
    writeln!(out, "  AI-generated:      {}", result.ai_detected)?;
    writeln!(out, "  Human-written:     {}", result.human_written)?;
    writeln!(out, "  AI percentage:     {:.1}%", result.ai_percentage)?;
    writeln!(out, "  Max AI confidence: {:.0}%", result.max_ai_confidence * 100.0)?;
    writeln!(out)?;

    if !result.results.is_empty() {
        writeln!(out, "  FILES")?;
        for r in sorted_by_confidence(&result.results) {
            let marker = if r.is_ai_generated { "🤖" } else { "✓" };
            writeln!(
                out,
                "     {} {:<width$} {:>5.0}%",
                marker,
                truncate_path_left(&r.file_path, PATH_WIDTH),
                r.ai_confidence * 100.0,
                width = PATH_WIDTH
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", RULE)?;
    if result.ai_detected > 0 {
        writeln!(out, "  🤖 {} file(s) detected as AI-generated", result.ai_detected)?;
    } else {
        writeln!(out, "  ✅ No AI-generated code detected")?;
    }
    writeln!(out, "{}", RULE)?;
    Ok(())
}
