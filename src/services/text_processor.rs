// Text Processing Helpers
// Line splitting and span utilities shared by the stylometry and pattern analyzers

/// Maximum snippet length (in characters) kept for a pattern match
pub const SNIPPET_MAX_CHARS: usize = 80;

/// Split text into newline-delimited segments.
/// A trailing newline yields a trailing empty segment, and "" yields one empty segment.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Number of newline-delimited segments in `text`
pub fn count_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// A line is blank when it has no content after trimming
#[inline]
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Width (in bytes) of the leading run of spaces and tabs
pub fn leading_whitespace_width(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

/// Recognize comment lines by prefix (`//`, `#`, `/*`, `*`)
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with("//")
        || trimmed.starts_with('#')
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
}

/// 1-based line number of a byte offset
pub fn line_number_at(text: &str, byte_offset: usize) -> usize {
    text.as_bytes()[..byte_offset.min(text.len())]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}

/// Truncate a snippet to `SNIPPET_MAX_CHARS` characters, appending "..." when cut
pub fn truncate_snippet(s: &str) -> String {
    match s.char_indices().nth(SNIPPET_MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}

/// Keep the tail of a path so it fits in `max_chars`, prefixing "..." when cut
pub fn truncate_path_left(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let tail: String = path.chars().skip(count - keep).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_keeps_trailing_segment() {
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b", ""]);
        assert_eq!(count_lines("\n\n\n"), 4);
    }

    #[test]
    fn test_leading_whitespace_width() {
        assert_eq!(leading_whitespace_width("    let x = 1;"), 4);
        assert_eq!(leading_whitespace_width("\t\tfoo"), 2);
        assert_eq!(leading_whitespace_width("foo"), 0);
        assert_eq!(leading_whitespace_width("   "), 3);
    }

    #[test]
    fn test_is_comment_line() {
        assert!(is_comment_line("  // note"));
        assert!(is_comment_line("# python"));
        assert!(is_comment_line(" * doc line"));
        assert!(is_comment_line("/* block"));
        assert!(!is_comment_line("let a = 1; // trailing"));
    }

    #[test]
    fn test_line_number_at() {
        let text = "one\ntwo\nthree";
        assert_eq!(line_number_at(text, 0), 1);
        assert_eq!(line_number_at(text, 4), 2);
        assert_eq!(line_number_at(text, text.len()), 3);
    }

    #[test]
    fn test_truncate_snippet_counts_chars() {
        let short = "fn main() {}";
        assert_eq!(truncate_snippet(short), short);

        let long = "é".repeat(100);
        let cut = truncate_snippet(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), SNIPPET_MAX_CHARS + 3);
    }

    #[test]
    fn test_truncate_path_left() {
        assert_eq!(truncate_path_left("src/main.rs", 45), "src/main.rs");
        let long = format!("{}/file.rs", "a".repeat(60));
        let cut = truncate_path_left(&long, 45);
        assert_eq!(cut.chars().count(), 45);
        assert!(cut.starts_with("..."));
        assert!(cut.ends_with("/file.rs"));
    }
}
