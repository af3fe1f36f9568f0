// Detection Catalog
// Immutable table of generator-idiom patterns and scaffold (boilerplate) regexes.
// Built once, shared read-only across analyses.

use regex::Regex;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Uncompiled pattern definition
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub name: String,
    pub pattern: String,
    pub weight: f64,
}

impl PatternSpec {
    pub fn new(name: &str, pattern: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            weight,
        }
    }
}

/// Uncompiled catalog: weighted idiom patterns plus unweighted boilerplate regexes
#[derive(Debug, Clone)]
pub struct CatalogSpec {
    pub patterns: Vec<PatternSpec>,
    pub boilerplate: Vec<String>,
}

impl Default for CatalogSpec {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            boilerplate: default_boilerplate(),
        }
    }
}

fn default_patterns() -> Vec<PatternSpec> {
    vec![
        // Error handling
        PatternSpec::new(
            "copilot_try_catch",
            r"try\s*\{[^}]+\}\s*catch\s*\(\s*(?:error|err|e)\s*(?::\s*\w+)?\s*\)\s*\{[^}]*(?:console\.(?:error|log)|throw)[^}]*\}",
            0.15,
        ),
        PatternSpec::new(
            "standard_error_throw",
            r#"throw\s+new\s+Error\s*\(\s*['"\x60](?:Failed to|Unable to|Error|Invalid|Cannot)[^'"\x60]+['"\x60]\s*\)"#,
            0.12,
        ),
        // Async
        PatternSpec::new(
            "async_await_fetch",
            r"async\s+(?:function\s+)?\w+\s*\([^)]*\)\s*(?::\s*Promise<[^>]+>)?\s*\{[^}]*await\s+fetch",
            0.10,
        ),
        PatternSpec::new(
            "promise_chain",
            r"\.then\s*\(\s*(?:\([^)]*\)|[a-z]+)\s*=>\s*\{?[^}]*\}\s*\)\s*\.catch",
            0.08,
        ),
        // Comments
        PatternSpec::new("jsdoc_complete", r"/\*\*\s*\n(?:\s*\*\s*@\w+[^\n]*\n)+\s*\*/", 0.10),
        PatternSpec::new("inline_explanation", r"//\s*[A-Z][a-z]+(?:\s+[a-z]+){3,}", 0.08),
        // Functions
        PatternSpec::new(
            "arrow_with_types",
            r"const\s+\w+\s*=\s*(?:async\s*)?\([^)]*:\s*\w+[^)]*\)\s*(?::\s*\w+(?:<[^>]+>)?)?\s*=>",
            0.10,
        ),
        PatternSpec::new(
            "export_default_function",
            r"export\s+default\s+(?:async\s+)?function\s+\w+",
            0.06,
        ),
        // React
        PatternSpec::new(
            "use_effect_deps",
            r"useEffect\s*\(\s*\(\s*\)\s*=>\s*\{[^}]+\}\s*,\s*\[[^\]]*\]\s*\)",
            0.08,
        ),
        PatternSpec::new(
            "use_state_destructure",
            r"const\s*\[\s*\w+\s*,\s*set[A-Z]\w+\s*\]\s*=\s*useState",
            0.08,
        ),
        // Go
        PatternSpec::new("go_error_check", r"if\s+err\s*!=\s*nil\s*\{[^}]*return[^}]*\}", 0.12),
        PatternSpec::new("go_defer", r"defer\s+(?:\w+\.)?(?:Close|Unlock|Done)\s*\(\s*\)", 0.08),
        PatternSpec::new(
            "go_struct_init",
            r"\w+\s*:=\s*&?\w+\{\s*\n(?:\s*\w+:\s*[^,]+,?\s*\n)+\s*\}",
            0.08,
        ),
        // Python
        PatternSpec::new(
            "python_docstring",
            r##""""[^"]+(?:Args:|Returns:|Raises:)[^"]+""""##,
            0.10,
        ),
        PatternSpec::new(
            "python_type_hints",
            r"def\s+\w+\s*\([^)]*:\s*\w+[^)]*\)\s*->\s*\w+:",
            0.08,
        ),
        // Generic generator signatures
        PatternSpec::new("numbered_steps", r"//\s*(?:Step\s+)?\d+[.:]\s*[A-Z]", 0.06),
        PatternSpec::new("todo_ai_style", r"//\s*TODO:\s*[A-Z][a-z]+\s+[a-z]+", 0.05),
    ]
}

fn default_boilerplate() -> Vec<String> {
    [
        r"try\s*\{[\s\S]*?catch",
        r"if\s*\(\s*!\s*\w+\s*\)\s*\{?\s*return",
        r"async\s+function\s+\w+\s*\([^)]*\)\s*\{",
        r"const\s+\w+\s*=\s*async\s*\([^)]*\)\s*=>",
        r"export\s+(default\s+)?(function|class|const)",
        r"import\s*\{[^}]+\}\s*from",
        r"if\s+err\s*!=\s*nil\s*\{",
        r"defer\s+\w+\.(Close|Unlock|Done)\(",
        r"func\s+\(\w+\s+\*?\w+\)\s+\w+\(",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Rewrite `\s`, `\w`, `\d` and `\b` outside character classes to their ASCII-only
/// forms. Negated and bracketed classes keep their Unicode meaning.
pub fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(e @ ('s' | 'w' | 'd' | 'b')) if !in_class => {
                    out.push_str("(?-u:\\");
                    out.push(e);
                    out.push(')');
                }
                Some(e) => {
                    out.push('\\');
                    out.push(e);
                }
                None => out.push('\\'),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(c);
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// A compiled, weighted catalog entry
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
    pub weight: f64,
}

/// Compiled catalog shared by the pattern detector and the stylometry analyzer
#[derive(Debug, Clone)]
pub struct DetectionCatalog {
    patterns: Vec<CompiledPattern>,
    boilerplate: Vec<Regex>,
}

impl DetectionCatalog {
    /// Compile a catalog spec. Entries that fail to compile are logged and left out.
    pub fn compile(spec: &CatalogSpec) -> Self {
        let patterns: Vec<CompiledPattern> = spec
            .patterns
            .iter()
            .filter_map(|p| match Regex::new(&ascii_classes(&p.pattern)) {
                Ok(regex) => Some(CompiledPattern {
                    name: p.name.clone(),
                    regex,
                    weight: p.weight,
                }),
                Err(e) => {
                    warn!(pattern = %p.name, error = %e, "catalog.pattern_excluded");
                    None
                }
            })
            .collect();

        let boilerplate: Vec<Regex> = spec
            .boilerplate
            .iter()
            .filter_map(|p| match Regex::new(&ascii_classes(p)) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "catalog.boilerplate_excluded");
                    None
                }
            })
            .collect();

        debug!(
            patterns = patterns.len(),
            boilerplate = boilerplate.len(),
            "catalog.compiled"
        );

        Self { patterns, boilerplate }
    }

    /// Process-wide default catalog, compiled on first use
    pub fn shared() -> Arc<DetectionCatalog> {
        static CATALOG: OnceLock<Arc<DetectionCatalog>> = OnceLock::new();
        CATALOG
            .get_or_init(|| Arc::new(DetectionCatalog::compile(&CatalogSpec::default())))
            .clone()
    }

    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    pub fn boilerplate(&self) -> &[Regex] {
        &self.boilerplate
    }

    pub fn active_pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn active_boilerplate_count(&self) -> usize {
        self.boilerplate.len()
    }
}

impl Default for DetectionCatalog {
    fn default() -> Self {
        Self::compile(&CatalogSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_classes_rewrite() {
        assert_eq!(ascii_classes(r"if\s+err"), r"if(?-u:\s)+err");
        assert_eq!(ascii_classes(r"\b\w+\d"), r"(?-u:\b)(?-u:\w)+(?-u:\d)");
        // Bracketed and escaped forms are left alone
        assert_eq!(ascii_classes(r"[\s\S]*?"), r"[\s\S]*?");
        assert_eq!(ascii_classes(r"\[[^\]]*\]\s"), r"\[[^\]]*\](?-u:\s)");
        assert_eq!(ascii_classes(r"a\\s"), r"a\\s");
    }

    #[test]
    fn test_catalog_whitespace_is_ascii_only() {
        let catalog = DetectionCatalog::shared();
        let go_check = catalog
            .patterns()
            .iter()
            .find(|p| p.name == "go_error_check")
            .unwrap();
        assert!(go_check.regex.is_match("if err != nil { return err }"));
        // U+00A0 is not whitespace for the ASCII classes
        assert!(!go_check.regex.is_match("if\u{a0}err != nil { return err }"));
    }

    #[test]
    fn test_default_catalog_compiles_fully() {
        let spec = CatalogSpec::default();
        let catalog = DetectionCatalog::compile(&spec);
        assert_eq!(catalog.active_pattern_count(), spec.patterns.len());
        assert_eq!(catalog.active_boilerplate_count(), spec.boilerplate.len());
        assert_eq!(catalog.active_pattern_count(), 17);
        assert_eq!(catalog.active_boilerplate_count(), 9);
    }

    #[test]
    fn test_bad_pattern_is_excluded() {
        let spec = CatalogSpec {
            patterns: vec![
                PatternSpec::new("broken", r"(unclosed", 0.5),
                PatternSpec::new("ok", r"fn\s+main", 0.2),
            ],
            boilerplate: vec![r"[z-a]".to_string(), r"import".to_string()],
        };
        let catalog = DetectionCatalog::compile(&spec);
        assert_eq!(catalog.active_pattern_count(), 1);
        assert_eq!(catalog.patterns()[0].name, "ok");
        assert_eq!(catalog.active_boilerplate_count(), 1);
    }

    #[test]
    fn test_shared_catalog_is_reused() {
        let a = DetectionCatalog::shared();
        let b = DetectionCatalog::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
