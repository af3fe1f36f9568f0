// Directory Walker
// Collects candidate source files under a root, pruning skip-listed directories
// and filtering by extension.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".go", ".py", ".js", ".ts", ".tsx", ".jsx", ".java", ".kt", ".rs", ".rb", ".php", ".swift",
    ".cs", ".cpp", ".c",
];

pub const DEFAULT_SKIP_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    "vendor",
    "dist",
    "build",
    "__pycache__",
    ".next",
    "target",
];

/// Which files a directory scan considers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Extensions including the leading dot, matched case-sensitively
    pub extensions: BTreeSet<String>,
    /// Directory base names that are never descended into
    pub skip_dirs: BTreeSet<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScanOptions {
    pub fn new<E, S>(extensions: E, skip_dirs: S) -> Self
    where
        E: IntoIterator,
        E::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(normalize_extension).collect(),
            skip_dirs: skip_dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_recognized(&self, path: &Path) -> bool {
        match path.extension() {
            Some(ext) => self
                .extensions
                .contains(&format!(".{}", ext.to_string_lossy())),
            None => false,
        }
    }

    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_dir()
            && self
                .skip_dirs
                .contains(&*entry.file_name().to_string_lossy())
    }

    /// Regular files under `root` that a scan should analyze, in walk order.
    /// Unreadable directories and entries are skipped.
    pub fn collect_files(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_skipped_dir(e))
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    debug!("[WALK] skipping entry: {}", err);
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.is_recognized(e.path()))
            .map(DirEntry::into_path)
            .collect()
    }
}

fn normalize_extension<T: Into<String>>(ext: T) -> String {
    let ext = ext.into();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_collect_prunes_skip_dirs_anywhere() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "node_modules/lib/index.js");
        touch(dir.path(), "web/node_modules/pkg/index.js");
        touch(dir.path(), ".git/hooks/pre-commit.py");

        let files = ScanOptions::default().collect_files(dir.path());
        assert_eq!(files, vec![dir.path().join("src/main.rs")]);
    }

    #[test]
    fn test_collect_filters_extensions() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "README");
        touch(dir.path(), "app.ts");
        touch(dir.path(), "Upper.RS");

        let files = ScanOptions::default().collect_files(dir.path());
        assert_eq!(files, vec![dir.path().join("app.ts")]);
    }

    #[test]
    fn test_collect_is_lexically_ordered() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "b.go");
        touch(dir.path(), "a/z.go");
        touch(dir.path(), "a.go");

        let files = ScanOptions::default().collect_files(dir.path());
        assert_eq!(
            files,
            vec![
                dir.path().join("a/z.go"),
                dir.path().join("a.go"),
                dir.path().join("b.go"),
            ]
        );
    }

    #[test]
    fn test_root_named_like_skip_dir_is_pruned() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "build/gen.go");
        touch(dir.path(), "build/pkg/a.go");
        let root = dir.path().join("build");
        assert!(ScanOptions::default().collect_files(&root).is_empty());

        // Only the base name counts; a parent named like a skip dir is fine
        let files = ScanOptions::default().collect_files(&root.join("pkg"));
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_custom_options() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "docs/guide.txt");
        touch(dir.path(), "generated/out.txt");
        let options = ScanOptions::new(["txt"], ["generated"]);
        let files = options.collect_files(dir.path());
        assert_eq!(files, vec![dir.path().join("docs/guide.txt")]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let dir = tempdir().unwrap();
        let files = ScanOptions::default().collect_files(&dir.path().join("absent"));
        assert!(files.is_empty());
    }
}
