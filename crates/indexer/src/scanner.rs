use crate::error::{IndexerError, Result};
use globset::{Glob, GlobMatcher};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Enumerates tracked source files under a project root.
///
/// Walks the tree honoring `.gitignore` rules and hidden-file filtering,
/// keeping only paths that match the configured glob. Stands in for
/// `git ls-files <glob>` without requiring a git checkout.
#[derive(Debug)]
pub struct FileScanner {
    root: PathBuf,
    matcher: GlobMatcher,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>, source_glob: &str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            return Err(IndexerError::InvalidPath(format!(
                "Path does not exist: {}",
                root.display()
            )));
        }

        let matcher = Glob::new(source_glob)?.compile_matcher();
        Ok(Self { root, matcher })
    }

    /// Relative paths (with `/` separators) of all matching files, sorted.
    ///
    /// Any failure of the underlying walk is fatal; a partial listing would
    /// misclassify the missing files as deleted.
    pub fn scan(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        // `.gitignore` rules apply even when the root is not a git
        // checkout (tests index plain temp directories).
        let walk = WalkBuilder::new(&self.root).require_git(false).build();
        for entry in walk {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            let mut normalized = relative.to_string_lossy().to_string();
            if normalized.contains('\\') {
                normalized = normalized.replace('\\', "/");
            }

            if self.matcher.is_match(&normalized) {
                files.push(normalized);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "x = 1\n").unwrap();
    }

    #[test]
    fn finds_matching_files_recursively() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.py");
        touch(dir.path(), "pkg/util.py");
        touch(dir.path(), "README.md");

        let scanner = FileScanner::new(dir.path(), "*.py").unwrap();
        assert_eq!(scanner.scan().unwrap(), vec!["main.py", "pkg/util.py"]);
    }

    #[test]
    fn respects_gitignore() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "kept.py");
        touch(dir.path(), "generated/out.py");
        std::fs::write(dir.path().join(".gitignore"), "generated/\n").unwrap();

        let scanner = FileScanner::new(dir.path(), "*.py").unwrap();
        assert_eq!(scanner.scan().unwrap(), vec!["kept.py"]);
    }

    #[test]
    fn skips_hidden_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "visible.py");
        touch(dir.path(), ".assemblage_cache/stale.py");

        let scanner = FileScanner::new(dir.path(), "*.py").unwrap();
        assert_eq!(scanner.scan().unwrap(), vec!["visible.py"]);
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(FileScanner::new(dir.path(), "a{").is_err());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("does-not-exist");
        let err = FileScanner::new(&gone, "*.py").unwrap_err();
        assert!(matches!(err, IndexerError::InvalidPath(_)));
    }
}
