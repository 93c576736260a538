//! File scanning utilities
//!
//! Discovers Android resource files below a `res/` directory.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File scanner with configurable filters
pub struct FileScanner {
    root: PathBuf,
    file_name: Option<String>,
    dir_pattern: Option<glob::Pattern>,
    max_depth: usize,
}

impl FileScanner {
    /// Create a new file scanner rooted at the given path
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_name: None,
            dir_pattern: None,
            max_depth: usize::MAX,
        }
    }

    /// Only keep files with exactly this name
    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Only keep files whose parent directory name matches a glob pattern
    pub fn with_parent_dir(mut self, pattern: &str) -> Result<Self> {
        let pattern = glob::Pattern::new(pattern).map_err(|e| {
            Error::validation(format!("Invalid directory pattern '{}': {}", pattern, e))
        })?;
        self.dir_pattern = Some(pattern);
        Ok(self)
    }

    /// Limit how deep below the root to descend
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Scan and return matching files, sorted by path
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::new(
                crate::error::ErrorCode::FileNotFound,
                format!("Directory not found: {}", self.root.display()),
            ));
        }

        let mut files: Vec<PathBuf> = WalkDir::new(&self.root)
            .max_depth(self.max_depth)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| self.matches(p))
            .collect();

        files.sort();
        Ok(files)
    }

    fn matches(&self, path: &Path) -> bool {
        if let Some(name) = &self.file_name {
            if path.file_name().and_then(|n| n.to_str()) != Some(name.as_str()) {
                return false;
            }
        }

        if let Some(pattern) = &self.dir_pattern {
            let parent = path
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str())
                .unwrap_or("");
            if !pattern.matches(parent) {
                return false;
            }
        }

        true
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.') && n != "." && n != "..")
        .unwrap_or(false)
}

/// Find every translated `strings.xml` (`values-*/strings.xml`) below `res_dir`
pub fn scan_translated_strings(res_dir: &Path) -> Result<Vec<PathBuf>> {
    FileScanner::new(res_dir)
        .with_file_name("strings.xml")
        .with_parent_dir("values-*")?
        .max_depth(2)
        .scan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<resources/>").unwrap();
    }

    #[test]
    fn test_file_scanner_new() {
        let scanner = FileScanner::new("/tmp");
        assert_eq!(scanner.root, PathBuf::from("/tmp"));
        assert!(scanner.file_name.is_none());
    }

    #[test]
    fn test_scan_translated_strings() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "values/strings.xml");
        touch(dir.path(), "values-it/strings.xml");
        touch(dir.path(), "values-de/strings.xml");
        touch(dir.path(), "values-de/arrays.xml");
        touch(dir.path(), "drawable/strings.xml");
        touch(dir.path(), ".values-xx/strings.xml");

        let found = scan_translated_strings(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("values-de/strings.xml"),
                dir.path().join("values-it/strings.xml"),
            ]
        );
    }

    #[test]
    fn test_scan_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_translated_strings(&dir.path().join("res")).is_err());
    }

    #[test]
    fn test_invalid_dir_pattern() {
        assert!(FileScanner::new(".").with_parent_dir("values-[").is_err());
    }
}
