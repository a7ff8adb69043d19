//! Discovery of Infos source files by file-name pattern

use crate::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Localization files: `text-*.xml`
pub const TEXT_FILES: FilePattern = FilePattern::new("text-", ".xml");

/// Gendered-text files: `genderedText*.xml`
pub const GENDERED_TEXT_FILES: FilePattern = FilePattern::new("genderedText", ".xml");

/// A `prefix*suffix` file-name pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePattern {
    prefix: &'static str,
    suffix: &'static str,
}

impl FilePattern {
    /// Create a pattern matching names that start with `prefix` and end with `suffix`
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    /// Check a file name against the pattern
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() >= self.prefix.len() + self.suffix.len()
            && file_name.starts_with(self.prefix)
            && file_name.ends_with(self.suffix)
    }
}

impl std::fmt::Display for FilePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*{}", self.prefix, self.suffix)
    }
}

/// List files directly inside `dir` whose names match `pattern`, sorted by name
///
/// Subdirectories are not searched. The sort order is what makes
/// last-writer-wins merges across files deterministic.
pub fn find_source_files<P: AsRef<Path>>(dir: P, pattern: FilePattern) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir.as_ref())
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(file_name) = entry.file_name().to_str() {
            if pattern.matches(file_name) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pattern_matches() {
        assert!(TEXT_FILES.matches("text-infos.xml"));
        assert!(TEXT_FILES.matches("text-.xml"));
        assert!(!TEXT_FILES.matches("text.xml"));
        assert!(!TEXT_FILES.matches("text-infos.xml.bak"));
        assert!(!TEXT_FILES.matches("mytext-infos.xml"));

        assert!(GENDERED_TEXT_FILES.matches("genderedText.xml"));
        assert!(GENDERED_TEXT_FILES.matches("genderedText-dlc.xml"));
        assert!(!GENDERED_TEXT_FILES.matches("gendered.xml"));
    }

    #[test]
    fn test_pattern_display() {
        assert_eq!(TEXT_FILES.to_string(), "text-*.xml");
    }

    #[test]
    fn test_find_source_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["text-zz.xml", "text-aa.xml", "tech.xml", "text-mm.xml"] {
            fs::write(dir.path().join(name), "<Root/>").unwrap();
        }

        let files = find_source_files(dir.path(), TEXT_FILES).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["text-aa.xml", "text-mm.xml", "text-zz.xml"]);
    }

    #[test]
    fn test_find_source_files_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("text-dir.xml")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("text-a.xml"), "<Root/>").unwrap();

        let files = find_source_files(dir.path(), TEXT_FILES).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_source_files_missing_dir() {
        assert!(find_source_files("/nonexistent/quarry/infos", TEXT_FILES).is_err());
    }
}
