//! File discovery module for ICT datasets
//!
//! Enumerates files in a single directory whose names end with a literal,
//! case-sensitive extension, preserving filesystem enumeration order.

use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File discovery component for a flat directory of ICT files
#[derive(Debug)]
pub struct FileDiscovery {
    input_dir: PathBuf,
    extension: String,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(input_dir: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            input_dir,
            extension: extension.into(),
        }
    }

    /// Discover matching files in enumeration order
    ///
    /// A missing directory yields no files rather than an error; the
    /// caller decides whether an empty result is fatal.
    pub fn discover_files(&self) -> Result<Vec<PathBuf>> {
        debug!(
            "Searching for '*{}' files in: {}",
            self.extension,
            self.input_dir.display()
        );

        let entries = match fs::read_dir(&self.input_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Directory does not exist: {}", self.input_dir.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && has_extension(&path, &self.extension) {
                files.push(path);
            }
        }

        debug!("Found {} matching files", files.len());
        Ok(files)
    }
}

/// Check the file name ends with the literal suffix, skipping hidden files
fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| !name.starts_with('.') && name.ends_with(extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper to create a flat directory of mixed files
    fn create_test_directory(temp_dir: &TempDir) -> PathBuf {
        let dir = temp_dir.path().join("campaign");
        fs::create_dir_all(&dir).unwrap();

        fs::write(dir.join("flight_01.ict"), "1,1001").unwrap();
        fs::write(dir.join("flight_02.ict"), "1,1001").unwrap();
        fs::write(dir.join("flight_03.ICT"), "1,1001").unwrap();
        fs::write(dir.join("notes.txt"), "notes").unwrap();
        fs::write(dir.join(".hidden.ict"), "1,1001").unwrap();

        // Nested files are not part of the enumeration
        let nested = dir.join("archive");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("old.ict"), "1,1001").unwrap();

        // A directory with a matching name is not a file
        fs::create_dir_all(dir.join("folder.ict")).unwrap();

        dir
    }

    #[test]
    fn test_discover_ict_files() {
        let temp_dir = TempDir::new().unwrap();
        let dir = create_test_directory(&temp_dir);

        let discovery = FileDiscovery::new(dir, ".ict");
        let files = discovery.discover_files().unwrap();

        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["flight_01.ict", "flight_02.ict"]);
    }

    #[test]
    fn test_discover_uppercase_extension() {
        let temp_dir = TempDir::new().unwrap();
        let dir = create_test_directory(&temp_dir);

        let discovery = FileDiscovery::new(dir, ".ICT");
        let files = discovery.discover_files().unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("flight_03.ICT"));
    }

    #[test]
    fn test_discover_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let discovery = FileDiscovery::new(temp_dir.path().join("missing"), ".ict");

        assert!(discovery.discover_files().unwrap().is_empty());
    }

    #[test]
    fn test_discovery_matches_read_dir_order() {
        let temp_dir = TempDir::new().unwrap();
        let dir = create_test_directory(&temp_dir);

        let expected: Vec<PathBuf> = fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.is_file() && has_extension(path, ".ict"))
            .collect();

        let files = FileDiscovery::new(dir, ".ict").discover_files().unwrap();
        assert_eq!(files, expected);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("data.ict"), ".ict"));
        assert!(has_extension(Path::new("/path/to/data.ict"), ".ict"));
        assert!(!has_extension(Path::new("data.ICT"), ".ict")); // Case sensitive
        assert!(!has_extension(Path::new("data.ict.bak"), ".ict"));
        assert!(!has_extension(Path::new(".data.ict"), ".ict"));
        assert!(!has_extension(Path::new("data"), ".ict"));
    }
}
