//! Mock Filesystem Implementation for Simulators
//!
//! Provides a simple in-memory filesystem for testing without real hardware.
//! Files can be poisoned so that reads fail, which is how the unreadable
//! badge record path is exercised.

extern crate alloc;

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::filesystem::{FileInfo, FileSystem, FileSystemError};

/// In-memory file entry
#[derive(Clone)]
enum MockEntry {
    File { content: Vec<u8> },
    Directory { children: Vec<String> },
}

/// Mock filesystem for simulators and tests
pub struct MockFileSystem {
    files: BTreeMap<String, MockEntry>,
    poisoned: BTreeSet<String>,
}

impl MockFileSystem {
    /// Create an empty mock filesystem with just a root directory
    pub fn new() -> Self {
        let mut fs = Self {
            files: BTreeMap::new(),
            poisoned: BTreeSet::new(),
        };
        fs.files.insert(
            "/".to_string(),
            MockEntry::Directory {
                children: Vec::new(),
            },
        );
        fs
    }

    /// Create a mock filesystem pre-populated with two sample badges
    pub fn with_sample_badges() -> Self {
        let mut fs = Self::new();
        fs.add_directory("/badges");
        fs.add_file(
            "/badges/crew.txt",
            "stoat & sons\nA. Stoat\nRole\nShip's engineer\nDeck\n7\n",
        );
        fs.add_file(
            "/badges/visitor.txt",
            "mustelid inc\nVery Long Visitor Name Indeed\nHost\nH. Badger\nValid\nToday only\n",
        );
        fs
    }

    /// Add a text file to the mock filesystem
    pub fn add_file(&mut self, path: &str, content: &str) {
        self.add_binary_file(path, content.as_bytes());
    }

    /// Add a binary file to the mock filesystem
    pub fn add_binary_file(&mut self, path: &str, content: &[u8]) {
        self.files.insert(
            path.to_string(),
            MockEntry::File {
                content: content.to_vec(),
            },
        );
        self.register_child(path);
    }

    /// Add a directory to the mock filesystem
    pub fn add_directory(&mut self, path: &str) {
        self.files.insert(
            path.to_string(),
            MockEntry::Directory {
                children: Vec::new(),
            },
        );
        if path != "/" {
            self.register_child(path);
        }
    }

    /// Make every future read of `path` fail with `PermissionDenied`.
    /// The file keeps existing and keeps showing up in listings.
    pub fn poison(&mut self, path: &str) {
        self.poisoned.insert(path.to_string());
    }

    fn register_child(&mut self, path: &str) {
        let parent = crate::filesystem::dirname(path);
        if let Some(MockEntry::Directory { children }) = self.files.get_mut(parent) {
            let name = crate::filesystem::basename(path).to_string();
            if !children.contains(&name) {
                children.push(name);
            }
        }
    }

    fn entry_bytes(&self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        if self.poisoned.contains(path) {
            return Err(FileSystemError::PermissionDenied);
        }
        match self.files.get(path) {
            Some(MockEntry::File { content }) => Ok(content.clone()),
            Some(MockEntry::Directory { .. }) => {
                Err(FileSystemError::IoError("Is a directory".to_string()))
            }
            None => Err(FileSystemError::NotFound),
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn list_files(&mut self, path: &str) -> Result<Vec<FileInfo>, FileSystemError> {
        match self.files.get(path) {
            Some(MockEntry::Directory { children }) => {
                let mut files = Vec::new();
                for child_name in children {
                    let child_path = crate::filesystem::join_path(path, child_name);
                    if let Some(entry) = self.files.get(&child_path) {
                        let (size, is_directory) = match entry {
                            MockEntry::File { content } => (content.len() as u64, false),
                            MockEntry::Directory { .. } => (0, true),
                        };
                        files.push(FileInfo {
                            name: child_name.clone(),
                            size,
                            is_directory,
                        });
                    }
                }
                Ok(files)
            }
            Some(MockEntry::File { .. }) => {
                Err(FileSystemError::IoError("Not a directory".to_string()))
            }
            None => Err(FileSystemError::NotFound),
        }
    }

    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError> {
        let bytes = self.entry_bytes(path)?;
        String::from_utf8(bytes)
            .map_err(|_| FileSystemError::IoError("Not valid UTF-8".to_string()))
    }

    fn read_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError> {
        self.entry_bytes(path)
    }

    fn write_file(&mut self, path: &str, contents: &str) -> Result<(), FileSystemError> {
        if self.poisoned.contains(path) {
            return Err(FileSystemError::PermissionDenied);
        }
        self.add_file(path, contents);
        Ok(())
    }

    fn create_dir(&mut self, path: &str) -> Result<(), FileSystemError> {
        if matches!(self.files.get(path), Some(MockEntry::File { .. })) {
            return Err(FileSystemError::IoError("Not a directory".to_string()));
        }
        if !self.files.contains_key(path) {
            self.add_directory(path);
        }
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem() {
        let mut fs = MockFileSystem::with_sample_badges();

        let files = fs.list_files("/badges").unwrap();
        assert_eq!(files.len(), 2);

        let content = fs.read_file("/badges/crew.txt").unwrap();
        assert!(content.contains("A. Stoat"));

        assert!(fs.exists("/badges"));
        assert!(!fs.exists("/nonexistent"));
    }

    #[test]
    fn test_write_creates_and_lists() {
        let mut fs = MockFileSystem::new();
        fs.create_dir("/badges").unwrap();
        fs.write_file("/badges/new.txt", "a\nb\nc\nd\ne\nf\n").unwrap();

        assert!(fs.exists("/badges/new.txt"));
        let files = fs.list_files("/badges").unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "new.txt");
    }

    #[test]
    fn test_create_dir_is_idempotent() {
        let mut fs = MockFileSystem::new();
        fs.create_dir("/badges").unwrap();
        fs.create_dir("/badges").unwrap();
        assert!(fs.exists("/badges"));
    }

    #[test]
    fn test_poisoned_file_reads_fail_but_exists() {
        let mut fs = MockFileSystem::new();
        fs.create_dir("/badges").unwrap();
        fs.add_file("/badges/badge.txt", "content");
        fs.poison("/badges/badge.txt");

        assert!(fs.exists("/badges/badge.txt"));
        assert_eq!(
            fs.read_file("/badges/badge.txt"),
            Err(FileSystemError::PermissionDenied)
        );
        assert_eq!(
            fs.read_bytes("/badges/badge.txt"),
            Err(FileSystemError::PermissionDenied)
        );
        // Still listed, like a file with broken permissions on a real disk.
        assert_eq!(fs.list_files("/badges").unwrap().len(), 1);
    }
}
