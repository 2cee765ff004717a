//! Filesystem abstraction for the badge store.
//! Supports flash storage on the device and a mock filesystem for tests
//! and simulators.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// A file entry in the filesystem
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub is_directory: bool,
}

/// Filesystem error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    NotFound,
    PermissionDenied,
    IoError(String),
    NotSupported,
}

impl core::fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FileSystemError::NotFound => write!(f, "File not found"),
            FileSystemError::PermissionDenied => write!(f, "Permission denied"),
            FileSystemError::IoError(msg) => write!(f, "IO error: {}", msg),
            FileSystemError::NotSupported => write!(f, "Operation not supported"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FileSystemError {}

/// Trait for filesystem operations
///
/// Implementations:
/// - `FlashFs` in the firmware (FAT on internal flash)
/// - `MockFileSystem` for the simulator and tests
pub trait FileSystem {
    /// List files in a directory
    fn list_files(&mut self, path: &str) -> Result<Vec<FileInfo>, FileSystemError>;

    /// Read entire file as string
    ///
    /// # Arguments
    /// * `path` - Path to file (e.g., "/badges/badge.txt")
    ///
    /// # Errors
    /// Returns FileSystemError if file not found or read fails
    fn read_file(&mut self, path: &str) -> Result<String, FileSystemError>;

    /// Read entire file as raw bytes (badge images)
    fn read_bytes(&mut self, path: &str) -> Result<Vec<u8>, FileSystemError>;

    /// Write a text file, replacing any existing content
    fn write_file(&mut self, path: &str, contents: &str) -> Result<(), FileSystemError>;

    /// Create a directory; succeeds if it already exists
    fn create_dir(&mut self, path: &str) -> Result<(), FileSystemError>;

    /// Check if file exists
    fn exists(&mut self, path: &str) -> bool;
}

/// Get filename without path
pub fn basename(path: &str) -> &str {
    path.rfind('/').map(|i| &path[i + 1..]).unwrap_or(path)
}

/// Get parent directory
pub fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Filename without its last extension ("badge.txt" -> "badge")
pub fn file_stem(name: &str) -> &str {
    let name = basename(name);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(i) => &name[..i],
    }
}

/// Join paths
pub fn join_path(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, name)
    } else {
        format!("{}/{}", base, name)
    }
}
