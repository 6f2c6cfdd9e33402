use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::position::Document;

/// A text document read from disk
#[derive(Debug, Clone)]
pub struct FileContent {
    /// Path the document was read from
    pub path: String,
    /// Text as valid UTF-8
    pub content: String,
    /// BLAKE3 hash of the content (hex-encoded)
    pub checksum: String,
}

impl FileContent {
    /// Split the text into a comparable document
    pub fn document(&self) -> Document {
        Document::parse(&self.content)
    }
}

/// Error types for file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid UTF-8 in file: {0}")]
    InvalidUtf8(String),
}

/// Hex-encoded BLAKE3 hash of a text
pub fn checksum(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// Read a text file with UTF-8 validation
///
/// # Arguments
/// * `path` - Path to the file to read
///
/// # Returns
/// * `Ok(FileContent)` - File content with its checksum
/// * `Err(FileError)` - File not found, I/O error, or invalid UTF-8
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<FileContent, FileError> {
    let path_ref = path.as_ref();

    if !path_ref.exists() {
        return Err(FileError::NotFound(path_ref.display().to_string()));
    }

    let bytes = fs::read(path_ref)?;
    let content = String::from_utf8(bytes)
        .map_err(|_| FileError::InvalidUtf8(path_ref.display().to_string()))?;

    log::debug!("Read {} ({} bytes)", path_ref.display(), content.len());

    Ok(FileContent {
        path: path_ref.display().to_string(),
        checksum: checksum(&content),
        content,
    })
}
