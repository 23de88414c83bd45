use crate::ports::outbound::ScanFileReader;
use crate::shared::error::VulnscanError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum scan file size (50 MB). Inventory exports are small; anything
/// bigger is rejected up front.
const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// FileSystemScanReader adapter for reading scan result files.
///
/// Reads are symlink- and size-checked before the content is handed to
/// the normalizer.
pub struct FileSystemScanReader;

impl FileSystemScanReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemScanReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanFileReader for FileSystemScanReader {
    fn read_scan_file(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(VulnscanError::ScanFileNotFound {
                path: path.to_path_buf(),
                suggestion: "Check the path, or export a fresh scan from the agent first."
                    .to_string(),
            }
            .into());
        }

        let metadata =
            fs::symlink_metadata(path).map_err(|e| VulnscanError::ScanFileReadError {
                path: path.to_path_buf(),
                details: format!("failed to read metadata: {}", e),
            })?;

        if metadata.is_symlink() {
            return Err(VulnscanError::ScanFileReadError {
                path: path.to_path_buf(),
                details: "scan file is a symbolic link; symbolic links are not allowed"
                    .to_string(),
            }
            .into());
        }

        if !metadata.is_file() {
            return Err(VulnscanError::ScanFileReadError {
                path: path.to_path_buf(),
                details: "not a regular file".to_string(),
            }
            .into());
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(VulnscanError::ScanFileReadError {
                path: path.to_path_buf(),
                details: format!(
                    "file is too large ({} bytes); maximum allowed size is {} bytes",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
            }
            .into());
        }

        fs::read_to_string(path).map_err(|e| {
            VulnscanError::ScanFileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
