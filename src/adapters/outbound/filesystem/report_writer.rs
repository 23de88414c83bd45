use crate::ports::outbound::OutputPresenter;
use crate::shared::error::VulnscanError;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileSystemWriter adapter for writing report output to files
///
/// This adapter implements the OutputPresenter port for file output.
pub struct FileSystemWriter {
    output_path: PathBuf,
}

impl FileSystemWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(VulnscanError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    fn validate_output_security(&self) -> Result<()> {
        // Refuse to write through a symlinked output path
        if self.output_path.exists() {
            let metadata = fs::symlink_metadata(&self.output_path).map_err(|e| {
                VulnscanError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Failed to read file metadata: {}", e),
                }
            })?;

            if metadata.is_symlink() {
                return Err(VulnscanError::FileWriteError {
                    path: self.output_path.clone(),
                    details: "output path is a symbolic link; writing to symbolic links is not allowed".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl OutputPresenter for FileSystemWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;
        self.validate_output_security()?;

        fs::write(&self.output_path, content).map_err(|e| VulnscanError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        eprintln!("✅ Report written: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutPresenter adapter for writing output to stdout
///
/// This adapter implements the OutputPresenter port for stdout output.
pub struct StdoutPresenter;

impl StdoutPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputPresenter for StdoutPresenter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_writer_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("report.json");

        let writer = FileSystemWriter::new(output_path.clone());
        let result = writer.present("{\"vulnerabilities\": []}");

        assert!(result.is_ok());
        let written = fs::read_to_string(&output_path).unwrap();
        assert_eq!(written, "{\"vulnerabilities\": []}");
    }

    #[test]
    fn test_file_writer_parent_directory_not_found() {
        let writer =
            FileSystemWriter::new(PathBuf::from("/nonexistent/directory/report.json"));
        let result = writer.present("{}");

        assert!(result.is_err());
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("Parent directory does not exist"));
    }

    #[test]
    fn test_stdout_presenter_success() {
        let presenter = StdoutPresenter::new();
        let result = presenter.present("test output\n");
        assert!(result.is_ok());
    }
}
