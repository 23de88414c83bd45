use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the requested operation completed without findings
    Success = 0,
    /// Vulnerabilities were found for the scanned inventory
    VulnerabilitiesFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesFound => write!(f, "Vulnerabilities Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for scan ingestion and correlation.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum VulnscanError {
    #[error("Scan file not found: {path}\n\n💡 Hint: {suggestion}")]
    ScanFileNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to read scan file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    ScanFileReadError { path: PathBuf, details: String },

    #[error("Failed to parse scan result\nDetails: {details}\n\n💡 Hint: Scan files must contain valid JSON in system profile or application inventory format")]
    ScanParseError { details: String },

    #[error("Vulnerability catalog request failed\nDetails: {details}\n\n💡 Hint: Check your network connection; the NVD API rate-limits unauthenticated clients")]
    CatalogError { details: String },

    #[error("Scan submission failed for {endpoint}\nDetails: {details}\n\n💡 Hint: Verify the backend endpoint is reachable and accepts POST {{files: [...]}}")]
    SubmissionError { endpoint: String, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },
}
