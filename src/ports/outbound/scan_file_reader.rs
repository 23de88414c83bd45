use crate::shared::Result;
use std::path::Path;

/// ScanFileReader port for reading raw scan result files.
///
/// Implementations return the raw file text; parsing into a canonical
/// `ScanResult` is the normalizer's job.
pub trait ScanFileReader {
    fn read_scan_file(&self, path: &Path) -> Result<String>;
}
