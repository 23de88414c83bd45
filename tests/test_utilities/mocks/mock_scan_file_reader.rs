use std::collections::HashMap;
use std::path::Path;
use vulnscan::prelude::*;

/// Mock ScanFileReader for testing that serves canned file contents
pub struct MockScanFileReader {
    pub files: HashMap<String, String>,
    pub should_fail: bool,
}

impl MockScanFileReader {
    pub fn new() -> Self {
        Self {
            files: HashMap::new(),
            should_fail: false,
        }
    }

    pub fn with_file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.to_string(), content.to_string());
        self
    }

    pub fn with_failure() -> Self {
        Self {
            files: HashMap::new(),
            should_fail: true,
        }
    }
}

impl Default for MockScanFileReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanFileReader for MockScanFileReader {
    fn read_scan_file(&self, path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock scan file read failure");
        }

        let key = path.to_string_lossy().to_string();
        self.files
            .get(&key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Mock has no file at: {}", key))
    }
}
