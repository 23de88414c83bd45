use crate::correlation::domain::Vulnerability;
use crate::ports::outbound::PinStorage;
use crate::shared::error::VulnscanError;
use crate::shared::Result;
use std::fs;
use std::path::PathBuf;

/// File name of the persisted pinned set inside the data directory.
const PINNED_FILE_NAME: &str = "pinned.json";

/// PinFileStorage adapter persisting the pinned set as a single JSON
/// array on disk.
///
/// The default location is the per-user data directory. Writes go to a
/// temp file in the same directory and are renamed into place, so a
/// crash mid-write never leaves a truncated set behind.
pub struct PinFileStorage {
    path: PathBuf,
}

impl PinFileStorage {
    /// Storage at the default per-user data directory.
    pub fn new() -> Result<Self> {
        let project_dirs = directories::ProjectDirs::from("", "", "vulnscan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory for this user"))?;
        Ok(Self {
            path: project_dirs.data_dir().join(PINNED_FILE_NAME),
        })
    }

    /// Storage at an explicit path. Used by tests and the `pin_file`
    /// config override.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PinStorage for PinFileStorage {
    fn load(&self) -> Result<Vec<Vulnerability>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            anyhow::anyhow!("Failed to read pinned set {}: {}", self.path.display(), e)
        })?;

        let vulnerabilities: Vec<Vulnerability> = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Corrupt pinned set {}: {}", self.path.display(), e))?;

        Ok(vulnerabilities)
    }

    fn save(&self, vulnerabilities: &[Vulnerability]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| VulnscanError::FileWriteError {
                path: self.path.clone(),
                details: format!("failed to create data directory: {}", e),
            })?;
        }

        let content = serde_json::to_string_pretty(vulnerabilities)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(|e| VulnscanError::FileWriteError {
            path: temp_path.clone(),
            details: e.to_string(),
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| VulnscanError::FileWriteError {
            path: self.path.clone(),
            details: format!("failed to replace pinned set: {}", e),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::domain::Severity;
    use tempfile::TempDir;

    fn vulnerability(cve: &str) -> Vulnerability {
        Vulnerability {
            cve: cve.to_string(),
            title: "Test".to_string(),
            description: "Test".to_string(),
            severity: Severity::High,
            score: 7.5,
            published_date: "2024-01-15T10:30:00Z".to_string(),
            last_modified: "2024-01-16T10:30:00Z".to_string(),
            status: "Analyzed".to_string(),
            source: "nvd@nist.gov".to_string(),
            references: vec![],
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = PinFileStorage::at_path(temp_dir.path().join("pinned.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = PinFileStorage::at_path(temp_dir.path().join("pinned.json"));

        let set = vec![vulnerability("CVE-2023-5678"), vulnerability("CVE-2023-1234")];
        storage.save(&set).unwrap();

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            PinFileStorage::at_path(temp_dir.path().join("nested").join("dir").join("pinned.json"));
        storage.save(&[vulnerability("CVE-2023-5678")]).unwrap();
        assert_eq!(storage.load().unwrap().len(), 1);
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pinned.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = PinFileStorage::at_path(path);
        let result = storage.load();
        assert!(result.is_err());
        assert!(format!("{}", result.unwrap_err()).contains("Corrupt pinned set"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pinned.json");
        let storage = PinFileStorage::at_path(path.clone());
        storage.save(&[vulnerability("CVE-2023-5678")]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
