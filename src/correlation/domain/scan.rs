use serde::{Deserialize, Serialize};

/// Classification of a system-level component found in a host inventory.
///
/// This is a closed set: a scan carrying an unrecognized type fails
/// structural validation rather than being coerced silently. New producer
/// types are added as new variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Kernel,
    Driver,
    Service,
    Library,
    Runtime,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Kernel => "kernel",
            ComponentType::Driver => "driver",
            ComponentType::Service => "service",
            ComponentType::Library => "library",
            ComponentType::Runtime => "runtime",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A system-level component (kernel, driver, service, library, runtime)
/// reported by a host scan. Immutable value once parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemComponent {
    pub name: String,
    pub version: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProfileData {
    pub os_name: String,
    pub os_version: String,
    pub architecture: String,
    pub kernel_version: String,
    pub hostname: String,
    pub last_boot: String,
    pub system_components: Vec<SystemComponent>,
}

/// Canonical host profile produced by a system scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemProfile {
    pub status: String,
    pub data: SystemProfileData,
}

/// An installed application reported by an inventory scan.
///
/// `id` is unique within one inventory only; cross-inventory identity is
/// not defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub install_path: String,
    #[serde(default)]
    pub install_date: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default)]
    pub last_modified: String,
    #[serde(default)]
    pub vulnerability_count: u32,
    #[serde(default)]
    pub update_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInventoryData {
    /// Informational only. `applications.len()` is authoritative for all
    /// derived computation.
    pub total_applications: u64,
    pub last_scanned: String,
    pub applications: Vec<Application>,
}

/// Canonical application inventory produced by an inventory scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationInventory {
    pub status: String,
    pub data: ApplicationInventoryData,
}

impl ApplicationInventory {
    /// Authoritative application count, ignoring the informational
    /// `totalApplications` field.
    pub fn application_count(&self) -> usize {
        self.data.applications.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: String,
}

/// An error payload reported by a scanning agent in place of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanError {
    pub status: String,
    pub error: ScanErrorDetail,
}

/// Canonical result of parsing one uploaded scan file.
///
/// Constructed once per file by the scan normalizer and immutable
/// thereafter. Serialized untagged so reports carry the original
/// wire shapes; deserialization goes through the normalizer's ordered
/// recognizer, never through serde's untagged probing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScanResult {
    Profile(SystemProfile),
    Inventory(ApplicationInventory),
    Error(ScanError),
}

impl ScanResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ScanResult::Error(_))
    }

    /// Short human label used in console summaries.
    pub fn summary_label(&self) -> String {
        match self {
            ScanResult::Profile(p) => format!(
                "{} {} ({} system components)",
                p.data.os_name,
                p.data.os_version,
                p.data.system_components.len()
            ),
            ScanResult::Inventory(inv) => {
                format!("Application inventory ({} applications)", inv.application_count())
            }
            ScanResult::Error(e) => format!("Error {}: {}", e.error.code, e.error.message),
        }
    }
}
