use crate::correlation::domain::{
    ApplicationInventory, ApplicationInventoryData, ComponentType, ScanError, ScanResult,
    SystemComponent, SystemProfile, SystemProfileData,
};
use crate::shared::error::VulnscanError;
use crate::shared::Result;
use chrono::Utc;
use serde_json::Value;

/// Normalizer for raw inventory scan JSON.
///
/// Scan files come from multiple producers with no shared contract, so
/// recognition is an explicit, ordered sequence of structural checks.
/// The first matching branch wins; this ordering governs ambiguous inputs
/// and must not be reshuffled. New producer shapes are added as new
/// branches, never by widening an existing branch.
pub struct ScanNormalizer;

impl ScanNormalizer {
    /// Parses raw scan file text into a canonical `ScanResult`.
    ///
    /// Recognition order:
    /// 1. `status == "error"` - agent-reported error, passed through.
    /// 2. `data.osName` + `data.systemComponents` - canonical system profile.
    /// 3. `data.systemProfile` + `data.applicationInventory` - combined
    ///    report; the application inventory half is extracted and the
    ///    profile half discarded (vulnerability counts live on
    ///    applications, so the inventory takes precedence).
    /// 4. `scanType == "systemProfile"` + `components` - flat legacy shape,
    ///    transformed into a canonical profile.
    /// 5. `data.totalApplications` + `data.applications` - canonical
    ///    application inventory.
    ///
    /// Anything else, including invalid JSON, is a `ScanParseError`.
    pub fn parse(raw_text: &str) -> Result<ScanResult> {
        let value: Value =
            serde_json::from_str(raw_text).map_err(|e| VulnscanError::ScanParseError {
                details: format!("invalid JSON: {}", e),
            })?;

        if value.get("status").and_then(Value::as_str) == Some("error") {
            let error: ScanError =
                serde_json::from_value(value).map_err(|e| VulnscanError::ScanParseError {
                    details: format!("malformed error payload: {}", e),
                })?;
            return Ok(ScanResult::Error(error));
        }

        let data = value.get("data");

        if data.is_some_and(|d| d.get("osName").is_some() && d.get("systemComponents").is_some()) {
            let profile: SystemProfile =
                serde_json::from_value(value).map_err(|e| VulnscanError::ScanParseError {
                    details: format!("malformed system profile: {}", e),
                })?;
            return Ok(ScanResult::Profile(profile));
        }

        if data.is_some_and(|d| {
            d.get("systemProfile").is_some() && d.get("applicationInventory").is_some()
        }) {
            return Self::extract_combined_inventory(&value);
        }

        if value.get("scanType").and_then(Value::as_str) == Some("systemProfile")
            && value.get("components").is_some_and(Value::is_array)
        {
            return Self::transform_flat_profile(&value);
        }

        if data.is_some_and(|d| {
            d.get("totalApplications").is_some() && d.get("applications").is_some()
        }) {
            let inventory: ApplicationInventory =
                serde_json::from_value(value).map_err(|e| VulnscanError::ScanParseError {
                    details: format!("malformed application inventory: {}", e),
                })?;
            return Ok(ScanResult::Inventory(inventory));
        }

        Err(VulnscanError::ScanParseError {
            details: "unrecognized scan format; expected a system profile \
                      (data.osName + data.systemComponents) or an application \
                      inventory (data.totalApplications + data.applications)"
                .to_string(),
        }
        .into())
    }

    /// Extracts the application-inventory half of a combined report.
    ///
    /// The system-profile half is deliberately discarded; callers needing
    /// both halves re-parse the combined payload twice.
    fn extract_combined_inventory(value: &Value) -> Result<ScanResult> {
        let inventory_value = value["data"]["applicationInventory"].clone();
        let inventory_data: ApplicationInventoryData = serde_json::from_value(inventory_value)
            .map_err(|e| VulnscanError::ScanParseError {
                details: format!("malformed combined-report inventory: {}", e),
            })?;

        let status = value
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("success")
            .to_string();

        Ok(ScanResult::Inventory(ApplicationInventory {
            status,
            data: inventory_data,
        }))
    }

    /// Transforms the flat legacy profile shape into a canonical profile.
    ///
    /// Field mapping: `os` -> `osName`, `osVersion` kept; absent
    /// `architecture`/`kernelVersion`/`hostname` default to `"unknown"`;
    /// `lastBoot` comes from `timestamp`, defaulting to the current time.
    fn transform_flat_profile(value: &Value) -> Result<ScanResult> {
        let os_name = Self::required_string(value, "os")?;
        let os_version = Self::required_string(value, "osVersion")?;

        let components = match value.get("components").and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .map(Self::transform_flat_component)
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };

        let last_boot = value
            .get("timestamp")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        Ok(ScanResult::Profile(SystemProfile {
            status: "success".to_string(),
            data: SystemProfileData {
                os_name,
                os_version,
                architecture: Self::optional_string(value, "architecture"),
                kernel_version: Self::optional_string(value, "kernelVersion"),
                hostname: Self::optional_string(value, "hostname"),
                last_boot,
                system_components: components,
            },
        }))
    }

    fn transform_flat_component(component: &Value) -> Result<SystemComponent> {
        let name = Self::required_string(component, "name")?;
        let version = Self::required_string(component, "version")?;

        let component_type: ComponentType =
            serde_json::from_value(component.get("type").cloned().unwrap_or(Value::Null)).map_err(
                |e| VulnscanError::ScanParseError {
                    details: format!("component '{}' has an invalid type: {}", name, e),
                },
            )?;

        let description = component
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} component", component_type));

        Ok(SystemComponent {
            name,
            version,
            component_type,
            description,
        })
    }

    fn required_string(value: &Value, field: &str) -> Result<String> {
        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                VulnscanError::ScanParseError {
                    details: format!("missing required field '{}'", field),
                }
                .into()
            })
    }

    fn optional_string(value: &Value, field: &str) -> String {
        value
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string()
    }
}
