use crate::correlation::domain::ScanResult;
use std::collections::HashSet;

/// Derives catalog search terms and report summaries from a canonical
/// scan result.
///
/// Terms feed external keyword search, so the set is broad but
/// deduplicated: the OS-level terms and the per-component/per-application
/// terms both matter for recall, while dedup keeps redundant network
/// queries down.
pub struct TermDeriver;

impl TermDeriver {
    /// Returns a deduplicated list of search terms in first-occurrence
    /// order.
    ///
    /// An error result yields no terms. A system profile yields the OS
    /// name, "{osName} {osVersion}", then each component name. An
    /// application inventory yields each application name, followed by its
    /// publisher when present and different from the name.
    pub fn derive_terms(result: &ScanResult) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut push = |term: String| {
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        };

        match result {
            ScanResult::Error(_) => {}
            ScanResult::Profile(profile) => {
                push(profile.data.os_name.clone());
                push(format!(
                    "{} {}",
                    profile.data.os_name, profile.data.os_version
                ));
                for component in &profile.data.system_components {
                    push(component.name.clone());
                }
            }
            ScanResult::Inventory(inventory) => {
                for application in &inventory.data.applications {
                    push(application.name.clone());
                    if !application.publisher.is_empty()
                        && application.publisher != application.name
                    {
                        push(application.publisher.clone());
                    }
                }
            }
        }

        terms
    }

    /// Returns "{name} {version}" for every system component, or for every
    /// application already flagged with vulnerabilities.
    ///
    /// Used for report summaries, not for catalog queries.
    pub fn extract_vulnerable_components(result: &ScanResult) -> Vec<String> {
        match result {
            ScanResult::Error(_) => vec![],
            ScanResult::Profile(profile) => profile
                .data
                .system_components
                .iter()
                .map(|c| format!("{} {}", c.name, c.version))
                .collect(),
            ScanResult::Inventory(inventory) => inventory
                .data
                .applications
                .iter()
                .filter(|a| a.vulnerability_count > 0)
                .map(|a| format!("{} {}", a.name, a.version))
                .collect(),
        }
    }
}
