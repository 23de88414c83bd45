use crate::correlation::domain::{ScanResult, SeverityCounts, Vulnerability};
use crate::shared::Result;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Final report produced by the scan pipeline.
///
/// A direct serialization of already-canonical data: the parsed scan
/// results, the merged vulnerability list, and per-severity counts. The
/// JSON shape is stable and the `vulnerabilities` array is directly
/// importable into the pinned set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub generated_at: String,
    pub serial_number: String,
    pub scan_results: Vec<ScanResult>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub summary: ReportSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub files_processed: usize,
    pub vulnerabilities_found: usize,
    #[serde(flatten)]
    pub severity_counts: SeverityCounts,
}

impl ScanReport {
    pub fn new(scan_results: Vec<ScanResult>, vulnerabilities: Vec<Vulnerability>) -> Self {
        let summary = ReportSummary {
            files_processed: scan_results.len(),
            vulnerabilities_found: vulnerabilities.len(),
            severity_counts: SeverityCounts::tally(&vulnerabilities),
        };

        Self {
            generated_at: Utc::now().to_rfc3339(),
            serial_number: format!("urn:uuid:{}", Uuid::new_v4()),
            scan_results,
            vulnerabilities,
            summary,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlation::domain::{ScanError, ScanErrorDetail, Severity};

    fn vulnerability(cve: &str, severity: Severity) -> Vulnerability {
        Vulnerability {
            cve: cve.to_string(),
            title: "Test".to_string(),
            description: "Test".to_string(),
            severity,
            score: 7.5,
            published_date: "2024-01-15T10:30:00Z".to_string(),
            last_modified: "2024-01-16T10:30:00Z".to_string(),
            status: "Analyzed".to_string(),
            source: "nvd@nist.gov".to_string(),
            references: vec![],
        }
    }

    #[test]
    fn test_report_summary_counts() {
        let scan_results = vec![ScanResult::Error(ScanError {
            status: "error".to_string(),
            error: ScanErrorDetail {
                code: "E1".to_string(),
                message: "bad sensor".to_string(),
                details: String::new(),
            },
        })];
        let vulnerabilities = vec![
            vulnerability("CVE-1", Severity::Critical),
            vulnerability("CVE-2", Severity::High),
            vulnerability("CVE-3", Severity::High),
        ];

        let report = ScanReport::new(scan_results, vulnerabilities);
        assert_eq!(report.summary.files_processed, 1);
        assert_eq!(report.summary.vulnerabilities_found, 3);
        assert_eq!(report.summary.severity_counts.critical_count, 1);
        assert_eq!(report.summary.severity_counts.high_count, 2);
        assert!(report.serial_number.starts_with("urn:uuid:"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = ScanReport::new(vec![], vec![vulnerability("CVE-1", Severity::Low)]);
        let json: serde_json::Value =
            serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert!(json.get("generatedAt").is_some());
        assert!(json["scanResults"].is_array());
        assert_eq!(json["summary"]["filesProcessed"], 0);
        assert_eq!(json["summary"]["vulnerabilitiesFound"], 1);
        assert_eq!(json["summary"]["lowCount"], 1);
        // The vulnerabilities array is the same shape the pinned set imports.
        assert_eq!(json["vulnerabilities"][0]["cve"], "CVE-1");
    }
}
