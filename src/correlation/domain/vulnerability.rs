use serde::{Deserialize, Serialize};

/// Severity band for a vulnerability.
///
/// Ordered so that `Critical` compares greatest; merged result sets are
/// ranked by this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Unknown,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Derives a severity band from a CVSS v2 base score.
    ///
    /// v2 has no Critical band; scores at or above 7.0 map to High.
    /// This mirrors the source scheme's limits and is not widened here.
    pub fn from_v2_score(score: f64) -> Self {
        if score >= 7.0 {
            Severity::High
        } else if score >= 4.0 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    /// Parses a v3.1 `baseSeverity` label, case-insensitively.
    pub fn parse_label(label: &str) -> Self {
        match label.to_uppercase().as_str() {
            "CRITICAL" => Severity::Critical,
            "HIGH" => Severity::High,
            "MEDIUM" => Severity::Medium,
            "LOW" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// External reference attached to a vulnerability record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub url: String,
    #[serde(default)]
    pub source: String,
}

/// Canonical vulnerability record.
///
/// Identity is `cve`; all merge and dedup operations key on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    pub cve: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub score: f64,
    pub published_date: String,
    pub last_modified: String,
    /// Source lifecycle label, free text (e.g. "Analyzed", "Modified").
    pub status: String,
    /// Originating source identifier string from the catalog.
    pub source: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Aggregated per-severity counts for a correlated result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub critical_count: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    pub unknown_count: usize,
}

impl SeverityCounts {
    pub fn tally<'a, I: IntoIterator<Item = &'a Vulnerability>>(vulnerabilities: I) -> Self {
        let mut counts = SeverityCounts::default();
        for vulnerability in vulnerabilities {
            counts.record(vulnerability.severity);
        }
        counts
    }

    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical_count += 1,
            Severity::High => self.high_count += 1,
            Severity::Medium => self.medium_count += 1,
            Severity::Low => self.low_count += 1,
            Severity::Unknown => self.unknown_count += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.critical_count
            + self.high_count
            + self.medium_count
            + self.low_count
            + self.unknown_count
    }
}
