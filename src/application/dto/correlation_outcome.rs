use crate::correlation::domain::{SeverityCounts, Vulnerability};

/// Result of correlating one batch of search terms against the catalog.
#[derive(Debug, Clone)]
pub struct CorrelationOutcome {
    /// Merged, deduplicated vulnerabilities, severity-ranked.
    pub vulnerabilities: Vec<Vulnerability>,
    /// For a single term, the catalog's own total; for merged queries,
    /// the count of distinct identifiers (never the sum of per-term
    /// totals, which would double-count overlapping hits).
    pub total_results: u64,
    /// Monotonically increasing stamp identifying this fan-out. A caller
    /// juggling overlapping searches keeps the outcome with the highest
    /// generation and drops late-settling older ones.
    pub generation: u64,
    /// Terms whose queries failed; the rest of the batch still counts.
    pub failed_terms: Vec<String>,
}

impl CorrelationOutcome {
    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::tally(&self.vulnerabilities)
    }
}
