pub mod correlation_outcome;
pub mod scan_report;

pub use correlation_outcome::CorrelationOutcome;
pub use scan_report::{ReportSummary, ScanReport};
