use crate::application::dto::ScanReport;
use crate::application::use_cases::correlate::{rank_by_severity, CorrelationEngine};
use crate::correlation::domain::{
    ScanError, ScanErrorDetail, ScanResult, Vulnerability,
};
use crate::correlation::services::{ScanNormalizer, TermDeriver};
use crate::ports::outbound::{ProgressReporter, ScanFileReader, VulnerabilityCatalog};
use crate::shared::Result;
use std::collections::HashMap;
use std::path::PathBuf;

/// Bounded-term policy: only this many derived terms are queried per
/// file. The NVD rate-limits keyword search hard, and a full inventory
/// can derive hundreds of terms; callers needing full coverage re-run
/// per component explicitly.
pub const DEFAULT_MAX_TERMS_PER_FILE: usize = 3;

/// Page size used for per-term queries during scan correlation. Small on
/// purpose; the scan flow is a triage pass, not an exhaustive search.
pub const SCAN_PAGE_SIZE: u32 = 5;

/// Request for one end-to-end scan-processing run.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub files: Vec<PathBuf>,
    pub page_size: u32,
    pub max_terms_per_file: usize,
}

impl ScanRequest {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            page_size: SCAN_PAGE_SIZE,
            max_terms_per_file: DEFAULT_MAX_TERMS_PER_FILE,
        }
    }
}

/// ProcessScansUseCase - the end-to-end ingestion pipeline.
///
/// For each uploaded file: read, normalize into a canonical `ScanResult`,
/// derive search terms, apply the bounded-term policy, and correlate the
/// terms against the catalog. Results accumulate across files into one
/// deduplicated, severity-ranked vulnerability list wrapped in a report.
///
/// The pipeline is partial-failure tolerant end to end: a file that fails
/// to parse becomes a `ScanError` entry, and a term or file whose
/// correlation fails is logged and skipped, never aborting the batch.
pub struct ProcessScansUseCase<R, C: VulnerabilityCatalog, P> {
    scan_reader: R,
    engine: CorrelationEngine<C>,
    progress_reporter: P,
}

impl<R, C, P> ProcessScansUseCase<R, C, P>
where
    R: ScanFileReader,
    C: VulnerabilityCatalog,
    P: ProgressReporter,
{
    pub fn new(scan_reader: R, catalog: C, progress_reporter: P) -> Self {
        Self {
            scan_reader,
            engine: CorrelationEngine::new(catalog),
            progress_reporter,
        }
    }

    pub async fn execute(&self, request: ScanRequest) -> Result<ScanReport> {
        let mut scan_results: Vec<ScanResult> = Vec::new();
        let mut merged: HashMap<String, Vulnerability> = HashMap::new();
        let total_files = request.files.len();

        for (index, path) in request.files.iter().enumerate() {
            self.progress_reporter.report_progress(
                index,
                total_files,
                Some(&format!("Processing {}", path.display())),
            );

            let raw_text = self.scan_reader.read_scan_file(path)?;
            let scan_result = match ScanNormalizer::parse(&raw_text) {
                Ok(result) => result,
                Err(e) => {
                    self.progress_reporter
                        .report_error(&format!("⚠️  {}: {}", path.display(), e));
                    synthesized_parse_error(e)
                }
            };

            if !scan_result.is_error() {
                self.progress_reporter
                    .report(&format!("💡 {}: {}", path.display(), scan_result.summary_label()));
            }
            if let ScanResult::Inventory(_) = &scan_result {
                let flagged = TermDeriver::extract_vulnerable_components(&scan_result);
                if !flagged.is_empty() {
                    self.progress_reporter.report(&format!(
                        "⚠️  Already flagged by the scanning agent: {}",
                        flagged.join(", ")
                    ));
                }
            }

            let terms = TermDeriver::derive_terms(&scan_result);
            let bounded: Vec<String> = terms
                .into_iter()
                .take(request.max_terms_per_file)
                .collect();

            if !bounded.is_empty() {
                match self.engine.correlate(&bounded, request.page_size).await {
                    Ok(outcome) => {
                        for vulnerability in outcome.vulnerabilities {
                            merged.insert(vulnerability.cve.clone(), vulnerability);
                        }
                    }
                    Err(e) => {
                        self.progress_reporter.report_error(&format!(
                            "⚠️  Correlation failed for {}: {}",
                            path.display(),
                            e
                        ));
                    }
                }
            }

            scan_results.push(scan_result);
        }

        let mut vulnerabilities: Vec<Vulnerability> = merged.into_values().collect();
        rank_by_severity(&mut vulnerabilities);

        let report = ScanReport::new(scan_results, vulnerabilities);
        self.progress_reporter.report_completion(&format!(
            "✅ Processed {} file(s), found {} potential vulnerabilities",
            report.summary.files_processed, report.summary.vulnerabilities_found
        ));

        Ok(report)
    }
}

/// Wraps an unparseable file as an error-shaped scan result so the batch
/// keeps going and the report still accounts for the file.
fn synthesized_parse_error(error: anyhow::Error) -> ScanResult {
    ScanResult::Error(ScanError {
        status: "error".to_string(),
        error: ScanErrorDetail {
            code: "PARSE_ERROR".to_string(),
            message: "Scan file could not be parsed".to_string(),
            details: error.to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = ScanRequest::new(vec![PathBuf::from("scan.json")]);
        assert_eq!(request.page_size, 5);
        assert_eq!(request.max_terms_per_file, 3);
    }

    #[test]
    fn test_synthesized_parse_error_shape() {
        let result = synthesized_parse_error(anyhow::anyhow!("invalid JSON"));
        match result {
            ScanResult::Error(e) => {
                assert_eq!(e.error.code, "PARSE_ERROR");
                assert!(e.error.details.contains("invalid JSON"));
            }
            other => panic!("expected error result, got {:?}", other),
        }
    }
}
