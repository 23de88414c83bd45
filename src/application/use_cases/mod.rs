pub mod correlate;
pub mod process_scans;

pub use correlate::CorrelationEngine;
pub use process_scans::{ProcessScansUseCase, ScanRequest};
