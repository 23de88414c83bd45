/// Mock implementations for testing
mod mock_pin_storage;
mod mock_progress_reporter;
mod mock_scan_file_reader;
mod mock_vulnerability_catalog;

pub use mock_pin_storage::MockPinStorage;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scan_file_reader::MockScanFileReader;
pub use mock_vulnerability_catalog::{make_vulnerability, MockVulnerabilityCatalog};
