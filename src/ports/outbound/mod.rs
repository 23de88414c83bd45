/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, network, console, etc.).
pub mod output_presenter;
pub mod pin_storage;
pub mod progress_reporter;
pub mod scan_file_reader;
pub mod scan_submitter;
pub mod vulnerability_catalog;

pub use output_presenter::OutputPresenter;
pub use pin_storage::PinStorage;
pub use progress_reporter::ProgressReporter;
pub use scan_file_reader::ScanFileReader;
pub use scan_submitter::{ScanSubmitter, SubmissionOutcome};
pub use vulnerability_catalog::{CatalogPage, CatalogQuery, VulnerabilityCatalog};
