//! vulnscan - scan ingestion and vulnerability correlation tool
//!
//! This library ingests heterogeneous system scan files (system profiles and
//! application inventories), derives search terms from them, queries a
//! CVE catalog, and correlates the results into a severity-ranked report.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`correlation`): Canonical scan model, normalization,
//!   and term derivation
//! - **Application Layer** (`application`): Use cases, the correlation engine,
//!   and the pinned-set store
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use vulnscan::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let scan_reader = FileSystemScanReader::new();
//! let catalog = NvdClient::new(None)?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ProcessScansUseCase::new(scan_reader, catalog, progress_reporter);
//!
//! // Execute
//! let request = ScanRequest::new(vec![PathBuf::from("scan.json")]);
//! let report = use_case.execute(request).await?;
//! println!("{}", report.to_json()?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod correlation;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemScanReader, FileSystemWriter, PinFileStorage, StdoutPresenter,
    };
    pub use crate::adapters::outbound::network::{BackendClient, NvdClient};
    pub use crate::application::dto::{CorrelationOutcome, ReportSummary, ScanReport};
    pub use crate::application::pinned_set::PinnedSetStore;
    pub use crate::application::use_cases::{CorrelationEngine, ProcessScansUseCase, ScanRequest};
    pub use crate::correlation::domain::{
        Application, ApplicationInventory, ComponentType, ScanResult, Severity, SeverityCounts,
        SystemComponent, SystemProfile, Vulnerability,
    };
    pub use crate::correlation::services::{ScanNormalizer, TermDeriver};
    pub use crate::ports::outbound::{
        CatalogPage, CatalogQuery, OutputPresenter, PinStorage, ProgressReporter, ScanFileReader,
        ScanSubmitter, SubmissionOutcome, VulnerabilityCatalog,
    };
    pub use crate::shared::Result;
}
