pub mod scan;
pub mod vulnerability;

pub use scan::{
    Application, ApplicationInventory, ApplicationInventoryData, ComponentType, ScanError,
    ScanErrorDetail, ScanResult, SystemComponent, SystemProfile, SystemProfileData,
};
pub use vulnerability::{Reference, Severity, SeverityCounts, Vulnerability};
