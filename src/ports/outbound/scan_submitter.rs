use crate::correlation::domain::Vulnerability;
use crate::shared::Result;
use async_trait::async_trait;

/// Outcome of submitting a batch of raw scan payloads to the backend
/// collaborator.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    /// The backend returned a vulnerability list inline (or via polling).
    Vulnerabilities(Vec<Vulnerability>),
    /// The backend acknowledged the batch without producing a list.
    Acknowledged(String),
}

/// ScanSubmitter port for handing raw parsed scan payloads to the local
/// backend collaborator.
///
/// The envelope is `{"files": [...]}`; the collaborator's internals are
/// out of scope, only its request/response envelope matters here.
#[async_trait]
pub trait ScanSubmitter {
    async fn submit(&self, files: &[serde_json::Value]) -> Result<SubmissionOutcome>;
}
