use crate::correlation::domain::Vulnerability;
use crate::ports::outbound::{ScanSubmitter, SubmissionOutcome};
use crate::shared::error::VulnscanError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for the local scan-processing backend.
///
/// POSTs a batch of raw parsed scan payloads as `{"files": [...]}`. The
/// backend either returns a vulnerability list inline or acknowledges the
/// batch, in which case a bounded number of follow-up GET polls look for
/// the finished list. The POST itself is never retried; a non-2xx
/// response is the caller's to handle.
pub struct BackendClient {
    client: reqwest::Client,
    endpoint: String,
    poll_attempts: u32,
    poll_delay: Duration,
}

impl BackendClient {
    const TIMEOUT_SECONDS: u64 = 30;
    const DEFAULT_POLL_ATTEMPTS: u32 = 5;
    const DEFAULT_POLL_DELAY_MS: u64 = 1000;

    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("vulnscan/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            poll_attempts: Self::DEFAULT_POLL_ATTEMPTS,
            poll_delay: Duration::from_millis(Self::DEFAULT_POLL_DELAY_MS),
        })
    }

    /// Shortens the polling schedule. Used by tests.
    pub fn with_polling(mut self, attempts: u32, delay: Duration) -> Self {
        self.poll_attempts = attempts;
        self.poll_delay = delay;
        self
    }

    fn scan_url(&self) -> String {
        format!("{}/api/v1/scan", self.endpoint.trim_end_matches('/'))
    }

    async fn poll_for_result(&self) -> Result<Option<Vec<Vulnerability>>> {
        for _ in 0..self.poll_attempts {
            tokio::time::sleep(self.poll_delay).await;

            let response = self.client.get(self.scan_url()).send().await.map_err(|e| {
                VulnscanError::SubmissionError {
                    endpoint: self.endpoint.clone(),
                    details: e.to_string(),
                }
            })?;

            if !response.status().is_success() {
                return Err(VulnscanError::SubmissionError {
                    endpoint: self.endpoint.clone(),
                    details: format!("poll returned status code {}", response.status()),
                }
                .into());
            }

            let body: BackendResponse = response.json().await.map_err(|e| {
                VulnscanError::SubmissionError {
                    endpoint: self.endpoint.clone(),
                    details: format!("malformed poll response: {}", e),
                }
            })?;

            if let Some(vulnerabilities) = body.vulnerabilities {
                return Ok(Some(vulnerabilities));
            }
            if body.status == "error" {
                return Err(VulnscanError::SubmissionError {
                    endpoint: self.endpoint.clone(),
                    details: body.message.unwrap_or_else(|| "backend reported an error".into()),
                }
                .into());
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl ScanSubmitter for BackendClient {
    async fn submit(&self, files: &[serde_json::Value]) -> Result<SubmissionOutcome> {
        let envelope = SubmissionEnvelope { files };

        let response = self
            .client
            .post(self.scan_url())
            .json(&envelope)
            .send()
            .await
            .map_err(|e| VulnscanError::SubmissionError {
                endpoint: self.endpoint.clone(),
                details: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(VulnscanError::SubmissionError {
                endpoint: self.endpoint.clone(),
                details: format!("backend returned status code {}", response.status()),
            }
            .into());
        }

        let body: BackendResponse =
            response
                .json()
                .await
                .map_err(|e| VulnscanError::SubmissionError {
                    endpoint: self.endpoint.clone(),
                    details: format!("malformed backend response: {}", e),
                })?;

        if let Some(vulnerabilities) = body.vulnerabilities {
            return Ok(SubmissionOutcome::Vulnerabilities(vulnerabilities));
        }

        if let Some(vulnerabilities) = self.poll_for_result().await? {
            return Ok(SubmissionOutcome::Vulnerabilities(vulnerabilities));
        }

        Ok(SubmissionOutcome::Acknowledged(
            body.message.unwrap_or(body.status),
        ))
    }
}

#[derive(Serialize)]
struct SubmissionEnvelope<'a> {
    files: &'a [serde_json::Value],
}

#[derive(Debug, Deserialize)]
struct BackendResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    vulnerabilities: Option<Vec<Vulnerability>>,
}
