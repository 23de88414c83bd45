use crate::correlation::domain::{Reference, Severity, Vulnerability};
use crate::ports::outbound::{CatalogPage, CatalogQuery, VulnerabilityCatalog};
use crate::shared::error::VulnscanError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Maximum title length taken from the description (characters).
const TITLE_MAX_CHARS: usize = 100;

const FALLBACK_DESCRIPTION: &str = "No description available";

/// NVD 2.0 API client for fetching vulnerability data.
///
/// Queries the NIST CVE catalog by keyword or CVE identifier and
/// normalizes each raw record into a canonical `Vulnerability`.
///
/// Transport failures and non-2xx responses surface as errors without
/// internal retries; the NVD rate-limits aggressively and the caller
/// owns the retry decision.
pub struct NvdClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl NvdClient {
    const BASE_URL: &'static str = "https://services.nvd.nist.gov/rest/json/cves/2.0";
    const TIMEOUT_SECONDS: u64 = 30;

    /// Creates a new NVD client. An API key raises the NVD rate limit
    /// substantially and is sent via the `apiKey` header when present.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("vulnscan/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: Self::BASE_URL.to_string(),
            api_key,
        })
    }

    /// Overrides the API base URL. Used by tests pointing at a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_url(&self, query: &CatalogQuery) -> String {
        let mut params: Vec<String> = Vec::new();

        if let Some(keyword) = &query.keyword {
            params.push(format!("keywordSearch={}", urlencoding::encode(keyword)));
        }
        if let Some(cve_id) = &query.cve_id {
            params.push(format!("cveId={}", urlencoding::encode(cve_id)));
        }
        params.push(format!("resultsPerPage={}", query.page_size));
        params.push(format!("startIndex={}", query.start_index));

        format!("{}?{}", self.base_url, params.join("&"))
    }

    /// Normalizes a raw NVD record into the canonical shape.
    ///
    /// Scoring precedence: a v3.1 metric block is used verbatim; a v2
    /// block falls back to fixed thresholds (which have no Critical band,
    /// a limit of the v2 scheme kept as-is); with neither, the record is
    /// Unknown with score 0.
    fn normalize(raw: NvdCve) -> Vulnerability {
        let description = raw
            .descriptions
            .iter()
            .find(|d| d.lang == "en")
            .map(|d| d.value.clone())
            .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

        let (score, severity) = match &raw.metrics {
            Some(metrics) => {
                if let Some(v31) = metrics.cvss_metric_v31.as_ref().and_then(|m| m.first()) {
                    (
                        v31.cvss_data.base_score,
                        Severity::parse_label(&v31.cvss_data.base_severity),
                    )
                } else if let Some(v2) = metrics.cvss_metric_v2.as_ref().and_then(|m| m.first()) {
                    (
                        v2.cvss_data.base_score,
                        Severity::from_v2_score(v2.cvss_data.base_score),
                    )
                } else {
                    (0.0, Severity::Unknown)
                }
            }
            None => (0.0, Severity::Unknown),
        };

        Vulnerability {
            cve: raw.id,
            title: truncate_title(&description),
            description,
            severity,
            score,
            published_date: raw.published,
            last_modified: raw.last_modified,
            status: raw.vuln_status,
            source: raw.source_identifier,
            references: raw
                .references
                .into_iter()
                .map(|r| Reference {
                    url: r.url,
                    source: r.source,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl VulnerabilityCatalog for NvdClient {
    async fn search(&self, query: CatalogQuery) -> Result<CatalogPage> {
        let url = self.build_url(&query);

        let mut request = self.client.get(&url);
        if let Some(api_key) = &self.api_key {
            request = request.header("apiKey", api_key);
        }

        let response = request.send().await.map_err(|e| VulnscanError::CatalogError {
            details: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(VulnscanError::CatalogError {
                details: format!("NVD API returned status code {}", response.status()),
            }
            .into());
        }

        let raw: NvdResponse =
            response
                .json()
                .await
                .map_err(|e| VulnscanError::CatalogError {
                    details: format!("malformed NVD response: {}", e),
                })?;

        Ok(CatalogPage {
            total_results: raw.total_results,
            vulnerabilities: raw
                .vulnerabilities
                .into_iter()
                .map(|entry| Self::normalize(entry.cve))
                .collect(),
        })
    }
}

/// First 100 characters of the description, with a truncation ellipsis
/// when the full text is longer. Counts characters, not bytes, so
/// multibyte descriptions stay on a char boundary.
fn truncate_title(description: &str) -> String {
    if description.chars().count() > TITLE_MAX_CHARS {
        let prefix: String = description.chars().take(TITLE_MAX_CHARS).collect();
        format!("{}...", prefix)
    } else {
        description.to_string()
    }
}

// NVD API response structures

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdResponse {
    #[allow(dead_code)]
    results_per_page: u32,
    #[allow(dead_code)]
    start_index: u32,
    total_results: u64,
    #[serde(default)]
    vulnerabilities: Vec<NvdEntry>,
}

#[derive(Debug, Deserialize)]
struct NvdEntry {
    cve: NvdCve,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCve {
    id: String,
    #[serde(default)]
    source_identifier: String,
    #[serde(default)]
    published: String,
    #[serde(default)]
    last_modified: String,
    #[serde(default)]
    vuln_status: String,
    #[serde(default)]
    descriptions: Vec<NvdDescription>,
    #[serde(default)]
    metrics: Option<NvdMetrics>,
    #[serde(default)]
    references: Vec<NvdReference>,
}

#[derive(Debug, Deserialize)]
struct NvdDescription {
    lang: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdMetrics {
    #[serde(default)]
    cvss_metric_v31: Option<Vec<NvdMetricV31>>,
    #[serde(default)]
    cvss_metric_v2: Option<Vec<NvdMetricV2>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdMetricV31 {
    cvss_data: NvdCvssDataV31,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssDataV31 {
    base_score: f64,
    base_severity: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdMetricV2 {
    cvss_data: NvdCvssDataV2,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NvdCvssDataV2 {
    base_score: f64,
}

#[derive(Debug, Deserialize)]
struct NvdReference {
    url: String,
    #[serde(default)]
    source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_cve(metrics: Option<NvdMetrics>, descriptions: Vec<NvdDescription>) -> NvdCve {
        NvdCve {
            id: "CVE-2023-5678".to_string(),
            source_identifier: "nvd@nist.gov".to_string(),
            published: "2024-01-15T10:30:00Z".to_string(),
            last_modified: "2024-01-16T10:30:00Z".to_string(),
            vuln_status: "Analyzed".to_string(),
            descriptions,
            metrics,
            references: vec![NvdReference {
                url: "https://example.com/advisory".to_string(),
                source: "vendor".to_string(),
            }],
        }
    }

    fn english(value: &str) -> NvdDescription {
        NvdDescription {
            lang: "en".to_string(),
            value: value.to_string(),
        }
    }

    fn v2_metrics(base_score: f64) -> NvdMetrics {
        NvdMetrics {
            cvss_metric_v31: None,
            cvss_metric_v2: Some(vec![NvdMetricV2 {
                cvss_data: NvdCvssDataV2 { base_score },
            }]),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = NvdClient::new(None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_url_keyword() {
        let client = NvdClient::new(None).unwrap();
        let url = client.build_url(&CatalogQuery::by_keyword("Docker Desktop", 5));
        assert!(url.starts_with("https://services.nvd.nist.gov/rest/json/cves/2.0?"));
        assert!(url.contains("keywordSearch=Docker%20Desktop"));
        assert!(url.contains("resultsPerPage=5"));
        assert!(url.contains("startIndex=0"));
        assert!(!url.contains("cveId"));
    }

    #[test]
    fn test_build_url_cve_id() {
        let client = NvdClient::new(None)
            .unwrap()
            .with_base_url("http://localhost:9000/cves");
        let url = client.build_url(&CatalogQuery::by_cve("CVE-2023-5678"));
        assert!(url.starts_with("http://localhost:9000/cves?"));
        assert!(url.contains("cveId=CVE-2023-5678"));
    }

    #[test]
    fn test_normalize_v31_used_verbatim() {
        let metrics = NvdMetrics {
            cvss_metric_v31: Some(vec![NvdMetricV31 {
                cvss_data: NvdCvssDataV31 {
                    base_score: 9.1,
                    base_severity: "CRITICAL".to_string(),
                },
            }]),
            cvss_metric_v2: Some(vec![NvdMetricV2 {
                cvss_data: NvdCvssDataV2 { base_score: 5.0 },
            }]),
        };
        let v = NvdClient::normalize(raw_cve(Some(metrics), vec![english("Auth bypass")]));
        assert_eq!(v.severity, Severity::Critical);
        assert_eq!(v.score, 9.1);
    }

    #[test]
    fn test_normalize_v2_threshold_high_at_7() {
        let v = NvdClient::normalize(raw_cve(Some(v2_metrics(7.0)), vec![english("d")]));
        assert_eq!(v.severity, Severity::High);
        assert_eq!(v.score, 7.0);
    }

    #[test]
    fn test_normalize_v2_threshold_medium_at_6_9() {
        let v = NvdClient::normalize(raw_cve(Some(v2_metrics(6.9)), vec![english("d")]));
        assert_eq!(v.severity, Severity::Medium);
    }

    #[test]
    fn test_normalize_v2_threshold_low_at_3_9() {
        let v = NvdClient::normalize(raw_cve(Some(v2_metrics(3.9)), vec![english("d")]));
        assert_eq!(v.severity, Severity::Low);
    }

    #[test]
    fn test_normalize_no_metrics_is_unknown() {
        let v = NvdClient::normalize(raw_cve(None, vec![english("d")]));
        assert_eq!(v.severity, Severity::Unknown);
        assert_eq!(v.score, 0.0);
    }

    #[test]
    fn test_normalize_title_truncated_with_ellipsis() {
        let long = "A".repeat(150);
        let v = NvdClient::normalize(raw_cve(None, vec![english(&long)]));
        assert_eq!(v.title.chars().count(), 103);
        assert!(v.title.ends_with("..."));
        assert_eq!(v.description, long);
    }

    #[test]
    fn test_normalize_short_description_untouched() {
        let v = NvdClient::normalize(raw_cve(None, vec![english("Short description")]));
        assert_eq!(v.title, "Short description");
    }

    #[test]
    fn test_normalize_prefers_english_description() {
        let descriptions = vec![
            NvdDescription {
                lang: "es".to_string(),
                value: "Descripción".to_string(),
            },
            english("English text"),
        ];
        let v = NvdClient::normalize(raw_cve(None, descriptions));
        assert_eq!(v.description, "English text");
    }

    #[test]
    fn test_normalize_missing_english_uses_fallback() {
        let descriptions = vec![NvdDescription {
            lang: "es".to_string(),
            value: "Descripción".to_string(),
        }];
        let v = NvdClient::normalize(raw_cve(None, descriptions));
        assert_eq!(v.description, "No description available");
        assert_eq!(v.title, "No description available");
    }

    #[test]
    fn test_truncate_title_multibyte_safe() {
        let description = "é".repeat(120);
        let title = truncate_title(&description);
        assert_eq!(title.chars().count(), 103);
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "resultsPerPage": 1,
            "startIndex": 0,
            "totalResults": 42,
            "format": "NVD_CVE",
            "version": "2.0",
            "vulnerabilities": [
                {
                    "cve": {
                        "id": "CVE-2023-5678",
                        "sourceIdentifier": "nvd@nist.gov",
                        "published": "2024-01-15T10:30:00Z",
                        "lastModified": "2024-01-16T10:30:00Z",
                        "vulnStatus": "Analyzed",
                        "descriptions": [{"lang": "en", "value": "Auth bypass in Docker"}],
                        "metrics": {
                            "cvssMetricV31": [
                                {"cvssData": {"baseScore": 9.1, "baseSeverity": "CRITICAL", "vectorString": "CVSS:3.1/AV:N"}}
                            ]
                        },
                        "references": [{"url": "https://example.com", "source": "vendor"}]
                    }
                }
            ]
        }"#;
        let response: NvdResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_results, 42);
        assert_eq!(response.vulnerabilities.len(), 1);

        let v = NvdClient::normalize(
            response
                .vulnerabilities
                .into_iter()
                .next()
                .unwrap()
                .cve,
        );
        assert_eq!(v.cve, "CVE-2023-5678");
        assert_eq!(v.severity, Severity::Critical);
        assert_eq!(v.references.len(), 1);
    }

    #[test]
    fn test_response_deserialization_empty_page() {
        let json = r#"{"resultsPerPage": 0, "startIndex": 0, "totalResults": 0}"#;
        let response: NvdResponse = serde_json::from_str(json).unwrap();
        assert!(response.vulnerabilities.is_empty());
    }
}
