use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use vulnscan::prelude::*;

/// Mock VulnerabilityCatalog for testing that serves canned pages
/// keyed by keyword and records the queries it receives.
pub struct MockVulnerabilityCatalog {
    pub pages: HashMap<String, Vec<Vulnerability>>,
    pub failing_keywords: HashSet<String>,
    pub queries: Arc<Mutex<Vec<CatalogQuery>>>,
}

impl MockVulnerabilityCatalog {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            failing_keywords: HashSet::new(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_page(mut self, keyword: &str, vulnerabilities: Vec<Vulnerability>) -> Self {
        self.pages.insert(keyword.to_string(), vulnerabilities);
        self
    }

    pub fn with_failing_keyword(mut self, keyword: &str) -> Self {
        self.failing_keywords.insert(keyword.to_string());
        self
    }
}

impl Default for MockVulnerabilityCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VulnerabilityCatalog for MockVulnerabilityCatalog {
    async fn search(&self, query: CatalogQuery) -> Result<CatalogPage> {
        self.queries.lock().unwrap().push(query.clone());

        let key = query
            .keyword
            .clone()
            .or_else(|| query.cve_id.clone())
            .unwrap_or_default();

        if self.failing_keywords.contains(&key) {
            anyhow::bail!("Mock catalog failure for: {}", key);
        }

        let vulnerabilities = self.pages.get(&key).cloned().unwrap_or_default();
        Ok(CatalogPage {
            total_results: vulnerabilities.len() as u64,
            vulnerabilities,
        })
    }
}

/// Builds a minimal vulnerability record for test fixtures.
pub fn make_vulnerability(cve: &str, severity: Severity, score: f64) -> Vulnerability {
    Vulnerability {
        cve: cve.to_string(),
        title: format!("{} title", cve),
        description: format!("{} description", cve),
        severity,
        score,
        published_date: "2024-01-01T00:00:00.000".to_string(),
        last_modified: "2024-01-02T00:00:00.000".to_string(),
        status: "Analyzed".to_string(),
        source: "nvd@nist.gov".to_string(),
        references: vec![],
    }
}
