use crate::correlation::domain::Vulnerability;
use crate::shared::Result;
use async_trait::async_trait;

/// A single query against the external vulnerability catalog, either by
/// keyword or by CVE identifier.
#[derive(Debug, Clone)]
pub struct CatalogQuery {
    pub keyword: Option<String>,
    pub cve_id: Option<String>,
    pub page_size: u32,
    pub start_index: u32,
}

impl CatalogQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    pub fn by_keyword(keyword: impl Into<String>, page_size: u32) -> Self {
        Self {
            keyword: Some(keyword.into()),
            cve_id: None,
            page_size,
            start_index: 0,
        }
    }

    pub fn by_cve(cve_id: impl Into<String>) -> Self {
        Self {
            keyword: None,
            cve_id: Some(cve_id.into()),
            page_size: Self::DEFAULT_PAGE_SIZE,
            start_index: 0,
        }
    }

    pub fn with_start_index(mut self, start_index: u32) -> Self {
        self.start_index = start_index;
        self
    }
}

/// One page of already-normalized catalog results.
///
/// `total_results` is the catalog's count for the whole query, not the
/// page length.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub total_results: u64,
    pub vulnerabilities: Vec<Vulnerability>,
}

/// VulnerabilityCatalog port for querying the external CVE source.
///
/// Implementations normalize raw records into canonical `Vulnerability`
/// values and surface non-2xx responses as errors without retrying;
/// retry policy belongs to the caller.
#[async_trait]
pub trait VulnerabilityCatalog {
    async fn search(&self, query: CatalogQuery) -> Result<CatalogPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_by_keyword() {
        let query = CatalogQuery::by_keyword("OpenSSL", 5);
        assert_eq!(query.keyword.as_deref(), Some("OpenSSL"));
        assert!(query.cve_id.is_none());
        assert_eq!(query.page_size, 5);
        assert_eq!(query.start_index, 0);
    }

    #[test]
    fn test_query_by_cve() {
        let query = CatalogQuery::by_cve("CVE-2023-5678").with_start_index(40);
        assert_eq!(query.cve_id.as_deref(), Some("CVE-2023-5678"));
        assert!(query.keyword.is_none());
        assert_eq!(query.start_index, 40);
    }
}
