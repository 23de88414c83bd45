use crate::application::dto::CorrelationOutcome;
use crate::correlation::domain::Vulnerability;
use crate::ports::outbound::{CatalogQuery, VulnerabilityCatalog};
use crate::shared::Result;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// CorrelationEngine - orchestrates term-based catalog queries and merges
/// the results.
///
/// A single term is one query whose `totalResults` passes through from
/// the source. Multiple terms fan out concurrently and join on every
/// query settling; duplicate identifiers collapse last-write-wins in
/// collection order (accepted nondeterminism, since concurrent completion
/// order is not guaranteed), and the merged total is the distinct
/// identifier count. One term failing never aborts the others.
///
/// In-flight queries are not cancelled. Each call is stamped with a
/// monotonically increasing generation so callers can recognize and drop
/// an outcome from a superseded search that settles late.
pub struct CorrelationEngine<C: VulnerabilityCatalog> {
    catalog: C,
    generation: AtomicU64,
}

impl<C: VulnerabilityCatalog> CorrelationEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            generation: AtomicU64::new(0),
        }
    }

    /// Correlates a batch of search terms into one merged result set.
    ///
    /// # Errors
    /// A single-term batch propagates its query's failure. In a
    /// multi-term batch, per-term failures are downgraded to warnings and
    /// recorded in `failed_terms`.
    pub async fn correlate(&self, terms: &[String], page_size: u32) -> Result<CorrelationOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        match terms {
            [] => Ok(CorrelationOutcome {
                vulnerabilities: vec![],
                total_results: 0,
                generation,
                failed_terms: vec![],
            }),
            [term] => {
                let page = self
                    .catalog
                    .search(CatalogQuery::by_keyword(term, page_size))
                    .await?;
                Ok(CorrelationOutcome {
                    vulnerabilities: page.vulnerabilities,
                    total_results: page.total_results,
                    generation,
                    failed_terms: vec![],
                })
            }
            terms => Ok(self.correlate_many(terms, page_size, generation).await),
        }
    }

    async fn correlate_many(
        &self,
        terms: &[String],
        page_size: u32,
        generation: u64,
    ) -> CorrelationOutcome {
        let queries = terms.iter().map(|term| async move {
            let result = self
                .catalog
                .search(CatalogQuery::by_keyword(term, page_size))
                .await;
            (term.clone(), result)
        });

        // Join semantics: every query settles before merging; no
        // short-circuit on first failure.
        let settled = join_all(queries).await;

        let mut merged: HashMap<String, Vulnerability> = HashMap::new();
        let mut failed_terms = Vec::new();

        for (term, result) in settled {
            match result {
                Ok(page) => {
                    for vulnerability in page.vulnerabilities {
                        merged.insert(vulnerability.cve.clone(), vulnerability);
                    }
                }
                Err(e) => {
                    eprintln!("⚠️  Warning: query for '{}' failed: {}", term, e);
                    failed_terms.push(term);
                }
            }
        }

        let total_results = merged.len() as u64;
        let mut vulnerabilities: Vec<Vulnerability> = merged.into_values().collect();
        rank_by_severity(&mut vulnerabilities);

        CorrelationOutcome {
            vulnerabilities,
            total_results,
            generation,
            failed_terms,
        }
    }
}

/// Orders a merged set severity-first, score-second, identifier-last, so
/// presentation order is deterministic even when merge contents are not.
pub fn rank_by_severity(vulnerabilities: &mut [Vulnerability]) {
    vulnerabilities.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.cve.cmp(&b.cve))
    });
}
