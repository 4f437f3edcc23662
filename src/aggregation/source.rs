//! Audit data sources.
//!
//! The store is external; the aggregator only needs paged joined reads and
//! exact counts. `InMemorySource` backs the Python bridge when it hands over
//! already-fetched rows and the store's exact counts, and the tests.

use std::collections::HashMap;

use crate::error::AuditResult;
use crate::storage::models::JoinedAuditRow;
use crate::storage::queries::CountQuery;

/// Read-only access to joined audit rows.
pub trait AuditSource {
    /// Rows `offset..offset + limit`, newest `processed_at` first.
    /// May return fewer than `limit` rows, including when the store caps
    /// responses.
    fn fetch_page(&self, offset: usize, limit: usize) -> AuditResult<Vec<JoinedAuditRow>>;

    /// Exact count for `query`, independent of any page already read.
    fn count(&self, query: CountQuery) -> AuditResult<u64>;
}

impl<S: AuditSource + ?Sized> AuditSource for &S {
    fn fetch_page(&self, offset: usize, limit: usize) -> AuditResult<Vec<JoinedAuditRow>> {
        (**self).fetch_page(offset, limit)
    }

    fn count(&self, query: CountQuery) -> AuditResult<u64> {
        (**self).count(query)
    }
}

/// Source over rows already held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<JoinedAuditRow>,
    listing_count: u64,
    exact_counts: HashMap<CountQuery, u64>,
    row_cap: Option<usize>,
}

impl InMemorySource {
    /// Rows are ordered newest first; rows without a timestamp sort last.
    /// The listing count defaults to the number of rows.
    pub fn new(mut rows: Vec<JoinedAuditRow>) -> Self {
        rows.sort_by(|a, b| b.audit.processed_at.cmp(&a.audit.processed_at));
        let listing_count = rows.len() as u64;
        Self {
            rows,
            listing_count,
            exact_counts: HashMap::new(),
            row_cap: None,
        }
    }

    /// Exact counts reported by the store. These answer `count` in place of
    /// tallies over the held rows, which may be a partial read.
    pub fn with_counts(mut self, counts: impl IntoIterator<Item = (CountQuery, u64)>) -> Self {
        self.exact_counts.extend(counts);
        self
    }

    /// Listings scanned, including those never audited.
    pub fn with_listing_count(mut self, listing_count: u64) -> Self {
        self.listing_count = listing_count;
        self
    }

    /// Cap rows per response, the way the hosted store does.
    pub fn with_row_cap(mut self, cap: usize) -> Self {
        self.row_cap = Some(cap);
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl AuditSource for InMemorySource {
    fn fetch_page(&self, offset: usize, limit: usize) -> AuditResult<Vec<JoinedAuditRow>> {
        let limit = self.row_cap.map_or(limit, |cap| limit.min(cap));
        Ok(self.rows.iter().skip(offset).take(limit).cloned().collect())
    }

    fn count(&self, query: CountQuery) -> AuditResult<u64> {
        if let Some(n) = self.exact_counts.get(&query) {
            return Ok(*n);
        }
        let n = match query {
            CountQuery::Listings => return Ok(self.listing_count),
            CountQuery::Status(status) => self.rows.iter().filter(|r| r.audit.status == status).count(),
            CountQuery::Risk(risk) => self.rows.iter().filter(|r| r.audit.risk_level == risk).count(),
        };
        Ok(n as u64)
    }
}
