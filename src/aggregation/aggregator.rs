//! Audit aggregation.
//!
//! Coordinates one full fetch:
//! 1. Paged retrieval of joined rows (newest first) until a short page
//! 2. Per-row field evaluation and classification
//! 3. Exact-count queries for the dashboard counters
//!
//! Any source failure aborts the fetch; no partial result is returned.

use crate::aggregation::context::FetchContext;
use crate::aggregation::resolve::resolve_audit;
use crate::aggregation::source::AuditSource;
use crate::audit::product::{DashboardStats, ProductAudit};
use crate::config::EngineConfig;
use crate::error::AuditResult;
use crate::storage::models::{AuditStatus, JoinedAuditRow, RiskLevel};
use crate::storage::queries::CountQuery;

/// Result of one full fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub audits: Vec<ProductAudit>,
    pub stats: DashboardStats,
}

/// Run a full fetch against `source`.
pub fn aggregate<S: AuditSource + ?Sized>(
    source: &S,
    config: &EngineConfig,
    ctx: &FetchContext,
) -> AuditResult<Aggregation> {
    let log_ctx = ctx.log_context();
    crate::log_info!(log_ctx, "FETCH_START", page_size = config.page_size);

    let result = fetch_all_rows(source, config.page_size, ctx).and_then(|rows| {
        let last_audit = rows.first().and_then(|r| r.audit.processed_at);
        let stats = compute_stats(source, last_audit, ctx)?;
        let audits = rows
            .iter()
            .map(|row| resolve_audit(row, &ctx.audit_context(&row.audit.id)))
            .collect::<Vec<_>>();
        Ok(Aggregation { audits, stats })
    });

    match &result {
        Ok(aggregation) => log::info!(
            "{} FETCH_COMPLETE audits={} scanned={} high={} medium={} low={} elapsed_ms={}",
            log_ctx,
            aggregation.audits.len(),
            aggregation.stats.scanned,
            aggregation.stats.high_risk,
            aggregation.stats.medium_risk,
            aggregation.stats.low_risk,
            ctx.elapsed_ms()
        ),
        Err(e) => {
            crate::log_error!(log_ctx, "FETCH_FAILED", error = e.to_string());
        }
    }

    result
}

/// Read every row, one page at a time.
///
/// Each request's offset depends on the previous page, so pages are read
/// strictly in sequence. Stops at the first page shorter than `page_size`.
pub fn fetch_all_rows<S: AuditSource + ?Sized>(
    source: &S,
    page_size: usize,
    ctx: &FetchContext,
) -> AuditResult<Vec<JoinedAuditRow>> {
    let log_ctx = ctx.log_context();
    let page_size = page_size.max(1);
    let mut rows = Vec::new();
    let mut offset = 0;

    loop {
        let page = source.fetch_page(offset, page_size)?;
        let page_len = page.len();

        crate::log_debug!(log_ctx, "FETCH_PAGE", offset = offset, rows = page_len);

        rows.extend(page);
        if page_len < page_size {
            break;
        }
        offset += page_size;
    }

    Ok(rows)
}

/// Dashboard counters from exact-count queries.
///
/// Counts come from the store rather than the retrieved rows so concurrent
/// writes between pages cannot skew them.
pub fn compute_stats<S: AuditSource + ?Sized>(
    source: &S,
    last_audit: Option<chrono::DateTime<chrono::Utc>>,
    ctx: &FetchContext,
) -> AuditResult<DashboardStats> {
    let log_ctx = ctx.log_context();
    let count = |query: CountQuery| -> AuditResult<u64> {
        let n = source.count(query)?;
        crate::log_debug!(log_ctx, "COUNT_QUERY", query = query, count = n);
        Ok(n)
    };

    Ok(DashboardStats {
        scanned: count(CountQuery::Listings)?,
        active: count(CountQuery::Status(AuditStatus::Pending))?,
        cleaned: count(CountQuery::Status(AuditStatus::Reported))?,
        high_risk: count(CountQuery::Risk(RiskLevel::High))?,
        medium_risk: count(CountQuery::Risk(RiskLevel::Medium))?,
        low_risk: count(CountQuery::Risk(RiskLevel::Low))?,
        last_audit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::source::InMemorySource;
    use crate::error::AuditError;
    use crate::storage::models::RawAuditRecord;
    use std::cell::RefCell;

    /// Source that serves fixed page sizes and records each call.
    struct ScriptedSource {
        pages: Vec<usize>,
        calls: RefCell<Vec<usize>>,
        fail_counts: bool,
    }

    impl AuditSource for ScriptedSource {
        fn fetch_page(&self, offset: usize, _limit: usize) -> AuditResult<Vec<JoinedAuditRow>> {
            let call = self.calls.borrow().len();
            self.calls.borrow_mut().push(offset);
            let n = self.pages.get(call).copied().unwrap_or(0);
            Ok((0..n)
                .map(|i| JoinedAuditRow {
                    audit: RawAuditRecord {
                        id: format!("{}", offset + i),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .collect())
        }

        fn count(&self, _query: CountQuery) -> AuditResult<u64> {
            if self.fail_counts {
                Err(AuditError::source_query("count", 0, "timeout"))
            } else {
                Ok(0)
            }
        }
    }

    #[test]
    fn test_pagination_stops_on_short_page() {
        let source = ScriptedSource {
            pages: vec![1000, 1000, 200],
            calls: RefCell::new(Vec::new()),
            fail_counts: false,
        };
        let rows = fetch_all_rows(&source, 1000, &FetchContext::with_id("t")).unwrap();

        assert_eq!(rows.len(), 2200);
        assert_eq!(*source.calls.borrow(), vec![0, 1000, 2000]);
    }

    #[test]
    fn test_pagination_exact_multiple_reads_one_empty_page() {
        let source = ScriptedSource {
            pages: vec![1000, 1000],
            calls: RefCell::new(Vec::new()),
            fail_counts: false,
        };
        let rows = fetch_all_rows(&source, 1000, &FetchContext::with_id("t")).unwrap();

        assert_eq!(rows.len(), 2000);
        assert_eq!(source.calls.borrow().len(), 3);
    }

    #[test]
    fn test_count_failure_aborts() {
        let source = ScriptedSource {
            pages: vec![5],
            calls: RefCell::new(Vec::new()),
            fail_counts: true,
        };
        let result = aggregate(&source, &EngineConfig::default(), &FetchContext::with_id("t"));
        assert!(matches!(result, Err(AuditError::SourceQuery { .. })));
    }

    #[test]
    fn test_empty_source() {
        let source = InMemorySource::new(Vec::new());
        let result = aggregate(&source, &EngineConfig::default(), &FetchContext::with_id("t")).unwrap();
        assert!(result.audits.is_empty());
        assert_eq!(result.stats, DashboardStats::default());
    }
}
