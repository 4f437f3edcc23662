//! Brandguard Core - Compliance audit classification and scoring engine
//!
//! This crate interprets the audit rows the enrichment pipeline writes for
//! marketplace listings and turns them into what a brand-protection
//! reviewer sees. It never scrapes, enriches or writes to storage. The
//! implementation prioritizes:
//!
//! 1. **Determinism** - Same rows in, identical audits out
//! 2. **Logging** - Every fetch and decision point logged with context
//! 3. **Tolerance** - Malformed pipeline data is defaulted, not fatal
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `storage` - Row models and SQL query builders
//! - `extraction` - Lenient access to the `violation_details` bag
//! - `evaluation` - Field-by-field compliance comparison (rule registry)
//! - `classification` - Violation tag and threshold risk bucket
//! - `aggregation` - Paged fetch, dashboard counts, snapshots, analytics
//! - `view` - Filtering and sorting of resolved audits
//! - `export` - Delimited report output
//! - `logging` - Structured logging with fetch context

pub mod aggregation;
pub mod audit;
pub mod classification;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod export;
pub mod extraction;
pub mod logging;
pub mod storage;
pub mod view;

#[cfg(feature = "python")]
mod bindings;

pub use aggregation::{aggregate, Aggregation, AuditSource, FetchContext, InMemorySource, SnapshotCache};
pub use audit::{DashboardStats, FieldComparison, FieldComparisons, FieldName, FieldStatus, ProductAudit};
pub use classification::{classify_violation, risk_bucket, ComplianceFlags, ViolationType};
pub use config::EngineConfig;
pub use error::{AuditError, AuditResult};
pub use evaluation::evaluate_fields;
pub use export::{export_audits, report_filename, ExportRow};
pub use view::{apply_list_view, ListViewConfig, SortKey, SortOrder, SortState};

/// Initialize the module-level logger.
///
/// Safe to call repeatedly; `RUST_LOG` overrides the Info default.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}
