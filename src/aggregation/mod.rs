//! Audit aggregation module.
//!
//! Builds the resolved audit list and dashboard counters from the store:
//! - Paged retrieval and exact counts through `AuditSource`
//! - Per-row evaluation and classification
//! - Last-good snapshot caching
//! - Enrichment pipeline status shaping
//! - Analytics summary

pub mod aggregator;
pub mod analytics;
pub mod context;
pub mod enrichment;
pub mod resolve;
pub mod snapshot;
pub mod source;

pub use aggregator::*;
pub use analytics::*;
pub use context::*;
pub use enrichment::*;
pub use resolve::*;
pub use snapshot::*;
pub use source::*;
