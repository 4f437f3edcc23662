//! SQL query builders.
//!
//! Generates the queries the aggregator needs from the store.
//! Actual execution is handled by the Python bridge.

use std::collections::HashMap;
use std::fmt;

use crate::error::AuditResult;
use crate::storage::models::{AuditStatus, RiskLevel};

pub const LISTINGS_TABLE: &str = "meli_listings";
pub const MASTER_TABLE: &str = "master_products";
pub const AUDIT_TABLE: &str = "compliance_audit";

/// Exact-count query against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountQuery {
    /// Every scraped listing.
    Listings,
    /// Audit rows with the given status.
    Status(AuditStatus),
    /// Audit rows with the given stored risk level.
    Risk(RiskLevel),
}

/// Dashboard counters and the exact-count query behind each.
pub const DASHBOARD_COUNTS: [(&str, CountQuery); 6] = [
    ("scanned", CountQuery::Listings),
    ("active", CountQuery::Status(AuditStatus::Pending)),
    ("cleaned", CountQuery::Status(AuditStatus::Reported)),
    ("high_risk", CountQuery::Risk(RiskLevel::High)),
    ("medium_risk", CountQuery::Risk(RiskLevel::Medium)),
    ("low_risk", CountQuery::Risk(RiskLevel::Low)),
];

impl CountQuery {
    /// Query behind a dashboard counter name such as `high_risk`.
    pub fn for_counter(name: &str) -> Option<Self> {
        DASHBOARD_COUNTS
            .iter()
            .find(|(counter, _)| *counter == name)
            .map(|(_, query)| *query)
    }

    /// Render as a `SELECT COUNT(*)` statement.
    pub fn to_sql(&self) -> String {
        match self {
            CountQuery::Listings => format!("SELECT COUNT(*) FROM {}", LISTINGS_TABLE),
            CountQuery::Status(status) => format!(
                "SELECT COUNT(*) FROM {} WHERE status = '{}'",
                AUDIT_TABLE,
                status.as_str()
            ),
            CountQuery::Risk(risk) => format!(
                "SELECT COUNT(*) FROM {} WHERE risk_level = '{}'",
                AUDIT_TABLE,
                risk.as_store_str()
            ),
        }
    }
}

/// Parse the bridge's exact counts, keyed by dashboard counter name.
///
/// Unknown counter names are logged and skipped.
pub fn parse_dashboard_counts(json: &str) -> AuditResult<Vec<(CountQuery, u64)>> {
    let raw: HashMap<String, u64> = serde_json::from_str(json)?;
    let mut counts = Vec::with_capacity(raw.len());
    for (name, n) in raw {
        match CountQuery::for_counter(&name) {
            Some(query) => counts.push((query, n)),
            None => log::warn!("COUNT_IGNORED counter={:?} count={}", name, n),
        }
    }
    Ok(counts)
}

impl fmt::Display for CountQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountQuery::Listings => write!(f, "listings"),
            CountQuery::Status(status) => write!(f, "status={}", status.as_str()),
            CountQuery::Risk(risk) => write!(f, "risk_level={}", risk.as_store_str()),
        }
    }
}

/// Get the list of audit columns selected alongside the joined tables.
pub fn get_audit_columns() -> Vec<&'static str> {
    vec![
        "id",
        "listing_id",
        "master_product_id",
        "match_level",
        "fraud_score",
        "risk_level",
        "status",
        "violation_details",
        "processed_at",
    ]
}

/// Build the paged joined select, newest first.
///
/// Listing and master product rows are nested as JSON objects under
/// `meli_listings` and `master_products`, matching `JoinedAuditRow`.
pub fn build_audit_page_query(offset: usize, limit: usize) -> String {
    let columns: Vec<String> = get_audit_columns()
        .iter()
        .map(|c| format!("a.{}", c))
        .collect();

    format!(
        "SELECT {}, to_jsonb(l) AS {}, to_jsonb(m) AS {} \
         FROM {} a \
         LEFT JOIN {} l ON l.id = a.listing_id \
         LEFT JOIN {} m ON m.id = a.master_product_id \
         ORDER BY a.processed_at DESC \
         LIMIT {} OFFSET {}",
        columns.join(", "),
        LISTINGS_TABLE,
        MASTER_TABLE,
        AUDIT_TABLE,
        LISTINGS_TABLE,
        MASTER_TABLE,
        limit,
        offset
    )
}
