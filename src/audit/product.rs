//! Resolved product audit and dashboard summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::audit::fields::FieldComparisons;
use crate::classification::violation::ViolationType;
use crate::storage::models::{AuditStatus, MasterProductRecord, MatchLevel, RiskLevel};

/// One fully-resolved audit, rebuilt on every fetch.
///
/// `risk_level` is the value the pipeline stored; `risk_bucket` is
/// re-derived from `fraud_score`. The two may disagree and both are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAudit {
    pub id: String,
    pub meli_id: String,
    pub title: String,
    pub seller: String,
    pub seller_location: String,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub url: String,

    pub match_level: MatchLevel,
    pub fraud_score: u8,
    pub risk_level: RiskLevel,
    pub risk_bucket: RiskLevel,
    pub status: AuditStatus,
    pub violation_type: ViolationType,

    pub fields: FieldComparisons,
    pub master_product: Option<MasterProductRecord>,
    pub violation_details: Value,
    pub processed_at: Option<DateTime<Utc>>,
}

impl ProductAudit {
    /// Brand used for sorting and grouping.
    pub fn brand_name(&self) -> &str {
        self.master_product
            .as_ref()
            .and_then(|m| m.brand.as_deref())
            .filter(|b| !b.is_empty())
            .unwrap_or("Unidentified")
    }

    /// Stored and derived risk signals disagree.
    pub fn has_risk_disagreement(&self) -> bool {
        self.risk_level != self.risk_bucket
    }
}

/// Dashboard counters for one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub scanned: u64,
    pub active: u64,
    pub cleaned: u64,
    pub high_risk: u64,
    pub medium_risk: u64,
    pub low_risk: u64,
    pub last_audit: Option<DateTime<Utc>>,
}
