//! Analytics summary over resolved audits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::audit::product::ProductAudit;
use crate::classification::violation::ViolationType;
use crate::extraction::details::ViolationDetails;
use crate::storage::models::AuditStatus;

/// Seller ranked by active violation count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerViolations {
    pub seller: String,
    pub count: usize,
    /// Share of all active violations.
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationTypeCounts {
    pub price: usize,
    pub brand: usize,
    pub restricted: usize,
    pub suspicious: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub active: usize,
    pub compliance_rate: f64,
    pub top_sellers: Vec<SellerViolations>,
    pub type_counts: ViolationTypeCounts,
    /// Mean percent below the minimum across PRICE violations.
    pub avg_price_deviation: f64,
}

/// Active means still a violation: not cleared, and classified as one.
pub fn is_active_violation(audit: &ProductAudit) -> bool {
    audit.status != AuditStatus::Clean && audit.violation_type.is_violation()
}

/// Percent the listing price sits below its minimum, when both are known.
pub fn price_deviation_pct(audit: &ProductAudit) -> Option<f64> {
    let minimum = ViolationDetails::new(&audit.violation_details)
        .low_price()
        .and_then(|low| low.min_allowed)
        .or_else(|| audit.master_product.as_ref().and_then(|m| m.list_price))?;
    if minimum <= 0.0 || audit.price <= 0.0 {
        return None;
    }
    Some((minimum - audit.price) / minimum * 100.0)
}

impl AnalyticsSummary {
    pub fn from_audits(audits: &[ProductAudit], top_n: usize) -> Self {
        let total = audits.len();
        let active: Vec<&ProductAudit> = audits.iter().filter(|a| is_active_violation(a)).collect();
        let clean = total - active.len();
        let compliance_rate = if total > 0 {
            clean as f64 / total as f64 * 100.0
        } else {
            100.0
        };

        let mut seller_counts: HashMap<&str, usize> = HashMap::new();
        for audit in &active {
            if !audit.seller.is_empty() {
                *seller_counts.entry(audit.seller.as_str()).or_default() += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = seller_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        let top_sellers = ranked
            .into_iter()
            .take(top_n)
            .map(|(seller, count)| SellerViolations {
                seller: seller.to_string(),
                count,
                percentage: count as f64 / active.len() as f64 * 100.0,
            })
            .collect();

        let mut type_counts = ViolationTypeCounts::default();
        for audit in &active {
            match audit.violation_type {
                ViolationType::Price => type_counts.price += 1,
                ViolationType::BrandMismatch => type_counts.brand += 1,
                ViolationType::Restricted => type_counts.restricted += 1,
                ViolationType::Suspicious => type_counts.suspicious += 1,
                ViolationType::Inspected => {}
            }
        }

        let deviations: Vec<f64> = active
            .iter()
            .filter(|a| a.violation_type == ViolationType::Price)
            .filter_map(|a| price_deviation_pct(a))
            .collect();
        let avg_price_deviation = if deviations.is_empty() {
            0.0
        } else {
            deviations.iter().sum::<f64>() / deviations.len() as f64
        };

        Self {
            total,
            active: active.len(),
            compliance_rate,
            top_sellers,
            type_counts,
            avg_price_deviation,
        }
    }
}
