//! Dashboard filter by violation type.

use serde::{Deserialize, Serialize};

use crate::audit::product::ProductAudit;
use crate::classification::violation::ViolationType;
use crate::storage::models::AuditStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationFilter {
    /// Everything not yet cleared.
    #[default]
    All,
    Price,
    BrandMismatch,
    Restricted,
    Suspicious,
    /// Everything, cleared or not.
    TotalAnalyzed,
}

impl ViolationFilter {
    pub fn accepts(self, audit: &ProductAudit) -> bool {
        let wanted = match self {
            ViolationFilter::All => return audit.status != AuditStatus::Clean,
            ViolationFilter::TotalAnalyzed => return true,
            ViolationFilter::Price => ViolationType::Price,
            ViolationFilter::BrandMismatch => ViolationType::BrandMismatch,
            ViolationFilter::Restricted => ViolationType::Restricted,
            ViolationFilter::Suspicious => ViolationType::Suspicious,
        };
        audit.violation_type == wanted
    }
}

/// Audits matching `filter`, in input order.
pub fn filter_by_violation(audits: &[ProductAudit], filter: ViolationFilter) -> Vec<&ProductAudit> {
    audits.iter().filter(|a| filter.accepts(a)).collect()
}
