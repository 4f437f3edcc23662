//! Violation type classification.
//!
//! Determines the single violation tag shown for an audit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::audit::fields::FieldComparisons;
use crate::config::HIGH_RISK_THRESHOLD;
use crate::logging::structured::LogContext;

/// Violation tag for an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationType {
    Restricted,
    Price,
    BrandMismatch,
    Suspicious,
    Inspected,
}

impl ViolationType {
    pub fn as_str(self) -> &'static str {
        match self {
            ViolationType::Restricted => "RESTRICTED",
            ViolationType::Price => "PRICE",
            ViolationType::BrandMismatch => "BRAND_MISMATCH",
            ViolationType::Suspicious => "SUSPICIOUS",
            ViolationType::Inspected => "INSPECTED",
        }
    }

    pub fn is_violation(self) -> bool {
        self != ViolationType::Inspected
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean compliance checks the classifier reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplianceFlags {
    pub publishable_ok: bool,
    pub price_ok: bool,
    pub brand_ok: bool,
    pub fraud_score: u8,
}

impl ComplianceFlags {
    pub fn from_fields(fields: &FieldComparisons, fraud_score: u8) -> Self {
        Self {
            publishable_ok: !fields.publishable.is_rejected(),
            price_ok: !fields.price.is_rejected(),
            brand_ok: !fields.brand.is_rejected(),
            fraud_score,
        }
    }
}

struct ViolationRule {
    tag: ViolationType,
    matches: fn(&ComplianceFlags) -> bool,
}

/// First match wins; no match means `Inspected`.
const VIOLATION_PRECEDENCE: [ViolationRule; 4] = [
    ViolationRule {
        tag: ViolationType::Restricted,
        matches: |f| !f.publishable_ok,
    },
    ViolationRule {
        tag: ViolationType::Price,
        matches: |f| !f.price_ok,
    },
    ViolationRule {
        tag: ViolationType::BrandMismatch,
        matches: |f| !f.brand_ok,
    },
    ViolationRule {
        tag: ViolationType::Suspicious,
        matches: |f| f.fraud_score > HIGH_RISK_THRESHOLD,
    },
];

/// Classify compliance flags into one violation tag.
///
/// # Decision List
/// 1. Publishable check fails -> Restricted
/// 2. Price check fails -> Price
/// 3. Brand check fails -> BrandMismatch
/// 4. fraud_score > 60 -> Suspicious
/// 5. Otherwise -> Inspected
pub fn classify_violation(flags: &ComplianceFlags) -> ViolationType {
    VIOLATION_PRECEDENCE
        .iter()
        .find(|rule| (rule.matches)(flags))
        .map(|rule| rule.tag)
        .unwrap_or(ViolationType::Inspected)
}

/// Classify and log the decision under `ctx`.
pub fn classify_violation_logged(flags: &ComplianceFlags, ctx: &LogContext) -> ViolationType {
    let tag = classify_violation(flags);
    log::debug!(
        "{} VIOLATION_CLASSIFIED type={} publishable_ok={} price_ok={} brand_ok={} fraud_score={}",
        ctx,
        tag,
        flags.publishable_ok,
        flags.price_ok,
        flags.brand_ok,
        flags.fraud_score
    );
    tag
}
