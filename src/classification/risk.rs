//! Threshold risk bucket.
//!
//! Re-derives a risk level from the fraud score. This is independent of the
//! `risk_level` the pipeline stored, which used different boundaries.

use crate::config::{HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
use crate::storage::models::RiskLevel;

/// `> 60` High, `31..=60` Medium, `<= 30` Low.
pub fn risk_bucket(fraud_score: u8) -> RiskLevel {
    if fraud_score > HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if fraud_score > MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
