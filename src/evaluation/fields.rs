//! Field Evaluator entry point.
//!
//! Pure and deterministic: the same record always yields the same seven
//! comparisons, in registry order.

use crate::audit::fields::FieldComparisons;
use crate::evaluation::rules::{RuleInput, FIELD_RULES};
use crate::extraction::details::ViolationDetails;
use crate::logging::structured::LogContext;
use crate::storage::models::{ListingRecord, MasterProductRecord, RawAuditRecord};

/// Evaluate all compliance fields for one audit record.
pub fn evaluate_fields(
    audit: &RawAuditRecord,
    listing: Option<&ListingRecord>,
    master: Option<&MasterProductRecord>,
) -> FieldComparisons {
    let input = RuleInput {
        listing,
        master,
        details: ViolationDetails::new(&audit.violation_details),
    };
    FieldComparisons::from_ordered(std::array::from_fn(|i| FIELD_RULES[i].apply(&input)))
}

/// Same as [`evaluate_fields`], logging each flagged field under `ctx`.
pub fn evaluate_fields_logged(
    audit: &RawAuditRecord,
    listing: Option<&ListingRecord>,
    master: Option<&MasterProductRecord>,
    ctx: &LogContext,
) -> FieldComparisons {
    let fields = evaluate_fields(audit, listing, master);
    for comparison in fields.iter().filter(|c| c.status.is_flagged()) {
        log::debug!(
            "{} FIELD_EVALUATED field={} status={:?} impact={}",
            ctx,
            comparison.field,
            comparison.status,
            comparison.score_impact
        );
    }
    fields
}
