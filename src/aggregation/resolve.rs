//! Raw row to `ProductAudit` resolution.

use crate::audit::product::ProductAudit;
use crate::classification::risk::risk_bucket;
use crate::classification::violation::{classify_violation_logged, ComplianceFlags};
use crate::evaluation::fields::evaluate_fields_logged;
use crate::logging::structured::LogContext;
use crate::storage::models::{JoinedAuditRow, ListingRecord};

const UNKNOWN_LISTING: &str = "Unknown Listing";
const UNKNOWN_SELLER: &str = "Unknown Seller";
const NA: &str = "N/A";

/// Resolve one joined row into a fully-evaluated audit.
///
/// Deterministic: the same row always produces an identical audit.
pub fn resolve_audit(row: &JoinedAuditRow, ctx: &LogContext) -> ProductAudit {
    let audit = &row.audit;
    let listing = row.listing.as_ref();
    let master = row.master.as_ref();

    let fields = evaluate_fields_logged(audit, listing, master, ctx);
    let flags = ComplianceFlags::from_fields(&fields, audit.fraud_score);
    let violation_type = classify_violation_logged(&flags, ctx);

    ProductAudit {
        id: audit.id.clone(),
        meli_id: listing_text(listing, |l| l.meli_id.as_ref(), NA),
        title: listing_text(listing, |l| l.title.as_ref(), UNKNOWN_LISTING),
        seller: listing_text(listing, |l| l.seller_name.as_ref(), UNKNOWN_SELLER),
        seller_location: listing_text(listing, |l| l.seller_location.as_ref(), NA),
        price: listing.and_then(|l| l.price).unwrap_or(0.0),
        thumbnail: listing.and_then(|l| l.thumbnail.clone()),
        url: listing_text(listing, |l| l.url.as_ref(), "#"),
        match_level: audit.match_level,
        fraud_score: audit.fraud_score,
        risk_level: audit.risk_level,
        risk_bucket: risk_bucket(audit.fraud_score),
        status: audit.status,
        violation_type,
        fields,
        master_product: master.cloned(),
        violation_details: audit.violation_details.clone(),
        processed_at: audit.processed_at,
    }
}

fn listing_text(
    listing: Option<&ListingRecord>,
    pick: impl Fn(&ListingRecord) -> Option<&String>,
    fallback: &str,
) -> String {
    listing
        .and_then(pick)
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}
