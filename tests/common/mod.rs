#![allow(dead_code)]

use brandguard_core::aggregation::resolve_audit;
use brandguard_core::logging::structured::LogContext;
use brandguard_core::storage::{
    AuditStatus, JoinedAuditRow, ListingRecord, MasterProductRecord, RawAuditRecord, RiskLevel,
};
use brandguard_core::ProductAudit;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

/// Joined row with a listing and master product, processed `minutes_ago`
/// before a fixed reference time.
pub fn make_row(id: &str, fraud_score: u8, risk: RiskLevel, minutes_ago: i64) -> JoinedAuditRow {
    let base = Utc.with_ymd_and_hms(2026, 1, 29, 12, 0, 0).unwrap();
    JoinedAuditRow {
        audit: RawAuditRecord {
            id: id.to_string(),
            listing_id: Some(format!("MLA{}", id)),
            master_product_id: Some("SKU-1".to_string()),
            fraud_score,
            risk_level: risk,
            status: AuditStatus::Pending,
            violation_details: json!({}),
            processed_at: Some(base - Duration::minutes(minutes_ago)),
            ..Default::default()
        },
        listing: Some(ListingRecord {
            meli_id: Some(format!("MLA{}", id)),
            title: Some(format!("Alimento Perro {}", id)),
            seller_name: Some("PETSHOP_SUR".to_string()),
            seller_location: Some("Cordoba".to_string()),
            price: Some(20000.0),
            url: Some(format!("https://articulo.example/MLA{}", id)),
            ..Default::default()
        }),
        master: Some(MasterProductRecord {
            id: Some("SKU-1".to_string()),
            product_name: Some("Alimento Perro Adulto 15kg".to_string()),
            brand: Some("Vitalcan".to_string()),
            list_price: Some(18000.0),
            fc_net: Some(15.0),
            ean: Some("7790000000001".to_string()),
            units_per_pack: Some(1),
        }),
    }
}

pub fn with_details(mut row: JoinedAuditRow, details: Value) -> JoinedAuditRow {
    row.audit.violation_details = details;
    row
}

pub fn with_seller(mut row: JoinedAuditRow, seller: &str) -> JoinedAuditRow {
    if let Some(listing) = row.listing.as_mut() {
        listing.seller_name = Some(seller.to_string());
    }
    row
}

pub fn with_price(mut row: JoinedAuditRow, price: f64) -> JoinedAuditRow {
    if let Some(listing) = row.listing.as_mut() {
        listing.price = Some(price);
    }
    row
}

pub fn with_status(mut row: JoinedAuditRow, status: AuditStatus) -> JoinedAuditRow {
    row.audit.status = status;
    row
}

pub fn resolve(row: &JoinedAuditRow) -> ProductAudit {
    resolve_audit(row, &LogContext::new("test-fetch"))
}

pub fn resolve_all(rows: &[JoinedAuditRow]) -> Vec<ProductAudit> {
    rows.iter().map(resolve).collect()
}
