//! Database models for audit storage.
//!
//! These models represent rows of the `meli_listings`, `master_products` and
//! `compliance_audit` tables as returned by the joined select. All of them
//! are read-only inputs: the engine never writes back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Confidence tier that a listing is linked to the right master product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "u8")]
pub enum MatchLevel {
    #[default]
    Unidentified = 0,
    Ean = 1,
    Fuzzy = 2,
    Suspicious = 3,
}

impl MatchLevel {
    /// Map a raw integer, defaulting out-of-range values to `Unidentified`.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            0 => MatchLevel::Unidentified,
            1 => MatchLevel::Ean,
            2 => MatchLevel::Fuzzy,
            3 => MatchLevel::Suspicious,
            other => {
                log::warn!("DATA_INTEGRITY_DEFAULT field=match_level value={}", other);
                MatchLevel::Unidentified
            }
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchLevel::Unidentified => "Unidentified",
            MatchLevel::Ean => "EAN",
            MatchLevel::Fuzzy => "Fuzzy",
            MatchLevel::Suspicious => "Suspicious",
        }
    }
}

impl From<Option<i64>> for MatchLevel {
    fn from(raw: Option<i64>) -> Self {
        raw.map(MatchLevel::from_raw).unwrap_or_default()
    }
}

impl From<MatchLevel> for u8 {
    fn from(level: MatchLevel) -> Self {
        level.as_u8()
    }
}

/// Coarse risk classification.
///
/// The store persists the Spanish labels (`Alto`, `Medio`, `Bajo`); the
/// English names are accepted as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub enum RiskLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Parse a stored label, defaulting unknown values to `Low`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "alto" | "high" => RiskLevel::High,
            "medio" | "medium" => RiskLevel::Medium,
            "bajo" | "low" => RiskLevel::Low,
            other => {
                log::warn!("DATA_INTEGRITY_DEFAULT field=risk_level value={:?}", other);
                RiskLevel::Low
            }
        }
    }

    /// The label persisted in `compliance_audit.risk_level`.
    pub fn as_store_str(self) -> &'static str {
        match self {
            RiskLevel::High => "Alto",
            RiskLevel::Medium => "Medio",
            RiskLevel::Low => "Bajo",
        }
    }
}

impl From<Option<String>> for RiskLevel {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(RiskLevel::from_label).unwrap_or_default()
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_store_str())
    }
}

/// Review status of an audit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum AuditStatus {
    #[default]
    Pending,
    Reported,
    Clean,
}

impl AuditStatus {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "PENDING" => AuditStatus::Pending,
            "REPORTED" => AuditStatus::Reported,
            "CLEAN" => AuditStatus::Clean,
            other => {
                log::warn!("DATA_INTEGRITY_DEFAULT field=status value={:?}", other);
                AuditStatus::Pending
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AuditStatus::Pending => "PENDING",
            AuditStatus::Reported => "REPORTED",
            AuditStatus::Clean => "CLEAN",
        }
    }
}

impl From<Option<String>> for AuditStatus {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map(AuditStatus::from_label).unwrap_or_default()
    }
}

impl From<AuditStatus> for String {
    fn from(status: AuditStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A scraped marketplace listing (`meli_listings`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingRecord {
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub meli_id: Option<String>,
    pub title: Option<String>,
    pub seller_name: Option<String>,
    pub seller_location: Option<String>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
    pub ean_published: Option<String>,
    pub brand_detected: Option<String>,
    pub status_publicacion: Option<String>,
}

/// Canonical reference product (`master_products`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterProductRecord {
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    pub product_name: Option<String>,
    pub brand: Option<String>,
    pub list_price: Option<f64>,
    /// Net fill content in kg.
    pub fc_net: Option<f64>,
    pub ean: Option<String>,
    pub units_per_pack: Option<u32>,
}

/// One `compliance_audit` row as produced by the enrichment pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAuditRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub listing_id: Option<String>,
    #[serde(deserialize_with = "deserialize_opt_id")]
    pub master_product_id: Option<String>,
    pub match_level: MatchLevel,
    #[serde(deserialize_with = "deserialize_score")]
    pub fraud_score: u8,
    pub risk_level: RiskLevel,
    pub status: AuditStatus,
    pub violation_details: Value,
    pub processed_at: Option<DateTime<Utc>>,
}

/// Audit row joined with its listing and (optional) master product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinedAuditRow {
    #[serde(flatten)]
    pub audit: RawAuditRecord,
    #[serde(rename = "meli_listings", default)]
    pub listing: Option<ListingRecord>,
    #[serde(rename = "master_products", default)]
    pub master: Option<MasterProductRecord>,
}

/// Accept string or numeric primary keys.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Nullable foreign key; numbers are stringified, empty strings read as absent.
fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Clamp a stored score into 0..=100. Numeric strings are parsed; null and
/// anything else non-numeric become 0.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Null => return Ok(0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match raw {
        Some(v) if v.is_finite() => {
            if !(0.0..=100.0).contains(&v) {
                log::warn!("DATA_INTEGRITY_DEFAULT field=fraud_score value={}", v);
            }
            v.round().clamp(0.0, 100.0) as u8
        }
        other => {
            log::warn!("DATA_INTEGRITY_DEFAULT field=fraud_score value={:?}", other);
            0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_level_out_of_range_defaults() {
        assert_eq!(MatchLevel::from_raw(2), MatchLevel::Fuzzy);
        assert_eq!(MatchLevel::from_raw(7), MatchLevel::Unidentified);
        assert_eq!(MatchLevel::from_raw(-1), MatchLevel::Unidentified);
    }

    #[test]
    fn test_risk_level_labels() {
        assert_eq!(RiskLevel::from_label("Alto"), RiskLevel::High);
        assert_eq!(RiskLevel::from_label("medium"), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_label("Bajo"), RiskLevel::Low);
        assert_eq!(RiskLevel::from_label("Extremo"), RiskLevel::Low);
        assert_eq!(RiskLevel::High.as_store_str(), "Alto");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AuditStatus::from_label("reported"), AuditStatus::Reported);
        assert_eq!(AuditStatus::from_label("???"), AuditStatus::Pending);
    }

    #[test]
    fn test_joined_row_from_store_json() {
        let row: JoinedAuditRow = serde_json::from_value(json!({
            "id": "a-1",
            "match_level": 9,
            "fraud_score": 140,
            "risk_level": "Medio",
            "status": "REPORTED",
            "violation_details": {"missing_ean": true},
            "processed_at": "2026-01-29T10:00:00Z",
            "meli_listings": {"meli_id": "MLA1", "title": "Alimento 15kg", "price": 1500.0},
            "master_products": null
        }))
        .unwrap();

        assert_eq!(row.audit.id, "a-1");
        assert_eq!(row.audit.match_level, MatchLevel::Unidentified);
        assert_eq!(row.audit.fraud_score, 100);
        assert_eq!(row.audit.risk_level, RiskLevel::Medium);
        assert_eq!(row.audit.status, AuditStatus::Reported);
        assert_eq!(row.listing.unwrap().meli_id.as_deref(), Some("MLA1"));
        assert!(row.master.is_none());
    }

    #[test]
    fn test_missing_columns_default() {
        let row: JoinedAuditRow = serde_json::from_value(json!({"id": "a-2"})).unwrap();
        assert_eq!(row.audit.match_level, MatchLevel::Unidentified);
        assert_eq!(row.audit.risk_level, RiskLevel::Low);
        assert_eq!(row.audit.status, AuditStatus::Pending);
        assert_eq!(row.audit.fraud_score, 0);
        assert!(row.audit.violation_details.is_null());
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        let row: JoinedAuditRow = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(row.audit.id, "42");
    }

    #[test]
    fn test_master_product_foreign_key() {
        let row: JoinedAuditRow =
            serde_json::from_value(json!({"id": "a", "master_product_id": "m-1"})).unwrap();
        assert_eq!(row.audit.master_product_id.as_deref(), Some("m-1"));
    }

    #[test]
    fn test_numeric_foreign_keys_do_not_fail_the_batch() {
        let rows: Vec<JoinedAuditRow> = serde_json::from_value(json!([
            {"id": "a", "listing_id": 11, "master_product_id": 7, "master_products": {"id": 7}},
            {"id": "b", "meli_listings": {"meli_id": 123456}}
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].audit.listing_id.as_deref(), Some("11"));
        assert_eq!(rows[0].audit.master_product_id.as_deref(), Some("7"));
        assert_eq!(rows[0].master.as_ref().unwrap().id.as_deref(), Some("7"));
        assert_eq!(rows[1].listing.as_ref().unwrap().meli_id.as_deref(), Some("123456"));
    }

    #[test]
    fn test_string_fraud_score() {
        let row: JoinedAuditRow = serde_json::from_value(json!({"id": "a", "fraud_score": "75"})).unwrap();
        assert_eq!(row.audit.fraud_score, 75);

        let row: JoinedAuditRow = serde_json::from_value(json!({"id": "b", "fraud_score": "high"})).unwrap();
        assert_eq!(row.audit.fraud_score, 0);

        let row: JoinedAuditRow = serde_json::from_value(json!({"id": "c", "fraud_score": [1]})).unwrap();
        assert_eq!(row.audit.fraud_score, 0);
    }
}
